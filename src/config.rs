/*!
The configuration surface shared by the fitters.

With the `serde` feature enabled, [RegressionConfig] can be deserialised from any serde data
format. Every field has a default, so a configuration file only needs to name the values it
changes. Deserialising does not validate, call [validate](RegressionConfig::validate)
afterwards (the fitters also validate what they use).

```
use semilinear::config::RegressionConfig;
use semilinear::basis::BasisConfig;

let config = RegressionConfig {
    basis: BasisConfig::polynomial(3),
    noise_precision: 25.0,
    ..RegressionConfig::default()
};
assert!(config.validate().is_ok());
assert_eq!(config.noise_variance(), 0.04);
```
*/

use crate::basis::BasisConfig;
use crate::bayesian_ridge::Prior;
use crate::error::{Result, require_non_negative};
use crate::gaussian_process::SquaredExponential;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Jitter used when none is configured
pub const DEFAULT_JITTER: f64 = 1e-10;

/// Roughly 95% of a Gaussian's probability mass lies within this many standard deviations
pub const DEFAULT_CONFIDENCE_Z: f64 = 1.96;

/**
 * The family of Gaussian Process kernel and its hyperparameters.
 */
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum KernelConfig {
    /// See [SquaredExponential]
    SquaredExponential {
        length_scale: f64,
        amplitude: f64,
    },
}

impl KernelConfig {
    /**
     * Creates the kernel, returning a [Configuration](crate::error::Error::Configuration) error for
     * invalid hyperparameters.
     */
    pub fn build(&self) -> Result<SquaredExponential> {
        match self {
            KernelConfig::SquaredExponential {
                length_scale,
                amplitude,
            } => SquaredExponential::new(*length_scale, *amplitude),
        }
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        KernelConfig::SquaredExponential {
            length_scale: 1.0,
            amplitude: 1.0,
        }
    }
}

/**
 * Every recognised option for fitting, predicting and reporting.
 */
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegressionConfig {
    /// Basis functions for Bayesian ridge regression
    pub basis: BasisConfig,
    /// Precision α of the prior on each basis weight
    pub prior_precision: f64,
    /// Precision β of the observation noise, for the Gaussian Process the noise variance is 1 / β
    pub noise_precision: f64,
    /// Gaussian Process kernel
    pub kernel: KernelConfig,
    /// Added to matrix diagonals before decomposing them
    pub jitter: f64,
    /// Number of standard deviations either side of the mean for confidence intervals
    pub confidence_z: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        RegressionConfig {
            basis: BasisConfig::default(),
            prior_precision: 1.0,
            noise_precision: 1.0,
            kernel: KernelConfig::default(),
            jitter: DEFAULT_JITTER,
            confidence_z: DEFAULT_CONFIDENCE_Z,
        }
    }
}

impl RegressionConfig {
    /**
     * Returns the first [Configuration](crate::error::Error::Configuration) error found in the basis,
     * prior, kernel, jitter or confidence z.
     */
    pub fn validate(&self) -> Result<()> {
        self.basis.validate()?;
        self.prior()?;
        self.kernel()?;
        require_non_negative("jitter", self.jitter)?;
        require_non_negative("confidence z", self.confidence_z)
    }

    /**
     * The prior for Bayesian ridge regression.
     */
    pub fn prior(&self) -> Result<Prior> {
        Prior::new(self.prior_precision, self.noise_precision)
    }

    /**
     * The kernel for Gaussian Process regression.
     */
    pub fn kernel(&self) -> Result<SquaredExponential> {
        self.kernel.build()
    }

    /**
     * The variance of the observation noise, `1 / noise_precision`.
     */
    pub fn noise_variance(&self) -> f64 {
        1.0 / self.noise_precision
    }
}
