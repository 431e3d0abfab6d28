/*!
Basis expansion of scalar inputs into design matrices.

A linear model `y = w0 * φ0(x) + w1 * φ1(x) + ...` can represent non linear relationships
between `x` and `y` by choosing non linear basis functions `φ`. This module supports two
families of basis functions, which can be concatenated:

- polynomial: `1, z, z^2, ..., z^degree`
- sinusoid: `sin(f1 * z), cos(f1 * z), sin(f2 * z), cos(f2 * z), ...`

where `z` is the input standardised to zero mean and unit scale. Raising raw inputs in the
hundreds to the 8th power quickly produces columns that differ by many orders of magnitude,
so the [Normalization] recorded from the training inputs is applied to every input the
expander sees, at training and at prediction time.

```
use semilinear::basis::{BasisConfig, BasisExpander};

let inputs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
let expander = BasisExpander::fit(BasisConfig::polynomial(2), &inputs).unwrap();
let design_matrix = expander.design_matrix(&inputs);
// one row per input, one column each for 1, z and z^2
assert_eq!(design_matrix.size(), (5, 3));
// the middle input is the mean so standardises to 0
assert_eq!(design_matrix.get(2, 1), 0.0);
```
*/

use crate::error::{Error, Result};
use crate::linear_algebra;
use crate::matrices::Matrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/**
 * A family of basis functions.
 */
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum BasisFamily {
    /// Powers of the input from 0 up to and including the degree
    Polynomial {
        /// Highest power, a degree of 0 gives a single constant column
        degree: usize,
    },
    /// A sine and cosine column for each frequency
    Sinusoid {
        /// Angular frequencies applied to the standardised input
        frequencies: Vec<f64>,
    },
}

impl BasisFamily {
    /**
     * The number of design matrix columns this family produces.
     */
    pub fn columns(&self) -> usize {
        match self {
            BasisFamily::Polynomial { degree } => degree + 1,
            BasisFamily::Sinusoid { frequencies } => 2 * frequencies.len(),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            BasisFamily::Polynomial { .. } => Ok(()),
            BasisFamily::Sinusoid { frequencies } => {
                if frequencies.is_empty() {
                    return Err(Error::Configuration(
                        "Sinusoid basis needs at least one frequency".to_string(),
                    ));
                }
                match frequencies.iter().find(|f| !f.is_finite()) {
                    Some(f) => Err(Error::Configuration(format!(
                        "Sinusoid frequencies must be finite, but found {}",
                        f
                    ))),
                    None => Ok(()),
                }
            }
        }
    }

    fn push_columns(&self, z: f64, row: &mut Vec<f64>) {
        match self {
            BasisFamily::Polynomial { degree } => {
                let mut power = 1.0;
                for _ in 0..=*degree {
                    row.push(power);
                    power *= z;
                }
            }
            BasisFamily::Sinusoid { frequencies } => {
                for frequency in frequencies {
                    let (sin, cos) = (frequency * z).sin_cos();
                    row.push(sin);
                    row.push(cos);
                }
            }
        }
    }
}

/**
 * An ordered list of basis families, whose columns are concatenated in order.
 */
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BasisConfig {
    pub families: Vec<BasisFamily>,
}

impl BasisConfig {
    pub fn new(families: Vec<BasisFamily>) -> BasisConfig {
        BasisConfig { families }
    }

    /**
     * A polynomial basis of `1, z, ..., z^degree`.
     */
    pub fn polynomial(degree: usize) -> BasisConfig {
        BasisConfig::new(vec![BasisFamily::Polynomial { degree }])
    }

    /**
     * A sinusoidal basis. Note that this has no constant column, so for data that is
     * not zero mean combine it with a polynomial family using [with_family](BasisConfig::with_family).
     */
    pub fn sinusoid(frequencies: Vec<f64>) -> BasisConfig {
        BasisConfig::new(vec![BasisFamily::Sinusoid { frequencies }])
    }

    /**
     * Appends another family's columns after the existing ones.
     *
     * ```
     * use semilinear::basis::{BasisConfig, BasisFamily};
     * let config = BasisConfig::polynomial(1)
     *     .with_family(BasisFamily::Sinusoid { frequencies: vec![1.0, 2.0] });
     * assert_eq!(config.columns(), 6);
     * ```
     */
    pub fn with_family(mut self, family: BasisFamily) -> BasisConfig {
        self.families.push(family);
        self
    }

    /**
     * The total number of design matrix columns.
     */
    pub fn columns(&self) -> usize {
        self.families.iter().map(BasisFamily::columns).sum()
    }

    /**
     * Returns a [Configuration](Error::Configuration) error if there are no families,
     * or a sinusoid family has no frequencies or a non finite frequency.
     */
    pub fn validate(&self) -> Result<()> {
        if self.families.is_empty() {
            return Err(Error::Configuration(
                "Basis needs at least one family of basis functions".to_string(),
            ));
        }
        self.families.iter().try_for_each(BasisFamily::validate)
    }
}

impl Default for BasisConfig {
    /**
     * A straight line, `1, z`.
     */
    fn default() -> Self {
        BasisConfig::polynomial(1)
    }
}

/**
 * The shift and scale that standardise raw inputs, `z = (x - mean) / scale`.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Normalization {
    mean: f64,
    scale: f64,
}

impl Normalization {
    /**
     * Leaves inputs unchanged.
     */
    pub fn identity() -> Normalization {
        Normalization {
            mean: 0.0,
            scale: 1.0,
        }
    }

    /**
     * Records the mean and population standard deviation of the inputs.
     *
     * Empty inputs, or inputs without a finite mean, give the identity normalization.
     * Inputs without any spread, such as a single input, have their scale set to 1 so
     * that they are only shifted.
     */
    pub fn from_inputs(inputs: &[f64]) -> Normalization {
        let mean = match linear_algebra::mean(inputs.iter().copied()) {
            Some(mean) if mean.is_finite() => mean,
            Some(mean) => {
                log::warn!(
                    "Inputs have a mean of {}, falling back to the identity normalization for {} inputs",
                    mean,
                    inputs.len()
                );
                return Normalization::identity();
            }
            None => return Normalization::identity(),
        };
        let scale = linear_algebra::variance(inputs.iter().copied())
            .map(f64::sqrt)
            .unwrap_or(1.0);
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            log::warn!(
                "Inputs have no spread to standardise by, falling back to a scale of 1 for {} inputs",
                inputs.len()
            );
            1.0
        };
        Normalization { mean, scale }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn normalize(&self, x: f64) -> f64 {
        (x - self.mean) / self.scale
    }
}

/**
 * A basis configuration together with the normalization of the inputs it was fitted on.
 *
 * Design matrices are recomputed on every call rather than cached, as the inputs of
 * each call are usually different.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct BasisExpander {
    config: BasisConfig,
    normalization: Normalization,
}

impl BasisExpander {
    /**
     * Validates the configuration and records the normalization of the training inputs.
     */
    pub fn fit(config: BasisConfig, training_inputs: &[f64]) -> Result<BasisExpander> {
        config.validate()?;
        check_finite(training_inputs)?;
        Ok(BasisExpander {
            config,
            normalization: Normalization::from_inputs(training_inputs),
        })
    }

    /**
     * Validates the configuration and uses an explicitly provided normalization.
     */
    pub fn with_normalization(
        config: BasisConfig,
        normalization: Normalization,
    ) -> Result<BasisExpander> {
        config.validate()?;
        Ok(BasisExpander {
            config,
            normalization,
        })
    }

    pub fn config(&self) -> &BasisConfig {
        &self.config
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /**
     * The number of columns of every design matrix this expander creates.
     */
    pub fn columns(&self) -> usize {
        self.config.columns()
    }

    /**
     * Creates the design matrix for the inputs, with a row for each input and a
     * column for each basis function.
     */
    pub fn design_matrix(&self, inputs: &[f64]) -> Matrix {
        let columns = self.columns();
        let mut values = Vec::with_capacity(inputs.len() * columns);
        for &x in inputs {
            let z = self.normalization.normalize(x);
            for family in &self.config.families {
                family.push_columns(z, &mut values);
            }
        }
        Matrix::from_flat_row_major((inputs.len(), columns), values)
    }
}

fn check_finite(inputs: &[f64]) -> Result<()> {
    match inputs.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(Error::Configuration(format!(
            "Inputs must be finite, but input {} was {}",
            index, inputs[index]
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_inputs_are_only_shifted() {
        let normalization = Normalization::from_inputs(&[4.0, 4.0, 4.0]);
        assert_eq!(normalization.mean(), 4.0);
        assert_eq!(normalization.scale(), 1.0);
        assert_eq!(Normalization::from_inputs(&[]), Normalization::identity());
    }

    #[test]
    fn rejects_non_finite_inputs() {
        let result = BasisExpander::fit(BasisConfig::polynomial(1), &[1.0, f64::NAN]);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
