/*!
Semi-linear regression: a [BasisExpander] followed by [BayesianRidge] regression on the
expanded inputs.

The model is linear in its weights but not in its input, so it can fit curves while keeping
the closed form Gaussian posterior of linear regression.

```
use semilinear::basis::{BasisConfig, BasisFamily};
use semilinear::bayesian_ridge::Prior;
use semilinear::model::SemiLinearModel;

// a noise free sine wave with a trend
let inputs: Vec<f64> = (0..40).map(|i| i as f64 * 0.25).collect();
let targets: Vec<f64> = inputs.iter().map(|x| (0.5 * x) + x.sin()).collect();

let basis = BasisConfig::polynomial(1)
    .with_family(BasisFamily::Sinusoid { frequencies: vec![ 1.0, 2.0, 3.0, 4.0 ] });
let model = SemiLinearModel::fit(&inputs, &targets, basis, Prior::new(1e-3, 100.0).unwrap(), 1e-10)
    .unwrap();
let prediction = model.predict(&inputs).unwrap();
assert_eq!(prediction.len(), 40);
```
*/

use crate::basis::{BasisConfig, BasisExpander};
use crate::bayesian_ridge::{BayesianRidge, Prior};
use crate::config::RegressionConfig;
use crate::error::Result;
use crate::prediction::{JointPrediction, PointPrediction};

/**
 * A Bayesian ridge regression over a basis expansion of scalar inputs.
 */
#[derive(Clone, Debug)]
pub struct SemiLinearModel {
    basis: BasisExpander,
    ridge: BayesianRidge,
}

impl SemiLinearModel {
    /**
     * Records the normalization of the inputs, expands them into a design matrix and
     * computes the posterior over the basis weights.
     *
     * Fails for the same reasons as [BasisExpander::fit] and [BayesianRidge::fit].
     */
    pub fn fit(
        inputs: &[f64],
        targets: &[f64],
        basis: BasisConfig,
        prior: Prior,
        jitter: f64,
    ) -> Result<SemiLinearModel> {
        let basis = BasisExpander::fit(basis, inputs)?;
        let ridge = BayesianRidge::fit(&basis.design_matrix(inputs), targets, prior, jitter)?;
        Ok(SemiLinearModel { basis, ridge })
    }

    /**
     * Fits with the basis, prior and jitter of the configuration.
     */
    pub fn from_config(
        inputs: &[f64],
        targets: &[f64],
        config: &RegressionConfig,
    ) -> Result<SemiLinearModel> {
        config.validate()?;
        SemiLinearModel::fit(
            inputs,
            targets,
            config.basis.clone(),
            config.prior()?,
            config.jitter,
        )
    }

    pub fn basis(&self) -> &BasisExpander {
        &self.basis
    }

    pub fn ridge(&self) -> &BayesianRidge {
        &self.ridge
    }

    /**
     * Predicts the mean and variance of a new observation at each input.
     */
    pub fn predict(&self, inputs: &[f64]) -> Result<PointPrediction> {
        self.ridge.predict(&self.basis.design_matrix(inputs))
    }

    /**
     * Predicts the mean and joint covariance of the function at each input.
     */
    pub fn predict_joint(&self, inputs: &[f64]) -> Result<JointPrediction> {
        self.ridge.predict_joint(&self.basis.design_matrix(inputs))
    }
}
