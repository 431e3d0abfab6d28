/*!
Bayesian ridge regression with an analytical Gaussian posterior over the weights.

# Model

```text
y = Xw + ε,   ε ~ N(0, β⁻¹I)      noise with precision β
w ~ N(0, α⁻¹I)                    prior with precision α
```

where `X` is a design matrix of basis functions evaluated at the inputs, for instance from a
[BasisExpander](crate::basis::BasisExpander).

# Posterior

Because the prior and the noise are both Gaussian, the posterior over the weights is also
Gaussian, with

```text
Σ = (αI + βXᵀX)⁻¹
μ = βΣXᵀy
```

Rather than start with a prior and update it as data arrives, the posterior is computed
in one step from all the data, which is equivalent. The matrix `αI + βXᵀX` (the posterior
precision) is never inverted naively; it is Cholesky decomposed once, and both `μ` and `Σ`
are obtained through triangular solves against that factor.

The prior regularises the weights towards zero, so unlike plain least squares no separate
regularisation parameter is needed, and as `α` approaches 0 the posterior mean approaches the
least squares solution.

# Example

```
use semilinear::bayesian_ridge::{BayesianRidge, Prior};
use semilinear::matrices::Matrix;

// design matrix of [1, x] rows for x = 0, 1, 2
let design_matrix = Matrix::from(vec![
    vec![ 1.0, 0.0 ],
    vec![ 1.0, 1.0 ],
    vec![ 1.0, 2.0 ]]);
let targets = vec![ 1.0, 2.0, 3.0 ];
let prior = Prior::new(1e-6, 1.0).unwrap();
let model = BayesianRidge::fit(&design_matrix, &targets, prior, 0.0).unwrap();
// intercept and gradient of y = 1 + x
assert!((model.weights_mean()[0] - 1.0).abs() < 1e-4);
assert!((model.weights_mean()[1] - 1.0).abs() < 1e-4);

let prediction = model.predict(&Matrix::row(vec![ 1.0, 3.0 ])).unwrap();
assert!((prediction.mean()[0] - 4.0).abs() < 1e-4);
// never more confident than the noise allows
assert!(prediction.variance()[0] >= 1.0);
```
*/

use crate::distributions::MultivariateGaussian;
use crate::error::{Error, Result, require_non_negative, require_positive};
use crate::linear_algebra;
use crate::matrices::{Matrix, dot};
use crate::prediction::{JointPrediction, PointPrediction};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f64::consts::PI;

/**
 * Hyperparameters of a Bayesian ridge regression, fixed before fitting.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Prior {
    /**
     * Precision (inverse variance) α of the zero mean Gaussian prior on each weight.
     */
    pub precision: f64,
    /**
     * Precision (inverse variance) β of the Gaussian observation noise.
     */
    pub noise_precision: f64,
}

impl Prior {
    /**
     * Creates a prior, returning a [Configuration](Error::Configuration) error unless
     * `precision` is finite and at least 0 and `noise_precision` is finite and greater
     * than 0.
     */
    pub fn new(precision: f64, noise_precision: f64) -> Result<Prior> {
        let prior = Prior {
            precision,
            noise_precision,
        };
        prior.validate()?;
        Ok(prior)
    }

    pub fn validate(&self) -> Result<()> {
        require_non_negative("prior precision", self.precision)?;
        require_positive("noise precision", self.noise_precision)
    }

    /**
     * The variance β⁻¹ of the observation noise.
     */
    pub fn noise_variance(&self) -> f64 {
        1.0 / self.noise_precision
    }
}

impl Default for Prior {
    /**
     * Unit precision for both the weights and the noise, appropriate for standardised
     * inputs and targets of order 1.
     */
    fn default() -> Self {
        Prior {
            precision: 1.0,
            noise_precision: 1.0,
        }
    }
}

/**
 * A fitted Bayesian ridge regression, holding the Gaussian posterior over the weights.
 */
#[derive(Clone, Debug)]
pub struct BayesianRidge {
    prior: Prior,
    jitter: f64,
    weights_mean: Vec<f64>,
    weights_covariance: Matrix,
    log_evidence: f64,
}

impl BayesianRidge {
    /**
     * Computes the posterior over the weights for the design matrix and targets.
     *
     * The `jitter` is a regularisation floor added to the diagonal of the posterior
     * precision `αI + βXᵀX` before decomposing it, which matters when `α` is 0 and the
     * design matrix has collinear columns.
     *
     * # Errors
     *
     * - [ShapeMismatch](Error::ShapeMismatch) if there is not one target per design matrix row
     * - [Configuration](Error::Configuration) if the prior or jitter is invalid
     * - [SingularMatrix](Error::SingularMatrix) if the posterior precision is not positive
     * definite even with the jitter added
     */
    pub fn fit(
        design_matrix: &Matrix,
        targets: &[f64],
        prior: Prior,
        jitter: f64,
    ) -> Result<BayesianRidge> {
        prior.validate()?;
        require_non_negative("jitter", jitter)?;
        if targets.len() != design_matrix.rows() {
            return Err(Error::shape_mismatch(
                format!("{} targets, one per design matrix row", design_matrix.rows()),
                format!("{} targets", targets.len()),
            ));
        }
        let Prior {
            precision: alpha,
            noise_precision: beta,
        } = prior;

        // αI + βXᵀX
        let mut posterior_precision = design_matrix.gram().map(|x| x * beta);
        posterior_precision.add_diagonal_mut(alpha);
        let lower_triangular = linear_algebra::cholesky_with_jitter(
            &posterior_precision,
            jitter,
            "posterior precision matrix",
        )?;

        // μ = (αI + βXᵀX)⁻¹ βXᵀy
        let projected_targets: Vec<f64> = design_matrix
            .transpose()
            .multiply_column(targets)
            .into_iter()
            .map(|x| x * beta)
            .collect();
        let weights_mean = linear_algebra::cholesky_solve_vector(&lower_triangular, &projected_targets);
        let weights_covariance = linear_algebra::cholesky_inverse(&lower_triangular);

        let log_evidence = log_evidence(
            design_matrix,
            targets,
            &prior,
            &weights_mean,
            &lower_triangular,
        );
        log::debug!(
            "Fitted Bayesian ridge regression on {} rows of {} features, log evidence {:.4}",
            design_matrix.rows(),
            design_matrix.columns(),
            log_evidence
        );

        Ok(BayesianRidge {
            prior,
            jitter,
            weights_mean,
            weights_covariance,
            log_evidence,
        })
    }

    pub fn prior(&self) -> Prior {
        self.prior
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    /**
     * The number of features (design matrix columns) the model was fitted on.
     */
    pub fn features(&self) -> usize {
        self.weights_mean.len()
    }

    /**
     * The posterior mean μ of the weights.
     */
    pub fn weights_mean(&self) -> &[f64] {
        &self.weights_mean
    }

    /**
     * The posterior covariance Σ of the weights, symmetric and positive definite.
     */
    pub fn weights_covariance(&self) -> &Matrix {
        &self.weights_covariance
    }

    /**
     * The posterior over the weights, from which whole models can be drawn.
     */
    pub fn weights_distribution(&self) -> MultivariateGaussian {
        MultivariateGaussian::from_parts(
            self.weights_mean.clone(),
            self.weights_covariance.clone(),
        )
    }

    /**
     * The variance β⁻¹ of the observation noise, the floor of every predictive variance.
     */
    pub fn noise_variance(&self) -> f64 {
        self.prior.noise_variance()
    }

    /**
     * The log marginal likelihood of the training data under this prior, with the weights
     * integrated out. Higher values mean the basis and prior explain the data better
     * without overfitting it, which makes this useful for choosing between basis
     * configurations fitted on the same targets.
     */
    pub fn log_evidence(&self) -> f64 {
        self.log_evidence
    }

    /**
     * Predicts the mean `Xμ` and the variance `β⁻¹ + xᵢᵀΣxᵢ` of a new observation at
     * each row of the design matrix.
     *
     * Returns a [ShapeMismatch](Error::ShapeMismatch) error if the design matrix does not
     * have one column per feature.
     */
    pub fn predict(&self, design_matrix: &Matrix) -> Result<PointPrediction> {
        self.check_features(design_matrix)?;
        log::trace!("Predicting {} points", design_matrix.rows());
        let mean = design_matrix.multiply_column(&self.weights_mean);
        let noise_variance = self.noise_variance();
        let variance = (0..design_matrix.rows())
            .map(|row| {
                let x = design_matrix.row_values(row);
                let latent = dot(x, &self.weights_covariance.multiply_column(x));
                noise_variance + latent.max(0.0)
            })
            .collect();
        Ok(PointPrediction::new(mean, variance))
    }

    /**
     * Predicts the mean `Xμ` and the joint covariance `XΣXᵀ` of the noise free function
     * at every row of the design matrix, which is needed to draw whole trajectories.
     *
     * Returns a [ShapeMismatch](Error::ShapeMismatch) error if the design matrix does not
     * have one column per feature.
     */
    pub fn predict_joint(&self, design_matrix: &Matrix) -> Result<JointPrediction> {
        self.check_features(design_matrix)?;
        log::trace!("Predicting joint distribution of {} points", design_matrix.rows());
        let mean = design_matrix.multiply_column(&self.weights_mean);
        let mut covariance = design_matrix * &self.weights_covariance * design_matrix.transpose();
        covariance.symmetrize_mut();
        Ok(JointPrediction::new(mean, covariance, self.noise_variance()))
    }

    fn check_features(&self, design_matrix: &Matrix) -> Result<()> {
        if design_matrix.columns() != self.features() {
            return Err(Error::shape_mismatch(
                format!("a design matrix with {} columns", self.features()),
                format!("{} columns", design_matrix.columns()),
            ));
        }
        Ok(())
    }
}

/**
 * `½[M ln α + N ln β − β‖y − Xμ‖² − αμᵀμ − ln|A| − N ln 2π]` for N rows, M features and
 * the posterior precision `A` given by its Cholesky factor.
 */
fn log_evidence(
    design_matrix: &Matrix,
    targets: &[f64],
    prior: &Prior,
    weights_mean: &[f64],
    lower_triangular: &Matrix,
) -> f64 {
    let n = design_matrix.rows() as f64;
    let m = design_matrix.columns() as f64;
    let alpha = prior.precision;
    let beta = prior.noise_precision;
    let residual_sum_of_squares: f64 = design_matrix
        .multiply_column(weights_mean)
        .iter()
        .zip(targets)
        .map(|(prediction, target)| (target - prediction) * (target - prediction))
        .sum();
    // M ln α is -infinity for an improper flat prior, but so is the evidence
    let prior_term = if m > 0.0 { m * alpha.ln() } else { 0.0 };
    0.5 * (prior_term + (n * beta.ln())
        - (beta * residual_sum_of_squares)
        - (alpha * dot(weights_mean, weights_mean))
        - linear_algebra::cholesky_log_determinant(lower_triangular)
        - (n * (2.0 * PI).ln()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prior_validation() {
        assert!(Prior::new(0.0, 1.0).is_ok());
        assert!(Prior::new(-1.0, 1.0).is_err());
        assert!(Prior::new(1.0, 0.0).is_err());
        assert_eq!(Prior::default().noise_variance(), 1.0);
    }

    #[test]
    fn no_data_recovers_the_prior() {
        let design_matrix = Matrix::empty(0.0, (0, 3));
        let prior = Prior::new(4.0, 2.0).unwrap();
        let model = BayesianRidge::fit(&design_matrix, &[], prior, 0.0).unwrap();
        assert_eq!(model.weights_mean(), &[0.0, 0.0, 0.0]);
        for i in 0..3 {
            assert!((model.weights_covariance().get(i, i) - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn flat_prior_without_data_is_singular() {
        let design_matrix = Matrix::empty(0.0, (0, 2));
        let prior = Prior::new(0.0, 1.0).unwrap();
        let result = BayesianRidge::fit(&design_matrix, &[], prior, 0.0);
        assert!(matches!(result, Err(Error::SingularMatrix { .. })));
    }
}
