/*!
Gaussian Process regression.

Instead of choosing a finite set of basis functions, a Gaussian Process places a prior
directly over functions, defined by a [Kernel] that gives the covariance between the function
values at any two inputs. Conditioning on noisy observations `y` at training inputs `X` gives
a Gaussian posterior over the function values at any query inputs `X*`:

```text
mean       = K(X*, X) [K(X, X) + σ²I]⁻¹ y
covariance = K(X*, X*) − K(X*, X) [K(X, X) + σ²I]⁻¹ K(X, X*)
```

The matrix `K(X, X) + σ²I` only depends on the training data, so it is Cholesky decomposed
once when fitting, and every prediction reuses the factor.

Inputs are given as matrices with a row for each point and a column for each input
dimension. For scalar inputs use [fit_1d](GaussianProcess::fit_1d) and
[predict_1d](GaussianProcess::predict_1d).

# Example

```
use semilinear::gaussian_process::{GaussianProcess, SquaredExponential};

let inputs = vec![ -2.0, -1.0, 0.0, 1.0, 2.0 ];
let targets: Vec<f64> = inputs.iter().map(|x: &f64| x.sin()).collect();
let kernel = SquaredExponential::new(1.0, 1.0).unwrap();
let process = GaussianProcess::fit_1d(&inputs, &targets, kernel, 1e-4, 1e-10).unwrap();

let prediction = process.predict_1d(&[ 0.5, 10.0 ]).unwrap();
// close to the training data the posterior is confident and accurate
assert!((prediction.mean()[0] - 0.5_f64.sin()).abs() < 0.05);
// far away from it the posterior falls back to the zero mean prior
assert!(prediction.mean()[1].abs() < 1e-6);
assert!(prediction.variance()[1] > prediction.variance()[0]);
```
*/

use crate::config::RegressionConfig;
use crate::error::{Error, Result, require_non_negative, require_positive};
use crate::linear_algebra;
use crate::matrices::{Matrix, dot};
use crate::prediction::JointPrediction;

use std::f64::consts::PI;

/**
 * A covariance function between two points of equal dimensionality.
 *
 * Implementations must be symmetric, `k(a, b) == k(b, a)`, and positive definite, so that
 * the matrix of covariances between any finite set of points is positive semi definite. A
 * kernel which breaks these properties is a caller error; the fitter does not check for it
 * beyond failing to decompose the training covariance.
 */
pub trait Kernel {
    fn covariance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<K: Kernel + ?Sized> Kernel for &K {
    fn covariance(&self, a: &[f64], b: &[f64]) -> f64 {
        (**self).covariance(a, b)
    }
}

/**
 * The squared exponential (radial basis function) kernel,
 * `k(a, b) = amplitude² * exp(−‖a − b‖² / (2 * length_scale²))`.
 *
 * Functions drawn from a Gaussian Process with this kernel are infinitely smooth. The
 * length scale sets how far apart two inputs must be before their function values become
 * uncorrelated, and the amplitude sets the typical distance of the function from its mean.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SquaredExponential {
    length_scale: f64,
    amplitude: f64,
}

impl SquaredExponential {
    /**
     * Returns a [Configuration](Error::Configuration) error unless both parameters are
     * finite and greater than 0.
     */
    pub fn new(length_scale: f64, amplitude: f64) -> Result<SquaredExponential> {
        require_positive("length scale", length_scale)?;
        require_positive("amplitude", amplitude)?;
        Ok(SquaredExponential {
            length_scale,
            amplitude,
        })
    }

    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

impl Default for SquaredExponential {
    fn default() -> Self {
        SquaredExponential {
            length_scale: 1.0,
            amplitude: 1.0,
        }
    }
}

impl Kernel for SquaredExponential {
    fn covariance(&self, a: &[f64], b: &[f64]) -> f64 {
        let squared_distance: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
        self.amplitude
            * self.amplitude
            * (-squared_distance / (2.0 * self.length_scale * self.length_scale)).exp()
    }
}

/**
 * Computes the matrix of kernel covariances between each row of `a` and each row of `b`.
 */
pub fn kernel_matrix<K: Kernel + ?Sized>(kernel: &K, a: &Matrix, b: &Matrix) -> Matrix {
    let mut values = Vec::with_capacity(a.rows() * b.rows());
    for i in 0..a.rows() {
        for j in 0..b.rows() {
            values.push(kernel.covariance(a.row_values(i), b.row_values(j)));
        }
    }
    Matrix::from_flat_row_major((a.rows(), b.rows()), values)
}

/**
 * A Gaussian Process conditioned on training data.
 */
#[derive(Clone, Debug)]
pub struct GaussianProcess<K = SquaredExponential> {
    kernel: K,
    noise_variance: f64,
    jitter: f64,
    training_inputs: Matrix,
    training_targets: Vec<f64>,
    // Cholesky factor of K(X, X) + (σ² + jitter)I
    lower_triangular: Matrix,
    // [K(X, X) + σ²I]⁻¹ y
    weights: Vec<f64>,
}

impl<K: Kernel> GaussianProcess<K> {
    /**
     * Conditions the Gaussian Process on the training data, with a row of
     * `training_inputs` for each target.
     *
     * The `jitter` is added to the diagonal alongside the noise variance before the
     * training covariance is decomposed, which keeps it numerically positive definite
     * when the noise variance is 0 or inputs are nearly duplicated. Training with zero
     * points is allowed and predicts from the prior.
     *
     * # Errors
     *
     * - [ShapeMismatch](Error::ShapeMismatch) if there is not one target per input row
     * - [Configuration](Error::Configuration) if the noise variance or jitter is negative
     * or not finite
     * - [SingularMatrix](Error::SingularMatrix) if the training covariance is not positive
     * definite even with the noise and jitter added
     */
    pub fn fit(
        training_inputs: &Matrix,
        training_targets: &[f64],
        kernel: K,
        noise_variance: f64,
        jitter: f64,
    ) -> Result<GaussianProcess<K>> {
        require_non_negative("noise variance", noise_variance)?;
        require_non_negative("jitter", jitter)?;
        if training_targets.len() != training_inputs.rows() {
            return Err(Error::shape_mismatch(
                format!("{} targets, one per training input", training_inputs.rows()),
                format!("{} targets", training_targets.len()),
            ));
        }
        let covariance = kernel_matrix(&kernel, training_inputs, training_inputs);
        let lower_triangular = linear_algebra::cholesky_with_jitter(
            &covariance,
            noise_variance + jitter,
            "training covariance matrix",
        )?;
        let weights = linear_algebra::cholesky_solve_vector(&lower_triangular, training_targets);
        log::debug!(
            "Fitted Gaussian Process on {} points of {} dimensions with noise variance {:e} and jitter {:e}",
            training_inputs.rows(),
            training_inputs.columns(),
            noise_variance,
            jitter
        );
        Ok(GaussianProcess {
            kernel,
            noise_variance,
            jitter,
            training_inputs: training_inputs.clone(),
            training_targets: training_targets.to_vec(),
            lower_triangular,
            weights,
        })
    }

    /**
     * [fit](GaussianProcess::fit) for scalar inputs.
     */
    pub fn fit_1d(
        training_inputs: &[f64],
        training_targets: &[f64],
        kernel: K,
        noise_variance: f64,
        jitter: f64,
    ) -> Result<GaussianProcess<K>> {
        GaussianProcess::fit(
            &Matrix::column(training_inputs.to_vec()),
            training_targets,
            kernel,
            noise_variance,
            jitter,
        )
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn noise_variance(&self) -> f64 {
        self.noise_variance
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    /**
     * The number of training points the process is conditioned on.
     */
    pub fn training_points(&self) -> usize {
        self.training_inputs.rows()
    }

    pub fn training_inputs(&self) -> &Matrix {
        &self.training_inputs
    }

    pub fn training_targets(&self) -> &[f64] {
        &self.training_targets
    }

    /**
     * Computes the posterior mean and joint covariance of the function at each row of the
     * query inputs. The [variance](JointPrediction::variance) of the returned prediction
     * includes the noise variance, the covariance does not.
     *
     * Returns a [ShapeMismatch](Error::ShapeMismatch) error if the query points have a
     * different number of dimensions to the training points.
     */
    pub fn predict(&self, query_inputs: &Matrix) -> Result<JointPrediction> {
        if self.training_points() > 0 && query_inputs.columns() != self.training_inputs.columns() {
            return Err(Error::shape_mismatch(
                format!("query points of {} dimensions", self.training_inputs.columns()),
                format!("{} dimensions", query_inputs.columns()),
            ));
        }
        log::trace!("Predicting joint distribution of {} points", query_inputs.rows());
        // K(X*, X)
        let cross_covariance = kernel_matrix(&self.kernel, query_inputs, &self.training_inputs);
        let mean = cross_covariance.multiply_column(&self.weights);
        // v = L⁻¹K(X, X*) so that vᵀv = K(X*, X)[K(X, X) + σ²I]⁻¹K(X, X*)
        let v = linear_algebra::solve_lower_triangular(
            &self.lower_triangular,
            &cross_covariance.transpose(),
        );
        let mut covariance = kernel_matrix(&self.kernel, query_inputs, query_inputs) - v.gram();
        covariance.symmetrize_mut();
        Ok(JointPrediction::new(mean, covariance, self.noise_variance))
    }

    /**
     * [predict](GaussianProcess::predict) for scalar inputs.
     */
    pub fn predict_1d(&self, query_inputs: &[f64]) -> Result<JointPrediction> {
        self.predict(&Matrix::column(query_inputs.to_vec()))
    }

    /**
     * The log marginal likelihood of the training targets,
     * `−½yᵀ[K + σ²I]⁻¹y − ½ln|K + σ²I| − (n/2)ln 2π`, which can be compared between
     * kernels and noise levels fitted on the same data.
     */
    pub fn log_marginal_likelihood(&self) -> f64 {
        let n = self.training_points() as f64;
        -0.5 * dot(&self.training_targets, &self.weights)
            - 0.5 * linear_algebra::cholesky_log_determinant(&self.lower_triangular)
            - 0.5 * n * (2.0 * PI).ln()
    }
}

impl GaussianProcess<SquaredExponential> {
    /**
     * Fits a Gaussian Process with the kernel, noise variance (the reciprocal of the noise
     * precision) and jitter of the configuration.
     */
    pub fn from_config(
        training_inputs: &Matrix,
        training_targets: &[f64],
        config: &RegressionConfig,
    ) -> Result<GaussianProcess<SquaredExponential>> {
        config.validate()?;
        GaussianProcess::fit(
            training_inputs,
            training_targets,
            config.kernel()?,
            config.noise_variance(),
            config.jitter,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_exponential_values() {
        let kernel = SquaredExponential::new(2.0, 3.0).unwrap();
        assert_eq!(kernel.covariance(&[1.0], &[1.0]), 9.0);
        let expected = 9.0 * (-1.0_f64 / 8.0).exp();
        assert!((kernel.covariance(&[0.0, 0.0], &[1.0, 1.0]) - expected).abs() < 1e-12);
        assert!(SquaredExponential::new(0.0, 1.0).is_err());
        assert!(SquaredExponential::new(1.0, f64::NAN).is_err());
    }

    #[test]
    fn kernel_matrix_is_symmetric() {
        let points = Matrix::column(vec![0.0, 0.5, 3.0]);
        let covariance = kernel_matrix(&SquaredExponential::default(), &points, &points);
        assert!(covariance.is_symmetric(0.0));
        assert_eq!(covariance.diagonal_values(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn duplicate_inputs_without_noise_or_jitter_are_singular() {
        let result = GaussianProcess::fit_1d(
            &[1.0, 1.0],
            &[0.0, 0.0],
            SquaredExponential::default(),
            0.0,
            0.0,
        );
        assert!(matches!(result, Err(Error::SingularMatrix { .. })));
    }
}
