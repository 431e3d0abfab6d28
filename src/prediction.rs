/*!
Predictive distributions returned by the fitters.

A [PointPrediction] only knows the mean and variance at each query point independently, which
is enough for confidence intervals. A [JointPrediction] also knows how the query points
co-vary, which is what drawing smooth trajectories of possible futures requires.

Variances in both include the observation noise of the model, so they describe where a new
observation at each query point is expected to fall and are never smaller than the noise
variance. The covariance of a [JointPrediction] is of the underlying noise free function
instead, and sampling it draws possible functions rather than possible noisy observations.
*/

use crate::distributions::MultivariateGaussian;
use crate::error::{Error, Result};
use crate::matrices::Matrix;

/**
 * A symmetric interval `mean ± z * standard deviation` around a predicted mean.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    /**
     * Creates the interval `mean ± z * sqrt(variance)`. Negative variances from
     * rounding error are treated as zero so the width is never negative.
     */
    pub fn new(mean: f64, variance: f64, z: f64) -> ConfidenceInterval {
        let half_width = z * variance.max(0.0).sqrt();
        ConfidenceInterval {
            lower: mean - half_width,
            upper: mean + half_width,
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

fn confidence_intervals(mean: &[f64], variance: &[f64], z: f64) -> Result<Vec<ConfidenceInterval>> {
    if !(z.is_finite() && z >= 0.0) {
        return Err(Error::Configuration(format!(
            "Confidence z must be finite and at least 0, but was {}",
            z
        )));
    }
    Ok(mean
        .iter()
        .zip(variance)
        .map(|(&m, &v)| ConfidenceInterval::new(m, v, z))
        .collect())
}

/**
 * Predictive mean and variance at each query point.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct PointPrediction {
    mean: Vec<f64>,
    variance: Vec<f64>,
}

impl PointPrediction {
    pub(crate) fn new(mean: Vec<f64>, variance: Vec<f64>) -> PointPrediction {
        debug_assert_eq!(mean.len(), variance.len());
        PointPrediction { mean, variance }
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /**
     * The predictive variance at each query point, including the observation noise.
     */
    pub fn variance(&self) -> &[f64] {
        &self.variance
    }

    pub fn standard_deviation(&self) -> Vec<f64> {
        self.variance.iter().map(|v| v.max(0.0).sqrt()).collect()
    }

    /**
     * The number of query points.
     */
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /**
     * Computes `mean ± z * sqrt(variance)` at each query point, for instance a `z` of
     * 1.96 gives 95% intervals. Returns a [Configuration](Error::Configuration) error if
     * `z` is negative or not finite.
     */
    pub fn confidence_intervals(&self, z: f64) -> Result<Vec<ConfidenceInterval>> {
        confidence_intervals(&self.mean, &self.variance, z)
    }
}

/**
 * Predictive mean at each query point with the joint covariance between all of them.
 *
 * # Invariants
 *
 * The covariance is square and symmetric, with a row for each mean.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct JointPrediction {
    mean: Vec<f64>,
    covariance: Matrix,
    noise_variance: f64,
}

impl JointPrediction {
    pub(crate) fn new(mean: Vec<f64>, covariance: Matrix, noise_variance: f64) -> JointPrediction {
        debug_assert!(covariance.is_square() && covariance.rows() == mean.len());
        JointPrediction {
            mean,
            covariance,
            noise_variance,
        }
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /**
     * The joint covariance of the noise free function values at the query points.
     */
    pub fn covariance(&self) -> &Matrix {
        &self.covariance
    }

    /**
     * The variance of the observation noise the model was fitted with.
     */
    pub fn noise_variance(&self) -> f64 {
        self.noise_variance
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /**
     * The variance of the noise free function at each query point, the diagonal of the
     * covariance with any negative rounding error clamped to 0.
     */
    pub fn latent_variance(&self) -> Vec<f64> {
        self.covariance
            .diagonal_values()
            .into_iter()
            .map(|v| v.max(0.0))
            .collect()
    }

    /**
     * The predictive variance of a new observation at each query point, the latent
     * variance plus the noise variance.
     */
    pub fn variance(&self) -> Vec<f64> {
        self.latent_variance()
            .into_iter()
            .map(|v| v + self.noise_variance)
            .collect()
    }

    /**
     * Discards the covariance between query points.
     */
    pub fn points(&self) -> PointPrediction {
        PointPrediction::new(self.mean.clone(), self.variance())
    }

    /**
     * Computes `mean ± z * sqrt(variance)` at each query point using the predictive
     * variance. See [PointPrediction::confidence_intervals].
     */
    pub fn confidence_intervals(&self, z: f64) -> Result<Vec<ConfidenceInterval>> {
        confidence_intervals(&self.mean, &self.variance(), z)
    }

    /**
     * The noise free function values at the query points as a multivariate Gaussian.
     */
    pub fn distribution(&self) -> MultivariateGaussian {
        MultivariateGaussian::from_parts(self.mean.clone(), self.covariance.clone())
    }

    /**
     * Draws `count` possible functions evaluated at the query points, returning a matrix
     * with a row for each draw and a column for each query point.
     * See [MultivariateGaussian::draw](crate::distributions::MultivariateGaussian::draw).
     */
    pub fn sample<I>(&self, count: usize, source: &mut I, jitter: f64) -> Result<Matrix>
    where
        I: Iterator<Item = f64>,
    {
        self.distribution().draw(source, count, jitter)
    }
}
