/*!
Models of distributions that samples can be drawn from.

All randomness is supplied by the caller as an iterator of uniformly distributed numbers in
the range [0, 1], so drawing from these distributions is deterministic for a given source of
random numbers and this crate does not need to depend on any particular random number
generator.

# Getting an infinite iterator using the rand crate

```
use rand::{Rng, SeedableRng};
use rand::distr::StandardUniform;
use rand_chacha::ChaCha8Rng;

// using a fixed seed random generator from the rand crate
let mut random_generator = ChaCha8Rng::seed_from_u64(16);
// now pass this Iterator to functions that accept a &mut Iterator
let mut random_numbers = (&mut random_generator).sample_iter::<f64, _>(StandardUniform);
# let _ = random_numbers.next();
```

# Drawing possible futures

Draws from a [MultivariateGaussian] are whole trajectories: each row of the returned matrix
has a value for every dimension, and values for nearby query points in a posterior move
together as their covariance dictates. Drawing each point independently from its own
variance would instead give jagged noise with the right spread at each point but none of
the smoothness of the posterior.

```
use rand::{Rng, SeedableRng};
use rand::distr::StandardUniform;
use semilinear::distributions::MultivariateGaussian;
use semilinear::matrices::Matrix;

let mut random_numbers = rand_chacha::ChaCha8Rng::seed_from_u64(4)
    .sample_iter::<f64, _>(StandardUniform);
// two strongly correlated dimensions
let gaussian = MultivariateGaussian::new(
    vec![ 0.0, 0.0 ],
    Matrix::from(vec![
        vec![ 1.0, 0.99 ],
        vec![ 0.99, 1.0 ]])).unwrap();
let trajectories = gaussian.draw(&mut random_numbers, 100, 1e-10).unwrap();
assert_eq!(trajectories.size(), (100, 2));
for row in 0..trajectories.rows() {
    let (a, b) = (trajectories.get(row, 0), trajectories.get(row, 1));
    assert!((a - b).abs() < 1.0);
}
```
*/

use crate::error::{Error, Result, require_non_negative};
use crate::linear_algebra;
use crate::matrices::Matrix;

use std::f64::consts::PI;

/**
 * A Gaussian probability density function of a normally distributed
 * random variable with expected value / mean μ, and variance σ<sup>2</sup>.
 *
 * See: [https://en.wikipedia.org/wiki/Gaussian_function](https://en.wikipedia.org/wiki/Gaussian_function)
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Gaussian {
    /**
     * The mean is the expected value of this gaussian.
     */
    pub mean: f64,
    /**
     * The variance is a measure of the spread of values around the mean, high variance means
     * one standard deviation encompasses a larger spread of values from the mean.
     */
    pub variance: f64,
}

impl Gaussian {
    pub fn new(mean: f64, variance: f64) -> Gaussian {
        Gaussian { mean, variance }
    }

    /**
     * Creates a Gaussian approximating the mean and variance in the provided
     * data, or `None` if there is no data.
     */
    pub fn approximating<I>(data: I) -> Option<Gaussian>
    where
        I: Iterator<Item = f64>,
    {
        let copy: Vec<f64> = data.collect();
        Some(Gaussian {
            mean: linear_algebra::mean(copy.iter().copied())?,
            variance: linear_algebra::variance(copy.into_iter())?,
        })
    }

    /**
     * Computes g(x) for some x, the probability density of a normally
     * distributed random variable x, or in other words how likely x is
     * to be drawn from this normal distribution.
     */
    pub fn probability(&self, x: f64) -> f64 {
        let fraction = 1.0 / (2.0 * PI * self.variance).sqrt();
        let exponent = -((x - self.mean) * (x - self.mean)) / (2.0 * self.variance);
        fraction * exponent.exp()
    }

    /**
     * Given a source of random variables in the uniformly distributed
     * range [0, 1] inclusive, draws `max_samples` of independent
     * random numbers according to this Gaussian distribution's mean and
     * variance using the Box-Muller transform:
     *
     * [https://en.wikipedia.org/wiki/Box%E2%80%93Muller_transform](https://en.wikipedia.org/wiki/Box%E2%80%93Muller_transform)
     *
     * The source of random variables must provide at least as many values
     * as `max_samples` if `max_samples` is even, and one more than `max_samples`
     * if `max_samples` is odd, or a [RandomSourceExhausted](Error::RandomSourceExhausted)
     * error is returned.
     */
    pub fn draw<I>(&self, source: &mut I, max_samples: usize) -> Result<Vec<f64>>
    where
        I: Iterator<Item = f64>,
    {
        let needed = max_samples + max_samples % 2;
        let mut samples = Vec::with_capacity(needed);
        let standard_deviation = self.variance.sqrt();
        while samples.len() < max_samples {
            let (u, v) = match (source.next(), source.next()) {
                (Some(u), Some(v)) => (u, v),
                _ => return Err(Error::RandomSourceExhausted { needed }),
            };
            // ln(0) is -infinity, so nudge u off zero
            let u = u.max(f64::MIN_POSITIVE);
            // these computations convert two samples from the inclusive 0 - 1
            // range to two samples of a normal distribution with with
            // μ = 0 and σ = 1.
            let radius = (-2.0 * u.ln()).sqrt();
            let (sin, cos) = (2.0 * PI * v).sin_cos();
            samples.push((radius * cos * standard_deviation) + self.mean);
            samples.push((radius * sin * standard_deviation) + self.mean);
        }
        // remove the final sample if adding 2 samples took us over the max
        samples.truncate(max_samples);
        Ok(samples)
    }
}

/**
 * A multivariate Gaussian distribution with mean vector μ, and covariance matrix Σ.
 *
 * See: [https://en.wikipedia.org/wiki/Multivariate_normal_distribution](https://en.wikipedia.org/wiki/Multivariate_normal_distribution)
 *
 * # Invariants
 *
 * The covariance matrix is always square, with as many rows as the mean vector is long.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct MultivariateGaussian {
    mean: Vec<f64>,
    covariance: Matrix,
}

impl MultivariateGaussian {
    /**
     * Constructs a new multivariate Gaussian distribution from
     * a N length vector of means and a NxN covariance matrix
     *
     * This function does not check that the provided covariance matrix
     * is actually a covariance matrix. If a square matrix that is not
     * symmetric is supplied the Gaussian is not defined.
     *
     * Returns a [ShapeMismatch](Error::ShapeMismatch) error if the covariance matrix is not
     * square, or the mean vector is not the same length as the size of the covariance matrix.
     */
    pub fn new(mean: Vec<f64>, covariance: Matrix) -> Result<MultivariateGaussian> {
        if !covariance.is_square() {
            return Err(Error::shape_mismatch(
                "a square covariance matrix",
                format!("{}x{}", covariance.rows(), covariance.columns()),
            ));
        }
        if mean.len() != covariance.rows() {
            return Err(Error::shape_mismatch(
                format!("a mean vector of length {}", covariance.rows()),
                format!("length {}", mean.len()),
            ));
        }
        Ok(MultivariateGaussian { mean, covariance })
    }

    /**
     * For callers that construct the mean and covariance with matching sizes themselves.
     */
    pub(crate) fn from_parts(mean: Vec<f64>, covariance: Matrix) -> MultivariateGaussian {
        debug_assert!(covariance.is_square() && mean.len() == covariance.rows());
        MultivariateGaussian { mean, covariance }
    }

    /**
     * The mean is a vector of expected values in each dimension
     */
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /**
     * The covariance matrix is a measure of how much values from each dimension vary
     * from their expected value with respect to each other.
     *
     * For a 2 dimensional multivariate Gaussian the covariance matrix could be the 2x2 identity
     * matrix:
     *
     * ```ignore
     * [
     *   1.0, 0.0
     *   0.0, 1.0
     * ]
     * ```
     *
     * In which case the two dimensions are completely uncorrelated as `C[0,1] = C[1,0] = 0`.
     */
    pub fn covariance(&self) -> &Matrix {
        &self.covariance
    }

    /**
     * The number of dimensions of this distribution.
     */
    pub fn dimensions(&self) -> usize {
        self.mean.len()
    }

    /**
     * Draws samples from this multivariate distribution.
     *
     * For `count` of M, sufficient random numbers from the source iterator in the uniformly
     * distributed range [0, 1] inclusive, and this Gaussian's dimensionality of N, returns an
     * MxN matrix of drawn values, each row being one draw.
     *
     * The source iterator must have at least MxN random values if N is even, and
     * Mx(N+1) random values if N is odd, or a
     * [RandomSourceExhausted](Error::RandomSourceExhausted) error is returned.
     *
     * Drawing needs the Cholesky decomposition of the covariance matrix. Covariances which
     * are only positive semi definite, such as a posterior evaluated at training points,
     * often fail to decompose, in which case it is retried once with the jitter added to the
     * diagonal. If that still fails a [SingularMatrix](Error::SingularMatrix) error is
     * returned.
     */
    pub fn draw<I>(&self, source: &mut I, count: usize, jitter: f64) -> Result<Matrix>
    where
        I: Iterator<Item = f64>,
    {
        require_non_negative("jitter", jitter)?;
        // Follow the method outlined at
        // https://en.wikipedia.org/wiki/Multivariate_normal_distribution#Computational_methods
        let lower_triangular = self.lower_triangular(jitter)?;
        let dimensions = self.dimensions();
        let normal_distribution = Gaussian::new(0.0, 1.0);
        let mut values = Vec::with_capacity(count * dimensions);
        for _ in 0..count {
            // use the box muller transform to get N independent values from
            // a normal distribution (z)
            let standard_normals = normal_distribution
                .draw(source, dimensions)
                .map_err(|_| Error::RandomSourceExhausted {
                    needed: count * (dimensions + dimensions % 2),
                })?;
            // mean + (L * z) yields each m'th vector from the distribution
            for i in 0..dimensions {
                let correlated: f64 = (0..=i)
                    .map(|j| lower_triangular.get(i, j) * standard_normals[j])
                    .sum();
                values.push(self.mean[i] + correlated);
            }
        }
        Ok(Matrix::from_flat_row_major((count, dimensions), values))
    }

    fn lower_triangular(&self, jitter: f64) -> Result<Matrix> {
        if let Some(lower_triangular) = linear_algebra::cholesky_decomposition(&self.covariance) {
            return Ok(lower_triangular);
        }
        if jitter == 0.0 {
            return Err(Error::SingularMatrix {
                matrix: "covariance matrix",
                jitter,
            });
        }
        log::warn!(
            "Covariance matrix of {} dimensions is not positive definite, retrying with a jitter of {:e}",
            self.dimensions(),
            jitter
        );
        linear_algebra::cholesky_with_jitter(&self.covariance, jitter, "covariance matrix")
    }
}

/**
 * Draws `count` trajectories from the multivariate Gaussian with the given mean and
 * covariance. See [MultivariateGaussian::draw].
 */
pub fn sample<I>(
    mean: &[f64],
    covariance: &Matrix,
    count: usize,
    source: &mut I,
    jitter: f64,
) -> Result<Matrix>
where
    I: Iterator<Item = f64>,
{
    MultivariateGaussian::new(mean.to_vec(), covariance.clone())?.draw(source, count, jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_even_and_odd_counts() {
        let gaussian = Gaussian::new(0.0, 1.0);
        let mut source = vec![0.5; 4].into_iter();
        assert_eq!(gaussian.draw(&mut source, 3).map(|x| x.len()), Ok(3));
        let mut source = vec![0.5; 3].into_iter();
        assert_eq!(
            gaussian.draw(&mut source, 3),
            Err(Error::RandomSourceExhausted { needed: 4 })
        );
    }

    #[test]
    fn zero_uniform_stays_finite() {
        let gaussian = Gaussian::new(0.0, 1.0);
        let mut source = vec![0.0, 0.25].into_iter();
        let samples = gaussian.draw(&mut source, 2).unwrap();
        assert!(samples.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn probability_peaks_at_mean() {
        let gaussian = Gaussian::new(1.0, 4.0);
        let peak = 1.0 / (2.0 * PI * 4.0).sqrt();
        assert!((gaussian.probability(1.0) - peak).abs() < 1e-12);
        assert!(gaussian.probability(3.0) < peak);
        assert!((gaussian.probability(3.0) - gaussian.probability(-1.0)).abs() < 1e-12);
    }
}
