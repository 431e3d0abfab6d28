/*!
 * Probabilistic regression for scalar signals, either semi-linear (a Bayesian ridge
 * regression over polynomial and sinusoid basis functions) or non-parametric (a Gaussian
 * Process with a squared exponential kernel).
 *
 * Both fitters give Gaussian posteriors with a closed form, so every prediction comes with
 * a variance, and the joint predictions can be [sampled](prediction::JointPrediction::sample)
 * to draw plausible curves.
 *
 * If this is your first time using the crate you should start with
 * [SemiLinearModel](model::SemiLinearModel) or
 * [GaussianProcess](gaussian_process::GaussianProcess), then see
 * [RegressionConfig](config::RegressionConfig) for what can be configured.
 *
 * # Modules
 * - [Basis expansion](./basis/index.html)
 * - [Bayesian ridge regression](./bayesian_ridge/index.html)
 * - [Gaussian Processes](./gaussian_process/index.html)
 * - [Sampling](./distributions/index.html)
 * - [Accuracy estimation](./accuracy/index.html)
 *
 * # Randomness
 *
 * Nothing in this crate generates random numbers itself. Sampling takes an iterator of
 * uniformly distributed numbers in the inclusive range [0, 1], so any source of randomness
 * can be used, and a seeded one gives reproducible samples.
 *
 * # Features
 * - `serde`: derives `Serialize` and `Deserialize` for the configuration types
 */

pub mod error;
pub mod matrices;
pub mod linear_algebra;
pub mod distributions;
pub mod prediction;

pub mod basis;
pub mod bayesian_ridge;
pub mod gaussian_process;
pub mod accuracy;
pub mod config;
pub mod model;

pub use error::{Error, Result};
