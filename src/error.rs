/*!
 * Error types shared by every fitter, sampler and estimator in this crate.
 *
 * All failures are reported synchronously by the call that detects them, and no
 * call ever returns a partially computed result alongside an error.
 */

/**
 * The ways a fit, prediction, draw or accuracy estimate can fail.
 */
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /**
     * A basis, prior, kernel or other hyperparameter was invalid, such as an empty
     * list of sinusoid frequencies or a negative noise variance.
     */
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /**
     * The lengths or dimensions of inputs, targets and query points do not agree.
     */
    #[error("Shape mismatch, expected {expected} but found {actual}")]
    ShapeMismatch {
        /// Description of the shape the operation required
        expected: String,
        /// Description of the shape that was supplied
        actual: String,
    },

    /**
     * A matrix that must be positive definite could not be Cholesky decomposed, even
     * with the jitter or regularisation floor added to its diagonal. Callers may retry
     * with a larger jitter.
     */
    #[error("The {matrix} is not positive definite after adding a jitter of {jitter:e}")]
    SingularMatrix {
        /// Which matrix failed to decompose
        matrix: &'static str,
        /// The jitter that was on the diagonal when decomposition failed
        jitter: f64,
    },

    /**
     * The iterator of uniformly distributed random numbers supplied for sampling
     * ended before enough values were drawn.
     */
    #[error("Random number source ran out, at least {needed} values are needed")]
    RandomSourceExhausted {
        /// The minimum number of random values the draw required
        needed: usize,
    },
}

/// Result type for every fallible operation in this crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Error {
        Error::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/**
 * Checks that a hyperparameter is finite and strictly positive.
 */
pub(crate) fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "{} must be finite and greater than 0, but was {}",
            name, value
        )))
    }
}

/**
 * Checks that a hyperparameter is finite and not negative.
 */
pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "{} must be finite and at least 0, but was {}",
            name, value
        )))
    }
}
