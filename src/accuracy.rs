/*!
Accuracy estimation of predicted means against known targets.

# Evaluating on training data

These functions compare whatever predictions and targets they are given. When the targets
were also used to fit the model, as the regression scripts built on this crate do, the
reported error is lower than the error the model will make on data it has not seen, so it
over-estimates how accurate the model is. The estimator cannot detect this overlap, and
holding back data for evaluation is left to the caller.

```
use semilinear::accuracy::relative_mae;

let error = relative_mae(&[ 1.1, 1.8, 3.0 ], &[ 1.0, 2.0, 3.0 ]).unwrap();
// (0.1 / 1 + 0.2 / 2 + 0 / 3) / 3
assert!((error - (0.2 / 3.0)).abs() < 1e-12);
```
*/

use crate::error::{Error, Result, require_non_negative};

/**
 * The smallest magnitude a target is divided by, so that targets of exactly 0 do not
 * divide by zero.
 */
pub const RELATIVE_ERROR_FLOOR: f64 = 1e-12;

/**
 * Computes the relative mean absolute error, the mean of
 * `|predicted_i - actual_i| / max(|actual_i|, ε)` with ε of [RELATIVE_ERROR_FLOOR].
 *
 * Returns a [ShapeMismatch](Error::ShapeMismatch) error if the lists have different lengths
 * or are empty.
 */
pub fn relative_mae(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    relative_mae_with_floor(predicted, actual, RELATIVE_ERROR_FLOOR)
}

/**
 * Computes the relative mean absolute error with a custom floor on the magnitude of each
 * target. See [relative_mae].
 *
 * Returns a [Configuration](Error::Configuration) error if the floor is negative or not
 * finite.
 */
pub fn relative_mae_with_floor(predicted: &[f64], actual: &[f64], floor: f64) -> Result<f64> {
    require_non_negative("relative error floor", floor)?;
    if predicted.len() != actual.len() {
        return Err(Error::shape_mismatch(
            format!("{} predictions, one per actual value", actual.len()),
            format!("{} predictions", predicted.len()),
        ));
    }
    if actual.is_empty() {
        return Err(Error::shape_mismatch(
            "at least one prediction",
            "0 predictions",
        ));
    }
    let total: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a).abs() / a.abs().max(floor))
        .sum();
    Ok(total / actual.len() as f64)
}
