extern crate semilinear;

#[cfg(test)]
mod tests {
    use semilinear::accuracy::{RELATIVE_ERROR_FLOOR, relative_mae, relative_mae_with_floor};
    use semilinear::Error;

    #[test]
    fn perfect_predictions_have_no_error() {
        let actual = vec![1.0, -2.0, 0.5, 100.0];
        assert_eq!(relative_mae(&actual, &actual).unwrap(), 0.0);
    }

    #[test]
    fn errors_are_relative_to_each_target() {
        // 10% off in both cases, regardless of the magnitude of the target
        let error = relative_mae(&[1.1, 990.0], &[1.0, 1100.0]).unwrap();
        assert!((error - 0.1).abs() < 1e-12);
        let error = relative_mae(&[-2.5], &[-2.0]).unwrap();
        assert!((error - 0.25).abs() < 1e-12);
    }

    #[test]
    fn zero_targets_divide_by_the_floor() {
        let error = relative_mae(&[1e-13], &[0.0]).unwrap();
        assert!((error - (1e-13 / RELATIVE_ERROR_FLOOR)).abs() < 1e-12);
        let error = relative_mae_with_floor(&[0.5, 1.5], &[0.0, 1.0], 0.5).unwrap();
        assert_eq!(error, 1.0);
    }

    #[test]
    fn mismatched_lengths() {
        assert!(matches!(
            relative_mae(&[1.0, 2.0], &[1.0]),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(
            relative_mae(&[], &[]),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
