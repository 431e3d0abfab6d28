extern crate proptest;

extern crate semilinear;

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use semilinear::accuracy::relative_mae;
    use semilinear::basis::{BasisConfig, BasisExpander, BasisFamily};
    use semilinear::bayesian_ridge::{BayesianRidge, Prior};
    use semilinear::gaussian_process::{GaussianProcess, SquaredExponential};
    use semilinear::linear_algebra;
    use semilinear::matrices::Matrix;
    use semilinear::model::SemiLinearModel;

    /// A design matrix of 0 to 8 rows and 1 to 4 columns with its targets
    fn regression_data() -> impl Strategy<Value = (Matrix, Vec<f64>)> {
        (0..=8usize, 1..=4usize).prop_flat_map(|(rows, columns)| {
            (
                prop::collection::vec(-5.0..5.0f64, rows * columns),
                prop::collection::vec(-10.0..10.0f64, rows),
            )
                .prop_map(move |(values, targets)| {
                    (Matrix::from_flat_row_major((rows, columns), values), targets)
                })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn ridge_posterior_covariance_is_symmetric_positive_definite(
            (design_matrix, targets) in regression_data(),
            precision in 0.01..10.0f64,
            noise_precision in 0.01..10.0f64,
        ) {
            let prior = Prior::new(precision, noise_precision).unwrap();
            let model = BayesianRidge::fit(&design_matrix, &targets, prior, 1e-10).unwrap();
            prop_assert!(model.weights_covariance().is_symmetric(0.0));
            prop_assert!(
                linear_algebra::cholesky_decomposition(model.weights_covariance()).is_some(),
                "posterior covariance not positive definite: {:?}",
                model.weights_covariance()
            );
        }

        #[test]
        fn ridge_predictive_variance_is_at_least_the_noise(
            (design_matrix, targets) in regression_data(),
            precision in 0.01..10.0f64,
            noise_precision in 0.01..10.0f64,
        ) {
            let prior = Prior::new(precision, noise_precision).unwrap();
            let model = BayesianRidge::fit(&design_matrix, &targets, prior, 1e-10).unwrap();
            let query = Matrix::empty(1.5, (3, design_matrix.columns()));
            let prediction = model.predict(&query).unwrap();
            for variance in prediction.variance() {
                prop_assert!(*variance >= 1.0 / noise_precision);
            }
        }

        #[test]
        fn ridge_predictions_are_repeatable(
            (design_matrix, targets) in regression_data(),
            query_values in prop::collection::vec(-5.0..5.0f64, 4),
            precision in 0.01..10.0f64,
            noise_precision in 0.01..10.0f64,
        ) {
            let prior = Prior::new(precision, noise_precision).unwrap();
            let model = BayesianRidge::fit(&design_matrix, &targets, prior, 1e-10).unwrap();
            let query = Matrix::from_flat_row_major(
                (1, design_matrix.columns()),
                query_values[0..design_matrix.columns()].to_vec(),
            );
            prop_assert_eq!(model.predict(&query).unwrap(), model.predict(&query).unwrap());
            prop_assert_eq!(
                model.predict_joint(&query).unwrap(),
                model.predict_joint(&query).unwrap()
            );
        }

        #[test]
        fn semi_linear_predictions_are_repeatable(
            inputs in prop::collection::vec(-50.0..50.0f64, 1..20),
            query in prop::collection::vec(-100.0..100.0f64, 1..10),
            degree in 0..4usize,
        ) {
            let targets: Vec<f64> = inputs.iter().map(|x| x.cos()).collect();
            let model = SemiLinearModel::fit(
                &inputs,
                &targets,
                BasisConfig::polynomial(degree),
                Prior::default(),
                1e-10,
            ).unwrap();
            prop_assert_eq!(model.predict(&query).unwrap(), model.predict(&query).unwrap());
            prop_assert_eq!(
                model.predict_joint(&query).unwrap(),
                model.predict_joint(&query).unwrap()
            );
        }

        #[test]
        fn design_matrices_have_a_column_per_basis_function(
            inputs in prop::collection::vec(-100.0..100.0f64, 1..20),
            degree in 0..6usize,
            frequencies in prop::collection::vec(0.1..5.0f64, 0..4),
        ) {
            let mut config = BasisConfig::polynomial(degree);
            if !frequencies.is_empty() {
                config = config.with_family(BasisFamily::Sinusoid {
                    frequencies: frequencies.clone(),
                });
            }
            let expander = BasisExpander::fit(config, &inputs).unwrap();
            let design_matrix = expander.design_matrix(&inputs);
            prop_assert_eq!(
                design_matrix.size(),
                (inputs.len(), degree + 1 + (2 * frequencies.len()))
            );
            prop_assert!(design_matrix.column_iter(0).all(|x| x == 1.0));
            prop_assert!(design_matrix.row_major_iter().all(|x| x.is_finite()));
        }

        #[test]
        fn gaussian_process_variance_is_at_least_the_noise(
            inputs in prop::collection::vec(-3.0..3.0f64, 0..10),
            query in prop::collection::vec(-5.0..5.0f64, 1..10),
            noise_variance in 0.001..1.0f64,
            length_scale in 0.1..3.0f64,
        ) {
            let targets: Vec<f64> = inputs.iter().map(|x| x.sin()).collect();
            let process = GaussianProcess::fit_1d(
                &inputs,
                &targets,
                SquaredExponential::new(length_scale, 1.0).unwrap(),
                noise_variance,
                1e-10,
            ).unwrap();
            let prediction = process.predict_1d(&query).unwrap();
            prop_assert!(prediction.covariance().is_symmetric(0.0));
            for variance in prediction.variance() {
                prop_assert!(variance >= noise_variance);
            }
        }

        #[test]
        fn relative_mae_is_non_negative(
            actual in prop::collection::vec(-10.0..10.0f64, 1..20),
            offset in -1.0..1.0f64,
        ) {
            prop_assert_eq!(relative_mae(&actual, &actual).unwrap(), 0.0);
            let predicted: Vec<f64> = actual.iter().map(|x| x + offset).collect();
            prop_assert!(relative_mae(&predicted, &actual).unwrap() >= 0.0);
        }
    }
}
