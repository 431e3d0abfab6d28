extern crate rand;
extern crate rand_chacha;

extern crate semilinear;

#[cfg(test)]
mod tests {
    use rand::distr::StandardUniform;
    use rand::{Rng, SeedableRng};

    use semilinear::config::{KernelConfig, RegressionConfig};
    use semilinear::gaussian_process::{GaussianProcess, Kernel, SquaredExponential, kernel_matrix};
    use semilinear::linear_algebra;
    use semilinear::matrices::Matrix;
    use semilinear::Error;

    fn n_random_numbers<R: Rng>(random_generator: &mut R, n: usize) -> Vec<f64> {
        random_generator
            .sample_iter::<f64, _>(StandardUniform)
            .take(n)
            .collect()
    }

    fn approximately(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn no_training_data_predicts_the_prior() {
        let kernel = SquaredExponential::new(0.7, 2.0).unwrap();
        let process = GaussianProcess::fit_1d(&[], &[], kernel, 0.1, 1e-10).unwrap();
        assert_eq!(process.training_points(), 0);

        let query = vec![-1.0, 0.0, 0.25, 3.0];
        let prediction = process.predict_1d(&query).unwrap();
        assert_eq!(prediction.mean(), &[0.0, 0.0, 0.0, 0.0]);

        let query = Matrix::column(query);
        let prior = kernel_matrix(&kernel, &query, &query);
        for i in 0..4 {
            for j in 0..4 {
                assert!(approximately(
                    prediction.covariance().get(i, j),
                    prior.get(i, j),
                    1e-12
                ));
            }
        }
        // the noise floor sits on top of the prior variance of 2^2
        for variance in prediction.variance() {
            assert!(approximately(variance, 4.1, 1e-12));
        }
    }

    #[test]
    fn interpolates_noise_free_training_data() {
        let inputs = vec![-2.0, -1.0, 0.0, 1.0, 2.0];
        let targets: Vec<f64> = inputs.iter().map(|x: &f64| (x * 1.3).cos()).collect();
        let process =
            GaussianProcess::fit_1d(&inputs, &targets, SquaredExponential::default(), 0.0, 1e-10)
                .unwrap();
        let prediction = process.predict_1d(&inputs).unwrap();
        for (mean, target) in prediction.mean().iter().zip(&targets) {
            assert!(approximately(*mean, *target, 1e-4));
        }
        // with no noise the posterior has almost no uncertainty at the training points
        for variance in prediction.variance() {
            assert!(variance >= 0.0);
            assert!(variance < 1e-4);
        }
    }

    #[test]
    fn variance_never_drops_below_noise() {
        let inputs: Vec<f64> = (0..30).map(|i| i as f64 * 0.1).collect();
        let targets: Vec<f64> = inputs.iter().map(|x| x.sin()).collect();
        let noise_variance = 0.01;
        let process = GaussianProcess::fit_1d(
            &inputs,
            &targets,
            SquaredExponential::new(0.5, 1.0).unwrap(),
            noise_variance,
            1e-10,
        )
        .unwrap();
        let query: Vec<f64> = (0..60).map(|i| (i as f64 * 0.07) - 0.5).collect();
        let prediction = process.predict_1d(&query).unwrap();
        assert!(prediction.covariance().is_symmetric(0.0));
        for variance in prediction.variance() {
            assert!(variance >= noise_variance);
        }
        for interval in prediction.confidence_intervals(1.96).unwrap() {
            assert!(interval.width() >= 2.0 * 1.96 * noise_variance.sqrt() - 1e-12);
        }
    }

    #[test]
    fn predicting_twice_gives_identical_results() {
        let process = GaussianProcess::fit_1d(
            &[0.0, 1.0, 2.5],
            &[1.0, -1.0, 0.5],
            SquaredExponential::default(),
            0.05,
            1e-10,
        )
        .unwrap();
        let query = [0.3, 1.7, 4.0];
        assert_eq!(
            process.predict_1d(&query).unwrap(),
            process.predict_1d(&query).unwrap()
        );
    }

    #[test]
    fn multidimensional_inputs() {
        let inputs = Matrix::from(vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0]]);
        let process = GaussianProcess::fit(
            &inputs,
            &[0.0, 1.0, 1.0],
            SquaredExponential::default(),
            1e-6,
            1e-10,
        )
        .unwrap();
        let prediction = process.predict(&Matrix::row(vec![1.0, 0.0])).unwrap();
        assert!(approximately(prediction.mean()[0], 1.0, 1e-3));

        assert!(matches!(
            process.predict(&Matrix::column(vec![1.0, 0.0])),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(
            GaussianProcess::fit(&inputs, &[0.0], SquaredExponential::default(), 0.0, 0.0),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    /**
     * A kernel for a straight line through the origin with unit slope variance, k(a, b) = ab
     */
    struct Linear;

    impl Kernel for Linear {
        fn covariance(&self, a: &[f64], b: &[f64]) -> f64 {
            a.iter().zip(b).map(|(a, b)| a * b).sum()
        }
    }

    #[test]
    fn custom_kernels() {
        // this kernel can only represent lines through the origin
        let process = GaussianProcess::fit_1d(&[1.0, 2.0], &[2.0, 4.0], Linear, 1e-6, 0.0).unwrap();
        let prediction = process.predict_1d(&[10.0]).unwrap();
        assert!(approximately(prediction.mean()[0], 20.0, 1e-3));
    }

    #[test]
    fn sample_variance_matches_predicted_variance() {
        let mut random_generator = rand_chacha::ChaCha8Rng::seed_from_u64(16);
        let process = GaussianProcess::fit_1d(
            &[-1.0, 0.0, 1.0],
            &[0.5, -0.5, 0.25],
            SquaredExponential::default(),
            0.01,
            1e-10,
        )
        .unwrap();
        let prediction = process.predict_1d(&[-0.5, 0.5, 2.0, 3.5]).unwrap();

        const SAMPLES: usize = 1000;
        let random_numbers = n_random_numbers(&mut random_generator, SAMPLES * 4);
        let samples = prediction
            .sample(SAMPLES, &mut random_numbers.into_iter(), 1e-10)
            .unwrap();
        assert_eq!(samples.size(), (SAMPLES, 4));

        let latent_variance = prediction.latent_variance();
        for point in 0..4 {
            let mean = linear_algebra::mean(samples.column_iter(point)).unwrap();
            let variance = linear_algebra::variance(samples.column_iter(point)).unwrap();
            let standard_deviation = latent_variance[point].sqrt();
            assert!(approximately(mean, prediction.mean()[point], 0.15 * standard_deviation + 1e-3));
            assert!(
                approximately(variance, latent_variance[point], 0.2 * latent_variance[point] + 1e-4),
                "sample variance {} too far from {}",
                variance,
                latent_variance[point]
            );
        }
    }

    #[test]
    fn sampling_at_training_points() {
        // without noise the posterior covariance at the training points is only positive
        // semi definite, so sampling relies on the jitter retry
        let inputs = vec![0.0, 0.5, 1.0];
        let process = GaussianProcess::fit_1d(
            &inputs,
            &[1.0, 2.0, 3.0],
            SquaredExponential::default(),
            0.0,
            1e-10,
        )
        .unwrap();
        let prediction = process.predict_1d(&inputs).unwrap();
        let mut random_numbers = vec![0.3, 0.7, 0.1, 0.9].into_iter();
        let samples = prediction.sample(1, &mut random_numbers, 1e-6).unwrap();
        for (sample, target) in samples.row_iter(0).zip([1.0, 2.0, 3.0]) {
            assert!(approximately(sample, target, 0.05));
        }
    }

    #[test]
    fn log_marginal_likelihood_prefers_a_suitable_length_scale() {
        let inputs: Vec<f64> = (0..20).map(|i| i as f64 * 0.3).collect();
        let targets: Vec<f64> = inputs.iter().map(|x| x.sin()).collect();
        let likelihood = |length_scale: f64| {
            GaussianProcess::fit_1d(
                &inputs,
                &targets,
                SquaredExponential::new(length_scale, 1.0).unwrap(),
                1e-4,
                1e-10,
            )
            .unwrap()
            .log_marginal_likelihood()
        };
        // a tiny length scale treats every point as unrelated noise
        assert!(likelihood(1.0) > likelihood(0.01));
    }

    #[test]
    fn fitting_from_configuration() {
        let config = RegressionConfig {
            kernel: KernelConfig::SquaredExponential {
                length_scale: 0.5,
                amplitude: 1.5,
            },
            noise_precision: 100.0,
            ..RegressionConfig::default()
        };
        let inputs = Matrix::column(vec![0.0, 1.0]);
        let process = GaussianProcess::from_config(&inputs, &[1.0, 0.0], &config).unwrap();
        assert_eq!(process.kernel().length_scale(), 0.5);
        assert_eq!(process.kernel().amplitude(), 1.5);
        assert!(approximately(process.noise_variance(), 0.01, 1e-15));

        let config = RegressionConfig {
            noise_precision: 0.0,
            ..RegressionConfig::default()
        };
        assert!(matches!(
            GaussianProcess::from_config(&inputs, &[1.0, 0.0], &config),
            Err(Error::Configuration(_))
        ));
    }
}
