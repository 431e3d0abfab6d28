extern crate rand;
extern crate rand_chacha;

extern crate semilinear;

#[cfg(test)]
mod tests {
    use rand::distr::StandardUniform;
    use rand::{Rng, SeedableRng};

    use semilinear::accuracy::relative_mae;
    use semilinear::basis::{BasisConfig, BasisFamily};
    use semilinear::bayesian_ridge::Prior;
    use semilinear::config::RegressionConfig;
    use semilinear::distributions::Gaussian;
    use semilinear::model::SemiLinearModel;
    use semilinear::Error;

    /**
     * A seasonal signal on top of a rising trend, sampled daily over 60 days
     */
    fn seasonal_data<R: Rng>(random_generator: &mut R, noise_variance: f64) -> (Vec<f64>, Vec<f64>) {
        let inputs: Vec<f64> = (0..60).map(|day| day as f64).collect();
        let random_numbers: Vec<f64> = random_generator
            .sample_iter::<f64, _>(StandardUniform)
            .take(60)
            .collect();
        let noise = Gaussian::new(0.0, noise_variance)
            .draw(&mut random_numbers.into_iter(), 60)
            .unwrap();
        let targets = inputs
            .iter()
            .zip(noise)
            .map(|(day, e)| 50.0 + (0.5 * day) + (4.0 * (day * std::f64::consts::TAU / 7.0).sin()) + e)
            .collect();
        (inputs, targets)
    }

    fn weekly_basis(inputs: &[f64]) -> BasisConfig {
        // the inputs are standardised, so a period of 7 days in x is a period of
        // 7 / scale in z
        let scale = semilinear::basis::Normalization::from_inputs(inputs).scale();
        let frequency = std::f64::consts::TAU * scale / 7.0;
        BasisConfig::polynomial(1).with_family(BasisFamily::Sinusoid {
            frequencies: vec![frequency],
        })
    }

    #[test]
    fn fits_a_seasonal_trend() {
        let mut random_generator = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let noise_variance = 0.25;
        let (inputs, targets) = seasonal_data(&mut random_generator, noise_variance);
        let model = SemiLinearModel::fit(
            &inputs,
            &targets,
            weekly_basis(&inputs),
            Prior::new(1e-6, 1.0 / noise_variance).unwrap(),
            1e-10,
        )
        .unwrap();
        assert_eq!(model.basis().columns(), 4);
        assert_eq!(model.ridge().features(), 4);

        let prediction = model.predict(&inputs).unwrap();
        let error = relative_mae(prediction.mean(), &targets).unwrap();
        assert!(error < 0.02, "relative error of {} on the training data", error);

        // most targets fall inside the 95% intervals
        let inside = prediction
            .confidence_intervals(1.96)
            .unwrap()
            .iter()
            .zip(&targets)
            .filter(|(interval, target)| interval.contains(**target))
            .count();
        assert!(inside >= 50, "only {} of 60 targets inside", inside);
        for variance in prediction.variance() {
            assert!(*variance >= noise_variance);
        }
    }

    #[test]
    fn uncertainty_grows_away_from_the_data() {
        let mut random_generator = rand_chacha::ChaCha8Rng::seed_from_u64(8);
        let (inputs, targets) = seasonal_data(&mut random_generator, 1.0);
        let model = SemiLinearModel::fit(
            &inputs,
            &targets,
            BasisConfig::polynomial(2),
            Prior::new(1e-3, 1.0).unwrap(),
            1e-10,
        )
        .unwrap();
        let prediction = model.predict(&[30.0, 120.0]).unwrap();
        assert!(prediction.variance()[1] > prediction.variance()[0]);

        let joint = model.predict_joint(&[30.0, 120.0]).unwrap();
        assert_eq!(joint.mean(), prediction.mean());
        for (joint, point) in joint.variance().iter().zip(prediction.variance()) {
            assert!((joint - point).abs() < 1e-9);
        }
    }

    #[test]
    fn configuration_errors_surface_when_fitting() {
        let config = RegressionConfig {
            basis: BasisConfig::sinusoid(vec![]),
            ..RegressionConfig::default()
        };
        assert!(matches!(
            SemiLinearModel::from_config(&[1.0, 2.0], &[1.0, 2.0], &config),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            SemiLinearModel::from_config(&[1.0, 2.0], &[1.0], &RegressionConfig::default()),
            Err(Error::ShapeMismatch { .. })
        ));
        let model =
            SemiLinearModel::from_config(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &RegressionConfig::default())
                .unwrap();
        assert_eq!(model.ridge().prior(), Prior::default());
    }
}
