/*!
 * Fits both regressions to a noisy signal with a trend and a weekly cycle, then draws a
 * few possible futures from each posterior beyond the end of the observed data.
 */

use rand::distr::StandardUniform;
use rand::{Rng, SeedableRng};
use textplots::{Chart, Plot, Shape};

use semilinear::accuracy::relative_mae;
use semilinear::basis::{BasisConfig, BasisFamily, Normalization};
use semilinear::config::{KernelConfig, RegressionConfig};
use semilinear::distributions::Gaussian;
use semilinear::gaussian_process::GaussianProcess;
use semilinear::matrices::Matrix;
use semilinear::model::SemiLinearModel;
use semilinear::prediction::JointPrediction;

const DAYS_OBSERVED: usize = 56;
const DAYS_FORECAST: usize = 21;
const FUTURES: usize = 3;
// the joint covariance of the ridge posterior over many days has a rank of only 4
const SAMPLING_JITTER: f64 = 1e-8;

fn signal(day: f64) -> f64 {
    20.0 + (0.3 * day) + (3.0 * (day * std::f64::consts::TAU / 7.0).sin())
}

fn n_random_numbers<R: Rng>(random_generator: &mut R, n: usize) -> Vec<f64> {
    random_generator
        .sample_iter::<f64, _>(StandardUniform)
        .take(n)
        .collect()
}

fn points(x: &[f64], fx: impl Iterator<Item = f64>) -> Vec<(f32, f32)> {
    x.iter().zip(fx).map(|(x, y)| (*x as f32, y as f32)).collect()
}

fn plot(
    title: &str,
    x: &[f64],
    observed: &[(f32, f32)],
    prediction: &JointPrediction,
    futures: &Matrix,
    confidence_z: f64,
) {
    let intervals = prediction.confidence_intervals(confidence_z).unwrap();
    let mean = points(x, prediction.mean().iter().copied());
    let lower = points(x, intervals.iter().map(|interval| interval.lower));
    let upper = points(x, intervals.iter().map(|interval| interval.upper));
    let sampled: Vec<(f32, f32)> = (0..futures.rows())
        .flat_map(|future| points(x, futures.row_iter(future)))
        .collect();
    println!("{}", title);
    Chart::new(180, 60, 0.0, (DAYS_OBSERVED + DAYS_FORECAST) as f32)
        .lineplot(&Shape::Points(observed))
        .lineplot(&Shape::Lines(&mean))
        .lineplot(&Shape::Lines(&lower))
        .lineplot(&Shape::Lines(&upper))
        .lineplot(&Shape::Points(&sampled))
        .display();
}

fn main() {
    let mut random_generator = rand_chacha::ChaCha8Rng::seed_from_u64(56);

    let noise_variance = 1.0;
    let inputs: Vec<f64> = (0..DAYS_OBSERVED).map(|day| day as f64).collect();
    let noise = Gaussian::new(0.0, noise_variance)
        .draw(
            &mut n_random_numbers(&mut random_generator, DAYS_OBSERVED).into_iter(),
            DAYS_OBSERVED,
        )
        .unwrap();
    let targets: Vec<f64> = inputs
        .iter()
        .zip(noise)
        .map(|(day, e)| signal(*day) + e)
        .collect();
    let observed = points(&inputs, targets.iter().copied());
    let all_days: Vec<f64> = (0..(DAYS_OBSERVED + DAYS_FORECAST))
        .map(|day| day as f64)
        .collect();

    // the basis standardises the inputs, so the weekly frequency is scaled to match
    let scale = Normalization::from_inputs(&inputs).scale();
    let config = RegressionConfig {
        basis: BasisConfig::polynomial(1).with_family(BasisFamily::Sinusoid {
            frequencies: vec![std::f64::consts::TAU * scale / 7.0],
        }),
        prior_precision: 1e-3,
        noise_precision: 1.0 / noise_variance,
        ..RegressionConfig::default()
    };
    config.validate().unwrap();

    let model = SemiLinearModel::from_config(&inputs, &targets, &config).unwrap();
    println!(
        "Bayesian ridge: log evidence {:.3}, relative error on the training data {:.4}",
        model.ridge().log_evidence(),
        relative_mae(model.predict(&inputs).unwrap().mean(), &targets).unwrap()
    );
    let prediction = model.predict_joint(&all_days).unwrap();
    let futures = prediction
        .sample(
            FUTURES,
            &mut n_random_numbers(&mut random_generator, FUTURES * (all_days.len() + 1)).into_iter(),
            SAMPLING_JITTER,
        )
        .unwrap();
    plot(
        "Bayesian ridge regression",
        &all_days,
        &observed,
        &prediction,
        &futures,
        config.confidence_z,
    );

    // the process has a zero mean prior, so it needs an amplitude on the scale of the data
    let config = RegressionConfig {
        kernel: KernelConfig::SquaredExponential {
            length_scale: 4.0,
            amplitude: 30.0,
        },
        ..config
    };
    let process =
        GaussianProcess::from_config(&Matrix::column(inputs.clone()), &targets, &config).unwrap();
    println!(
        "Gaussian Process: log marginal likelihood {:.3}, relative error on the training data {:.4}",
        process.log_marginal_likelihood(),
        relative_mae(process.predict_1d(&inputs).unwrap().mean(), &targets).unwrap()
    );
    let prediction = process.predict_1d(&all_days).unwrap();
    let futures = prediction
        .sample(
            FUTURES,
            &mut n_random_numbers(&mut random_generator, FUTURES * (all_days.len() + 1)).into_iter(),
            SAMPLING_JITTER,
        )
        .unwrap();
    plot(
        "Gaussian Process regression",
        &all_days,
        &observed,
        &prediction,
        &futures,
        config.confidence_z,
    );
}
