/*
 * Sample a 50 dimensional standard Gaussian starting from a deliberately poor
 * initial ball, then report the acceptance fraction and the recovered moments.
 *
 * Run with `RUST_LOG=info` to see the sampler's own log records.
 */

use log::info;
use rand::Rng;

use emcee_ensemble::{small_ball, EnsembleSampler, Position};

fn main() {
    env_logger::init();

    let dim = 50;
    let nwalkers = 100;
    let niterations = 5000;

    let lnprobfn = |x: &Position| -0.5 * x.values.iter().map(|v| v * v).sum::<f64>();

    // Take a rough guess at the initial position.
    let mut rng = rand::thread_rng();
    let means: Vec<f64> = (0..dim).map(|_| 10.0 * rng.gen::<f64>() - 5.0).collect();
    let sigmas: Vec<f64> = (0..dim).map(|_| 4.0 * rng.gen::<f64>() - 2.0).collect();
    let p0 = small_ball(nwalkers, &means, &sigmas).expect("building initial positions");

    info!("sampling a {} dimensional Gaussian for {} steps", dim, niterations);
    let mut sampler = EnsembleSampler::new(&lnprobfn);
    sampler.run_mcmc(&p0, niterations).expect("running sampler");

    let fraction = sampler.acceptance_fraction().unwrap_or(0.0);
    println!("The acceptance is {}%.", (100.0 * fraction).round());

    // Moments of the first coordinate over the second half of the run
    let flat = sampler.flatchain();
    let tail = &flat[flat.len() / 2..];
    let n = tail.len() as f64;
    let mean = tail.iter().map(|p| p[0]).sum::<f64>() / n;
    let var = tail.iter().map(|p| (p[0] - mean).powi(2)).sum::<f64>() / n;
    println!("x[0]: mean {:.3}, variance {:.3}", mean, var);
}
