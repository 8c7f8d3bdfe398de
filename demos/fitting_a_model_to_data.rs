/*
 * This example re-creates the "Fitting a Model to Data" example from the emcee documentation:
 *
 * http://dan.iel.fm/emcee/current/user/line/#example-fitting-a-model-to-data
 */

use std::fs::File;
use std::io::{BufWriter, Write};

use log::info;
use rand::Rng;

use emcee_ensemble::{small_ball, EnsembleSampler, Position, Prob, RandomGaussian};

/*
 * Define the equivalent of lnprior, lnlike and lnprob (note: lnprob is automatically
 * derived for you by the `Prob` trait, unless custom behaviour is required.
 */
struct LinearWithUnderestimatedErrors<'a> {
    x: &'a [f64],
    y: &'a [f64],
    e: &'a [f64],
}

impl<'a> Prob for LinearWithUnderestimatedErrors<'a> {
    fn lnlike(&self, theta: &Position) -> f64 {
        assert_eq!(theta.dim(), 3);
        assert_eq!(self.x.len(), self.y.len());
        assert_eq!(self.y.len(), self.e.len());

        let m = theta[0];
        let b = theta[1];
        let lnf = theta[2];

        let mut result = 0.;
        for i in 0..self.x.len() {
            let model = m * self.x[i] + b;
            let inv_sigma2 = 1.0 / (self.e[i].powf(2.0) + model.powf(2.0) * (2.0 * lnf).exp());
            result += (self.y[i] - model).powf(2.) * inv_sigma2 - inv_sigma2.ln();
        }
        -0.5 * result
    }

    fn lnprior(&self, theta: &Position) -> f64 {
        assert_eq!(theta.dim(), 3);

        let m = theta[0];
        let b = theta[1];
        let lnf = theta[2];

        if (m > -5.0) && (m < 5.0) && (b > 0.0) && (b < 10.0) && (lnf > -10.0) && (lnf < 1.0) {
            0.
        } else {
            -std::f64::INFINITY
        }
    }
}

fn main() {
    env_logger::init();

    /* Pre-generate rng and distributions */
    let mut rng = rand::thread_rng();
    let mut norm_gen = RandomGaussian::from_entropy();

    // Choose the "true" parameters.
    let m_true = -0.9594f64;
    let b_true = 4.294f64;
    let f_true = 0.534f64;

    // Generate some synthetic data from the model.
    let npoints = 50usize;
    let x = {
        let mut unsorted: Vec<f64> = (0..npoints).map(|_| rng.gen_range(0.0..10.0)).collect();
        unsorted.sort_by(|a, b| a.total_cmp(b));
        unsorted
    };
    let mut y = Vec::with_capacity(npoints);
    let mut yerr = Vec::with_capacity(npoints);

    for xval in &x {
        let yerr_val = 0.1 + 0.5 * rng.gen::<f64>();
        let mut y_val = m_true * xval + b_true;
        y_val += (f_true * y_val).abs() * norm_gen.sample();
        y_val += yerr_val * norm_gen.sample();

        y.push(y_val);
        yerr.push(yerr_val);
    }

    let model = LinearWithUnderestimatedErrors {
        x: &x,
        y: &y,
        e: &yerr,
    };

    /*
     * Shortcut the least squares minimisation by starting the sampling
     * from the values found in the documentation
     */
    let nwalkers = 100;
    let pos = small_ball(nwalkers, &[-1.003, 4.528, 0.454], &[1e-4, 1e-4, 1e-4])
        .expect("building initial positions");

    /*
     * Now let's get to the MCMC sampling
     */
    let mut sampler = EnsembleSampler::new(&model);
    sampler.run_mcmc(&pos, 500).expect("running sampler");
    info!("acceptance fraction: {:?}", sampler.acceptance_fraction());

    let flatchain = sampler.flatchain();

    let file = File::create("/tmp/emcee-results.txt").expect("opening output file");
    let mut writer = BufWriter::new(&file);

    for (i, position) in flatchain.iter().enumerate() {
        // Skip the first 50 iterations
        if i < 50 * nwalkers {
            continue;
        }

        writeln!(&mut writer, "{} {} {}", position[0], position[1], position[2])
            .expect("writing output line");
    }
}
