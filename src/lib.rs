//! Affine-invariant ensemble MCMC sampling with the stretch move
//!
//! This library implements Goodman & Weare's [Affine Invariant Markov chain
//! Monte Carlo (MCMC) Ensemble sampler][1], following the `emcee` family of
//! samplers by [Dan Foreman-Mackey][2].
//!
//! ## Basic usage
//!
//! ### Implementing models
//!
//! The sampler needs a log probability. The simplest is a closure taking a
//! [`Position`][position]:
//!
//! ```rust
//! use emcee_ensemble::{Position, Prob};
//!
//! let lnprobfn = |x: &Position| -0.5 * x.values.iter().map(|v| v * v).sum::<f64>();
//! assert_eq!(lnprobfn.lnprob(&Position::new(&[0.0, 0.0])), 0.0);
//! ```
//!
//! Models which carry data implement [`Prob`][prob] instead. The trait has a
//! default implementation for [`lnprob`][prob-lnprob] which adds the prior and
//! the likelihood (Bayes' rule in log space). Invalid prior values are marked
//! by returning `-inf` from `lnprior`:
//!
//! ```rust
//! # use emcee_ensemble::{Position, Prob};
//! struct Model<'a> {
//!     x: &'a [f64],
//!     y: &'a [f64],
//! }
//!
//! // Linear model y = m * x + c
//! impl<'a> Prob for Model<'a> {
//!     fn lnlike(&self, params: &Position) -> f64 {
//!         let m = params[0];
//!         let c = params[1];
//!
//!         -0.5 * self.x.iter().zip(self.y)
//!             .map(|(xval, yval)| (yval - (m * xval + c)).powf(2.0))
//!             .sum::<f64>()
//!     }
//!
//!     fn lnprior(&self, _params: &Position) -> f64 {
//!         0.0f64
//!     }
//! }
//! ```
//!
//! ### Initial positions
//!
//! Every walker needs a starting position. [`small_ball`][small-ball]
//! scatters them in a Gaussian ball; for reproducible positions pass a seeded
//! [`RandomGaussian`][random-gaussian] to [`small_ball_with_rng`][small-ball-rng]:
//!
//! ```rust
//! use emcee_ensemble::{small_ball_with_rng, RandomGaussian};
//!
//! let mut gaussian = RandomGaussian::seeded(42);
//! let p0 = small_ball_with_rng(20, &[0.0, 0.0], &[1e-2, 1e-2], &mut gaussian).unwrap();
//! assert_eq!(p0.len(), 20);
//! ```
//!
//! ### Running the sampler
//!
//! ```rust
//! use emcee_ensemble::{small_ball, EnsembleSampler, Position};
//!
//! let lnprobfn = |x: &Position| -0.5 * x[0] * x[0];
//! let p0 = small_ball(20, &[0.0], &[1.0]).unwrap();
//!
//! let mut sampler = EnsembleSampler::new(&lnprobfn);
//! sampler.seed(1234);
//! let chain = sampler.run_mcmc(&p0, 100).expect("error running sampler");
//! assert_eq!(chain.len(), 100);
//!
//! let fraction = sampler.acceptance_fraction().unwrap();
//! assert!(fraction >= 0.0 && fraction <= 1.0);
//! assert_eq!(sampler.flatchain().len(), 100 * 20);
//! ```
//!
//! #### Iterative sampling
//!
//! [`sample`][sample] takes a callback which is called once per iteration
//! with a [`Step`][step]:
//!
//! ```rust
//! # use emcee_ensemble::{small_ball, EnsembleSampler, Position};
//! # let lnprobfn = |x: &Position| -0.5 * x[0] * x[0];
//! # let p0 = small_ball(20, &[0.0], &[1.0]).unwrap();
//! # let mut sampler = EnsembleSampler::new(&lnprobfn);
//! sampler.sample(&p0, 10, |step| {
//!     println!("iteration {}: first walker at {:?} (lnprob {})",
//!              step.iteration, step.pos[0], step.lnprob[0]);
//! }).unwrap();
//! ```
//!
//! [1]: http://msp.berkeley.edu/camcos/2010/5-1/p04.xhtml
//! [2]: http://dan.iel.fm/
//! [position]: struct.Position.html
//! [prob]: trait.Prob.html
//! [prob-lnprob]: trait.Prob.html#method.lnprob
//! [small-ball]: fn.small_ball.html
//! [small-ball-rng]: fn.small_ball_with_rng.html
//! [random-gaussian]: struct.RandomGaussian.html
//! [sample]: struct.EnsembleSampler.html#method.sample
//! [step]: struct.Step.html

#![warn(missing_docs)]

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

pub mod errors;
mod gaussian;
mod initializer;
mod position;
mod prob;
mod stores;
mod walker;

use log::{debug, info, trace, warn};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use errors::{EmceeError, Result};
pub use gaussian::{random_normal, RandomGaussian};
pub use initializer::{small_ball, small_ball_with_rng};
pub use position::Position;
pub use prob::Prob;
pub use stores::{Chain, ProbStore};
pub use walker::Walker;

/// Default stretch scale `a`
pub const DEFAULT_PROPOSAL_SCALE: f64 = 2.0;

/// Struct representing the state after one iteration
///
/// An instance is passed to the callback given to [`sample`][sample].
///
/// [sample]: struct.EnsembleSampler.html#method.sample
#[derive(Debug)]
pub struct Step<'s> {
    /// The current positions, one for each walker
    pub pos: &'s [Position],

    /// The log probabilities of the positions in `pos`, one for each walker
    pub lnprob: &'s [f64],

    /// The current iteration number
    pub iteration: usize,
}

/// Sampler settings
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Scale `a` of the stretch distribution `g(z) ∝ 1/sqrt(z)` on `[1/a, a]`;
    /// must be greater than one
    pub proposal_scale: f64,

    /// Seed for the sampler's random number generator; seeded from the
    /// operating system when `None`
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            proposal_scale: DEFAULT_PROPOSAL_SCALE,
            seed: None,
        }
    }
}

/// Affine-invariant Markov-chain Monte Carlo sampler
///
/// Walkers are advanced one at a time, each proposing a stretch move about a
/// partner drawn uniformly from the rest of the ensemble. Partners that have
/// already moved during the current sweep are used at their new positions.
pub struct EnsembleSampler<'a, T: Prob + 'a> {
    lnprob: &'a T,
    proposal_scale: f64,
    rng: Box<dyn RngCore>,
    unit_range: Uniform<f64>,

    walkers: Vec<Walker<'a, T>>,
    naccepted: Vec<usize>,
    iterations: usize,
    chain: Chain,
    probstore: ProbStore,
}

impl<'a, T: Prob + 'a> EnsembleSampler<'a, T> {
    /// Create a new `EnsembleSampler` with the default proposal scale of 2
    pub fn new(lnprob: &'a T) -> Self {
        EnsembleSampler {
            lnprob,
            proposal_scale: DEFAULT_PROPOSAL_SCALE,
            rng: Box::new(StdRng::from_entropy()),
            unit_range: Uniform::new(0f64, 1f64),
            walkers: Vec::new(),
            naccepted: Vec::new(),
            iterations: 0,
            chain: Chain::default(),
            probstore: ProbStore::default(),
        }
    }

    /// Create a new `EnsembleSampler` from explicit settings
    ///
    /// Returns [`EmceeError::InvalidArgument`](errors/enum.EmceeError.html) if
    /// the proposal scale is not a finite number greater than one.
    pub fn from_config(lnprob: &'a T, config: SamplerConfig) -> Result<Self> {
        if !(config.proposal_scale.is_finite() && config.proposal_scale > 1.0) {
            return Err(EmceeError::InvalidArgument(format!(
                "the proposal scale must be greater than one, got {}",
                config.proposal_scale
            )));
        }

        debug!(
            "creating sampler with proposal scale {} (seed: {:?})",
            config.proposal_scale, config.seed
        );

        let mut sampler = EnsembleSampler::new(lnprob);
        sampler.proposal_scale = config.proposal_scale;
        if let Some(seed) = config.seed {
            sampler.seed(seed);
        }
        Ok(sampler)
    }

    /// Swap the random number generator for a deterministic one
    ///
    /// Two samplers with the same seed and inputs produce identical chains.
    pub fn seed(&mut self, seed: u64) {
        self.rng = Box::new(StdRng::seed_from_u64(seed));
    }

    /// Use the given random number generator
    pub fn with_rng<R: RngCore + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Build the ensemble from `p0`, one walker per position
    ///
    /// Discards any previous walkers, chain and acceptance counts, so the
    /// sampler can be restarted. This happens before `p0` is validated: after
    /// an error the sampler is empty until the next successful setup. Each
    /// walker evaluates its log probability once here.
    pub fn setup(&mut self, p0: &[Position]) -> Result<()> {
        self.clear();

        if p0.len() < 2 {
            return Err(EmceeError::InvalidArgument(format!(
                "at least two walkers are required, got {}",
                p0.len()
            )));
        }

        let dim = p0[0].dim();
        if dim == 0 {
            return Err(EmceeError::invalid("the parameter space must have at least one dimension"));
        }

        for (k, position) in p0.iter().enumerate() {
            if position.dim() != dim {
                return Err(EmceeError::InvalidArgument(format!(
                    "walker {} has {} parameters, expected {}",
                    k,
                    position.dim(),
                    dim
                )));
            }
            if position.contains_infs() {
                return Err(EmceeError::InvalidArgument(format!(
                    "at least one parameter value of walker {} was infinite",
                    k
                )));
            }
            if position.contains_nans() {
                return Err(EmceeError::InvalidArgument(format!(
                    "at least one parameter value of walker {} was NaN",
                    k
                )));
            }
        }

        let walkers: Vec<Walker<'a, T>> = p0
            .iter()
            .map(|position| Walker::new(position.clone(), self.lnprob))
            .collect();

        if let Some(k) = walkers.iter().position(|walker| walker.lnprob().is_nan()) {
            return Err(EmceeError::NumericDegenerate(format!(
                "the initial lnprob of walker {} was NaN",
                k
            )));
        }

        let nwalkers = walkers.len();
        if nwalkers < 2 * dim {
            warn!(
                "{} walkers for {} parameters; at least {} are recommended",
                nwalkers,
                dim,
                2 * dim
            );
        }
        debug!("set up {} walkers with {} parameters", nwalkers, dim);

        self.walkers = walkers;
        self.naccepted = vec![0; nwalkers];
        self.iterations = 0;
        self.chain = Chain::new(dim, nwalkers);
        self.probstore = ProbStore::new(nwalkers);
        Ok(())
    }

    /// Advance every walker by one stretch move
    ///
    /// Returns the positions of all walkers after the step, which are also
    /// appended to the chain.
    pub fn advance(&mut self) -> Result<Vec<Position>> {
        let nwalkers = self.walkers.len();
        if nwalkers < 2 {
            return Err(EmceeError::invalid("the sampler has not been set up"));
        }

        let mut link = Vec::with_capacity(nwalkers);
        let mut lnprobs = Vec::with_capacity(nwalkers);
        for k in 0..nwalkers {
            let z = self.draw_stretch();
            let kp = choose_partner(&mut *self.rng, k, nwalkers);

            let (walker, partner) = pair_mut(&mut self.walkers, k, kp);
            if walker.update(z, partner.position(), &mut *self.rng)? {
                self.naccepted[k] += 1;
            }

            link.push(walker.position().clone());
            lnprobs.push(walker.lnprob());
        }

        self.chain.push_snapshot(&link);
        self.probstore.push_probs(&lnprobs);
        self.iterations += 1;

        trace!(
            "iteration {}: {} moves accepted so far",
            self.iterations,
            self.naccepted.iter().sum::<usize>()
        );

        Ok(link)
    }

    /// Run the sampler with a callback called on each iteration
    ///
    /// On each iteration, the callback receives a [`Step`][step] holding the
    /// new positions. The callback is passed as mutable so it can interact
    /// with state from the calling site.
    ///
    /// [step]: struct.Step.html
    pub fn sample<F>(&mut self, p0: &[Position], iterations: usize, mut callback: F) -> Result<&Chain>
    where
        F: FnMut(Step),
    {
        if iterations == 0 {
            self.clear();
            return Err(EmceeError::invalid("the number of iterations must be positive"));
        }

        self.setup(p0)?;
        self.chain = Chain::with_capacity(self.dim(), self.nwalkers(), iterations);

        for iteration in 0..iterations {
            let link = self.advance()?;
            callback(Step {
                pos: &link,
                lnprob: self.probstore.snapshot(iteration),
                iteration,
            });
        }

        if let Some(fraction) = self.acceptance_fraction() {
            info!(
                "ran {} iterations with {} walkers, acceptance fraction {:.3}",
                iterations,
                self.nwalkers(),
                fraction
            );
        }

        Ok(&self.chain)
    }

    /// Run the sampling
    ///
    /// This sets up the ensemble from `p0` and runs the sampler for
    /// `niterations` iterations, returning the chain.
    pub fn run_mcmc(&mut self, p0: &[Position], niterations: usize) -> Result<&Chain> {
        self.sample(p0, niterations, |_step| {})
    }

    /// The positions of every walker at every iteration
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// The log probabilities matching [`chain`](#method.chain)
    pub fn lnprobability(&self) -> &ProbStore {
        &self.probstore
    }

    /// Return the samples as computed by the sampler
    ///
    /// Walker `k` at iteration `i` is at index `i * nwalkers + k`.
    pub fn flatchain(&self) -> Vec<Position> {
        self.chain.flatchain()
    }

    /// Fraction of all proposed moves that were accepted
    ///
    /// `None` until at least one iteration has run.
    pub fn acceptance_fraction(&self) -> Option<f64> {
        if self.iterations == 0 || self.walkers.is_empty() {
            return None;
        }
        let naccepted: usize = self.naccepted.iter().sum();
        Some(naccepted as f64 / (self.iterations * self.walkers.len()) as f64)
    }

    /// Return the fraction of moves accepted, one value per walker
    pub fn walker_acceptance_fractions(&self) -> Vec<f64> {
        self.naccepted
            .iter()
            .map(|naccepted| *naccepted as f64 / self.iterations.max(1) as f64)
            .collect()
    }

    /// The walkers in their current state
    pub fn walkers(&self) -> &[Walker<'a, T>] {
        &self.walkers
    }

    /// Number of iterations run since the last setup
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of walkers in the ensemble
    pub fn nwalkers(&self) -> usize {
        self.walkers.len()
    }

    /// Number of parameters per walker
    pub fn dim(&self) -> usize {
        self.walkers.first().map_or(0, |walker| walker.dim())
    }

    /// The stretch scale `a`
    pub fn proposal_scale(&self) -> f64 {
        self.proposal_scale
    }

    // Internal functions

    fn clear(&mut self) {
        self.walkers.clear();
        self.naccepted.clear();
        self.iterations = 0;
        self.chain = Chain::default();
        self.probstore = ProbStore::default();
    }

    /// `z = ((a - 1) u + 1)^2 / a`, distributed as `1/sqrt(z)` on `[1/a, a]`
    fn draw_stretch(&mut self) -> f64 {
        let a = self.proposal_scale;
        ((a - 1.0) * self.unit_range.sample(&mut *self.rng) + 1.0).powi(2) / a
    }
}

/// Pick a partner for walker `k` uniformly from the other `nwalkers - 1`
fn choose_partner<R: Rng + ?Sized>(rng: &mut R, k: usize, nwalkers: usize) -> usize {
    let kp = rng.gen_range(0..nwalkers - 1);
    if kp >= k {
        kp + 1
    } else {
        kp
    }
}

/// Mutable access to `items[k]` alongside shared access to `items[kp]`
fn pair_mut<W>(items: &mut [W], k: usize, kp: usize) -> (&mut W, &W) {
    assert_ne!(k, kp);
    if k < kp {
        let (lower, upper) = items.split_at_mut(kp);
        (&mut lower[k], &upper[0])
    } else {
        let (lower, upper) = items.split_at_mut(k);
        (&mut upper[0], &lower[kp])
    }
}
