use std::cell::RefCell;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Standard normal variate generator (polar Box-Muller)
///
/// Each accepted pair of uniforms yields two independent normal values. The
/// first is returned straight away and the second is held back for the next
/// call to [`sample`](#method.sample).
#[derive(Debug, Clone)]
pub struct RandomGaussian<R> {
    rng: R,
    pending: Option<f64>,
    range: Uniform<f64>,
}

impl<R: Rng> RandomGaussian<R> {
    /// Wrap a uniform random source
    pub fn new(rng: R) -> Self {
        RandomGaussian {
            rng,
            pending: None,
            range: Uniform::new(-1.0f64, 1.0f64),
        }
    }

    /// Draw the next value from N(0, 1)
    pub fn sample(&mut self) -> f64 {
        if let Some(value) = self.pending.take() {
            return value;
        }

        let (u, v, s) = loop {
            let u = self.range.sample(&mut self.rng);
            let v = self.range.sample(&mut self.rng);
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                break (u, v, s);
            }
        };

        let f = (-2.0 * s.ln() / s).sqrt();
        self.pending = Some(v * f);
        u * f
    }

    /// Discard the held-back value, if any
    pub fn reset(&mut self) {
        self.pending = None;
    }

    /// Access the underlying uniform source
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl RandomGaussian<StdRng> {
    /// Deterministic generator for reproducible draws
    pub fn seeded(seed: u64) -> Self {
        RandomGaussian::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        RandomGaussian::new(StdRng::from_entropy())
    }
}

thread_local! {
    static THREAD_GAUSSIAN: RefCell<RandomGaussian<ThreadRng>> =
        RefCell::new(RandomGaussian::new(rand::thread_rng()));
}

/// Draw from N(0, 1) using a thread-local generator
///
/// Use a [`RandomGaussian`](struct.RandomGaussian.html) directly when the
/// draws need to be reproducible.
pub fn random_normal() -> f64 {
    THREAD_GAUSSIAN.with(|gaussian| gaussian.borrow_mut().sample())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_and_variance(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (mean, var)
    }

    #[test]
    fn test_moments() {
        let mut gaussian = RandomGaussian::seeded(42);
        let values: Vec<f64> = (0..100_000).map(|_| gaussian.sample()).collect();
        let (mean, var) = mean_and_variance(&values);
        assert_approx_eq!(mean, 0.0f64, 0.02);
        assert_approx_eq!(var, 1.0f64, 0.03);
    }

    #[test]
    fn test_cached_half_is_independent() {
        // Only the values returned from the cache, i.e. every second draw
        let mut gaussian = RandomGaussian::seeded(7);
        let pairs: Vec<(f64, f64)> = (0..50_000)
            .map(|_| (gaussian.sample(), gaussian.sample()))
            .collect();
        let second: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        let (mean, var) = mean_and_variance(&second);
        assert_approx_eq!(mean, 0.0f64, 0.03);
        assert_approx_eq!(var, 1.0f64, 0.04);

        let n = pairs.len() as f64;
        let correlation = pairs.iter().map(|&(a, b)| a * b).sum::<f64>() / n;
        assert_approx_eq!(correlation, 0.0f64, 0.03);
    }

    #[test]
    fn test_pending_value_is_used_once() {
        let mut gaussian = RandomGaussian::seeded(1);
        assert!(gaussian.pending.is_none());

        gaussian.sample();
        let cached = gaussian.pending.expect("second value should be cached");

        assert_eq!(gaussian.sample(), cached);
        assert!(gaussian.pending.is_none());
    }

    #[test]
    fn test_reset_discards_pending() {
        let mut gaussian = RandomGaussian::seeded(1);
        gaussian.sample();
        gaussian.reset();
        assert!(gaussian.pending.is_none());
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomGaussian::seeded(3);
        let mut b = RandomGaussian::seeded(3);
        for _ in 0..10 {
            assert_eq!(a.sample(), b.sample());
        }
    }

    #[test]
    fn test_random_normal() {
        let values: Vec<f64> = (0..20_000).map(|_| random_normal()).collect();
        assert!(values.iter().all(|v| v.is_finite()));
        let (mean, var) = mean_and_variance(&values);
        assert_approx_eq!(mean, 0.0f64, 0.05);
        assert_approx_eq!(var, 1.0f64, 0.08);
    }
}
