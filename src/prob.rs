use crate::position::Position;

/// Log probability model sampled by the [`EnsembleSampler`](../struct.EnsembleSampler.html)
///
/// Implementors supply the log likelihood and log prior; the posterior is
/// derived by [`lnprob`](#method.lnprob). Any closure `Fn(&Position) -> f64`
/// is also a `Prob`, returning its value as the log probability directly.
pub trait Prob {
    /// Log likelihood of `params`
    fn lnlike(&self, params: &Position) -> f64;

    /// Log prior of `params`; return `-inf` to mark invalid parameters
    fn lnprior(&self, params: &Position) -> f64;

    /// Log posterior probability, `lnprior + lnlike`
    ///
    /// The likelihood is not evaluated when the prior is not finite.
    fn lnprob(&self, params: &Position) -> f64 {
        let lnp = self.lnprior(params);
        if lnp.is_finite() {
            lnp + self.lnlike(params)
        } else {
            -::std::f64::INFINITY
        }
    }
}

impl<F> Prob for F
where
    F: Fn(&Position) -> f64,
{
    fn lnlike(&self, params: &Position) -> f64 {
        self(params)
    }

    fn lnprior(&self, _params: &Position) -> f64 {
        0.0f64
    }

    fn lnprob(&self, params: &Position) -> f64 {
        self(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Bounded {
        calls: Cell<usize>,
    }

    impl Prob for Bounded {
        fn lnlike(&self, params: &Position) -> f64 {
            self.calls.set(self.calls.get() + 1);
            -0.5 * params[0] * params[0]
        }

        fn lnprior(&self, params: &Position) -> f64 {
            if params[0].abs() < 1.0 {
                0.0f64
            } else {
                -::std::f64::INFINITY
            }
        }
    }

    #[test]
    fn test_lnprob_combines_prior_and_likelihood() {
        let model = Bounded { calls: Cell::new(0) };
        assert_approx_eq!(model.lnprob(&Position::new(&[0.5])), -0.125f64);
        assert_eq!(model.calls.get(), 1);
    }

    #[test]
    fn test_lnprob_skips_likelihood_outside_prior() {
        let model = Bounded { calls: Cell::new(0) };
        assert_eq!(model.lnprob(&Position::new(&[2.0])), -::std::f64::INFINITY);
        assert_eq!(model.calls.get(), 0);
    }

    #[test]
    fn test_closure_is_prob() {
        let lnprobfn = |x: &Position| -x.values.iter().map(|v| v * v).sum::<f64>();
        assert_approx_eq!(lnprobfn.lnprob(&Position::new(&[1.0, 2.0])), -5.0f64);
        assert_eq!(lnprobfn.lnprior(&Position::new(&[1.0, 2.0])), 0.0f64);
    }
}
