use rand::Rng;

use crate::errors::{EmceeError, Result};
use crate::position::Position;
use crate::prob::Prob;

/// One member of the ensemble
///
/// Holds the current position and its cached log probability. The two only
/// ever change together, through [`update`](#method.update).
#[derive(Debug)]
pub struct Walker<'a, T: Prob + 'a> {
    position: Position,
    lnprob: f64,
    lnprobfn: &'a T,
}

impl<'a, T: Prob + 'a> Clone for Walker<'a, T> {
    fn clone(&self) -> Self {
        Walker {
            position: self.position.clone(),
            lnprob: self.lnprob,
            lnprobfn: self.lnprobfn,
        }
    }
}

impl<'a, T: Prob + 'a> Walker<'a, T> {
    /// Create a walker at `position`, evaluating its log probability
    pub fn new(position: Position, lnprobfn: &'a T) -> Self {
        let lnprob = lnprobfn.lnprob(&position);
        Walker {
            position,
            lnprob,
            lnprobfn,
        }
    }

    /// Current position
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Log probability at the current position
    pub fn lnprob(&self) -> f64 {
        self.lnprob
    }

    /// Number of parameters
    pub fn dim(&self) -> usize {
        self.position.dim()
    }

    /// Propose a stretch move about `partner` with scale `z` and accept or
    /// reject it
    ///
    /// Returns `true` if the walker moved. A proposal whose log probability
    /// is NaN is always rejected. Fails with `InvalidArgument` if `z` is not
    /// a finite positive number or `partner` has a different dimension.
    pub fn update<R: Rng + ?Sized>(&mut self, z: f64, partner: &Position, rng: &mut R) -> Result<bool> {
        self.check_move(z, partner)?;
        let ln_threshold = rng.gen::<f64>().ln();
        Ok(self.update_with_threshold(z, partner, ln_threshold))
    }

    fn check_move(&self, z: f64, partner: &Position) -> Result<()> {
        if !(z.is_finite() && z > 0.0) {
            return Err(EmceeError::InvalidArgument(format!(
                "stretch factor must be finite and positive, got {}",
                z
            )));
        }
        if partner.dim() != self.dim() {
            return Err(EmceeError::InvalidArgument(format!(
                "partner has {} parameters, walker has {}",
                partner.dim(),
                self.dim()
            )));
        }
        Ok(())
    }

    fn update_with_threshold(&mut self, z: f64, partner: &Position, ln_threshold: f64) -> bool {
        let proposal = self.position.stretch(partner, z);
        let new_lnprob = self.lnprobfn.lnprob(&proposal);

        // (D - 1) ln z is the Jacobian of the stretch in D dimensions
        let delta = (self.dim() as f64 - 1.0) * z.ln() + new_lnprob - self.lnprob;

        if delta > ln_threshold {
            self.position = proposal;
            self.lnprob = new_lnprob;
            true
        } else {
            false
        }
    }
}
