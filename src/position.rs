use std::ops::{Index, IndexMut};

/// A single point in parameter space
///
/// Positions held by a walker are never edited in place: an accepted move
/// replaces the whole vector with the proposal.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Parameter values, one per dimension
    pub values: Vec<f64>,
}

impl Position {
    /// Build a position by copying `values`
    pub fn new(values: &[f64]) -> Self {
        Position { values: Vec::from(values) }
    }

    /// Number of parameters
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Stretch move proposal: move along the line joining `partner` and `self`,
    /// scaled by `z` about `partner`
    pub fn stretch(&self, partner: &Position, z: f64) -> Position {
        assert_eq!(self.dim(), partner.dim());
        let values = self.values
            .iter()
            .zip(&partner.values)
            .map(|(own, other)| other - z * (other - own))
            .collect();
        Position { values }
    }

    /// Returns `true` if any parameter is infinite
    pub fn contains_infs(&self) -> bool {
        self.values.iter().any(|val| val.is_infinite())
    }

    /// Returns `true` if any parameter is NaN
    pub fn contains_nans(&self) -> bool {
        self.values.iter().any(|val| val.is_nan())
    }
}

impl From<Vec<f64>> for Position {
    fn from(values: Vec<f64>) -> Self {
        Position { values }
    }
}

impl Index<usize> for Position {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.values[idx]
    }
}

impl IndexMut<usize> for Position {
    fn index_mut(&mut self, idx: usize) -> &mut f64 {
        &mut self.values[idx]
    }
}
