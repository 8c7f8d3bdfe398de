use crate::position::Position;

/// Walker positions for every iteration of a run
///
/// Values are stored contiguously, iteration-major, then walker, then
/// parameter. The chain only grows: one snapshot is appended per sampler
/// step.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Chain {
    data: Vec<f64>,
    nparams: usize,
    nwalkers: usize,
    niterations: usize,
}

impl Chain {
    /// Empty chain for `nwalkers` walkers with `nparams` parameters each
    pub fn new(nparams: usize, nwalkers: usize) -> Chain {
        Chain {
            nparams,
            nwalkers,
            niterations: 0,
            data: Vec::new(),
        }
    }

    /// Empty chain with room for `niterations` snapshots
    pub fn with_capacity(nparams: usize, nwalkers: usize, niterations: usize) -> Chain {
        Chain {
            data: Vec::with_capacity(nparams * nwalkers * niterations),
            ..Chain::new(nparams, nwalkers)
        }
    }

    /// Append the positions of all walkers after one iteration
    pub fn push_snapshot(&mut self, snapshot: &[Position]) {
        assert_eq!(snapshot.len(), self.nwalkers);
        for position in snapshot {
            assert_eq!(position.dim(), self.nparams);
            self.data.extend_from_slice(&position.values);
        }
        self.niterations += 1;
    }

    /// Parameter `param_idx` of walker `walker_idx` at iteration `iteration_idx`
    pub fn get(&self, param_idx: usize, walker_idx: usize, iteration_idx: usize) -> f64 {
        assert!(param_idx < self.nparams);
        assert!(walker_idx < self.nwalkers);
        assert!(iteration_idx < self.niterations);

        self.data[self.index(param_idx, walker_idx, iteration_idx)]
    }

    /// Position of walker `walker_idx` at iteration `iteration_idx`
    pub fn position(&self, walker_idx: usize, iteration_idx: usize) -> Position {
        assert!(walker_idx < self.nwalkers);
        assert!(iteration_idx < self.niterations);

        let start = self.index(0, walker_idx, iteration_idx);
        Position::new(&self.data[start..start + self.nparams])
    }

    /// Positions of every walker at iteration `iteration_idx`
    pub fn snapshot(&self, iteration_idx: usize) -> Vec<Position> {
        (0..self.nwalkers)
            .map(|walker| self.position(walker, iteration_idx))
            .collect()
    }

    /// Every snapshot, in iteration order
    pub fn snapshots(&self) -> Vec<Vec<Position>> {
        (0..self.niterations).map(|iter| self.snapshot(iter)).collect()
    }

    /// All positions flattened, iteration-major then walker
    ///
    /// Entry `i * nwalkers + k` is walker `k` at iteration `i`.
    pub fn flatchain(&self) -> Vec<Position> {
        if self.nparams == 0 {
            return vec![Position { values: Vec::new() }; self.niterations * self.nwalkers];
        }
        self.data.chunks(self.nparams).map(Position::new).collect()
    }

    /// Number of stored iterations
    pub fn len(&self) -> usize {
        self.niterations
    }

    /// `true` before the first snapshot is stored
    pub fn is_empty(&self) -> bool {
        self.niterations == 0
    }

    /// Number of walkers per snapshot
    pub fn nwalkers(&self) -> usize {
        self.nwalkers
    }

    /// Number of parameters per position
    pub fn nparams(&self) -> usize {
        self.nparams
    }

    fn index(&self, param_idx: usize, walker_idx: usize, iteration_idx: usize) -> usize {
        (iteration_idx * self.nwalkers * self.nparams) + (walker_idx * self.nparams) + param_idx
    }
}

/// Log probability of every walker at every iteration, aligned with [`Chain`]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProbStore {
    data: Vec<f64>,
    nwalkers: usize,
    niterations: usize,
}

impl ProbStore {
    /// Empty store for `nwalkers` walkers
    pub fn new(nwalkers: usize) -> ProbStore {
        ProbStore {
            nwalkers,
            niterations: 0,
            data: Vec::new(),
        }
    }

    /// Append the log probabilities of all walkers after one iteration
    pub fn push_probs(&mut self, newdata: &[f64]) {
        assert_eq!(newdata.len(), self.nwalkers);
        self.data.extend_from_slice(newdata);
        self.niterations += 1;
    }

    /// Log probability of walker `walker_idx` at iteration `iteration_idx`
    pub fn get(&self, walker_idx: usize, iteration_idx: usize) -> f64 {
        assert!(walker_idx < self.nwalkers);
        assert!(iteration_idx < self.niterations,
                "iteration index {}, number of iterations stored: {}",
                iteration_idx,
                self.niterations);

        self.data[self.index(walker_idx, iteration_idx)]
    }

    /// Log probabilities of every walker at iteration `iteration_idx`
    pub fn snapshot(&self, iteration_idx: usize) -> &[f64] {
        assert!(iteration_idx < self.niterations);
        let start = self.index(0, iteration_idx);
        &self.data[start..start + self.nwalkers]
    }

    /// Number of stored iterations
    pub fn len(&self) -> usize {
        self.niterations
    }

    /// `true` before the first iteration is stored
    pub fn is_empty(&self) -> bool {
        self.niterations == 0
    }

    fn index(&self, walker_idx: usize, iteration_idx: usize) -> usize {
        (iteration_idx * self.nwalkers) + walker_idx
    }
}
