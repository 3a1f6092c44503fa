//! Electronic state identification and state-averaging weights.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies one electronic state by its spatial symmetry and spin.
///
/// The spin multiplicity is carried implicitly through the alpha/beta
/// electron counts. States are totally ordered so that maps keyed by
/// `StateInfo` iterate in a reproducible order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateInfo {
    /// Irreducible representation of the state (Cotton ordering)
    pub irrep: usize,
    /// Number of alpha electrons
    pub na: usize,
    /// Number of beta electrons
    pub nb: usize,
}

impl StateInfo {
    pub fn new(irrep: usize, na: usize, nb: usize) -> Self {
        StateInfo { irrep, na, nb }
    }

    /// Spin multiplicity 2S + 1, with S = (na - nb) / 2 for a high-spin state.
    pub fn multiplicity(&self) -> usize {
        self.na.abs_diff(self.nb) + 1
    }

    /// Total electron count in the active space.
    pub fn nelec(&self) -> usize {
        self.na + self.nb
    }
}

impl fmt::Display for StateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "irrep {} ({} alpha, {} beta electrons)",
            self.irrep, self.na, self.nb
        )
    }
}

/// Which roots of each state enter a state-averaged density matrix, and with
/// what weight.
///
/// A `BTreeMap` keeps iteration deterministic, which in turn keeps exported
/// records byte-for-byte reproducible.
pub type StateWeightsMap = BTreeMap<StateInfo, Vec<(usize, f64)>>;
