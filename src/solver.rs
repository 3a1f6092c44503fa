//! Active-space solver interface and reduced density matrix bundle.

use crate::state::{StateInfo, StateWeightsMap};
use color_eyre::eyre::{bail, Result};
use ndarray::{Array2, Array4, Array6};
use std::collections::BTreeMap;

/// State-averaged reduced density matrices over spatial orbitals, split by
/// spin sector. Rank-3 tensors are present only when the solver was asked
/// for them.
#[derive(Debug, Clone)]
pub struct Rdms {
    pub g1a: Array2<f64>,
    pub g1b: Array2<f64>,
    pub g2aa: Array4<f64>,
    pub g2ab: Array4<f64>,
    pub g2bb: Array4<f64>,
    pub g3aaa: Option<Array6<f64>>,
    pub g3aab: Option<Array6<f64>>,
    pub g3abb: Option<Array6<f64>>,
    pub g3bbb: Option<Array6<f64>>,
}

impl Rdms {
    /// Rank-1 and rank-2 bundle with zeroed tensors.
    pub fn zeros(nact: usize) -> Self {
        Rdms {
            g1a: Array2::zeros((nact, nact)),
            g1b: Array2::zeros((nact, nact)),
            g2aa: Array4::zeros((nact, nact, nact, nact)),
            g2ab: Array4::zeros((nact, nact, nact, nact)),
            g2bb: Array4::zeros((nact, nact, nact, nact)),
            g3aaa: None,
            g3aab: None,
            g3abb: None,
            g3bbb: None,
        }
    }

    /// Number of active orbitals, taken from the rank-1 alpha block.
    pub fn nact(&self) -> usize {
        self.g1a.shape()[0]
    }

    /// True when all four rank-3 spin sectors are present.
    pub fn has_rank3(&self) -> bool {
        self.g3aaa.is_some() && self.g3aab.is_some() && self.g3abb.is_some() && self.g3bbb.is_some()
    }

    /// Check that every tensor is square over the same orbital count.
    pub fn validate(&self) -> Result<()> {
        let n = self.nact();
        let rank2_ok = |t: &Array2<f64>| t.shape() == [n, n];
        let rank4_ok = |t: &Array4<f64>| t.shape() == [n, n, n, n];
        let rank6_ok = |t: &Array6<f64>| t.shape() == [n, n, n, n, n, n];

        let consistent = rank2_ok(&self.g1a)
            && rank2_ok(&self.g1b)
            && rank4_ok(&self.g2aa)
            && rank4_ok(&self.g2ab)
            && rank4_ok(&self.g2bb)
            && self.g3aaa.iter().all(|t| rank6_ok(t))
            && self.g3aab.iter().all(|t| rank6_ok(t))
            && self.g3abb.iter().all(|t| rank6_ok(t))
            && self.g3bbb.iter().all(|t| rank6_ok(t));

        if !consistent {
            bail!(
                "inconsistent density matrix data: tensor dimensions disagree with {} active orbitals",
                n
            );
        }
        Ok(())
    }
}

/// A solver that can produce state-averaged RDMs and per-root energies.
///
/// The actual diagonalization behind these calls belongs to the external
/// active-space solver; this crate only consumes its results.
pub trait ActiveSpaceSolver {
    fn compute_average_rdms(
        &self,
        state_weights: &StateWeightsMap,
        max_rdm_level: usize,
    ) -> Result<Rdms>;

    /// Energies of every computed root, keyed by state.
    fn state_energies_map(&self) -> BTreeMap<StateInfo, Vec<f64>>;
}

/// Tabulated solver results, for the command-line driver and tests.
#[derive(Debug, Clone)]
pub struct ModelSolver {
    energies: BTreeMap<StateInfo, Vec<f64>>,
    rdms: Rdms,
}

impl ModelSolver {
    pub fn new(energies: BTreeMap<StateInfo, Vec<f64>>, rdms: Rdms) -> Result<Self> {
        rdms.validate()?;
        Ok(ModelSolver { energies, rdms })
    }
}

impl ActiveSpaceSolver for ModelSolver {
    fn compute_average_rdms(
        &self,
        state_weights: &StateWeightsMap,
        max_rdm_level: usize,
    ) -> Result<Rdms> {
        for state in state_weights.keys() {
            if !self.energies.contains_key(state) {
                bail!(
                    "inconsistent state-weights map: state {} was not computed by this solver",
                    state
                );
            }
        }

        let mut rdms = self.rdms.clone();
        if max_rdm_level < 3 {
            rdms.g3aaa = None;
            rdms.g3aab = None;
            rdms.g3abb = None;
            rdms.g3bbb = None;
        }
        Ok(rdms)
    }

    fn state_energies_map(&self) -> BTreeMap<StateInfo, Vec<f64>> {
        self.energies.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array6;

    #[test]
    fn validate_catches_dimension_mismatch() {
        let mut rdms = Rdms::zeros(2);
        assert!(rdms.validate().is_ok());

        rdms.g2ab = Array4::zeros((2, 2, 2, 3));
        assert!(rdms.validate().is_err());
    }

    #[test]
    fn model_solver_strips_rank3_below_level3() {
        let mut rdms = Rdms::zeros(1);
        rdms.g3aaa = Some(Array6::zeros((1, 1, 1, 1, 1, 1)));
        rdms.g3aab = Some(Array6::zeros((1, 1, 1, 1, 1, 1)));
        rdms.g3abb = Some(Array6::zeros((1, 1, 1, 1, 1, 1)));
        rdms.g3bbb = Some(Array6::zeros((1, 1, 1, 1, 1, 1)));

        let state = StateInfo::new(0, 1, 1);
        let mut energies = BTreeMap::new();
        energies.insert(state, vec![-1.0]);
        let solver = ModelSolver::new(energies, rdms).unwrap();

        let mut weights = StateWeightsMap::new();
        weights.insert(state, vec![(0, 1.0)]);

        let rank2 = solver.compute_average_rdms(&weights, 2).unwrap();
        assert!(!rank2.has_rank3());
        let rank3 = solver.compute_average_rdms(&weights, 3).unwrap();
        assert!(rank3.has_rank3());
    }

    #[test]
    fn model_solver_rejects_unknown_state() {
        let solver = ModelSolver::new(BTreeMap::new(), Rdms::zeros(1)).unwrap();
        let mut weights = StateWeightsMap::new();
        weights.insert(StateInfo::new(0, 1, 1), vec![(0, 1.0)]);
        assert!(solver.compute_average_rdms(&weights, 2).is_err());
    }
}
