//! Dense determinant-space Hamiltonian assembly and diagonalization.

use super::determinant::Determinant;
use color_eyre::eyre::{bail, eyre, Result};
use nalgebra::DMatrix;
use std::collections::HashMap;
use tracing::info;

/// Evaluates `<I|H|J>` between two determinants under the active-space
/// Hamiltonian. Implemented by the host program (Slater-Condon rules live
/// there); consumed here as a black box. Errors propagate to the caller
/// unmodified.
pub trait SlaterRules {
    fn slater_rules(&self, bra: &Determinant, ket: &Determinant) -> Result<f64>;
}

/// Assemble the full dense Hamiltonian over an ordered determinant basis.
///
/// Every ordered pair is computed independently, diagonal and both
/// off-diagonal triangles. The matrix comes out numerically symmetric
/// because the matrix-element function is; the build does not rely on it.
pub fn build_hamiltonian<R: SlaterRules>(
    dets: &[Determinant],
    rules: &R,
) -> Result<DMatrix<f64>> {
    let ndet = dets.len();
    let mut h = DMatrix::zeros(ndet, ndet);
    for (i, det_i) in dets.iter().enumerate() {
        for (j, det_j) in dets.iter().enumerate() {
            h[(i, j)] = rules.slater_rules(det_i, det_j)?;
        }
    }
    Ok(h)
}

/// Result of one exact diagonalization over the determinant basis.
#[derive(Debug, Clone)]
pub struct FciSolution {
    /// All eigenvalues of the determinant-space Hamiltonian, ascending,
    /// without the scalar offset.
    pub eigenvalues: Vec<f64>,
    /// Lowest eigenvalue plus the scalar energy.
    pub ground_state_energy: f64,
}

/// Diagonalize the determinant-space Hamiltonian and report the ground-state
/// energy including the scalar contribution (nuclear repulsion, frozen core,
/// and any other scalar terms supplied by the integral provider).
///
/// Exact dense diagonalization only; intended for the small determinant
/// spaces of a validation run.
pub fn solve<R: SlaterRules>(
    dets: &[Determinant],
    rules: &R,
    scalar_energy: f64,
) -> Result<FciSolution> {
    if dets.is_empty() {
        bail!("cannot diagonalize over an empty determinant basis");
    }

    info!(
        "building {0} x {0} determinant-space Hamiltonian",
        dets.len()
    );
    let h = build_hamiltonian(dets, rules)?;

    let eigen = h.symmetric_eigen();
    let mut eigenvalues: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    // symmetric_eigen does not order its eigenvalues
    eigenvalues.sort_by(f64::total_cmp);

    let ground_state_energy = eigenvalues[0] + scalar_energy;
    info!(
        "lowest eigenvalue {:.10}, ground state energy {:.10}",
        eigenvalues[0], ground_state_energy
    );

    Ok(FciSolution {
        eigenvalues,
        ground_state_energy,
    })
}

/// Matrix elements tabulated over an explicit determinant basis, as read
/// from an external matrix-element dump (`(I, J, value)` triples indexed by
/// basis position).
///
/// The table is mirrored on insertion: the Hamiltonian is symmetric, so one
/// triangle suffices in the input.
pub struct TabulatedMatrixElements {
    index: HashMap<Determinant, usize>,
    elements: DMatrix<f64>,
    norb: usize,
}

impl TabulatedMatrixElements {
    pub fn new(
        dets: &[Determinant],
        norb: usize,
        entries: &[(usize, usize, f64)],
    ) -> Result<Self> {
        let ndet = dets.len();
        let mut index = HashMap::with_capacity(ndet);
        for (position, det) in dets.iter().enumerate() {
            index.insert(*det, position);
        }

        let mut elements = DMatrix::zeros(ndet, ndet);
        for &(i, j, value) in entries {
            if i >= ndet || j >= ndet {
                bail!(
                    "matrix element ({}, {}) outside the {}-determinant basis",
                    i,
                    j,
                    ndet
                );
            }
            elements[(i, j)] = value;
            elements[(j, i)] = value;
        }

        Ok(TabulatedMatrixElements {
            index,
            elements,
            norb,
        })
    }
}

impl SlaterRules for TabulatedMatrixElements {
    fn slater_rules(&self, bra: &Determinant, ket: &Determinant) -> Result<f64> {
        let lookup = |det: &Determinant| {
            self.index.get(det).copied().ok_or_else(|| {
                eyre!(
                    "determinant {} is not part of the tabulated basis",
                    det.occupation_string(self.norb)
                )
            })
        };
        Ok(self.elements[(lookup(bra)?, lookup(ket)?)])
    }
}
