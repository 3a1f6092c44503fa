//! Expansion of one- and two-electron integrals into spin-orbital records.

use super::{so_alpha, so_beta, ExchangeRecord, Field, OeiRow, TeiRow};
use crate::integrals::ActiveSpaceIntegrals;
use crate::state::{StateInfo, StateWeightsMap};
use color_eyre::eyre::{bail, Result};
use tracing::info;

/// Emit two spin-orbital rows per spatial pair: all alpha rows first, then
/// all beta rows. Mixed-spin entries are zero for non-relativistic integrals
/// and are never emitted.
pub(super) fn expand_spin_diagonal_pairs(
    n: usize,
    a: impl Fn(usize, usize) -> f64,
    b: impl Fn(usize, usize) -> f64,
) -> Vec<OeiRow> {
    let mut rows = Vec::with_capacity(2 * n * n);
    for i in 0..n {
        for j in 0..n {
            rows.push((so_alpha(i), so_alpha(j), a(i, j)));
        }
    }
    for i in 0..n {
        for j in 0..n {
            rows.push((so_beta(i), so_beta(j), b(i, j)));
        }
    }
    rows
}

/// Emit the six signed spin-orbital rows per spatial quadruple.
///
/// The four mixed-spin rows are the four orderings of one alpha and one beta
/// index within each index pair; each carries the sign of the transposition
/// that produces it. The output stores every permutation explicitly so that
/// a consumer can look up any index combination directly.
pub(super) fn expand_sectored_quadruples(
    n: usize,
    aa: impl Fn(usize, usize, usize, usize) -> f64,
    ab: impl Fn(usize, usize, usize, usize) -> f64,
    bb: impl Fn(usize, usize, usize, usize) -> f64,
) -> Vec<TeiRow> {
    let mut rows = Vec::with_capacity(6 * n * n * n * n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                for l in 0..n {
                    let v_ab = ab(i, j, k, l);
                    let (ia, ja, ka, la) = (so_alpha(i), so_alpha(j), so_alpha(k), so_alpha(l));
                    let (ib, jb, kb, lb) = (so_beta(i), so_beta(j), so_beta(k), so_beta(l));

                    rows.push((ia, ja, ka, la, aa(i, j, k, l))); // aaaa
                    rows.push((ia, jb, ka, lb, v_ab)); // abab
                    rows.push((ia, jb, lb, ka, -v_ab)); // abba
                    rows.push((jb, ia, ka, lb, -v_ab)); // baab
                    rows.push((jb, ia, lb, ka, v_ab)); // baba
                    rows.push((ib, jb, kb, lb, bb(i, j, k, l))); // bbbb
                }
            }
        }
    }
    rows
}

/// Spin-orbital one-electron integrals of the provider.
pub fn expand_oei<I: ActiveSpaceIntegrals>(ints: &I) -> Vec<OeiRow> {
    expand_spin_diagonal_pairs(
        ints.nmo(),
        |i, j| ints.oei_a(i, j),
        |i, j| ints.oei_b(i, j),
    )
}

/// Spin-orbital antisymmetrized two-electron integrals of the provider.
pub fn expand_tei<I: ActiveSpaceIntegrals>(ints: &I) -> Vec<TeiRow> {
    expand_sectored_quadruples(
        ints.nmo(),
        |i, j, k, l| ints.tei_aa(i, j, k, l),
        |i, j, k, l| ints.tei_ab(i, j, k, l),
        |i, j, k, l| ints.tei_bb(i, j, k, l),
    )
}

/// Build one exchange record per entry of the state-weights map.
///
/// Pure with respect to the provider: nothing is written anywhere, the caller
/// owns persistence. The record layout follows the exchange contract exactly,
/// including the redundant two-electron storage.
pub fn build_exchange_records<I: ActiveSpaceIntegrals>(
    ints: &I,
    state_weights: &StateWeightsMap,
) -> Result<Vec<(StateInfo, ExchangeRecord)>> {
    let nmo = ints.nmo();
    let mo_symmetry = ints.mo_symmetry();
    if mo_symmetry.len() != nmo {
        bail!(
            "inconsistent integral data: provider reports {} orbitals but {} symmetry labels",
            nmo,
            mo_symmetry.len()
        );
    }

    let nso = 2 * nmo;
    // Per-spin-orbital metadata: each spatial label doubles, spins alternate.
    let symmetry: Vec<usize> = mo_symmetry.iter().flat_map(|&s| [s, s]).collect();
    let spin: Vec<u8> = (0..nmo).flat_map(|_| [0u8, 1u8]).collect();

    let scalar_energy =
        ints.frozen_core_energy() + ints.scalar_energy() + ints.nuclear_repulsion_energy();

    let oei = expand_oei(ints);
    let tei = expand_tei(ints);
    info!(
        "expanded {} one-electron and {} two-electron spin-orbital entries",
        oei.len(),
        tei.len()
    );

    let mut records = Vec::with_capacity(state_weights.len());
    for state in state_weights.keys() {
        if state.na > nmo || state.nb > nmo {
            bail!(
                "inconsistent state-weights map: state {} needs more electrons than the {} active orbitals can hold",
                state,
                nmo
            );
        }

        let record = ExchangeRecord {
            state_symmetry: Field::new(state.irrep, "Symmetry of the state"),
            na: Field::new(state.na, "number of alpha electrons"),
            nb: Field::new(state.nb, "number of beta electrons"),
            nso: Field::new(nso, "number of spin orbitals"),
            symmetry: Field::new(
                symmetry.clone(),
                "symmetry of each spin orbital (Cotton ordering)",
            ),
            spin: Field::new(spin.clone(), "spin of each spin orbital (0 = alpha, 1 = beta)"),
            scalar_energy: Field::new(
                scalar_energy,
                "scalar energy (sum of nuclear repulsion, frozen core, and scalar contributions)",
            ),
            oei: Field::new(
                oei.clone(),
                "one-electron integrals as a list of tuples (i,j,<i|h|j>)",
            ),
            tei: Field::new(
                tei.clone(),
                "antisymmetrized two-electron integrals as a list of tuples (i,j,k,l,<ij||kl>)",
            ),
        };
        records.push((*state, record));
    }

    Ok(records)
}
