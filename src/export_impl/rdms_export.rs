//! Expansion of reduced density matrices into spin-orbital records.

use super::integrals_export::{expand_sectored_quadruples, expand_spin_diagonal_pairs};
use super::{so_alpha, so_beta, Field, Gamma3Row, OeiRow, RdmRecord, TeiRow};
use crate::solver::{ActiveSpaceSolver, Rdms};
use crate::state::StateWeightsMap;
use color_eyre::eyre::{bail, eyre, Result};
use tracing::info;

/// Spin-orbital one-body density matrix, `(i, j, <i^ j>)` rows.
pub fn expand_gamma1(rdms: &Rdms) -> Vec<OeiRow> {
    expand_spin_diagonal_pairs(rdms.nact(), |i, j| rdms.g1a[(i, j)], |i, j| rdms.g1b[(i, j)])
}

/// Spin-orbital two-body density matrix, same six signed rows per spatial
/// quadruple as the two-electron integrals.
pub fn expand_gamma2(rdms: &Rdms) -> Vec<TeiRow> {
    expand_sectored_quadruples(
        rdms.nact(),
        |i, j, k, l| rdms.g2aa[(i, j, k, l)],
        |i, j, k, l| rdms.g2ab[(i, j, k, l)],
        |i, j, k, l| rdms.g2bb[(i, j, k, l)],
    )
}

/// Spin-orbital three-body density matrix.
///
/// Per spatial 6-tuple: one `aaa` row, nine `aab` rows, nine `abb` rows, and
/// one `bbb` row. The mixed sectors place the single differently-spun
/// creation operator in each of the three creation slots and the matching
/// annihilation operator in each of the three annihilation slots; every
/// placement carries the parity of the transposition that produced it, and
/// the row sign is the product of the two parities.
pub fn expand_gamma3(rdms: &Rdms) -> Result<Vec<Gamma3Row>> {
    let missing = || eyre!("three-body density matrices were not computed by the solver");
    let g3aaa = rdms.g3aaa.as_ref().ok_or_else(missing)?;
    let g3aab = rdms.g3aab.as_ref().ok_or_else(missing)?;
    let g3abb = rdms.g3abb.as_ref().ok_or_else(missing)?;
    let g3bbb = rdms.g3bbb.as_ref().ok_or_else(missing)?;

    let n = rdms.nact();
    let mut rows = Vec::with_capacity(20 * n.pow(6));
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                for l in 0..n {
                    for m in 0..n {
                        for nn in 0..n {
                            rows.push((
                                so_alpha(i),
                                so_alpha(j),
                                so_alpha(k),
                                so_alpha(l),
                                so_alpha(m),
                                so_alpha(nn),
                                g3aaa[[i, j, k, l, m, nn]],
                            ));
                            // aab: the odd operators are the beta creation k
                            // and the beta annihilation n, canonically last
                            push_mixed_sector_rows(
                                &mut rows,
                                g3aab[[i, j, k, l, m, nn]],
                                odd_operator_orders([so_alpha(i), so_alpha(j)], so_beta(k), false),
                                odd_operator_orders([so_alpha(l), so_alpha(m)], so_beta(nn), false),
                            );
                            // abb: the odd operators are the alpha creation i
                            // and the alpha annihilation l, canonically first
                            push_mixed_sector_rows(
                                &mut rows,
                                g3abb[[i, j, k, l, m, nn]],
                                odd_operator_orders([so_beta(j), so_beta(k)], so_alpha(i), true),
                                odd_operator_orders([so_beta(m), so_beta(nn)], so_alpha(l), true),
                            );
                            rows.push((
                                so_beta(i),
                                so_beta(j),
                                so_beta(k),
                                so_beta(l),
                                so_beta(m),
                                so_beta(nn),
                                g3bbb[[i, j, k, l, m, nn]],
                            ));
                        }
                    }
                }
            }
        }
    }
    Ok(rows)
}

/// The three placements of the differently-spun operator among three slots,
/// each with the parity of the transpositions that move it there from its
/// canonical slot. The two same-spin operators keep their relative order.
///
/// `odd_leads` selects the canonical slot: first for the `abb` sector (one
/// alpha ahead of two betas), last for the `aab` sector (one beta behind two
/// alphas). The enumeration starts from the canonical placement.
fn odd_operator_orders(same: [usize; 2], odd: usize, odd_leads: bool) -> [([usize; 3], f64); 3] {
    let [s0, s1] = same;
    if odd_leads {
        [
            ([odd, s0, s1], 1.0),
            ([s0, odd, s1], -1.0),
            ([s0, s1, odd], 1.0),
        ]
    } else {
        [
            ([s0, s1, odd], 1.0),
            ([s0, odd, s1], -1.0),
            ([odd, s0, s1], 1.0),
        ]
    }
}

/// The nine signed rows of one mixed spin sector: every creation placement
/// paired with every annihilation placement, row sign the parity product.
fn push_mixed_sector_rows(
    rows: &mut Vec<Gamma3Row>,
    value: f64,
    creation_orders: [([usize; 3], f64); 3],
    annihilation_orders: [([usize; 3], f64); 3],
) {
    for (cre, cre_sign) in creation_orders {
        for (ann, ann_sign) in annihilation_orders {
            rows.push((
                cre[0],
                cre[1],
                cre[2],
                ann[0],
                ann[1],
                ann[2],
                cre_sign * ann_sign * value,
            ));
        }
    }
}

/// Build the RDM exchange record of the state-averaged calculation.
///
/// One record covers the whole average. `energy` is the first root of the
/// lowest-ordered state in the solver's energy map. Requesting rank 3 from a
/// solver that did not compute it is an error.
pub fn build_rdm_record<S: ActiveSpaceSolver>(
    solver: &S,
    state_weights: &StateWeightsMap,
    max_rdm_level: usize,
) -> Result<RdmRecord> {
    let rdms = solver.compute_average_rdms(state_weights, max_rdm_level)?;
    rdms.validate()?;

    let energies_map = solver.state_energies_map();
    let (state, energies) = energies_map
        .iter()
        .next()
        .ok_or_else(|| eyre!("solver returned no state energies"))?;
    let energy = *energies
        .first()
        .ok_or_else(|| eyre!("solver returned no root energies for state {}", state))?;

    let gamma1 = expand_gamma1(&rdms);
    let gamma2 = expand_gamma2(&rdms);
    let gamma3 = if max_rdm_level == 3 {
        if !rdms.has_rank3() {
            bail!(
                "a third-order density matrix was requested but the solver computed ranks up to 2"
            );
        }
        Some(Field::new(
            expand_gamma3(&rdms)?,
            "three-body density matrix as a list of tuples (i,j,k,l,m,n <i^ j^ k^ n m l>)",
        ))
    } else {
        None
    };

    info!(
        "expanded density matrices for {} active orbitals (max rank {})",
        rdms.nact(),
        max_rdm_level
    );

    Ok(RdmRecord {
        energy: Field::new(energy, "energy"),
        gamma1: Field::new(
            gamma1,
            "one-body density matrix as a list of tuples (i,j,<i^ j>)",
        ),
        gamma2: Field::new(
            gamma2,
            "two-body density matrix as a list of tuples (i,j,k,l,<i^ j^ l k>)",
        ),
        gamma3,
    })
}
