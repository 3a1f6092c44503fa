//! Tests for determinant enumeration and the dense Hamiltonian builder.

use super::*;
use color_eyre::eyre::Result;
use std::collections::HashSet;

#[test]
fn enumeration_covers_all_two_of_four_alpha_strings() {
    let dets = enumerate_determinants(4, 2, 0).unwrap();
    assert_eq!(dets.len(), 6);

    let unique: HashSet<_> = dets.iter().copied().collect();
    assert_eq!(unique.len(), 6);

    for det in &dets {
        assert_eq!(det.count_alpha(), 2);
        assert_eq!(det.count_beta(), 0);
    }

    // lexicographic over the alpha combinations
    let strings: Vec<String> = dets.iter().map(|d| d.occupation_string(4)).collect();
    assert_eq!(
        strings,
        vec!["|++00>", "|+0+0>", "|+00+>", "|0++0>", "|0+0+>", "|00++>"]
    );
}

#[test]
fn enumeration_pairs_every_alpha_string_with_every_beta_string() {
    let dets = enumerate_determinants(2, 1, 1).unwrap();
    let strings: Vec<String> = dets.iter().map(|d| d.occupation_string(2)).collect();
    // beta runs fastest
    assert_eq!(strings, vec!["|20>", "|+->", "|-+>", "|02>"]);
}

#[test]
fn empty_spin_channels_are_allowed() {
    let dets = enumerate_determinants(3, 0, 0).unwrap();
    assert_eq!(dets.len(), 1);
    assert_eq!(dets[0].occupation_string(3), "|000>");
}

#[test]
fn electron_counts_beyond_the_orbital_count_are_rejected() {
    assert!(enumerate_determinants(4, 5, 0).is_err());
    assert!(enumerate_determinants(4, 2, 6).is_err());
    assert!(enumerate_determinants(65, 1, 1).is_err());
}

#[test]
fn determinant_bits_are_independent_per_spin() {
    let mut det = Determinant::new();
    det.set_alpha_bit(0, true);
    det.set_beta_bit(1, true);
    assert!(det.alpha_bit(0) && !det.beta_bit(0));
    assert!(det.beta_bit(1) && !det.alpha_bit(1));
    assert_eq!(det.occupation_string(2), "|+->");

    det.set_alpha_bit(0, false);
    assert_eq!(det.occupation_string(2), "|0->");
}

/// Symmetric matrix elements built from the determinants' bit patterns
/// alone, with no lookup table behind them.
struct PairSumRules;

impl SlaterRules for PairSumRules {
    fn slater_rules(&self, bra: &Determinant, ket: &Determinant) -> Result<f64> {
        let occ = |d: &Determinant| (d.count_alpha() * 3 + d.count_beta()) as f64;
        let overlap = (0..8)
            .filter(|&i| bra.alpha_bit(i) && ket.alpha_bit(i))
            .count() as f64;
        Ok(occ(bra) * occ(ket) + 0.5 * overlap)
    }
}

#[test]
fn dense_hamiltonian_is_numerically_symmetric() {
    let dets = enumerate_determinants(4, 2, 1).unwrap();
    let h = build_hamiltonian(&dets, &PairSumRules).unwrap();

    assert_eq!(h.nrows(), dets.len());
    for i in 0..h.nrows() {
        for j in 0..h.ncols() {
            assert!((h[(i, j)] - h[(j, i)]).abs() < 1e-12);
        }
    }
}

#[test]
fn eigenvalues_come_out_ascending() {
    let dets = enumerate_determinants(3, 1, 1).unwrap();
    let solution = solve(&dets, &PairSumRules, 0.0).unwrap();
    assert_eq!(solution.eigenvalues.len(), dets.len());
    for pair in solution.eigenvalues.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert_eq!(solution.ground_state_energy, solution.eigenvalues[0]);
}

/// Minimal-basis H2 at bond length 1.4 bohr, integrals from the standard
/// tabulation: h_gg, h_uu one-electron energies, Coulomb integrals J_gg,
/// J_uu, J_gu, and exchange K_gu over the gerade/ungerade orbitals.
const H_GG: f64 = -1.2528;
const H_UU: f64 = -0.4756;
const J_GG: f64 = 0.6746;
const J_UU: f64 = 0.6975;
const J_GU: f64 = 0.6636;
const K_GU: f64 = 0.1813;
const E_NUC: f64 = 1.0 / 1.4;

/// Hand-evaluated matrix elements over the four ms = 0 determinants of two
/// electrons in two orbitals, in enumeration order |20>, |+->, |-+>, |02>.
/// Singly-excited determinants decouple from the closed shells by parity.
fn h2_elements() -> Vec<(usize, usize, f64)> {
    let open_shell = H_GG + H_UU + J_GU;
    vec![
        (0, 0, 2.0 * H_GG + J_GG),
        (1, 1, open_shell),
        (2, 2, open_shell),
        (3, 3, 2.0 * H_UU + J_UU),
        (0, 3, K_GU),
        (1, 2, -K_GU),
    ]
}

#[test]
fn toy_system_reproduces_the_reference_ground_state_energy() {
    let dets = enumerate_determinants(2, 1, 1).unwrap();
    let rules = TabulatedMatrixElements::new(&dets, 2, &h2_elements()).unwrap();
    let solution = solve(&dets, &rules, E_NUC).unwrap();

    // The closed-shell 2x2 block determines the ground state analytically.
    let a = 2.0 * H_GG + J_GG;
    let b = 2.0 * H_UU + J_UU;
    let expected = 0.5 * ((a + b) - ((a - b).powi(2) + 4.0 * K_GU * K_GU).sqrt()) + E_NUC;

    assert!((solution.ground_state_energy - expected).abs() < 1e-10);
    // literature full CI energy for this system
    assert!((solution.ground_state_energy - (-1.1372855)).abs() < 1e-4);
}

#[test]
fn tabulated_elements_reject_indices_outside_the_basis() {
    let dets = enumerate_determinants(2, 1, 1).unwrap();
    assert!(TabulatedMatrixElements::new(&dets, 2, &[(0, 4, 1.0)]).is_err());
}

#[test]
fn tabulated_elements_reject_foreign_determinants() {
    let dets = enumerate_determinants(2, 1, 1).unwrap();
    let rules = TabulatedMatrixElements::new(&dets, 2, &h2_elements()).unwrap();

    let mut foreign = Determinant::new();
    foreign.set_alpha_bit(0, true);
    foreign.set_alpha_bit(1, true);
    assert!(rules.slater_rules(&foreign, &dets[0]).is_err());
}

#[test]
fn matrix_element_errors_propagate_out_of_the_build() {
    struct FailingRules;
    impl SlaterRules for FailingRules {
        fn slater_rules(&self, _bra: &Determinant, _ket: &Determinant) -> Result<f64> {
            color_eyre::eyre::bail!("matrix element backend unavailable")
        }
    }

    let dets = enumerate_determinants(2, 1, 0).unwrap();
    let err = build_hamiltonian(&dets, &FailingRules).unwrap_err();
    assert!(err.to_string().contains("backend unavailable"));
}
