//! Slater determinants as occupation bitstrings, and basis enumeration.

use color_eyre::eyre::{bail, Result};
use itertools::Itertools;

/// A Slater determinant over the active orbitals, stored as independent
/// alpha and beta occupation masks. Identity is the bit pattern; the derived
/// order makes enumerated bases reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Determinant {
    alpha: u64,
    beta: u64,
}

impl Determinant {
    /// Widest active space the fixed-width masks can hold.
    pub const MAX_ORBITALS: usize = 64;

    pub fn new() -> Self {
        Determinant::default()
    }

    pub fn set_alpha_bit(&mut self, i: usize, occupied: bool) {
        debug_assert!(i < Self::MAX_ORBITALS);
        if occupied {
            self.alpha |= 1 << i;
        } else {
            self.alpha &= !(1 << i);
        }
    }

    pub fn set_beta_bit(&mut self, i: usize, occupied: bool) {
        debug_assert!(i < Self::MAX_ORBITALS);
        if occupied {
            self.beta |= 1 << i;
        } else {
            self.beta &= !(1 << i);
        }
    }

    pub fn alpha_bit(&self, i: usize) -> bool {
        (self.alpha >> i) & 1 == 1
    }

    pub fn beta_bit(&self, i: usize) -> bool {
        (self.beta >> i) & 1 == 1
    }

    pub fn count_alpha(&self) -> usize {
        self.alpha.count_ones() as usize
    }

    pub fn count_beta(&self) -> usize {
        self.beta.count_ones() as usize
    }

    /// Occupation string over the first `n` orbitals: `2` doubly occupied,
    /// `+` alpha only, `-` beta only, `0` empty.
    pub fn occupation_string(&self, n: usize) -> String {
        let mut s = String::with_capacity(n + 2);
        s.push('|');
        for i in 0..n {
            s.push(match (self.alpha_bit(i), self.beta_bit(i)) {
                (true, true) => '2',
                (true, false) => '+',
                (false, true) => '-',
                (false, false) => '0',
            });
        }
        s.push('>');
        s
    }
}

/// Enumerate the full determinant basis for `na` alpha and `nb` beta
/// electrons in `nmo` active orbitals.
///
/// Alpha occupation strings run lexicographically over `na`-of-`nmo`
/// combinations, beta strings likewise, with the beta index running fastest.
/// The basis has `C(nmo, na) * C(nmo, nb)` distinct determinants.
pub fn enumerate_determinants(nmo: usize, na: usize, nb: usize) -> Result<Vec<Determinant>> {
    if nmo > Determinant::MAX_ORBITALS {
        bail!(
            "{} active orbitals exceed the {}-orbital determinant width",
            nmo,
            Determinant::MAX_ORBITALS
        );
    }
    if na > nmo || nb > nmo {
        bail!(
            "invalid electron count: {} alpha / {} beta electrons in {} orbitals",
            na,
            nb,
            nmo
        );
    }

    let beta_strings: Vec<Vec<usize>> = (0..nmo).combinations(nb).collect();

    let mut dets = Vec::new();
    for alpha_string in (0..nmo).combinations(na) {
        for beta_string in &beta_strings {
            let mut det = Determinant::new();
            for &i in &alpha_string {
                det.set_alpha_bit(i, true);
            }
            for &i in beta_string {
                det.set_beta_bit(i, true);
            }
            dets.push(det);
        }
    }
    Ok(dets)
}
