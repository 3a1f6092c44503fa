//! Active-space integral provider interface.
//!
//! The integral provider is modeled as a capability trait: anything exposing
//! the spatial-orbital accessors below can drive an export or a determinant
//! Hamiltonian build. The integrals themselves are computed elsewhere (by the
//! host quantum chemistry program); this crate only consumes them.

use color_eyre::eyre::{bail, Result};
use ndarray::{Array2, Array4};

/// Spin channel of a one-electron quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Alpha,
    Beta,
}

/// Spin sector of a two-electron quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPair {
    AlphaAlpha,
    AlphaBeta,
    BetaBeta,
}

/// Read-only access to active-space integrals over spatial orbitals.
///
/// Two-electron accessors return antisymmetrized integrals in physicist
/// convention, `<ij||kl>` for the same-spin sectors and `<ij|kl>` for the
/// mixed sector. Implementations must report consistent dimensions: the
/// symmetry vector has length `nmo()` and every accessor accepts indices in
/// `[0, nmo())`.
pub trait ActiveSpaceIntegrals {
    fn nmo(&self) -> usize;

    fn oei_a(&self, i: usize, j: usize) -> f64;
    fn oei_b(&self, i: usize, j: usize) -> f64;

    fn tei_aa(&self, i: usize, j: usize, k: usize, l: usize) -> f64;
    fn tei_ab(&self, i: usize, j: usize, k: usize, l: usize) -> f64;
    fn tei_bb(&self, i: usize, j: usize, k: usize, l: usize) -> f64;

    /// Irrep label of each spatial orbital (Cotton ordering).
    fn mo_symmetry(&self) -> Vec<usize>;

    fn frozen_core_energy(&self) -> f64;
    fn scalar_energy(&self) -> f64;
    fn nuclear_repulsion_energy(&self) -> f64;
}

/// Tabulated integrals over a small active space.
///
/// Used by the command-line driver (filled from a model-system file) and by
/// tests. Plays the role of a stand-in host program: the values are taken as
/// given, no integral computation happens here.
#[derive(Debug, Clone)]
pub struct ModelIntegrals {
    nmo: usize,
    symmetry: Vec<usize>,
    oei_a: Array2<f64>,
    oei_b: Array2<f64>,
    tei_aa: Array4<f64>,
    tei_ab: Array4<f64>,
    tei_bb: Array4<f64>,
    frozen_core_energy: f64,
    scalar_energy: f64,
    nuclear_repulsion_energy: f64,
}

impl ModelIntegrals {
    /// Create an empty integral table for `nmo` orbitals.
    ///
    /// Fails if the symmetry vector length disagrees with `nmo`.
    pub fn new(nmo: usize, symmetry: Vec<usize>) -> Result<Self> {
        if symmetry.len() != nmo {
            bail!(
                "inconsistent integral data: {} symmetry labels for {} orbitals",
                symmetry.len(),
                nmo
            );
        }
        Ok(ModelIntegrals {
            nmo,
            symmetry,
            oei_a: Array2::zeros((nmo, nmo)),
            oei_b: Array2::zeros((nmo, nmo)),
            tei_aa: Array4::zeros((nmo, nmo, nmo, nmo)),
            tei_ab: Array4::zeros((nmo, nmo, nmo, nmo)),
            tei_bb: Array4::zeros((nmo, nmo, nmo, nmo)),
            frozen_core_energy: 0.0,
            scalar_energy: 0.0,
            nuclear_repulsion_energy: 0.0,
        })
    }

    pub fn set_scalar_energies(&mut self, frozen_core: f64, scalar: f64, nuclear_repulsion: f64) {
        self.frozen_core_energy = frozen_core;
        self.scalar_energy = scalar;
        self.nuclear_repulsion_energy = nuclear_repulsion;
    }

    /// Set a one-electron integral entry for one spin channel.
    pub fn set_oei(&mut self, spin: Spin, i: usize, j: usize, value: f64) -> Result<()> {
        if i >= self.nmo || j >= self.nmo {
            bail!(
                "one-electron index ({}, {}) out of range for {} orbitals",
                i,
                j,
                self.nmo
            );
        }
        match spin {
            Spin::Alpha => self.oei_a[(i, j)] = value,
            Spin::Beta => self.oei_b[(i, j)] = value,
        }
        Ok(())
    }

    /// Set an antisymmetrized two-electron integral entry for one spin sector.
    pub fn set_tei(
        &mut self,
        sector: SpinPair,
        i: usize,
        j: usize,
        k: usize,
        l: usize,
        value: f64,
    ) -> Result<()> {
        let n = self.nmo;
        if i >= n || j >= n || k >= n || l >= n {
            bail!(
                "two-electron index ({}, {}, {}, {}) out of range for {} orbitals",
                i,
                j,
                k,
                l,
                n
            );
        }
        let table = match sector {
            SpinPair::AlphaAlpha => &mut self.tei_aa,
            SpinPair::AlphaBeta => &mut self.tei_ab,
            SpinPair::BetaBeta => &mut self.tei_bb,
        };
        table[(i, j, k, l)] = value;
        Ok(())
    }
}

impl ActiveSpaceIntegrals for ModelIntegrals {
    fn nmo(&self) -> usize {
        self.nmo
    }

    fn oei_a(&self, i: usize, j: usize) -> f64 {
        self.oei_a[(i, j)]
    }

    fn oei_b(&self, i: usize, j: usize) -> f64 {
        self.oei_b[(i, j)]
    }

    fn tei_aa(&self, i: usize, j: usize, k: usize, l: usize) -> f64 {
        self.tei_aa[(i, j, k, l)]
    }

    fn tei_ab(&self, i: usize, j: usize, k: usize, l: usize) -> f64 {
        self.tei_ab[(i, j, k, l)]
    }

    fn tei_bb(&self, i: usize, j: usize, k: usize, l: usize) -> f64 {
        self.tei_bb[(i, j, k, l)]
    }

    fn mo_symmetry(&self) -> Vec<usize> {
        self.symmetry.clone()
    }

    fn frozen_core_energy(&self) -> f64 {
        self.frozen_core_energy
    }

    fn scalar_energy(&self) -> f64 {
        self.scalar_energy
    }

    fn nuclear_repulsion_energy(&self) -> f64 {
        self.nuclear_repulsion_energy
    }
}
