//! Spin-orbital expansion of active-space quantities.
//!
//! An external solver works over spin orbitals, with antisymmetry spelled out
//! entry by entry; the host program works over spatial orbitals, one index
//! per orbital. This module lifts spatial integrals and density matrices into
//! that redundant spin-orbital form and packages them as exchange records.
//!
//! Spatial orbital `i` maps to spin orbitals `2i` (alpha) and `2i + 1`
//! (beta). The mapping is applied uniformly: one-electron integrals,
//! two-electron integrals, and density matrices of every rank all use the
//! same rule, so a consumer can index any tensor directly without applying
//! permutation symmetry itself.

mod integrals_export;
mod rdms_export;

pub use integrals_export::{build_exchange_records, expand_oei, expand_tei};
pub use rdms_export::{build_rdm_record, expand_gamma1, expand_gamma2, expand_gamma3};

use serde::{Deserialize, Serialize};

/// Alpha spin orbital of spatial orbital `i`.
pub fn so_alpha(i: usize) -> usize {
    2 * i
}

/// Beta spin orbital of spatial orbital `i`.
pub fn so_beta(i: usize) -> usize {
    2 * i + 1
}

/// One exported field: the payload plus a human-readable description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field<T> {
    pub data: T,
    pub description: String,
}

impl<T> Field<T> {
    pub fn new(data: T, description: &str) -> Self {
        Field {
            data,
            description: description.to_string(),
        }
    }
}

/// A one-electron row `(i, j, value)` over spin orbitals.
pub type OeiRow = (usize, usize, f64);
/// A two-electron row `(i, j, k, l, value)` over spin orbitals.
pub type TeiRow = (usize, usize, usize, usize, f64);
/// A three-body row `(i, j, k, l, m, n, value)` over spin orbitals.
pub type Gamma3Row = (usize, usize, usize, usize, usize, usize, f64);

/// Spin-orbital integrals and metadata for one electronic state, ready to be
/// handed to an external solver. Field names are the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    pub state_symmetry: Field<usize>,
    pub na: Field<usize>,
    pub nb: Field<usize>,
    pub nso: Field<usize>,
    pub symmetry: Field<Vec<usize>>,
    pub spin: Field<Vec<u8>>,
    pub scalar_energy: Field<f64>,
    pub oei: Field<Vec<OeiRow>>,
    pub tei: Field<Vec<TeiRow>>,
}

/// Spin-orbital reduced density matrices of the state-averaged calculation.
/// `gamma3` is present only when rank 3 was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdmRecord {
    pub energy: Field<f64>,
    pub gamma1: Field<Vec<OeiRow>>,
    pub gamma2: Field<Vec<TeiRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma3: Option<Field<Vec<Gamma3Row>>>,
}
