// Exchange of active-space integrals and density matrices with external
// spin-orbital solvers, plus determinant-space validation.

pub mod config;
pub mod export_impl;
pub mod fci_impl;
pub mod integrals;
pub mod io;
pub mod solver;
pub mod state;

pub use export_impl::{build_exchange_records, build_rdm_record, ExchangeRecord, RdmRecord};
pub use fci_impl::{enumerate_determinants, solve, Determinant};
pub use integrals::{ActiveSpaceIntegrals, ModelIntegrals};
pub use solver::{ActiveSpaceSolver, ModelSolver, Rdms};
pub use state::{StateInfo, StateWeightsMap};
