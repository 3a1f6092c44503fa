//! Determinant-space validation of the active-space Hamiltonian.
//!
//! A brute-force reference path: enumerate every determinant of the active
//! space, assemble the dense Hamiltonian through an externally supplied
//! matrix-element function, and diagonalize exactly. The lowest eigenvalue
//! plus the scalar energy is the reference ground-state energy against which
//! an external solver can be checked.
//!
//! Deliberately `O(ndet^2)` with no symmetry screening; this path targets
//! active spaces small enough for exact diagonalization.

mod determinant;
mod hamiltonian;
#[cfg(test)]
mod tests;

pub use determinant::{enumerate_determinants, Determinant};
pub use hamiltonian::{
    build_hamiltonian, solve, FciSolution, SlaterRules, TabulatedMatrixElements,
};
