//! Configuration: command-line arguments and the YAML model-system file.
//!
//! The model-system file stands in for a host quantum chemistry program: it
//! tabulates the active-space integrals, the requested states, and
//! optionally density matrices and Hamiltonian matrix elements produced
//! upstream. Everything numeric is taken verbatim; nothing is computed here.

use crate::integrals::{ModelIntegrals, Spin, SpinPair};
use crate::solver::{ModelSolver, Rdms};
use crate::state::{StateInfo, StateWeightsMap};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, eyre, Result};
use ndarray::{Array2, Array4, Array6};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "spinorb")]
#[command(about = "Active-space integral and RDM exchange for external solvers", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export spin-orbital integrals for every requested state
    Export {
        /// Path to the YAML model-system file
        #[arg(short, long)]
        model: String,

        /// Output JSON path; numbered per state when several are requested
        #[arg(short, long, default_value = "forte_ints.json")]
        output: String,
    },

    /// Export state-averaged reduced density matrices
    Rdms {
        /// Path to the YAML model-system file
        #[arg(short, long)]
        model: String,

        /// Highest density matrix rank to export (2 or 3)
        #[arg(long, default_value_t = 2)]
        max_rdm_level: usize,

        /// Output JSON path
        #[arg(short, long, default_value = "rdms.json")]
        output: String,
    },

    /// Cross-check the Hamiltonian by dense diagonalization over all determinants
    Fci {
        /// Path to the YAML model-system file
        #[arg(short, long)]
        model: String,
    },
}

/// One electronic state requested from the model system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Irrep of the state (Cotton ordering)
    #[serde(default)]
    pub irrep: usize,

    /// Number of alpha electrons
    pub na: usize,

    /// Number of beta electrons
    pub nb: usize,

    /// (root, weight) pairs for state averaging; defaults to root 0 with
    /// weight one
    #[serde(default)]
    pub weights: Vec<(usize, f64)>,

    /// Per-root energies reported by the upstream solver
    #[serde(default)]
    pub energies: Vec<f64>,
}

/// Sparse one-electron integral entries per spin channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OeiTable {
    #[serde(default)]
    pub alpha: Vec<(usize, usize, f64)>,
    #[serde(default)]
    pub beta: Vec<(usize, usize, f64)>,
}

/// Sparse antisymmetrized two-electron integral entries per spin sector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeiTable {
    #[serde(default)]
    pub aa: Vec<(usize, usize, usize, usize, f64)>,
    #[serde(default)]
    pub ab: Vec<(usize, usize, usize, usize, f64)>,
    #[serde(default)]
    pub bb: Vec<(usize, usize, usize, usize, f64)>,
}

/// Sparse density matrix entries per rank and spin sector. The four rank-3
/// sectors are either all present or all absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RdmTables {
    #[serde(default)]
    pub g1a: Vec<(usize, usize, f64)>,
    #[serde(default)]
    pub g1b: Vec<(usize, usize, f64)>,
    #[serde(default)]
    pub g2aa: Vec<(usize, usize, usize, usize, f64)>,
    #[serde(default)]
    pub g2ab: Vec<(usize, usize, usize, usize, f64)>,
    #[serde(default)]
    pub g2bb: Vec<(usize, usize, usize, usize, f64)>,
    #[serde(default)]
    pub g3aaa: Option<Vec<(usize, usize, usize, usize, usize, usize, f64)>>,
    #[serde(default)]
    pub g3aab: Option<Vec<(usize, usize, usize, usize, usize, usize, f64)>>,
    #[serde(default)]
    pub g3abb: Option<Vec<(usize, usize, usize, usize, usize, usize, f64)>>,
    #[serde(default)]
    pub g3bbb: Option<Vec<(usize, usize, usize, usize, usize, usize, f64)>>,
}

/// The model-system file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of active spatial orbitals
    pub nmo: usize,

    /// Irrep of each spatial orbital; all totally symmetric when omitted
    #[serde(default)]
    pub symmetry: Option<Vec<usize>>,

    #[serde(default)]
    pub frozen_core_energy: f64,
    #[serde(default)]
    pub scalar_energy: f64,
    #[serde(default)]
    pub nuclear_repulsion_energy: f64,

    #[serde(default)]
    pub oei: OeiTable,
    #[serde(default)]
    pub tei: TeiTable,

    /// Electronic states to export or validate
    pub states: Vec<StateConfig>,

    /// Density matrices from the upstream solver, for the `rdms` command
    #[serde(default)]
    pub rdms: Option<RdmTables>,

    /// Hamiltonian matrix elements `(I, J, value)` over the enumerated
    /// determinant basis, for the `fci` command
    #[serde(default)]
    pub hamiltonian: Option<Vec<(usize, usize, f64)>>,
}

impl Config {
    /// Build the tabulated integral provider from the file's entries.
    pub fn to_integrals(&self) -> Result<ModelIntegrals> {
        let symmetry = self
            .symmetry
            .clone()
            .unwrap_or_else(|| vec![0; self.nmo]);
        let mut ints = ModelIntegrals::new(self.nmo, symmetry)?;
        ints.set_scalar_energies(
            self.frozen_core_energy,
            self.scalar_energy,
            self.nuclear_repulsion_energy,
        );

        for &(i, j, value) in &self.oei.alpha {
            ints.set_oei(Spin::Alpha, i, j, value)?;
        }
        for &(i, j, value) in &self.oei.beta {
            ints.set_oei(Spin::Beta, i, j, value)?;
        }
        for &(i, j, k, l, value) in &self.tei.aa {
            ints.set_tei(SpinPair::AlphaAlpha, i, j, k, l, value)?;
        }
        for &(i, j, k, l, value) in &self.tei.ab {
            ints.set_tei(SpinPair::AlphaBeta, i, j, k, l, value)?;
        }
        for &(i, j, k, l, value) in &self.tei.bb {
            ints.set_tei(SpinPair::BetaBeta, i, j, k, l, value)?;
        }
        Ok(ints)
    }

    /// State-averaging weights of the requested states.
    pub fn to_state_weights(&self) -> StateWeightsMap {
        let mut map = StateWeightsMap::new();
        for state in &self.states {
            let weights = if state.weights.is_empty() {
                vec![(0, 1.0)]
            } else {
                state.weights.clone()
            };
            map.insert(StateInfo::new(state.irrep, state.na, state.nb), weights);
        }
        map
    }

    /// Build the tabulated solver from the file's density matrix tables.
    pub fn to_solver(&self) -> Result<ModelSolver> {
        let tables = self
            .rdms
            .as_ref()
            .ok_or_else(|| eyre!("model file carries no density matrix tables"))?;

        let nact = self.nmo;
        let mut rdms = Rdms::zeros(nact);
        fill_rank2(&mut rdms.g1a, nact, &tables.g1a)?;
        fill_rank2(&mut rdms.g1b, nact, &tables.g1b)?;
        fill_rank4(&mut rdms.g2aa, nact, &tables.g2aa)?;
        fill_rank4(&mut rdms.g2ab, nact, &tables.g2ab)?;
        fill_rank4(&mut rdms.g2bb, nact, &tables.g2bb)?;

        let rank3_tables = [&tables.g3aaa, &tables.g3aab, &tables.g3abb, &tables.g3bbb];
        let present = rank3_tables.iter().filter(|t| t.is_some()).count();
        if present != 0 && present != 4 {
            bail!("rank-3 density matrix tables must cover all four spin sectors");
        }
        if present == 4 {
            rdms.g3aaa = Some(rank6_from_entries(nact, tables.g3aaa.as_ref().unwrap())?);
            rdms.g3aab = Some(rank6_from_entries(nact, tables.g3aab.as_ref().unwrap())?);
            rdms.g3abb = Some(rank6_from_entries(nact, tables.g3abb.as_ref().unwrap())?);
            rdms.g3bbb = Some(rank6_from_entries(nact, tables.g3bbb.as_ref().unwrap())?);
        }

        let mut energies = BTreeMap::new();
        for state in &self.states {
            energies.insert(
                StateInfo::new(state.irrep, state.na, state.nb),
                state.energies.clone(),
            );
        }
        ModelSolver::new(energies, rdms)
    }

    /// Full scalar offset: frozen core + scalar + nuclear repulsion.
    pub fn total_scalar_energy(&self) -> f64 {
        self.frozen_core_energy + self.scalar_energy + self.nuclear_repulsion_energy
    }
}

fn fill_rank2(
    target: &mut Array2<f64>,
    n: usize,
    entries: &[(usize, usize, f64)],
) -> Result<()> {
    for &(i, j, value) in entries {
        if i >= n || j >= n {
            bail!("density matrix index ({}, {}) out of range for {} orbitals", i, j, n);
        }
        target[(i, j)] = value;
    }
    Ok(())
}

fn fill_rank4(
    target: &mut Array4<f64>,
    n: usize,
    entries: &[(usize, usize, usize, usize, f64)],
) -> Result<()> {
    for &(i, j, k, l, value) in entries {
        if i >= n || j >= n || k >= n || l >= n {
            bail!(
                "density matrix index ({}, {}, {}, {}) out of range for {} orbitals",
                i,
                j,
                k,
                l,
                n
            );
        }
        target[(i, j, k, l)] = value;
    }
    Ok(())
}

fn rank6_from_entries(
    n: usize,
    entries: &[(usize, usize, usize, usize, usize, usize, f64)],
) -> Result<Array6<f64>> {
    let mut target = Array6::zeros((n, n, n, n, n, n));
    for &(i, j, k, l, m, nn, value) in entries {
        if [i, j, k, l, m, nn].iter().any(|&x| x >= n) {
            bail!(
                "density matrix index ({}, {}, {}, {}, {}, {}) out of range for {} orbitals",
                i,
                j,
                k,
                l,
                m,
                nn,
                n
            );
        }
        target[[i, j, k, l, m, nn]] = value;
    }
    Ok(target)
}
