//! Command-line driver for active-space exchange.
//!
//! Reads a YAML model-system file (integrals, states, and optionally density
//! matrices or tabulated Hamiltonian elements) and exports spin-orbital
//! exchange records or runs the determinant-space validation.

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use spinorb::config::{Args, Command, Config};
use spinorb::export_impl::{build_exchange_records, build_rdm_record};
use spinorb::fci_impl::{enumerate_determinants, solve, TabulatedMatrixElements};
use spinorb::io;
use std::fs;
use std::path::Path;
use tracing::info;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    io::setup_output();

    match args.command {
        Command::Export { model, output } => run_export(&model, &output),
        Command::Rdms {
            model,
            max_rdm_level,
            output,
        } => run_rdms(&model, max_rdm_level, &output),
        Command::Fci { model } => run_fci(&model),
    }
}

fn load_model(path: &str) -> Result<Config> {
    info!("Reading model system from: {}", path);
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Unable to read model file: {}", path))?;
    serde_yml::from_str::<Config>(&content).wrap_err("Failed to parse model file")
}

fn run_export(model: &str, output: &str) -> Result<()> {
    let config = load_model(model)?;
    let ints = config.to_integrals()?;
    let state_weights = config.to_state_weights();

    let records = build_exchange_records(&ints, &state_weights)?;
    let count = records.len();
    for (index, (state, record)) in records.iter().enumerate() {
        let path = io::state_output_path(output, index, count);
        io::write_exchange_record(&path, record)?;
        info!("state {}: record written to {}", state, path.display());
    }
    Ok(())
}

fn run_rdms(model: &str, max_rdm_level: usize, output: &str) -> Result<()> {
    let config = load_model(model)?;
    let solver = config.to_solver()?;
    let state_weights = config.to_state_weights();

    let record = build_rdm_record(&solver, &state_weights, max_rdm_level)?;
    io::write_rdm_record(Path::new(output), &record)?;
    Ok(())
}

fn run_fci(model: &str) -> Result<()> {
    let config = load_model(model)?;
    let entries = config
        .hamiltonian
        .as_ref()
        .ok_or_else(|| eyre!("model file carries no Hamiltonian matrix elements"))?;
    let scalar_energy = config.total_scalar_energy();

    for state in &config.states {
        let dets = enumerate_determinants(config.nmo, state.na, state.nb)?;
        info!(
            "irrep {}: enumerated {} determinants over {} orbitals",
            state.irrep,
            dets.len(),
            config.nmo
        );
        for det in &dets {
            info!("  {}", det.occupation_string(config.nmo));
        }

        let rules = TabulatedMatrixElements::new(&dets, config.nmo, entries)?;
        let solution = solve(&dets, &rules, scalar_energy)?;
        info!(
            "irrep {}: reference energy = {:.10}",
            state.irrep, solution.ground_state_energy
        );
    }
    Ok(())
}
