//! Input/output boundary: logging setup and JSON persistence.
//!
//! Records are serialized only once fully built; nothing here writes
//! incrementally, so an error never leaves a partial exchange file behind.

use crate::export_impl::{ExchangeRecord, RdmRecord};
use color_eyre::eyre::{bail, Result, WrapErr};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Initialize tracing output for the command-line driver.
pub fn setup_output() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .wrap_err("Failed to serialize record to JSON")?;
    fs::write(path, json)
        .wrap_err_with(|| format!("Unable to write record to {}", path.display()))?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Unable to read record from {}", path.display()))?;
    serde_json::from_str(&content)
        .wrap_err_with(|| format!("Failed to parse record in {}", path.display()))
}

/// Persist one integral exchange record.
pub fn write_exchange_record(path: &Path, record: &ExchangeRecord) -> Result<()> {
    write_json(path, record)?;
    info!("wrote integral exchange record to {}", path.display());
    Ok(())
}

/// Read an integral exchange record back, e.g. to round-trip solver input.
pub fn read_exchange_record(path: &Path) -> Result<ExchangeRecord> {
    read_json(path)
}

/// Persist the RDM exchange record.
pub fn write_rdm_record(path: &Path, record: &RdmRecord) -> Result<()> {
    write_json(path, record)?;
    info!("wrote RDM exchange record to {}", path.display());
    Ok(())
}

pub fn read_rdm_record(path: &Path) -> Result<RdmRecord> {
    read_json(path)
}

/// Output path for the record of state number `index` out of `count`.
///
/// A single state keeps the base path as is; several states get a numeric
/// suffix ahead of the extension so no record overwrites another.
pub fn state_output_path(base: &str, index: usize, count: usize) -> PathBuf {
    if count <= 1 {
        return PathBuf::from(base);
    }
    let base_path = Path::new(base);
    match base_path.extension() {
        Some(ext) => {
            let stem = base_path.with_extension("");
            PathBuf::from(format!(
                "{}.{}.{}",
                stem.display(),
                index,
                ext.to_string_lossy()
            ))
        }
        None => PathBuf::from(format!("{}.{}", base, index)),
    }
}

#[derive(Serialize, Deserialize)]
struct CoefficientFile {
    #[serde(rename = "Ca")]
    ca: Vec<Vec<f64>>,
}

/// Write molecular orbital coefficients for the host program, row by row
/// under the key `Ca`.
pub fn write_orbital_coefficients(path: &Path, ca: &DMatrix<f64>) -> Result<()> {
    let rows: Vec<Vec<f64>> = ca.row_iter().map(|r| r.iter().copied().collect()).collect();
    write_json(path, &CoefficientFile { ca: rows })?;
    info!("wrote orbital coefficients to {}", path.display());
    Ok(())
}

/// Read molecular orbital coefficients written by the host program.
pub fn read_orbital_coefficients(path: &Path) -> Result<DMatrix<f64>> {
    let file: CoefficientFile = read_json(path)?;
    let nrows = file.ca.len();
    if nrows == 0 {
        bail!("orbital coefficient file {} holds no rows", path.display());
    }
    let ncols = file.ca[0].len();
    if file.ca.iter().any(|row| row.len() != ncols) {
        bail!(
            "orbital coefficient file {} is not rectangular",
            path.display()
        );
    }
    Ok(DMatrix::from_row_iterator(
        nrows,
        ncols,
        file.ca.into_iter().flatten(),
    ))
}
