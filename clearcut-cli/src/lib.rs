//! Shared plumbing of the stage binaries: logging setup, error-to-exit
//! mapping, and document loading with the per-solid report.

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

use clearcut_engine::errors::EngineError;
use clearcut_io::{IoError, LoadedDocument};
use clearcut_kernel::{queries, Kernel, RectKernel};
use log::{debug, error, warn};
use std::path::Path;
use std::process::ExitCode;
use thiserror::Error;

/// Everything a stage binary can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    /// an I/O front-end failed
    #[error(transparent)]
    Io(#[from] IoError),
    /// a stage aborted
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Initialises logging from the environment (`RUST_LOG`).
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Runs a stage body and maps its outcome onto the process exit code.
pub fn run_stage(body: impl FnOnce() -> Result<ExitCode, CliError>) -> ExitCode {
    init_logging();
    match body() {
        Ok(code) => code,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Loads a document and logs the per-solid report: ordinal, volume,
/// validity defects.
pub fn load_document(path: &Path) -> Result<LoadedDocument, CliError> {
    let file = std::fs::File::open(path).map_err(IoError::Stream)?;
    let loaded = clearcut_io::read_document(std::io::BufReader::new(file))?;
    let kernel = RectKernel::new();
    for (ordinal, shape) in loaded.document.shapes().iter().enumerate() {
        let volume = queries::shape_volume(shape);
        let validity = kernel.check(shape);
        match validity.is_valid() {
            true => debug!("solid {ordinal}: volume {volume:.6}"),
            false => warn!(
                "solid {ordinal}: volume {volume:.6}, defects {:?}",
                validity.defects,
            ),
        }
    }
    Ok(loaded)
}

/// Writes a document back out under the given container kind.
pub fn store_document(
    document: &clearcut_engine::Document<clearcut_kernel::Shape>,
    kind: clearcut_topology::compress::AssemblyKind,
    path: &Path,
) -> Result<(), CliError> {
    let file = std::fs::File::create(path).map_err(IoError::Stream)?;
    clearcut_io::write_document(document, kind, std::io::BufWriter::new(file))?;
    Ok(())
}
