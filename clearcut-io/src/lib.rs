//! Thin I/O front-ends: the BREP container the stages exchange, and the
//! CSV pair lists the overlap checker emits and the imprinter consumes.

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

/// the BREP container
pub mod brep;
/// CSV pair lists
pub mod csv;

pub use brep::{read_document, write_document, LoadedDocument};
pub use csv::{format_row, parse_rows};

use thiserror::Error;

/// Errors of the I/O front-ends.
#[derive(Debug, Error)]
pub enum IoError {
    /// reading or writing the underlying stream failed
    #[error(transparent)]
    Stream(#[from] std::io::Error),
    /// the container is not syntactically valid
    #[error("malformed BREP container: {0}")]
    Container(#[from] serde_json::Error),
    /// the container violates the structural contract
    #[error("structural error: {0}")]
    Structure(String),
    /// a topological constraint failed while expanding the container
    #[error(transparent)]
    Topology(#[from] clearcut_topology::errors::Error),
    /// a CSV row could not be parsed
    #[error("bad pair row at line {line}: {reason}")]
    BadRow {
        /// one-based line number
        line: usize,
        /// what was wrong
        reason: String,
    },
}
