//! The geometric-cleanup engine.
//!
//! An in-memory [`Document`] of solids is passed through four stages:
//! pair discovery over enlarged oriented bounding boxes, per-pair
//! intersection classification with a fuzzy-tolerance retry ladder,
//! imprinting of overlapping pairs, and finally merging of coincident
//! sub-shapes across the whole assembly. The first three stages are generic
//! over the [`Kernel`] binding surface; the merger works on the topology
//! directly.
//!
//! [`Kernel`]: clearcut_kernel::Kernel

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

/// per-stage configuration and its validation
pub mod config;
/// the intersection classifier
pub mod classify;
/// the ordered assembly the stages mutate in place
pub mod document;
/// timeout-bounded, idempotent wrappers over the kernel's boolean operations
pub mod driver;
/// errors shared by the stages
pub mod errors;
/// the imprinting stage
pub mod imprint;
/// the merging stage
pub mod merge;
/// the worker pool
pub mod pool;
/// pair rows exchanged between the overlap and imprint stages
pub mod report;
/// the pair scheduler and its reporting loop
pub mod schedule;

#[cfg(test)]
pub(crate) mod testing;

pub use classify::{classify_intersection, IntersectStatus};
pub use config::{ImprintConfig, MergeConfig, OverlapConfig};
pub use document::Document;
pub use driver::BoolDriver;
pub use errors::{ConfigError, EngineError};
pub use imprint::{imprint_document, ImprintOutcome, ImprintStatus};
pub use merge::{merge_shapes, MergeOutcome};
pub use pool::WorkerPool;
pub use report::{PairClass, PairRow};
pub use schedule::{scan_overlaps, ScanSummary};
