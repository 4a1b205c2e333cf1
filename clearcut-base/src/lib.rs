//! Basic structs and traits shared by the whole workspace: f64-specialised
//! cgmath re-exports, the tolerance discipline, and bounding volumes.

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

/// re-export cgmath with f64-specialised type aliases
pub mod cgmath64;
/// minimal parametric curve and surface traits
pub mod geom_traits;
/// tolerance constants, traits and assertion macros
#[macro_use]
pub mod tolerance;
/// axis-aligned bounding box
pub mod bounding_box;
/// oriented bounding box with separating-axis rejection
pub mod obb;
