//! Source resolution for stubgen
//!
//! This crate is the "source resolver" seat of the pipeline: it loads one Go
//! package directory per input unit, merges its files, builds the package
//! type scope, resolves every interface method signature (including across
//! package boundaries via the per-file import tables), and flattens embedded
//! interfaces into complete method sets. Anything the later stages see has
//! already been checked here; a unit that does not resolve fails the whole
//! run.

pub mod error;
pub mod resolve;
pub mod unit;

pub use error::*;
pub use resolve::*;
pub use unit::*;

// Re-exported for downstream crates rendering resolved types.
pub use stubgen_parser::{default_import_name, ChanDir};

use std::path::Path;

/// Load and resolve the Go package in `dir`.
pub fn resolve_unit(dir: &Path) -> Result<ResolvedUnit, ResolveError> {
    ResolvedUnit::load(dir)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
