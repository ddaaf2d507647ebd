//! Unified error types for csf-yaml.
//!
//! One error type covers both reading the workbook package and building the
//! framework hierarchy, so callers only handle a single `Result`.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
