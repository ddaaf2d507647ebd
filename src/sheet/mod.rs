//! Format-independent view of worksheet contents.
//!
//! The xlsx reader produces [`Row`]s of [`CellValue`]s; the framework
//! builder only ever consumes this module, never the XML layer.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{CellValue, Row};
