//! csf-yaml - convert the NIST Cybersecurity Framework core workbook to YAML
//!
//! The framework core is published as an Excel workbook whose first three
//! columns hold Functions, Categories and Subcategories as vertically merged
//! cells, and whose fourth column holds one Informative Reference per row.
//! This crate reads that workbook and rebuilds the nested taxonomy.
//!
//! # Features
//!
//! - **Xlsx reader**: ZIP package, relationships, shared strings and worksheet parsing
//! - **Hierarchy builder**: merged-cell rows to a Function/Category/Subcategory tree
//! - **Strict grammars**: malformed labels and unknown standards fail with row context
//! - **YAML output**: fixed field order, optional fields omitted
//!
//! # Example
//!
//! ```no_run
//! use csf_yaml::{ConvertOptions, convert_file, to_yaml};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tree = convert_file("csf-core.xlsx", &ConvertOptions::default())?;
//! for function in &tree.functions {
//!     println!("{} has {} categories", function.id, function.children.len());
//! }
//! print!("{}", to_yaml(&tree)?);
//! # Ok(())
//! # }
//! ```

/// Error type shared by every module
pub mod common;

/// Row-level view of worksheet contents
pub mod sheet;

/// Office Open XML (.xlsx) reading
pub mod ooxml;

/// Framework taxonomy model and hierarchy builder
pub mod csf;

/// Workbook to tree conversion entry points
pub mod convert;

/// YAML rendering
pub mod output;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use convert::{ConvertOptions, DEFAULT_INPUT, convert_bytes, convert_file, convert_workbook};
pub use csf::{Category, Function, Node, NodeKind, Reference, Standard, Subcategory, Tree};
pub use output::{to_yaml, write_yaml};
