//! NIST Cybersecurity Framework core taxonomy.
//!
//! The core spreadsheet lays out Functions, Categories and Subcategories in
//! the first three columns using vertically merged cells, and one
//! Informative Reference per row in the fourth column. This module turns
//! those rows back into the nested tree they represent.

pub mod builder;
pub mod label;
pub mod model;
pub mod reference;

pub use builder::{HierarchyBuilder, build_tree};
pub use label::Label;
pub use model::{Category, Function, Node, NodeKind, Reference, Standard, Subcategory, Tree, TreeSummary};
pub use reference::ReferenceParseError;
