//! Office Open XML reading.
//!
//! The framework core is distributed as an `.xlsx` workbook. This module
//! reads such a workbook far enough to hand its worksheet rows to the
//! hierarchy builder:
//!
//! - `opc`: ZIP package, part names and relationships
//! - `xlsx`: workbook, shared strings and worksheet parsing

pub mod opc;
pub mod xlsx;
pub(crate) mod xml;
