//! Excel (.xlsx) reading support.
//!
//! Only what is needed to pull worksheet cell values out of a workbook:
//!
//! - [`Workbook`]: opens the package and lists worksheets
//! - [`SharedStrings`]: the workbook-level string table
//! - `parsers`: quick-xml parsers for `workbook.xml` and worksheet parts

pub mod parsers;
pub mod shared_strings;
pub mod workbook;
pub mod worksheet;

pub use shared_strings::SharedStrings;
pub use workbook::Workbook;
pub use worksheet::WorksheetInfo;
