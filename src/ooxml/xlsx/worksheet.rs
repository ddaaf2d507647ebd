//! Worksheet metadata for Excel files.

/// Information about a worksheet, as listed in `workbook.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetInfo {
    /// Worksheet name
    pub name: String,
    /// Relationship ID for the worksheet part
    pub relationship_id: String,
    /// Sheet ID
    pub sheet_id: u32,
}
