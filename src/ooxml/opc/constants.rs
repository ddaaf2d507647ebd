//! Relationship type URIs used when locating spreadsheet parts.

/// Relationship types (the `Type` attribute of `<Relationship>`).
pub mod relationship_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const WORKSHEET: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
    pub const SHARED_STRINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";
}

/// Part names used when a package omits the relationship that would point at them.
pub mod default_part {
    pub const WORKBOOK: &str = "/xl/workbook.xml";
    pub const SHARED_STRINGS: &str = "/xl/sharedStrings.xml";
}
