//! Common types for spreadsheet operations.

use std::borrow::Cow;

/// Types of data that can be stored in a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// String value
    String(String),
    /// Error value (e.g. `#N/A`)
    Error(String),
}

impl CellValue {
    /// Render the cell as text, or `None` when it carries no visible content.
    ///
    /// Whitespace-only strings count as empty: merged-cell continuation
    /// rows are sometimes saved with a blank string instead of no value.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Empty => None,
            CellValue::String(s) | CellValue::Error(s) => {
                if s.trim().is_empty() {
                    None
                } else {
                    Some(Cow::Borrowed(s.as_str()))
                }
            },
            CellValue::Bool(b) => Some(Cow::Owned(if *b { "TRUE" } else { "FALSE" }.to_string())),
            CellValue::Int(i) => Some(Cow::Owned(i.to_string())),
            CellValue::Float(f) => Some(Cow::Owned(f.to_string())),
        }
    }

    /// Check whether the cell has no visible content.
    pub fn is_empty(&self) -> bool {
        self.as_text().is_none()
    }
}

/// A single worksheet row with cells densely indexed by column (0-based).
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Row number as shown in the spreadsheet (1-based)
    pub number: u32,
    /// Cell values, `cells[0]` is column A
    pub cells: Vec<CellValue>,
}

impl Row {
    /// Create a new row.
    pub fn new(number: u32, cells: Vec<CellValue>) -> Self {
        Self { number, cells }
    }

    /// Build a row from plain strings; empty strings become empty cells.
    pub fn from_strs(number: u32, values: &[&str]) -> Self {
        let cells = values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::String((*v).to_string())
                }
            })
            .collect();
        Self { number, cells }
    }

    /// Get the text of the cell at `column`, if it has visible content.
    pub fn text(&self, column: usize) -> Option<Cow<'_, str>> {
        self.cells.get(column).and_then(CellValue::as_text)
    }

    /// Check whether every cell in the row is empty.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_text() {
        assert_eq!(CellValue::Empty.as_text(), None);
        assert_eq!(CellValue::String("  \n".to_string()).as_text(), None);
        assert_eq!(CellValue::Int(15).as_text().as_deref(), Some("15"));
        assert_eq!(CellValue::Float(4.5).as_text().as_deref(), Some("4.5"));
        assert_eq!(
            CellValue::String("ID.AM".to_string()).as_text().as_deref(),
            Some("ID.AM")
        );
    }

    #[test]
    fn test_row_access() {
        let row = Row::from_strs(3, &["", "", "ID.AM-1", "· CCS CSC 1"]);
        assert_eq!(row.text(0), None);
        assert_eq!(row.text(2).as_deref(), Some("ID.AM-1"));
        assert_eq!(row.text(7), None);
        assert!(!row.is_blank());
        assert!(Row::from_strs(9, &["", " "]).is_blank());
    }
}
