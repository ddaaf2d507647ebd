//! Parser for Excel worksheet XML files.
//!
//! Walks `<sheetData>` and produces one [`Row`] per `<row>` element, with
//! cells placed at the column given by their `r` reference. Rows and cells
//! that Excel omitted (nothing stored) simply do not appear, so a merged
//! cell's continuation rows show up as [`CellValue::Empty`] at that column.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::common::{Error, Result};
use crate::ooxml::xlsx::SharedStrings;
use crate::ooxml::xml::{TextBuffer, find_attr};
use crate::sheet::{CellValue, Row};

/// Number of columns in a sheet (`A` through `XFD`).
pub const MAX_COLUMNS: u32 = 16_384;

/// Cell being assembled while its child elements stream past.
#[derive(Debug, Default)]
struct PendingCell {
    column: usize,
    cell_type: Option<String>,
    value: Option<String>,
    inline: Option<String>,
}

/// Parse worksheet XML content into rows, resolving shared strings.
pub fn parse_worksheet_xml(content: &str, shared_strings: &SharedStrings) -> Result<Vec<Row>> {
    let mut reader = Reader::from_str(content);
    let mut rows = Vec::new();

    let mut row: Option<Row> = None;
    let mut last_row_number = 0u32;
    let mut next_column = 0usize;
    let mut cell: Option<PendingCell> = None;

    let mut text = TextBuffer::new();
    let mut in_value = false;
    let mut in_inline_text = false;
    let mut in_inline = false;
    let mut phonetic_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"row" => {
                    let number = row_number(e, last_row_number)?;
                    last_row_number = number;
                    next_column = 0;
                    row = Some(Row::new(number, Vec::new()));
                },
                b"c" if row.is_some() => {
                    let column = cell_column(e, next_column)?;
                    next_column = column + 1;
                    cell = Some(PendingCell {
                        column,
                        cell_type: find_attr(e, b"t")?,
                        ..PendingCell::default()
                    });
                },
                b"v" if cell.is_some() => {
                    in_value = true;
                    text.clear();
                },
                b"is" if cell.is_some() => {
                    in_inline = true;
                    if let Some(cell) = cell.as_mut() {
                        cell.inline = Some(String::new());
                    }
                },
                b"rPh" => phonetic_depth += 1,
                b"t" if in_inline && phonetic_depth == 0 => {
                    in_inline_text = true;
                    text.clear();
                },
                _ => {},
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"row" => {
                    // A row with no cells carries formatting only.
                    last_row_number = row_number(e, last_row_number)?;
                },
                b"c" if row.is_some() => {
                    next_column = cell_column(e, next_column)? + 1;
                },
                _ => {},
            },
            Event::Text(ref t) if in_value || in_inline_text => text.push_raw(&**t),
            Event::GeneralRef(ref r) if in_value || in_inline_text => text.push_entity(&**r),
            Event::CData(ref c) if in_value || in_inline_text => text.push_cdata(&**c),
            Event::End(ref e) => match e.local_name().as_ref() {
                b"v" if in_value => {
                    in_value = false;
                    if let Some(cell) = cell.as_mut() {
                        cell.value = Some(text.finish()?);
                    }
                },
                b"t" if in_inline_text => {
                    in_inline_text = false;
                    let fragment = text.finish()?;
                    if let Some(inline) = cell.as_mut().and_then(|c| c.inline.as_mut()) {
                        inline.push_str(&fragment);
                    }
                },
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                b"is" => in_inline = false,
                b"c" => {
                    if let (Some(pending), Some(row)) = (cell.take(), row.as_mut()) {
                        let value = resolve_cell(&pending, shared_strings, row.number)?;
                        if row.cells.len() <= pending.column {
                            row.cells.resize(pending.column + 1, CellValue::Empty);
                        }
                        row.cells[pending.column] = value;
                    }
                },
                b"row" => {
                    if let Some(row) = row.take() {
                        rows.push(row);
                    }
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(rows)
}

/// Read the `r` attribute of a `<row>`, defaulting to the next row number.
fn row_number(e: &BytesStart<'_>, last_row_number: u32) -> Result<u32> {
    match find_attr(e, b"r")? {
        Some(r) => r
            .parse::<u32>()
            .map_err(|_| Error::InvalidFormat(format!("Invalid row number '{}'", r))),
        None => last_row_number
            .checked_add(1)
            .ok_or_else(|| Error::InvalidFormat("Row number out of range".to_string())),
    }
}

/// Read the column of a `<c>` from its reference, defaulting to the next column.
fn cell_column(e: &BytesStart<'_>, next_column: usize) -> Result<usize> {
    match find_attr(e, b"r")? {
        Some(reference) => Ok(reference_to_coords(&reference)?.0 as usize),
        None if next_column < MAX_COLUMNS as usize => Ok(next_column),
        None => Err(Error::InvalidFormat(format!(
            "Cell beyond column {} in row",
            MAX_COLUMNS
        ))),
    }
}

/// Turn a parsed cell into a value according to its `t` attribute.
fn resolve_cell(cell: &PendingCell, shared_strings: &SharedStrings, row: u32) -> Result<CellValue> {
    let value = cell.value.as_deref();

    let resolved = match (cell.cell_type.as_deref(), value) {
        (Some("inlineStr"), _) => match &cell.inline {
            Some(text) => CellValue::String(text.clone()),
            None => CellValue::Empty,
        },
        (_, None) => CellValue::Empty,
        (Some("s"), Some(v)) => {
            let index = v.trim().parse::<usize>().map_err(|_| {
                Error::InvalidFormat(format!("Invalid shared string index '{}' in row {}", v, row))
            })?;
            let text = shared_strings.get(index).ok_or_else(|| {
                Error::InvalidFormat(format!(
                    "Shared string index {} out of range in row {}",
                    index, row
                ))
            })?;
            CellValue::String(text.to_string())
        },
        (Some("str"), Some(v)) | (Some("d"), Some(v)) => CellValue::String(v.to_string()),
        (Some("b"), Some(v)) => match v {
            "1" => CellValue::Bool(true),
            "0" => CellValue::Bool(false),
            _ => CellValue::Error(format!("Invalid boolean value '{}'", v)),
        },
        (Some("e"), Some(v)) => CellValue::Error(v.to_string()),
        (_, Some(v)) => {
            if let Ok(int_val) = v.parse::<i64>() {
                CellValue::Int(int_val)
            } else if let Ok(float_val) = v.parse::<f64>() {
                CellValue::Float(float_val)
            } else {
                CellValue::String(v.to_string())
            }
        },
    };

    Ok(resolved)
}

/// Convert an Excel reference (e.g., "A1") to a 0-based column and 1-based row.
///
/// Columns past `XFD` are rejected.
pub fn reference_to_coords(reference: &str) -> Result<(u32, u32)> {
    let bytes = reference.as_bytes();
    let col_str_end = bytes
        .iter()
        .position(|b| b.is_ascii_digit())
        .unwrap_or(bytes.len());

    if col_str_end == 0 {
        return Err(Error::InvalidFormat(format!("Invalid reference: {}", reference)));
    }

    // Column letters are bijective base 26 (A=1, Z=26, AA=27)
    let mut col_num = 0u32;
    for &byte in &bytes[..col_str_end] {
        if !byte.is_ascii_alphabetic() {
            return Err(Error::InvalidFormat(format!(
                "Invalid column in reference: {}",
                reference
            )));
        }
        let digit = (byte.to_ascii_uppercase() - b'A' + 1) as u32;
        col_num = col_num
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .filter(|&n| n <= MAX_COLUMNS)
            .ok_or_else(|| {
                Error::InvalidFormat(format!("Column out of range in reference: {}", reference))
            })?;
    }

    let row_num = reference[col_str_end..].parse::<u32>().map_err(|_| {
        Error::InvalidFormat(format!("Invalid row number in reference: {}", reference))
    })?;

    Ok((col_num - 1, row_num))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings() -> SharedStrings {
        SharedStrings::parse(
            "<sst><si><t>Function</t></si><si><t>Identify (ID)</t></si><si><t>\u{b7} CCS CSC 1</t></si></sst>",
        )
        .unwrap()
    }

    #[test]
    fn test_reference_to_coords() {
        assert_eq!(reference_to_coords("A1").unwrap(), (0, 1));
        assert_eq!(reference_to_coords("D17").unwrap(), (3, 17));
        assert_eq!(reference_to_coords("AA3").unwrap(), (26, 3));
        assert!(reference_to_coords("17").is_err());
        assert!(reference_to_coords("A").is_err());
        assert_eq!(reference_to_coords("XFD1").unwrap(), (MAX_COLUMNS - 1, 1));
    }

    #[test]
    fn test_reference_past_last_column() {
        assert!(matches!(reference_to_coords("XFE1"), Err(Error::InvalidFormat(_))));
        assert!(matches!(reference_to_coords("ZZZZZZ1"), Err(Error::InvalidFormat(_))));
        assert!(matches!(reference_to_coords("AAAAAAAAAAAA1"), Err(Error::InvalidFormat(_))));

        let xml = r#"<worksheet><sheetData><row r="2"><c r="ZZZZZZ2" t="inlineStr"><is><t>x</t></is></c></row></sheetData></worksheet>"#;
        assert!(matches!(
            parse_worksheet_xml(xml, &SharedStrings::new()),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rows_with_gaps() {
        let xml = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1"><c r="A1" t="s"><v>0</v></c></row>
    <row r="2"><c r="A2" t="s"><v>1</v></c><c r="B2" s="3"/><c r="D2" t="s"><v>2</v></c></row>
    <row r="3" ht="20"/>
    <row r="4"><c r="C4" t="inlineStr"><is><r><t>ID.AM</t></r><r><t>-1</t></r></is></c><c r="D4"><v>15</v></c></row>
  </sheetData>
</worksheet>"#;

        let rows = parse_worksheet_xml(xml, &strings()).unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].cells, vec![CellValue::String("Function".to_string())]);

        assert_eq!(rows[1].number, 2);
        assert_eq!(
            rows[1].cells,
            vec![
                CellValue::String("Identify (ID)".to_string()),
                CellValue::Empty,
                CellValue::Empty,
                CellValue::String("\u{b7} CCS CSC 1".to_string()),
            ]
        );

        assert_eq!(rows[2].number, 4);
        assert_eq!(rows[2].text(2).as_deref(), Some("ID.AM-1"));
        assert_eq!(rows[2].cells[3], CellValue::Int(15));
    }

    #[test]
    fn test_typed_cells() {
        let xml = r#"<worksheet><sheetData><row>
<c t="b"><v>1</v></c><c t="e"><v>#N/A</v></c><c t="str"><f>A1</f><v>x &amp; y</v></c><c><v>2.5</v></c>
</row></sheetData></worksheet>"#;

        let rows = parse_worksheet_xml(xml, &SharedStrings::new()).unwrap();
        assert_eq!(rows[0].number, 1);
        assert_eq!(
            rows[0].cells,
            vec![
                CellValue::Bool(true),
                CellValue::Error("#N/A".to_string()),
                CellValue::String("x & y".to_string()),
                CellValue::Float(2.5),
            ]
        );
    }

    #[test]
    fn test_shared_string_out_of_range() {
        let xml = r#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>9</v></c></row></sheetData></worksheet>"#;
        assert!(parse_worksheet_xml(xml, &strings()).is_err());
    }
}
