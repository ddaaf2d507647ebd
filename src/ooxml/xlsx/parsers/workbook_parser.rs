//! Parser for Excel workbook.xml files.
//!
//! This module extracts the ordered sheet list from the main workbook part.
//! Sheet order in `<sheets>` is the tab order shown by Excel, which is what
//! "first worksheet" refers to.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::common::{Error, Result};
use crate::ooxml::xlsx::worksheet::WorksheetInfo;
use crate::ooxml::xml::attr_value;

/// Parse workbook.xml content to extract sheet information in tab order.
pub fn parse_workbook_xml(content: &str) -> Result<Vec<WorksheetInfo>> {
    let mut reader = Reader::from_str(content);
    let mut sheets = Vec::new();
    let mut in_sheets = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) if e.local_name().as_ref() == b"sheets" => in_sheets = true,
            Event::End(ref e) if e.local_name().as_ref() == b"sheets" => in_sheets = false,
            Event::Start(ref e) | Event::Empty(ref e)
                if in_sheets && e.local_name().as_ref() == b"sheet" =>
            {
                sheets.push(parse_sheet_element(e)?);
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(sheets)
}

/// Parse a single `<sheet>` element.
fn parse_sheet_element(e: &quick_xml::events::BytesStart<'_>) -> Result<WorksheetInfo> {
    let mut name = None;
    let mut relationship_id = None;
    let mut sheet_id = None;

    for attr in e.attributes() {
        let attr = attr?;
        // r:id is namespaced; name and sheetId are not
        match (attr.key.prefix().is_some(), attr.key.local_name().as_ref()) {
            (false, b"name") => name = Some(attr_value(&attr)?),
            (false, b"sheetId") => {
                let value = attr_value(&attr)?;
                sheet_id = Some(value.parse::<u32>().map_err(|_| {
                    Error::InvalidFormat(format!("Invalid sheetId '{}' in workbook.xml", value))
                })?);
            },
            (true, b"id") => relationship_id = Some(attr_value(&attr)?),
            _ => {},
        }
    }

    match (name, relationship_id, sheet_id) {
        (Some(name), Some(relationship_id), Some(sheet_id)) => Ok(WorksheetInfo {
            name,
            relationship_id,
            sheet_id,
        }),
        _ => Err(Error::InvalidFormat(
            "Sheet entry in workbook.xml is missing name, sheetId or r:id".to_string(),
        )),
    }
}
