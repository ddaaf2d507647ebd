//! Shared strings table for Excel files.
//!
//! Excel stores most cell strings once in `xl/sharedStrings.xml` and refers
//! to them by index from the worksheet. Each `<si>` item is either a plain
//! `<t>` or a sequence of rich-text `<r>` runs; phonetic hints (`<rPh>`) are
//! not part of the displayed value and are skipped.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::common::Result;
use crate::ooxml::xml::TextBuffer;

/// Shared strings table.
#[derive(Debug, Default, Clone)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse shared strings from xl/sharedStrings.xml content.
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        let mut strings = Vec::new();

        let mut text = TextBuffer::new();
        let mut item = String::new();
        let mut in_item = false;
        let mut in_text = false;
        let mut phonetic_depth = 0usize;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => match e.local_name().as_ref() {
                    b"si" => {
                        in_item = true;
                        item.clear();
                    },
                    b"rPh" => phonetic_depth += 1,
                    b"t" if in_item && phonetic_depth == 0 => {
                        in_text = true;
                        text.clear();
                    },
                    _ => {},
                },
                Event::Empty(ref e) => {
                    // <si/> is an empty string that still takes an index
                    if e.local_name().as_ref() == b"si" {
                        strings.push(String::new());
                    }
                },
                Event::Text(ref t) if in_text => text.push_raw(&**t),
                Event::GeneralRef(ref r) if in_text => text.push_entity(&**r),
                Event::CData(ref c) if in_text => text.push_cdata(&**c),
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"t" if in_text => {
                        in_text = false;
                        item.push_str(&text.finish()?);
                    },
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"si" => {
                        in_item = false;
                        strings.push(std::mem::take(&mut item));
                    },
                    _ => {},
                },
                Event::Eof => break,
                _ => {},
            }
        }

        Ok(SharedStrings { strings })
    }

    /// Get a string by its index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Get the number of strings in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_rich_items() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="4">
  <si><t>Identify (ID)</t></si>
  <si><r><rPr><b/></rPr><t>Asset Management </t></r><r><t xml:space="preserve">(ID.AM)</t></r></si>
  <si/>
  <si><t>&#183; COBIT 5 APO01.02, DSS06.03</t><rPh sb="0" eb="1"><t>ignored</t></rPh></si>
</sst>"#;

        let sst = SharedStrings::parse(xml).unwrap();
        assert_eq!(sst.len(), 4);
        assert_eq!(sst.get(0), Some("Identify (ID)"));
        assert_eq!(sst.get(1), Some("Asset Management (ID.AM)"));
        assert_eq!(sst.get(2), Some(""));
        assert_eq!(sst.get(3), Some("\u{b7} COBIT 5 APO01.02, DSS06.03"));
        assert_eq!(sst.get(4), None);
    }

    #[test]
    fn test_entities_unescaped() {
        let xml = "<sst><si><t>Risk &amp; Supply Chain &lt;RS&gt;</t></si></sst>";
        let sst = SharedStrings::parse(xml).unwrap();
        assert_eq!(sst.get(0), Some("Risk & Supply Chain <RS>"));
    }
}
