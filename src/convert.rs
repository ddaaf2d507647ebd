//! End-to-end conversion from an `.xlsx` workbook to the framework tree.

use std::path::Path;

use tracing::info;

use crate::common::Result;
use crate::csf::{Tree, build_tree};
use crate::ooxml::xlsx::Workbook;

/// Where the published core workbook is expected when no path is given.
pub const DEFAULT_INPUT: &str =
    "/tmp/framework-for-improving-critical-infrastructure-cybersecurity-core.xlsx";

/// Options controlling which rows of which sheet are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Worksheet to read, 0-based in tab order
    pub sheet_index: usize,
    /// Leading rows to skip before data rows start
    pub header_rows: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            sheet_index: 0,
            header_rows: 1,
        }
    }
}

impl ConvertOptions {
    /// Create options with defaults (first sheet, one header row).
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a different worksheet.
    pub fn with_sheet_index(mut self, sheet_index: usize) -> Self {
        self.sheet_index = sheet_index;
        self
    }

    /// Skip a different number of header rows.
    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }
}

/// Build the framework tree from an already opened workbook.
pub fn convert_workbook(workbook: &mut Workbook, options: &ConvertOptions) -> Result<Tree> {
    let rows = workbook.worksheet_rows(options.sheet_index)?;
    info!(
        sheet = options.sheet_index,
        rows = rows.len(),
        "read worksheet"
    );
    build_tree(&rows, options.header_rows)
}

/// Open the workbook at `path` and build the framework tree.
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<Tree> {
    let path = path.as_ref();
    info!(path = %path.display(), "opening workbook");
    let mut workbook = Workbook::open(path)?;
    convert_workbook(&mut workbook, options)
}

/// Build the framework tree from the bytes of an `.xlsx` file.
pub fn convert_bytes(data: Vec<u8>, options: &ConvertOptions) -> Result<Tree> {
    let mut workbook = Workbook::from_bytes(data)?;
    convert_workbook(&mut workbook, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use crate::csf::{NodeKind, Standard};
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
</Types>"#;

    const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="CSF Core" sheetId="1" r:id="rId1"/>
    <sheet name="Notes" sheetId="2" r:id="rId2"/>
  </sheets>
</workbook>"#;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/core.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/notes.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#;

    const SHARED_STRINGS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <si><t>Function</t></si>
  <si><t>Category</t></si>
  <si><t>Subcategory</t></si>
  <si><t>Informative References</t></si>
  <si><t>IDENTIFY (ID)</t></si>
  <si><t>Asset Management (ID.AM): The data, personnel, devices, systems, and facilities are identified &amp; managed</t></si>
  <si><t>ID.AM-1: Physical devices and systems within the organization are inventoried</t></si>
  <si><t>&#183; CCS CSC 1</t></si>
  <si><t>&#183; NIST SP 800-53 Rev.4 CM-8</t></si>
</sst>"#;

    // Row 3 continues the merged Function/Category/Subcategory cells, and
    // row 4 opens a second subcategory using an inline string.
    const CORE_SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>2</v></c><c r="D1" t="s"><v>3</v></c></row>
    <row r="2"><c r="A2" t="s"><v>4</v></c><c r="B2" t="s"><v>5</v></c><c r="C2" t="s"><v>6</v></c><c r="D2" t="s"><v>7</v></c></row>
    <row r="3"><c r="A3" s="1"/><c r="B3" s="1"/><c r="C3" s="1"/><c r="D3" t="s"><v>8</v></c></row>
    <row r="4"><c r="C4" t="inlineStr"><is><t>ID.AM-2: Software platforms and applications are inventoried</t></is></c><c r="D4" t="inlineStr"><is><t>· ISA 62443-2-1:2009 4.2.3.4</t></is></c></row>
    <row r="5" ht="15"/>
    <row r="6"><c r="A6" s="2"/></row>
  </sheetData>
  <mergeCells count="1"><mergeCell ref="A2:A4"/></mergeCells>
</worksheet>"#;

    const NOTES_SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1"><c r="A1" t="inlineStr"><is><t>Notes</t></is></c></row>
    <row r="2"><c r="A2" t="inlineStr"><is><t>Release</t></is></c><c r="D2" t="inlineStr"><is><t>· HIPAA 164.308</t></is></c></row>
  </sheetData>
</worksheet>"#;

    fn build_core_workbook() -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let members = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", ROOT_RELS),
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
            ("xl/sharedStrings.xml", SHARED_STRINGS),
            ("xl/worksheets/core.xml", CORE_SHEET),
            ("xl/worksheets/notes.xml", NOTES_SHEET),
        ];
        for (name, content) in members {
            writer
                .start_file(name, SimpleFileOptions::default())
                .expect("start member");
            writer.write_all(content.as_bytes()).expect("write member");
        }
        writer.finish().expect("finish archive").into_inner()
    }

    #[test]
    fn test_convert_file() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("csf-core.xlsx");
        std::fs::write(&path, build_core_workbook()).expect("write workbook");

        let tree = convert_file(&path, &ConvertOptions::default()).expect("convert workbook");

        assert_eq!(tree.functions.len(), 1);
        let function = &tree.functions[0];
        assert_eq!(function.id, "ID");
        assert_eq!(function.name.as_deref(), Some("IDENTIFY"));
        assert_eq!(function.kind, NodeKind::Function);

        let category = &function.children[0];
        assert_eq!(category.id, "ID.AM");
        assert_eq!(
            category.description.as_deref(),
            Some("The data, personnel, devices, systems, and facilities are identified & managed")
        );

        let ids: Vec<&str> = category.children.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["ID.AM-1", "ID.AM-2"]);

        let first = &category.children[0].children;
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].standard, Standard::CcsCsc);
        assert_eq!(first[1].standard, Standard::NistSp800_53Rev4);
        assert_eq!(first[1].controls, ["CM-8"]);

        let second = &category.children[1].children;
        assert_eq!(second[0].standard, Standard::Isa62443_2_1_2009);
        assert_eq!(second[0].controls, ["4.2.3.4"]);
    }

    #[test]
    fn test_convert_other_sheet_fails_on_unknown_standard() {
        let options = ConvertOptions::new().with_sheet_index(1);
        let err = convert_bytes(build_core_workbook(), &options).unwrap_err();
        assert!(matches!(err, Error::UnknownStandard { row: 2, .. }));
    }

    #[test]
    fn test_sheet_index_out_of_range() {
        let options = ConvertOptions::new().with_sheet_index(5);
        let err = convert_bytes(build_core_workbook(), &options).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn test_header_rows_option() {
        // Treating the header row as data makes "Function" a function with
        // "Informative References" as its (unrecognized) reference.
        let options = ConvertOptions::new().with_header_rows(0);
        let err = convert_bytes(build_core_workbook(), &options).unwrap_err();
        assert!(matches!(err, Error::UnknownStandard { row: 1, .. }));
    }

    #[test]
    fn test_workbook_listing() {
        let workbook = Workbook::from_bytes(build_core_workbook()).expect("open workbook");
        assert_eq!(workbook.worksheet_names(), ["CSF Core", "Notes"]);
        assert_eq!(workbook.worksheet_count(), 2);
        assert_eq!(workbook.shared_strings().len(), 9);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().expect("create temp dir");
        let err = convert_file(dir.path().join("absent.xlsx"), &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::PartNotFound(_)));
    }
}
