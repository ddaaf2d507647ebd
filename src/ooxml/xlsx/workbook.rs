//! Excel Workbook reader.
//!
//! Opens an `.xlsx` package, follows the package relationships to the
//! workbook part, and loads the sheet list and shared strings up front.
//! Worksheet parts are parsed on request.

use std::path::Path;

use tracing::debug;

use crate::common::{Error, Result};
use crate::ooxml::opc::constants::{default_part, relationship_type as rt};
use crate::ooxml::opc::packuri::PACKAGE_URI;
use crate::ooxml::opc::{PackURI, PhysPkgReader, Relationships};
use crate::ooxml::xlsx::SharedStrings;
use crate::sheet::Row;

use super::parsers::{workbook_parser, worksheet_parser};
use super::worksheet::WorksheetInfo;

/// Read-only view of an Excel workbook.
#[derive(Debug)]
pub struct Workbook {
    /// The underlying package
    package: PhysPkgReader,
    /// Relationships of the workbook part
    rels: Relationships,
    /// Worksheets in tab order
    worksheets: Vec<WorksheetInfo>,
    /// Shared strings table
    shared_strings: SharedStrings,
}

impl Workbook {
    /// Open an Excel workbook from a file path.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use csf_yaml::ooxml::xlsx::Workbook;
    ///
    /// let mut workbook = Workbook::open("csf-core.xlsx")?;
    /// let rows = workbook.worksheet_rows(0)?;
    /// println!("{} rows", rows.len());
    /// # Ok::<(), csf_yaml::Error>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_package(PhysPkgReader::open(path)?)
    }

    /// Open an Excel workbook from the bytes of an `.xlsx` file.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_package(PhysPkgReader::from_bytes(data)?)
    }

    /// Load workbook information from an already opened package.
    pub fn from_package(mut package: PhysPkgReader) -> Result<Self> {
        let workbook_uri = Self::locate_workbook(&mut package)?;
        debug!(part = %workbook_uri, "reading workbook part");

        let content = package.xml_for(&workbook_uri)?;
        let worksheets = workbook_parser::parse_workbook_xml(&content)?;
        let rels = package.rels_for(&workbook_uri)?;

        let shared_strings = Self::load_shared_strings(&mut package, &rels)?;
        debug!(
            sheets = worksheets.len(),
            shared_strings = shared_strings.len(),
            "workbook loaded"
        );

        Ok(Self {
            package,
            rels,
            worksheets,
            shared_strings,
        })
    }

    /// Find the workbook part through the package-level officeDocument relationship.
    fn locate_workbook(package: &mut PhysPkgReader) -> Result<PackURI> {
        let root = PackURI::new(PACKAGE_URI)?;
        let package_rels = package.rels_for(&root)?;
        match package_rels.by_type(rt::OFFICE_DOCUMENT) {
            Some(rel) => rel.target_partname(),
            None => PackURI::new(default_part::WORKBOOK),
        }
    }

    /// Load the shared strings table, if the workbook has one.
    fn load_shared_strings(
        package: &mut PhysPkgReader,
        rels: &Relationships,
    ) -> Result<SharedStrings> {
        let uri = match rels.by_type(rt::SHARED_STRINGS) {
            Some(rel) => rel.target_partname()?,
            None => PackURI::new(default_part::SHARED_STRINGS)?,
        };

        if !package.contains(&uri) {
            // Workbooks that only use inline strings have no table
            return Ok(SharedStrings::new());
        }

        SharedStrings::parse(&package.xml_for(&uri)?)
    }

    /// Get worksheet names in tab order.
    pub fn worksheet_names(&self) -> Vec<&str> {
        self.worksheets.iter().map(|ws| ws.name.as_str()).collect()
    }

    /// Get the number of worksheets.
    pub fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Get the shared strings table.
    pub fn shared_strings(&self) -> &SharedStrings {
        &self.shared_strings
    }

    /// Read all stored rows of the worksheet at `index` (0-based tab order).
    pub fn worksheet_rows(&mut self, index: usize) -> Result<Vec<Row>> {
        let info = self.worksheets.get(index).ok_or_else(|| {
            Error::InvalidFormat(format!(
                "Worksheet index {} out of range (workbook has {})",
                index,
                self.worksheets.len()
            ))
        })?;

        let uri = match self.rels.get(&info.relationship_id) {
            Some(rel) => rel.target_partname()?,
            None => PackURI::new(format!("/xl/worksheets/sheet{}.xml", info.sheet_id))?,
        };
        debug!(sheet = %info.name, part = %uri, "reading worksheet");

        let content = self.package.xml_for(&uri)?;
        worksheet_parser::parse_worksheet_xml(&content, &self.shared_strings)
    }
}
