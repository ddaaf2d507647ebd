//! Provides access to a physical OPC package (ZIP file).
//!
//! The whole archive is read into memory once; parts are decompressed on
//! demand when a parser asks for them.

use std::io::{Cursor, Read};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::common::{Error, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::rel::Relationships;

/// Physical package reader over an in-memory ZIP archive.
pub struct PhysPkgReader {
    /// The underlying ZIP archive
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl PhysPkgReader {
    /// Open an OPC package from a file path.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist, isn't a valid ZIP file,
    /// or cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::PartNotFound(format!(
                "Package not found: {}",
                path.display()
            )));
        }

        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Create a new reader from owned bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Get the binary content for a part by its PackURI.
    pub fn blob_for(&mut self, pack_uri: &PackURI) -> Result<Vec<u8>> {
        let mut file = match self.archive.by_name(pack_uri.membername()) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Err(Error::PartNotFound(pack_uri.to_string())),
            Err(e) => return Err(e.into()),
        };

        let mut blob = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut blob)?;
        Ok(blob)
    }

    /// Get the content of an XML part as UTF-8 text.
    pub fn xml_for(&mut self, pack_uri: &PackURI) -> Result<String> {
        let blob = self.blob_for(pack_uri)?;
        let text = String::from_utf8(blob)?;
        // A UTF-8 BOM is legal at the start of an XML part.
        Ok(match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }

    /// Get the relationships of a source part (or the package for "/").
    ///
    /// A source without a `.rels` part simply has no relationships.
    pub fn rels_for(&mut self, source_uri: &PackURI) -> Result<Relationships> {
        let rels_uri = source_uri.rels_uri()?;
        match self.xml_for(&rels_uri) {
            Ok(xml) => Relationships::parse(&xml, source_uri.base_uri()),
            Err(Error::PartNotFound(_)) => Ok(Relationships::default()),
            Err(e) => Err(e),
        }
    }

    /// Check if a specific member exists in the package.
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.archive
            .file_names()
            .any(|name| name == pack_uri.membername())
    }

    /// Get the number of members in the package.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Check if the package is empty.
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

impl std::fmt::Debug for PhysPkgReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysPkgReader")
            .field("members", &self.archive.len())
            .finish()
    }
}
