/// Open Packaging Conventions (OPC) reading support.
///
/// An `.xlsx` file is a ZIP archive of XML parts linked by relationship
/// files. This module covers the subset needed to walk from the package
/// root to a worksheet:
///
/// - Part names ([`PackURI`]) and relative reference resolution
/// - Relationship parsing ([`Relationships`])
/// - ZIP-backed part access ([`PhysPkgReader`])
pub mod constants;
pub mod packuri;
pub mod phys_pkg;
pub mod rel;

// Re-export commonly used types
pub use packuri::PackURI;
pub use phys_pkg::PhysPkgReader;
pub use rel::{Relationship, Relationships};
