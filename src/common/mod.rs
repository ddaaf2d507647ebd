//! Common types shared across the reader and the framework builder.

// Submodule declarations
pub mod error;

// Re-exports for convenience
pub use error::{Error, Result};
