//! Grammar for the Function, Category and Subcategory label cells.
//!
//! ```text
//! CELL := NAME [" (" ID ")"] [": " DESCRIPTION]
//! ```
//!
//! NAME may not contain `(`, `)` or `:`. Typical cells:
//!
//! - `IDENTIFY (ID)`
//! - `Asset Management (ID.AM): The data, personnel, devices, ...`
//! - `ID.AM-1: Physical devices and systems within the organization are inventoried`

use once_cell::sync::Lazy;
use regex::Regex;

static LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?P<name>[^():]+)(?: \((?P<id>[^)]+?)\))?(?:: (?P<descr>.*))?$")
        .expect("label pattern is valid")
});

/// Fields extracted from one label cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Label {
    /// Label that is only an identifier.
    pub fn id_only(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
        }
    }

    /// Parse a label cell, or `None` if it does not fit the grammar.
    ///
    /// With a parenthesized ID the leading text becomes `name`; without one
    /// the leading text itself is the `id`.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = LABEL_PATTERN.captures(text.trim())?;

        let name = caps.name("name")?.as_str().trim();
        if name.is_empty() {
            return None;
        }

        let description = caps
            .name("descr")
            .map(|m| m.as_str().trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let label = match caps.name("id") {
            Some(id) => Label {
                id: id.as_str().trim().to_string(),
                name: Some(name.to_string()),
                description,
            },
            None => Label {
                id: name.to_string(),
                name: None,
                description,
            },
        };
        Some(label)
    }
}
