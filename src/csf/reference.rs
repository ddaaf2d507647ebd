//! Grammar for the Informative References column.
//!
//! ```text
//! REF      := BULLET WS STANDARD ["," | ":"] WS CONTROLS
//! CONTROLS := CONTROL ("," " "? CONTROL)*
//! ```
//!
//! e.g. `· NIST SP 800-53 Rev. 4 CM-8, PM-5`.

use std::borrow::Cow;

use thiserror::Error;

use super::model::{Reference, Standard};

/// Known misspellings in the published workbook, replaced before matching.
const CORRECTIONS: &[(&str, &str)] = &[("NIST SP 800-53 Rev.4", "NIST SP 800-53 Rev. 4")];

/// Bullet markers that open a reference. `Â·` is a middle dot that was
/// decoded as Latin-1 somewhere upstream.
const BULLETS: &[&str] = &["Â·", "·", "•"];

/// Why a reference cell was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceParseError {
    /// The cell does not have the standard/controls shape
    #[error("malformed informative reference")]
    Grammar,

    /// The cell names a standard outside the recognized set
    #[error("unrecognized standard")]
    UnknownStandard,
}

/// Apply [`CORRECTIONS`] to a raw cell.
pub fn apply_corrections(text: &str) -> Cow<'_, str> {
    let mut text = Cow::Borrowed(text);
    for (wrong, right) in CORRECTIONS {
        if text.contains(wrong) {
            text = Cow::Owned(text.replace(wrong, right));
        }
    }
    text
}

/// Strip the leading bullet marker and the whitespace after it.
///
/// Returns `None` when the cell has no bullet, or the bullet runs straight
/// into the standard name.
fn strip_bullet(text: &str) -> Option<&str> {
    let text = text.trim();
    let rest = BULLETS.iter().find_map(|bullet| text.strip_prefix(bullet))?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}

impl Reference {
    /// Parse one Informative Reference cell.
    pub fn parse(text: &str) -> Result<Self, ReferenceParseError> {
        let corrected = apply_corrections(text);
        let body = strip_bullet(&corrected).ok_or(ReferenceParseError::Grammar)?;

        let (standard, rest) =
            Standard::match_prefix(body).ok_or(ReferenceParseError::UnknownStandard)?;

        let rest = match rest.strip_prefix([',', ':']) {
            Some(after) if after.starts_with(char::is_whitespace) => after,
            Some(_) => return Err(ReferenceParseError::Grammar),
            None if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest,
            // The recognized name is only a prefix of a longer, unknown one.
            None => return Err(ReferenceParseError::UnknownStandard),
        };
        if rest.trim().is_empty() {
            return Err(ReferenceParseError::Grammar);
        }

        let controls = rest
            .split(',')
            .map(str::trim)
            .map(|control| {
                if control.is_empty() {
                    Err(ReferenceParseError::Grammar)
                } else {
                    Ok(control.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Reference { standard, controls })
    }
}
