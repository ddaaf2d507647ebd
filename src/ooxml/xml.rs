//! Small helpers shared by the quick-xml based part parsers.

use quick_xml::events::attributes::Attribute;
use quick_xml::events::BytesStart;

use crate::common::Result;

/// Decode and unescape an attribute value.
pub fn attr_value(attr: &Attribute<'_>) -> Result<String> {
    let raw = std::str::from_utf8(attr.value.as_ref())
        .map_err(|e| crate::common::Error::XmlError(e.to_string()))?;
    Ok(quick_xml::escape::unescape(raw)?.into_owned())
}

/// Find an attribute by its local name (prefix ignored) and return its value.
pub fn find_attr(element: &BytesStart<'_>, local_name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == local_name {
            return attr_value(&attr).map(Some);
        }
    }
    Ok(None)
}

/// Accumulates character data split across text, entity and CDATA events.
///
/// Raw text is kept escaped until [`TextBuffer::finish`] so that entity
/// references delivered as separate events are resolved in one place.
#[derive(Debug, Default)]
pub struct TextBuffer {
    raw: String,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw (still escaped) text.
    pub fn push_raw(&mut self, bytes: &[u8]) {
        self.raw.push_str(&String::from_utf8_lossy(bytes));
    }

    /// Append a general entity reference such as `amp` or `#183`.
    pub fn push_entity(&mut self, name: &[u8]) {
        self.raw.push('&');
        self.raw.push_str(&String::from_utf8_lossy(name));
        self.raw.push(';');
    }

    /// Append literal CDATA content.
    pub fn push_cdata(&mut self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        self.raw.push_str(&quick_xml::escape::escape(&*text));
    }

    /// Discard the buffered text.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Unescape and return the buffered text, leaving the buffer empty.
    pub fn finish(&mut self) -> Result<String> {
        let text = quick_xml::escape::unescape(&self.raw)?.into_owned();
        self.raw.clear();
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_buffer_resolves_entities() {
        let mut buf = TextBuffer::new();
        buf.push_raw(b"Rev. 4 ");
        buf.push_entity(b"amp");
        buf.push_raw(b" ");
        buf.push_entity(b"#183");
        buf.push_cdata(b" <raw>");
        assert_eq!(buf.finish().unwrap(), "Rev. 4 & \u{b7} <raw>");
        assert_eq!(buf.finish().unwrap(), "");
    }
}
