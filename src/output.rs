//! YAML rendering of the framework tree.

use std::io::Write;

use crate::common::{Error, Result};
use crate::csf::Tree;

/// Serialize the tree as a YAML document.
pub fn to_yaml(tree: &Tree) -> Result<String> {
    serde_saphyr::to_string(tree)
        .map_err(|e| Error::Serialize(format!("Failed to serialize tree to YAML: {}", e)))
}

/// Serialize the tree as YAML into `writer`.
pub fn write_yaml<W: Write>(tree: &Tree, mut writer: W) -> Result<()> {
    let yaml = to_yaml(tree)?;
    writer.write_all(yaml.as_bytes())?;
    if !yaml.ends_with('\n') {
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csf::build_tree;
    use crate::sheet::Row;

    fn sample_tree() -> Tree {
        let rows = vec![
            Row::from_strs(1, &["Function", "Category", "Subcategory", "Informative References"]),
            Row::from_strs(
                2,
                &[
                    "Identify (ID)",
                    "Asset Management (ID.AM): Assets are managed",
                    "ID.AM-1: Devices are inventoried",
                    "· CCS CSC 1",
                ],
            ),
            Row::from_strs(3, &["", "", "", "· NIST SP 800-53 Rev.4 CM-8, PM-5"]),
        ];
        build_tree(&rows, 1).unwrap()
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("{:?} not found in:\n{}", needle, haystack))
    }

    #[test]
    fn test_node_field_order() {
        let yaml = to_yaml(&sample_tree()).unwrap();

        let id = position(&yaml, "id: ID");
        let name = position(&yaml, "name: Identify");
        let kind = position(&yaml, "type: function");
        let categories = position(&yaml, "categories:");
        assert!(id < name && name < kind && kind < categories);

        let description = position(&yaml, "description: Assets are managed");
        let subcategories = position(&yaml, "subcategories:");
        assert!(description < subcategories);

        let references = position(&yaml, "references:");
        let standard = position(&yaml, "standard: NIST SP 800-53 Rev. 4");
        let controls = standard + position(&yaml[standard..], "controls:");
        assert!(references < standard && standard < controls);
        assert!(yaml.contains("CM-8"));
        assert!(yaml.contains("PM-5"));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let yaml = to_yaml(&sample_tree()).unwrap();
        // Only the function and category carry a name
        assert_eq!(yaml.matches("name:").count(), 2);
        assert_eq!(yaml.matches("description:").count(), 2);
        assert!(!yaml.contains("null"));
    }

    #[test]
    fn test_write_yaml_ends_with_newline() {
        let mut out = Vec::new();
        write_yaml(&sample_tree(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("type: subcategory"));
    }

    #[test]
    fn test_empty_tree() {
        let yaml = to_yaml(&Tree::default()).unwrap();
        assert!(yaml.trim() == "[]" || yaml.trim().is_empty());
    }
}
