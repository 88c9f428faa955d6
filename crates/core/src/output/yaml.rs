//! YAML output formatter

use crate::output::FormatError;
use serde::Serialize;

/// Serialize to YAML
pub fn format_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, FormatError> {
    serde_yaml::to_string(data).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IndexEntry, SiteIndex};

    #[test]
    fn test_format_yaml() {
        let index = SiteIndex {
            entries: vec![IndexEntry {
                path: "/faq".to_string(),
                label: "FAQ".to_string(),
                depth: 0,
                crumbs: vec![],
                shadowed: false,
            }],
        };
        let yaml = format_yaml(&index).unwrap();
        assert!(yaml.contains("entries:"));
        assert!(yaml.contains("path: /faq"));
    }
}
