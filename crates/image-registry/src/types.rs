//! Image row type.

use serde::{Deserialize, Serialize};

/// A stored image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Registry-assigned id, ascending and never reused
    pub id: i64,

    /// Optional display name (not unique)
    pub name: Option<String>,

    /// Location of the externally hosted image
    pub url: String,
}

impl Image {
    /// Name for display, empty when the image was saved without one.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Check a url before it is written to the registry.
pub(crate) fn validate_url(url: &str) -> Result<(), crate::RegistryError> {
    if url.trim().is_empty() {
        return Err(crate::RegistryError::InvalidImage(
            "url must not be empty".into(),
        ));
    }
    Ok(())
}

/// Normalize an optional name: blank names are stored as NULL.
pub(crate) fn normalize_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let named = Image {
            id: 1,
            name: Some("cat".into()),
            url: "https://example.com/cat.jpg".into(),
        };
        assert_eq!(named.display_name(), "cat");

        let unnamed = Image {
            id: 2,
            name: None,
            url: "https://example.com/x.jpg".into(),
        };
        assert_eq!(unnamed.display_name(), "");
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/a.png").is_ok());
        assert!(matches!(
            validate_url("   "),
            Err(crate::RegistryError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name(Some(" cat ")), Some("cat".into()));
        assert_eq!(normalize_name(Some("")), None);
        assert_eq!(normalize_name(None), None);
    }

    #[test]
    fn test_image_serialization() {
        let image = Image {
            id: 7,
            name: None,
            url: "u".into(),
        };
        let json = serde_json::to_string(&image).unwrap();
        assert!(json.contains("\"id\":7"));
        assert!(json.contains("\"name\":null"));
    }
}
