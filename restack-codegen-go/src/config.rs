//! Render configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Header placed above generated files unless configured otherwise.
pub const GENERATED_HEADER: &str = "Code generated by restack. DO NOT EDIT.";

/// Options for [`GoRenderer`](crate::GoRenderer).
///
/// # Example
///
/// ```
/// use restack_codegen_go::RenderConfig;
///
/// let config = RenderConfig::from_toml_str(r#"
///     receiver = "self"
///     version_comment = false
/// "#).unwrap();
/// assert_eq!(config.receiver.as_deref(), Some("self"));
/// assert!(config.indent.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Spaces per indentation level. Tabs when unset.
    pub indent: Option<u8>,
    /// Receiver name used for every method. Derived from the type when unset.
    pub receiver: Option<String>,
    /// First comment line of every file.
    pub generated_header: Option<String>,
    /// Emit a `Version:` comment when the package carries a version.
    pub version_comment: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: None,
            receiver: None,
            generated_header: Some(GENERATED_HEADER.to_string()),
            version_comment: true,
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from TOML source.
    pub fn from_toml_str(src: &str) -> Result<Self, Box<ConfigError>> {
        Self::from_toml_named(src, "restack.toml")
    }

    /// Parse a configuration, naming `filename` in diagnostics.
    pub fn from_toml_named(src: &str, filename: &str) -> Result<Self, Box<ConfigError>> {
        toml::from_str(src).map_err(|source| ConfigError::parse(src, filename, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.generated_header.as_deref(), Some(GENERATED_HEADER));
        assert!(config.version_comment);
        assert_eq!(RenderConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_parse_all_fields() {
        let config = RenderConfig::from_toml_str(
            r#"
            indent = 4
            receiver = "this"
            generated_header = "Generated."
            version_comment = false
            "#,
        )
        .unwrap();

        assert_eq!(config.indent, Some(4));
        assert_eq!(config.receiver.as_deref(), Some("this"));
        assert_eq!(config.generated_header.as_deref(), Some("Generated."));
        assert!(!config.version_comment);
    }

    #[test]
    fn test_unknown_field_has_span() {
        let err = RenderConfig::from_toml_str("indentation = 2\n").unwrap_err();
        let ConfigError::Parse { span, .. } = *err;
        assert!(span.is_some());
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(RenderConfig::from_toml_str("indent = \"tab\"").is_err());
    }
}
