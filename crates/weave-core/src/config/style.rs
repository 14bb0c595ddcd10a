//! Style configuration types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::WeaveError;
use crate::result::Result;

/// Indentation style
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TabsAndIndentsStyle {
    /// Indent with tab characters
    #[schemars(description = "Use tab characters for indentation instead of spaces")]
    pub use_tab_character: bool,

    /// Columns a tab advances
    #[schemars(description = "Number of columns a tab character occupies")]
    pub tab_size: usize,

    /// Columns per nesting level
    #[schemars(description = "Number of columns added for each nested block")]
    pub indent_size: usize,

    /// Columns for wrapped continuation lines
    #[schemars(description = "Number of columns added for wrapped continuation lines")]
    pub continuation_indent: usize,
}

impl Default for TabsAndIndentsStyle {
    fn default() -> Self {
        Self {
            use_tab_character: false,
            tab_size: 4,
            indent_size: 4,
            continuation_indent: 8,
        }
    }
}

impl TabsAndIndentsStyle {
    /// Tab-indented style with the given widths
    pub fn tabs(tab_size: usize) -> Self {
        Self {
            use_tab_character: true,
            tab_size,
            indent_size: tab_size,
            continuation_indent: tab_size * 2,
        }
    }

    /// Space-indented style with the given widths
    pub fn spaces(indent_size: usize, continuation_indent: usize) -> Self {
        Self {
            use_tab_character: false,
            indent_size,
            continuation_indent,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.use_tab_character && self.tab_size == 0 {
            return Err(WeaveError::invalid_style(
                "tabSize",
                "must be greater than zero when useTabCharacter is enabled",
            ));
        }
        Ok(())
    }
}

/// Top-level style file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    /// JSON schema reference for editor support
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Indentation settings")]
    pub tabs_and_indents: Option<TabsAndIndentsStyle>,
}

impl StyleConfig {
    /// Parse a style file; the format follows the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WeaveError::io_error(path, e))?;

        let ext = path.extension().and_then(|e| e.to_str());
        let config: StyleConfig = match ext {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| WeaveError::config_error(format!("Invalid YAML: {e}")))?,
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| WeaveError::config_error(format!("Invalid JSON: {e}")))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| WeaveError::config_error(format!("Invalid TOML: {e}")))?,
            _ => {
                return Err(WeaveError::config_error(
                    "Unsupported file extension (expected .yaml, .yml, .json, or .toml)",
                ));
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match &self.tabs_and_indents {
            Some(style) => style.validate(),
            None => Ok(()),
        }
    }

    /// Effective indentation style, defaults filled in
    pub fn tabs_and_indents(&self) -> TabsAndIndentsStyle {
        self.tabs_and_indents.clone().unwrap_or_default()
    }

    /// JSON schema for style files
    pub fn json_schema() -> String {
        let schema = schemars::schema_for!(StyleConfig);
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = TabsAndIndentsStyle::default();
        assert!(!style.use_tab_character);
        assert_eq!(style.tab_size, 4);
        assert_eq!(style.indent_size, 4);
        assert_eq!(style.continuation_indent, 8);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let yaml = r#"
tabsAndIndents:
  useTabCharacter: true
  indentSize: 2
"#;
        let config: StyleConfig = serde_yaml::from_str(yaml).unwrap();
        let style = config.tabs_and_indents();
        assert!(style.use_tab_character);
        assert_eq!(style.indent_size, 2);
        assert_eq!(style.tab_size, 4);
        assert_eq!(style.continuation_indent, 8);
    }

    #[test]
    fn test_toml_and_json_use_camel_case() {
        let toml_text = "[tabsAndIndents]\ncontinuationIndent = 4\n";
        let config: StyleConfig = toml::from_str(toml_text).unwrap();
        assert_eq!(config.tabs_and_indents().continuation_indent, 4);

        let json = r#"{"tabsAndIndents": {"tabSize": 8}}"#;
        let config: StyleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.tabs_and_indents().tab_size, 8);
    }

    #[test]
    fn test_zero_tab_size_with_tabs_is_invalid() {
        let style = TabsAndIndentsStyle {
            use_tab_character: true,
            tab_size: 0,
            ..TabsAndIndentsStyle::default()
        };
        let err = style.validate().unwrap_err();
        assert!(matches!(err, WeaveError::InvalidStyle { .. }));

        let spaces = TabsAndIndentsStyle {
            tab_size: 0,
            ..TabsAndIndentsStyle::default()
        };
        assert!(spaces.validate().is_ok());
    }

    #[test]
    fn test_json_schema_names_fields() {
        let schema = StyleConfig::json_schema();
        assert!(schema.contains("tabsAndIndents"));
        assert!(schema.contains("continuationIndent"));
    }
}
