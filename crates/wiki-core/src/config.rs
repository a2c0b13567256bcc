//! Engine configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! TOML file, then `WIKI_`-prefixed environment variables. Nested keys use a
//! double underscore, e.g. `WIKI_MARKDOWN__TABLES=false`.

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::errors::Result;
use crate::logging_facility::Profile;

/// Default icon for locally synthesized panels
pub const DEFAULT_GHOST_FLAG: &str = "./icon-120.png";

/// Markdown extensions enabled on the `md` capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklists: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Scheme used to resolve scheme-relative remote endpoints
    pub scheme: String,
    /// Name of the mount point panels render into
    pub mount: String,
    /// Icon reference given to ghost panels
    pub ghost_flag: String,
    pub request_timeout_secs: u64,
    pub markdown: MarkdownConfig,
    pub log_profile: Profile,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            mount: "main".to_string(),
            ghost_flag: DEFAULT_GHOST_FLAG.to_string(),
            request_timeout_secs: 10,
            markdown: MarkdownConfig::default(),
            log_profile: Profile::Development,
        }
    }
}

impl WikiConfig {
    /// Load configuration, optionally from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `WikiError::Configuration` if the file is missing or invalid,
    /// or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix("WIKI")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build()?.try_deserialize()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WikiConfig::default();
        assert_eq!(config.scheme, "http");
        assert_eq!(config.mount, "main");
        assert_eq!(config.ghost_flag, DEFAULT_GHOST_FLAG);
        assert!(config.markdown.tables);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: WikiConfig = serde_json::from_str(
            r#"{"scheme": "https", "markdown": {"tables": false}}"#,
        )
        .unwrap();
        assert_eq!(config.scheme, "https");
        assert_eq!(config.mount, "main");
        assert!(!config.markdown.tables);
        assert!(config.markdown.strikethrough);
    }
}
