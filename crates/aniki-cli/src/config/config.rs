//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Kitsu client settings.
    #[serde(default)]
    pub kitsu: KitsuConfig,
}

/// `[kitsu]` table.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct KitsuConfig {
    /// API base URL (default: `https://kitsu.app/api/edge/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// User-Agent sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Page size used when `--per-page` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl KitsuConfig {
    /// Parses `base_url`, if set.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.base_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid kitsu.base_url: {raw}")))
            .transpose()
    }
}

impl AppConfig {
    /// Config written by `config init`.
    #[must_use]
    pub fn template() -> Self {
        Self {
            kitsu: KitsuConfig {
                base_url: Some(String::from("https://kitsu.app/api/edge/")),
                user_agent: None,
                per_page: Some(10),
            },
        }
    }

    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.kitsu, KitsuConfig::default());
        assert!(config.kitsu.base_url().unwrap().is_none());
    }

    #[test]
    fn test_parse_kitsu_table() {
        // Arrange
        let toml_str = r#"
[kitsu]
base_url = "http://localhost:8080/api/edge/"
user_agent = "my-bot/1.0"
per_page = 20
"#;

        // Act
        let config: AppConfig = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.kitsu.user_agent.as_deref(), Some("my-bot/1.0"));
        assert_eq!(config.kitsu.per_page, Some(20));
        assert_eq!(
            config.kitsu.base_url().unwrap().unwrap().as_str(),
            "http://localhost:8080/api/edge/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        // Arrange
        let config = KitsuConfig {
            base_url: Some(String::from("not a url")),
            ..KitsuConfig::default()
        };

        // Act
        let result = config.base_url();

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("invalid kitsu.base_url")
        );
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load_template() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig::template();

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("[kitsu]"));
        assert!(!raw.contains("user_agent"));
    }

    #[test]
    fn test_load_empty_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }
}
