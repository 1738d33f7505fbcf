//! Config directory resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory name under the platform config directory.
const APP_DIR: &str = "aniki";

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Otherwise returns `{config_dir}/aniki/config.toml`, where `config_dir`
///   is `$XDG_CONFIG_HOME` (falling back to `~/.config`) on Linux and the
///   platform equivalent elsewhere.
///
/// # Errors
///
/// Returns an error if no config directory can be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    let base = match dir {
        Some(d) => d.to_path_buf(),
        None => dirs::config_dir()
            .context("cannot determine the user config directory")?
            .join(APP_DIR),
    };
    Ok(base.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/aniki-profile");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/aniki-profile/config.toml"));
    }

    #[test]
    fn test_resolve_default_under_platform_config_dir() {
        // Arrange
        let expected = dirs::config_dir().unwrap().join("aniki/config.toml");

        // Act
        let path = resolve_config_path(None).unwrap();

        // Assert
        assert_eq!(path, expected);
    }
}
