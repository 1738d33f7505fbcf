//! Application configuration module.
//!
//! Manages the TOML config file holding Kitsu client settings.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, KitsuConfig};
pub use paths::resolve_config_path;
