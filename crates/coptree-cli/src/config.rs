//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use coptree::{CoptreeError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid setting: {0}")]
    Validation(String),
}

impl From<ConfigError> for CoptreeError {
    fn from(err: ConfigError) -> Self {
        CoptreeError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (coptree/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - A configured color is invalid
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CoptreeError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("coptree/config.toml");
    if local_config.exists() {
        info!(path:% = local_config.display(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "coptree", "coptree") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:% = system_config.display(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path:% = system_config.display(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
/// - A configured color is invalid
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CoptreeError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;

    Ok(config)
}

/// Reports bad colors when the file is loaded rather than at first render.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let style = config.style();
    style.background_color().map_err(ConfigError::Validation)?;
    style.node_color().map_err(ConfigError::Validation)?;
    style.edge_color().map_err(ConfigError::Validation)?;
    style.root_color().map_err(ConfigError::Validation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coptree::layout::{LayoutEngine, Orientation};

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_explicit_config() {
        let (_dir, path) = write_config(
            r##"
[layout]
engine = "linear"
orientation = "left_right"

[render]
transliterate = true

[style]
background_color = "#fdf6e3"
"##,
        );
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.layout().engine(), LayoutEngine::Linear);
        assert_eq!(config.layout().orientation(), Orientation::LeftRight);
        assert!(config.render().transliterate());
        assert!(config.style().background_color().unwrap().is_some());
    }

    #[test]
    fn test_missing_explicit_config() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, CoptreeError::Config(message) if message.contains("Missing")));
    }

    #[test]
    fn test_invalid_toml_and_color() {
        let (_dir, path) = write_config("[layout\nengine = 1");
        assert!(matches!(
            load_config(Some(&path)),
            Err(CoptreeError::Config(message)) if message.starts_with("Failed to parse")
        ));

        let (_dir, path) = write_config("[style]\nedge_color = \"not-a-color\"\n");
        assert!(matches!(
            load_config(Some(&path)),
            Err(CoptreeError::Config(message)) if message.contains("edge")
        ));
    }
}
