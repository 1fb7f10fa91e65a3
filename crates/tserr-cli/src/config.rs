//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).
//!
//! ```toml
//! [parse]
//! dir = "docs/errors"
//! offsets = "utf16"
//! legacy_item_fields = false
//!
//! [registry]
//! path = "node_modules/typescript/diagnosticMessages.json"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use tserr::{TsErrError, config::ParseOptions};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for TsErrError {
    fn from(err: ConfigError) -> Self {
        TsErrError::Config(err.to_string())
    }
}

/// Where templates are loaded from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// A `diagnosticMessages.json` to use instead of the bundled corpus.
    pub path: Option<PathBuf>,
}

/// Application configuration read from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub parse: ParseOptions,
    pub registry: RegistryConfig,
}

impl AppConfig {
    /// Make relative explanation and registry paths relative to `base`.
    fn resolve_paths(mut self, base: &Path) -> Self {
        let dir = self
            .parse
            .dir()
            .filter(|dir| dir.is_relative())
            .map(|dir| base.join(dir));
        if let Some(dir) = dir {
            debug!(dir = dir.display().to_string(); "Resolved explanation directory");
            self.parse = self.parse.with_dir(dir);
        }

        if let Some(registry) = self.registry.path.as_mut().filter(|path| path.is_relative()) {
            *registry = base.join(&*registry);
        }
        self
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (tserr/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// Relative paths inside a configuration file are resolved against the
/// directory holding that file.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TsErrError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("tserr/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "tserr", "tserr") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, TsErrError> {
    let path = path.as_ref();

    // Check if file exists
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    // Read file content
    let content = fs::read_to_string(path)?;

    // Parse TOML content
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let base = path.parent().unwrap_or(Path::new(""));
    Ok(config.resolve_paths(base))
}
