// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigOverrides, RawConfigFile, SimConfig};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<SimConfig> {
    let raw_config = load_from_path(&path)?;
    let config = SimConfig::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the effective configuration.
///
/// - An explicit `path` must exist and parse.
/// - Otherwise [`default_config_path`] is used when present.
/// - Otherwise built-in defaults apply.
///
/// Command-line overrides are applied before validation so they are checked
/// like file values.
pub fn resolve_config(path: Option<&Path>, overrides: ConfigOverrides) -> Result<SimConfig> {
    let mut raw = match path {
        Some(path) => load_from_path(path)?,
        None => {
            let default_path = default_config_path();
            if default_path.is_file() {
                debug!(path = %default_path.display(), "using default config file");
                load_from_path(&default_path)?
            } else {
                RawConfigFile::default()
            }
        }
    };

    raw.apply_overrides(overrides);
    SimConfig::try_from(raw)
}

/// Default config file looked up in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Wfsim.toml")
}
