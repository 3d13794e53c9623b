use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised while loading a TOML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid TOML for the expected shape.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Reads and deserializes a TOML file into `T`.
///
/// # Arguments
/// * `path` - Location of the TOML file.
pub fn load_toml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`load_toml`], but falls back to `T::default()` when no path is given.
pub fn load_toml_or_default<T>(path: Option<&Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default,
{
    match path {
        Some(path) => load_toml(path),
        None => Ok(T::default()),
    }
}
