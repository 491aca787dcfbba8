use crate::config::schema::{QueryConfig, ValidationError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading a query file.
///
/// `load_from_str` reports the bare cause. `load_from_path` wraps parse and
/// validation failures in `InFile` so the message names the file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read query file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("query file is not valid TOML: {0}")]
    Toml(#[from] toml_edit::de::Error),

    #[error("invalid query file: {0}")]
    Validation(#[from] ValidationError),

    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    /// The query file this error came from, when it was read from disk.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Io { path, .. } | ConfigError::InFile { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The underlying failure with any file wrapper removed.
    pub fn cause(&self) -> &ConfigError {
        match self {
            ConfigError::InFile { source, .. } => source.cause(),
            other => other,
        }
    }
}

pub fn load_from_str(input: &str) -> Result<QueryConfig, ConfigError> {
    let config: QueryConfig = toml_edit::de::from_str(input)?;
    config.validate()?;
    tracing::debug!(name = %config.meta.name, queries = config.queries.len(), "loaded query file");
    Ok(config)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<QueryConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents).map_err(|source| ConfigError::InFile {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}
