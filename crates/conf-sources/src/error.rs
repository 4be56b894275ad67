//! Error types for conf-sources

use std::path::PathBuf;

/// Result type for source loading
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors raised while loading a configuration file.
///
/// [`crate::ConfigSources::with_file`] never surfaces these: it logs them and
/// registers nothing. They are returned by [`crate::load_file`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config file: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid configuration file (top level is not an object): {path}")]
    NotAnObject { path: PathBuf },
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
