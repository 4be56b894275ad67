//! Configuration file loading
//!
//! Format is chosen by extension. Every format is read into the same value
//! model, so a TOML table and a JSON object load to the same store.

use crate::error::{Result, SourceError};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    /// Detect the format from the file extension, ignoring case.
    ///
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    /// - `.toml` -> TOML
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> std::result::Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        })
    }
}

/// Resolve `path` against the current directory.
pub fn absolute_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| SourceError::io(path, e))?;
    Ok(cwd.join(path))
}

/// Load a configuration file into an object.
///
/// # Errors
///
/// Fails if the extension is not supported, the file cannot be read or
/// parsed, or its top level is not an object.
pub fn load_file(path: impl AsRef<Path>) -> Result<Map<String, Value>> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path).ok_or_else(|| SourceError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    let value = format.parse(&content).map_err(|message| SourceError::Parse {
        path: path.to_path_buf(),
        format: format.to_string(),
        message,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SourceError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}
