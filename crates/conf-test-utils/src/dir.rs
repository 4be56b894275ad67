//! [`ConfigDir`] fixture for file source tests.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding configuration files.
///
/// # Example
///
/// ```rust
/// use conf_test_utils::ConfigDir;
/// use serde_json::json;
///
/// let dir = ConfigDir::new();
/// let path = dir.write_json("config.json", &json!({ "port": 8080 }));
/// assert!(path.exists());
/// ```
pub struct ConfigDir {
    temp_dir: TempDir,
}

impl Default for ConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `name` inside the directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `content` verbatim to `name`, creating parent directories.
    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
        path
    }

    /// Write `value` as pretty JSON.
    pub fn write_json(&self, name: &str, value: &Value) -> PathBuf {
        self.write_raw(name, &serde_json::to_string_pretty(value).unwrap())
    }

    /// Write `value` as YAML.
    pub fn write_yaml(&self, name: &str, value: &Value) -> PathBuf {
        self.write_raw(name, &serde_yaml::to_string(value).unwrap())
    }

    /// Write `value` as TOML.
    ///
    /// # Panics
    /// Panics if `value` holds nulls or is not an object, which TOML cannot express.
    pub fn write_toml(&self, name: &str, value: &Value) -> PathBuf {
        let content = toml::to_string(value)
            .unwrap_or_else(|e| panic!("Value cannot be written as TOML: {e}"));
        self.write_raw(name, &content)
    }
}
