//! Source adapters for conf-core
//!
//! Registers external configuration sources on a [`conf_core::ConfigManager`]
//! through the [`ConfigSources`] extension trait:
//!
//! - **argv**: command-line flags, keys in lowerCamelCase
//! - **env**: environment variables, keys in CONSTANT_CASE with an optional prefix
//! - **file**: JSON, YAML or TOML files
//! - **encoded**: base64 JSON payloads produced by `to_base64`
//!
//! # Example
//!
//! ```
//! use conf_core::ConfigManager;
//! use conf_sources::{ConfigSources, MemoryEnv};
//!
//! let env: MemoryEnv = [("APP_DB__HOST", "db.local")].into_iter().collect();
//!
//! let mut conf = ConfigManager::new();
//! conf.with_env_from(env, "app", "__")
//!     .with_args(["--db.port", "5432"]);
//!
//! let db = conf.get_object("db").unwrap().unwrap();
//! assert_eq!(db["host"], "db.local");
//! assert_eq!(db["port"], 5432);
//! ```

pub mod argv;
pub mod case;
pub mod encoded;
pub mod env;
pub mod error;
pub mod file;
pub mod sources;

pub use argv::{ArgvParser, parse_args};
pub use encoded::{AttributeSource, FnAttributes, decode_payload};
pub use env::{DEFAULT_SEPARATOR, EnvSupplier, Environment, MemoryEnv, ProcessEnv};
pub use error::{Result, SourceError};
pub use file::{FileFormat, load_file};
pub use sources::{ARGV_STORE, ConfigSources};
