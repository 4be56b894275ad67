//! Resolution core for layered configuration
//!
//! Merges values from any number of named sources into one namespace with
//! deterministic precedence:
//!
//! - **Suppliers** answer raw lookups for a single source
//! - **Stores** wrap a supplier with the source's own naming convention
//! - The **accessor chain** orders stores, newest first, and deep-merges
//!   object values across them
//! - **Overrides** sit above the chain and always win
//! - **Resolvers** coerce raw values into strings, numbers, flags, objects
//!   or custom types
//!
//! # Example
//!
//! ```
//! use conf_core::ConfigManager;
//! use serde_json::json;
//!
//! let mut conf = ConfigManager::new();
//! conf.with_named_store("defaults", json!({ "port": "8080", "debug": "false" }))
//!     .with_named_store("local", json!({ "debug": true }));
//! conf.set("port", 9000);
//!
//! assert_eq!(conf.get_number("port").unwrap(), Some(9000.0));
//! assert!(conf.get_boolean("debug"));
//! assert_eq!(conf.get_string_or("missing", "fallback").unwrap(), "fallback");
//! ```

pub mod chain;
pub mod error;
pub mod manager;
pub mod merge;
pub mod resolvers;
pub mod store;
pub mod supplier;

pub use chain::{AccessorChain, Registration};
pub use error::{BoxError, Error, Result};
pub use manager::ConfigManager;
pub use store::{NameTransform, Store};
pub use supplier::{FnSupplier, ObjectSupplier, Supplier};

/// Raw configuration value
pub type ConfigValue = serde_json::Value;
