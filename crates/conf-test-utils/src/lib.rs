//! Shared test utilities for the conf workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`dir`]: [`ConfigDir`], a temporary directory of config files
//! - [`payload`]: encoded payload builders

pub mod dir;
pub mod payload;

pub use dir::ConfigDir;
pub use payload::encode;
