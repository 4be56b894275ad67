//! Registration of external sources on a [`ConfigManager`]

use crate::argv::{ArgvParser, parse_args};
use crate::case::camel_case;
use crate::encoded::{self, AttributeSource};
use crate::env::{EnvSupplier, Environment, ProcessEnv};
use crate::file::{absolute_path, load_file};
use conf_core::{ConfigManager, Store};
use std::path::Path;

/// Store name of the command-line source
pub const ARGV_STORE: &str = "__argv__";

/// Source adapters for [`ConfigManager`].
///
/// Each adapter registers one store on top of the chain. Sources added later
/// take precedence over sources added earlier.
pub trait ConfigSources {
    /// Use the arguments of the current process, without the program name.
    fn with_argv(&mut self) -> &mut Self;

    /// Use `args` as command-line arguments.
    fn with_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    /// Use `args` flattened by a custom `parser`.
    fn with_args_parsed<I, S>(&mut self, args: I, parser: ArgvParser) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    /// Use the process environment.
    ///
    /// Names are folded to CONSTANT_CASE and prefixed with `prefix` unless
    /// it is empty. `separator` nests keys; empty means `__`.
    fn with_env(&mut self, prefix: &str, separator: &str) -> &mut Self;

    /// Like [`ConfigSources::with_env`], reading from `env`.
    fn with_env_from<E>(&mut self, env: E, prefix: &str, separator: &str) -> &mut Self
    where
        E: Environment + 'static;

    /// Use a JSON, YAML or TOML file.
    ///
    /// An empty path does nothing. A file that cannot be loaded is logged
    /// and skipped; use [`crate::load_file`] to observe the failure.
    fn with_file(&mut self, path: impl AsRef<Path>) -> &mut Self;

    /// Use the encoded payload `attributes` hold under `id`.
    ///
    /// A missing or empty payload does nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the payload cannot be decoded.
    fn with_encoded<A>(&mut self, id: &str, attributes: &A) -> conf_core::Result<&mut Self>
    where
        A: AttributeSource + ?Sized;

    /// Use an encoded payload directly.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the payload cannot be decoded.
    fn with_encoded_str(&mut self, id: &str, payload: &str) -> conf_core::Result<&mut Self>;
}

impl ConfigSources for ConfigManager {
    fn with_argv(&mut self) -> &mut Self {
        self.with_args(std::env::args().skip(1))
    }

    fn with_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_args_parsed(args, parse_args)
    }

    fn with_args_parsed<I, S>(&mut self, args: I, parser: ArgvParser) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let parsed = parser(&args);
        tracing::debug!(keys = parsed.len(), "Parsed command-line arguments");
        self.add_store(
            ARGV_STORE,
            Store::from_map(parsed).with_name_transform(camel_case),
        )
    }

    fn with_env(&mut self, prefix: &str, separator: &str) -> &mut Self {
        self.with_env_from(ProcessEnv, prefix, separator)
    }

    fn with_env_from<E>(&mut self, env: E, prefix: &str, separator: &str) -> &mut Self
    where
        E: Environment + 'static,
    {
        let supplier = EnvSupplier::new(env, prefix, separator);
        let name = match supplier.prefix() {
            "" => "ENV".to_string(),
            prefix => format!("ENV_{prefix}"),
        };
        self.add_store(name, Store::new(supplier))
    }

    fn with_file(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return self;
        }

        let loaded = absolute_path(path).and_then(|path| Ok((load_file(&path)?, path)));
        match loaded {
            Ok((storage, path)) => {
                tracing::debug!(path = %path.display(), keys = storage.len(), "Loaded config file");
                self.add_store(path.display().to_string(), Store::from_map(storage))
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping config file");
                self
            }
        }
    }

    fn with_encoded<A>(&mut self, id: &str, attributes: &A) -> conf_core::Result<&mut Self>
    where
        A: AttributeSource + ?Sized,
    {
        match attributes.attribute(id) {
            Some(payload) => self.with_encoded_str(id, &payload),
            None => Ok(self),
        }
    }

    fn with_encoded_str(&mut self, id: &str, payload: &str) -> conf_core::Result<&mut Self> {
        if payload.trim().is_empty() {
            return Ok(self);
        }
        let storage = encoded::decode_payload(id, payload)?;
        Ok(self.add_store(encoded::store_name(id), Store::from_map(storage)))
    }
}
