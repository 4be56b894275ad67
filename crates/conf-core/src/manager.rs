//! The configuration manager: override map over a chain of stores

use crate::chain::{AccessorChain, Registration};
use crate::error::{BoxError, Result};
use crate::merge::deep_merge_maps;
use crate::resolvers;
use crate::store::Store;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Hierarchical configuration manager.
///
/// Values are looked up in three tiers:
///
/// 1. **Overrides** set with [`ConfigManager::set`], which always win and are
///    never merged with store values
/// 2. **Stores**, most recently registered first, with object values deep-merged
///    across stores
/// 3. Absent, when nothing answers
///
/// # Example
///
/// ```
/// use conf_core::ConfigManager;
/// use serde_json::json;
///
/// let mut conf = ConfigManager::new();
/// conf.with_store(json!({ "server": { "host": "localhost", "port": 80 } }))
///     .with_store(json!({ "server": { "port": 8080 } }));
///
/// assert_eq!(
///     conf.get_object("server").unwrap(),
///     Some(json!({ "host": "localhost", "port": 8080 }))
/// );
/// assert!(conf.get_number("server").is_err());
/// ```
#[derive(Debug, Default)]
pub struct ConfigManager {
    overrides: Map<String, Value>,
    chain: AccessorChain,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `store` under `name`.
    ///
    /// A new name becomes the highest precedence store. Registering an existing
    /// name replaces that store without moving it in the chain.
    pub fn add_store(&mut self, name: impl Into<String>, store: Store) -> &mut Self {
        let name = name.into();
        match self.chain.insert(name.clone(), store) {
            Registration::Added => tracing::debug!(store = %name, "Registered store"),
            Registration::Replaced => {
                tracing::debug!(store = %name, "Replaced store in its existing slot")
            }
        }
        self
    }

    /// Use a copy of an object as a source under a generated name.
    ///
    /// Non-object values register an empty store.
    pub fn with_store(&mut self, storage: Value) -> &mut Self {
        self.with_named_store(generate_store_name(), storage)
    }

    /// Use a copy of an object as a source under `name`.
    pub fn with_named_store(&mut self, name: impl Into<String>, storage: Value) -> &mut Self {
        let storage = match storage {
            Value::Object(map) => map,
            other => {
                tracing::warn!(value = %other, "Ignoring non-object storage");
                Map::new()
            }
        };
        self.add_store(name, Store::from_map(storage))
    }

    /// Use a lookup callback as a source under a generated name.
    pub fn with_supplier<F>(&mut self, supplier: F) -> &mut Self
    where
        F: Fn(&str) -> Option<Value> + Send + Sync + 'static,
    {
        self.with_named_supplier(generate_store_name(), supplier)
    }

    /// Use a lookup callback as a source under `name`.
    pub fn with_named_supplier<F>(&mut self, name: impl Into<String>, supplier: F) -> &mut Self
    where
        F: Fn(&str) -> Option<Value> + Send + Sync + 'static,
    {
        self.add_store(name, Store::from_fn(supplier))
    }

    /// Registered store names, lowest precedence first.
    pub fn store_names(&self) -> Vec<String> {
        self.chain.names().map(str::to_string).collect()
    }

    /// Override `name` with `value`, above every store.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.overrides.insert(name.into(), value.into());
        self
    }

    /// Remove the override for `name`, if any.
    pub fn unset(&mut self, name: &str) -> &mut Self {
        self.overrides.remove(name);
        self
    }

    fn resolve(&self, name: &str) -> Option<Value> {
        match self.overrides.get(name) {
            Some(value) => Some(value.clone()),
            None => self.chain.resolve(name),
        }
    }

    /// Whether an override or any store provides `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.overrides.contains_key(name) || self.chain.exists(name)
    }

    /// Raw resolved value for `name`.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.resolve(name)
    }

    /// Raw resolved value for `name`, passed through `transform`.
    ///
    /// `transform` is called even when the value is absent.
    pub fn get_with<T, F>(&self, name: &str, transform: F) -> T
    where
        F: FnOnce(Option<Value>) -> T,
    {
        transform(self.resolve(name))
    }

    /// Value of `name` as a string; non-strings are JSON encoded.
    pub fn get_string(&self, name: &str) -> Result<Option<String>> {
        Ok(resolvers::resolve_string(self.resolve(name)))
    }

    /// Like [`ConfigManager::get_string`], falling back when absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` if the fallback is needed and is not a string.
    pub fn get_string_or(&self, name: &str, fallback: impl Into<Value>) -> Result<String> {
        match resolvers::resolve_string(self.resolve(name)) {
            Some(value) => Ok(value),
            None => resolvers::assert_string(fallback.into()),
        }
    }

    /// Value of `name` as a number; numeric strings are parsed.
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` if the value is present but not numeric.
    pub fn get_number(&self, name: &str) -> Result<Option<f64>> {
        resolvers::resolve_number(self.resolve(name))
    }

    /// Like [`ConfigManager::get_number`], falling back when absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` if the value is not numeric, or if the
    /// fallback is needed and is not a finite number.
    pub fn get_number_or(&self, name: &str, fallback: impl Into<Value>) -> Result<f64> {
        match resolvers::resolve_number(self.resolve(name))? {
            Some(value) => Ok(value),
            None => resolvers::assert_number(fallback.into()),
        }
    }

    /// Value of `name` as a flag.
    ///
    /// Present values are `true` unless they are `false` or `"false"`; absent is `false`.
    pub fn get_boolean(&self, name: &str) -> bool {
        resolvers::resolve_boolean(self.resolve(name).as_ref())
    }

    fn resolve_object_raw(&self, name: &str) -> Option<Value> {
        match self.overrides.get(name) {
            Some(value) => Some(value.clone()),
            None => self
                .chain
                .resolve_with(name, resolvers::expand_encoded_object),
        }
    }

    /// Value of `name` as a composite; JSON strings are parsed.
    ///
    /// Strings holding JSON objects are expanded in every store before the
    /// merge, so they combine with objects from lower stores.
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` if the value is present but not a composite.
    pub fn get_object(&self, name: &str) -> Result<Option<Value>> {
        resolvers::resolve_object(self.resolve_object_raw(name))
    }

    /// Like [`ConfigManager::get_object`], falling back when absent.
    pub fn get_object_or(&self, name: &str, fallback: impl Into<Value>) -> Result<Value> {
        match resolvers::resolve_object(self.resolve_object_raw(name))? {
            Some(value) => Ok(value),
            None => resolvers::assert_object(fallback.into()),
        }
    }

    /// Value of `name` built with `factory`. Absent values skip the factory.
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` wrapping the factory's error.
    pub fn get_type<T, F, E>(&self, name: &str, factory: F) -> Result<Option<T>>
    where
        F: FnOnce(Value) -> std::result::Result<T, E>,
        E: Into<BoxError>,
    {
        resolvers::resolve_type(self.resolve(name), factory)
    }

    /// Like [`ConfigManager::get_type`]; `fallback` is returned unconstructed when absent.
    pub fn get_type_or<T, F, E>(&self, name: &str, factory: F, fallback: T) -> Result<T>
    where
        F: FnOnce(Value) -> std::result::Result<T, E>,
        E: Into<BoxError>,
    {
        Ok(self.get_type(name, factory)?.unwrap_or(fallback))
    }

    /// Value of `name` deserialized into `T`.
    pub fn get_deserialized<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        self.get_type(name, serde_json::from_value::<T>)
    }

    /// Snapshot of every enumerable store merged in precedence order, with
    /// overrides on top.
    pub fn to_json(&self) -> Value {
        let mut snapshot = self.chain.aggregate();
        deep_merge_maps(&mut snapshot, self.overrides.clone());
        Value::Object(snapshot)
    }

    /// [`ConfigManager::to_json`] as compact JSON, base64 encoded.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_json().to_string())
    }
}

fn generate_store_name() -> String {
    format!("__store_{}__", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn generated_names_are_unique() {
        let mut conf = ConfigManager::new();
        conf.with_store(json!({})).with_store(json!({})).with_supplier(|_| None);

        let names = conf.store_names();
        assert_eq!(names.len(), 3);
        assert_ne!(names[0], names[1]);
        assert!(names.iter().all(|n| n.starts_with("__store_")));
    }

    #[test]
    fn non_object_storage_registers_empty_store() {
        let mut conf = ConfigManager::new();
        conf.with_named_store("odd", json!([1, 2, 3]));

        assert_eq!(conf.store_names(), vec!["odd"]);
        assert_eq!(conf.to_json(), json!({}));
    }

    #[test]
    fn override_is_never_merged() {
        let mut conf = ConfigManager::new();
        conf.with_store(json!({ "object": { "a": 1 } }));
        conf.set("object", json!({ "b": 2 }));

        assert_eq!(conf.get("object"), Some(json!({ "b": 2 })));
        assert_eq!(conf.get_object("object").unwrap(), Some(json!({ "b": 2 })));
    }

    #[test]
    fn base64_snapshot_decodes_to_json() {
        let mut conf = ConfigManager::new();
        conf.with_store(json!({ "a": "a", "b": 42 }));

        let decoded = STANDARD.decode(conf.to_base64()).unwrap();
        let value: Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(value, json!({ "a": "a", "b": 42 }));
    }
}
