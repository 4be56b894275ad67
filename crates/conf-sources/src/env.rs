//! Environment variable source
//!
//! Lookup names are folded to CONSTANT_CASE and prefixed. A variable matching
//! the folded name exactly wins; otherwise variables nested below it with the
//! separator (`APP_DATABASE__HOST`, `APP_DATABASE__POOL__MAX`) are folded into
//! an object with lowerCamelCase keys. Leaf values stay strings.

use crate::case::{camel_case, constant_case};
use conf_core::Supplier;
use conf_core::merge::insert_path;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

/// Separator used for nested keys when none is given
pub const DEFAULT_SEPARATOR: &str = "__";

/// Read access to a set of environment variables.
pub trait Environment: Send + Sync {
    /// Value of `key`, if set and valid unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Every variable that is valid unicode.
    fn vars(&self) -> Vec<(String, String)>;
}

/// The environment of the current process, read at lookup time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

/// Shared in-memory environment.
///
/// Clones share the same variables, so a clone handed to a store observes
/// later [`MemoryEnv::set`] calls.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    vars: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> &Self {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
        self
    }

    pub fn remove(&self, key: &str) -> &Self {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let env = Self::new();
        for (k, v) in iter {
            env.set(k, v);
        }
        env
    }
}

impl Environment for MemoryEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// Supplier answering from environment variables.
pub struct EnvSupplier<E> {
    env: E,
    prefix: String,
    separator: String,
}

impl<E: Environment> EnvSupplier<E> {
    /// `prefix` is folded to CONSTANT_CASE; an empty prefix disables prefixing.
    pub fn new(env: E, prefix: &str, separator: &str) -> Self {
        let separator = if separator.is_empty() {
            DEFAULT_SEPARATOR
        } else {
            separator
        };
        Self {
            env,
            prefix: constant_case(prefix),
            separator: separator.to_string(),
        }
    }

    /// CONSTANT_CASE prefix, empty when unprefixed.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Variable name a lookup name maps to.
    ///
    /// Names that already start with the prefix are not prefixed twice.
    pub fn env_name(&self, name: &str) -> String {
        let key = constant_case(name);
        let already_prefixed =
            key == self.prefix || key.starts_with(&format!("{}_", self.prefix));
        if self.prefix.is_empty() || already_prefixed {
            key
        } else {
            format!("{}_{}", self.prefix, key)
        }
    }
}

impl<E: Environment> Supplier for EnvSupplier<E> {
    fn get(&self, name: &str) -> Option<Value> {
        let env_name = self.env_name(name);
        if let Some(value) = self.env.var(&env_name) {
            return Some(Value::String(value));
        }
        let nested = collect_nested(
            self.env.vars(),
            &format!("{env_name}{}", self.separator),
            &self.separator,
        );
        (!nested.is_empty()).then_some(Value::Object(nested))
    }

    fn aggregate(&self) -> Map<String, Value> {
        // Without a prefix there is no way to tell which variables are ours.
        if self.prefix.is_empty() {
            return Map::new();
        }
        collect_nested(self.env.vars(), &format!("{}_", self.prefix), &self.separator)
    }
}

/// Fold every variable starting with `lead` into a nested object.
///
/// The remainder after `lead` is split on `separator`; each segment becomes a
/// lowerCamelCase key. Variables with empty segments are skipped.
pub fn collect_nested(
    vars: Vec<(String, String)>,
    lead: &str,
    separator: &str,
) -> Map<String, Value> {
    let mut sorted: Vec<(String, String)> = vars
        .into_iter()
        .filter(|(key, _)| key.starts_with(lead))
        .collect();
    sorted.sort();

    let mut nested = Map::new();
    for (key, value) in sorted {
        let rest = &key[lead.len()..];
        let path: Vec<String> = rest.split(separator).map(camel_case).collect();
        if path.iter().any(String::is_empty) {
            continue;
        }
        insert_path(&mut nested, &path, Value::String(value));
    }
    nested
}
