//! Raw value suppliers
//!
//! A [`Supplier`] is the key-value provider behind a store. It answers for a
//! single name and, when its contents are statically known, can enumerate
//! everything it holds for aggregation.

use serde_json::{Map, Value};

/// Raw provider of configuration values.
///
/// Implement this trait to plug a custom backend (a remote service, a
/// database, a generated table) into the precedence chain.
pub trait Supplier: Send + Sync {
    /// Value registered under `name`, or `None` when absent.
    fn get(&self, name: &str) -> Option<Value>;

    /// Whether anything is registered under `name`.
    ///
    /// Must agree with [`Supplier::get`]: `contains(n) == get(n).is_some()`.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All statically known name/value pairs.
    ///
    /// Suppliers that cannot enumerate their contents return an empty map.
    fn aggregate(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// Supplier backed by an owned copy of a static mapping.
#[derive(Debug, Clone, Default)]
pub struct ObjectSupplier {
    storage: Map<String, Value>,
}

impl ObjectSupplier {
    pub fn new(storage: Map<String, Value>) -> Self {
        Self { storage }
    }

    /// Build from any JSON value; non-object values yield an empty supplier.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(storage) => Self { storage },
            _ => Self::default(),
        }
    }
}

impl Supplier for ObjectSupplier {
    fn get(&self, name: &str) -> Option<Value> {
        self.storage.get(name).cloned()
    }

    fn contains(&self, name: &str) -> bool {
        self.storage.contains_key(name)
    }

    fn aggregate(&self) -> Map<String, Value> {
        self.storage.clone()
    }
}

/// Supplier backed by a callback. Callbacks are opaque, so it never aggregates.
pub struct FnSupplier<F> {
    supplier: F,
}

impl<F> FnSupplier<F>
where
    F: Fn(&str) -> Option<Value> + Send + Sync,
{
    pub fn new(supplier: F) -> Self {
        Self { supplier }
    }
}

impl<F> Supplier for FnSupplier<F>
where
    F: Fn(&str) -> Option<Value> + Send + Sync,
{
    fn get(&self, name: &str) -> Option<Value> {
        (self.supplier)(name)
    }
}

impl<F> std::fmt::Debug for FnSupplier<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSupplier").finish_non_exhaustive()
    }
}
