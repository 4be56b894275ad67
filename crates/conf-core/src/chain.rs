//! Precedence-ordered accessor chain
//!
//! Stores are kept in registration order: the last registered store has the
//! highest precedence. Lookups walk from the top of the chain towards the
//! bottom; running off the end is the terminal "absent" answer.
//!
//! Object answers are deep-merged with whatever the lower part of the chain
//! produces for the same name, the higher store winning conflicts. Scalars and
//! arrays end the walk and are returned as-is.

use crate::merge::merge_layers;
use crate::store::Store;
use serde_json::{Map, Value};

/// Outcome of registering a store under a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The name was new; the store became the highest precedence
    Added,
    /// A store with that name existed and was replaced in its slot
    Replaced,
}

struct Layer {
    name: String,
    store: Store,
}

/// Ordered sequence of named stores.
#[derive(Default)]
pub struct AccessorChain {
    layers: Vec<Layer>,
}

impl AccessorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `store` under `name`.
    ///
    /// A new name goes on top of the chain. An existing name keeps its
    /// precedence slot and only the store behind it changes.
    pub fn insert(&mut self, name: impl Into<String>, store: Store) -> Registration {
        let name = name.into();
        match self.layers.iter_mut().find(|layer| layer.name == name) {
            Some(layer) => {
                layer.store = store;
                Registration::Replaced
            }
            None => {
                self.layers.push(Layer { name, store });
                Registration::Added
            }
        }
    }

    /// Registration names, lowest precedence first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|layer| layer.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Whether any store answers for `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.layers.iter().rev().any(|layer| layer.store.has(name))
    }

    /// Resolve `name` across the chain.
    pub fn resolve(&self, name: &str) -> Option<Value> {
        self.resolve_with(name, |value| value)
    }

    /// Resolve `name`, passing each store's raw answer through `prepare`
    /// before deciding whether it merges.
    pub fn resolve_with<P>(&self, name: &str, prepare: P) -> Option<Value>
    where
        P: Fn(Value) -> Value,
    {
        // Objects collected so far, already merged top-down.
        let mut merged: Option<Map<String, Value>> = None;

        for layer in self.layers.iter().rev() {
            let Some(raw) = layer.store.get(name) else {
                continue;
            };
            match (prepare(raw), merged.take()) {
                (Value::Object(lower), None) => merged = Some(lower),
                (Value::Object(lower), Some(higher)) => merged = Some(merge_layers(lower, higher)),
                (other, None) => return Some(other),
                (_, Some(higher)) => return Some(Value::Object(higher)),
            }
        }

        merged.map(Value::Object)
    }

    /// Merge the enumerable contents of every store, lowest precedence first.
    pub fn aggregate(&self) -> Map<String, Value> {
        self.layers
            .iter()
            .fold(Map::new(), |acc, layer| merge_layers(acc, layer.store.aggregate()))
    }
}

impl std::fmt::Debug for AccessorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
