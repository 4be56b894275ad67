//! Stores: suppliers with their own key-naming convention

use crate::supplier::{FnSupplier, ObjectSupplier, Supplier};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Function applied to a public lookup name before the supplier sees it
pub type NameTransform = Box<dyn Fn(&str) -> String + Send + Sync>;

/// A supplier wrapped with an optional name transform.
///
/// The transform lets a store keep its own naming convention (for example
/// CONSTANT_CASE environment variables) independent of the names used by
/// callers.
pub struct Store {
    supplier: Box<dyn Supplier>,
    name_transform: Option<NameTransform>,
}

impl Store {
    pub fn new(supplier: impl Supplier + 'static) -> Self {
        Self {
            supplier: Box::new(supplier),
            name_transform: None,
        }
    }

    /// Store over an owned copy of `storage`.
    pub fn from_map(storage: Map<String, Value>) -> Self {
        Self::new(ObjectSupplier::new(storage))
    }

    /// Store over a lookup callback.
    pub fn from_fn<F>(supplier: F) -> Self
    where
        F: Fn(&str) -> Option<Value> + Send + Sync + 'static,
    {
        Self::new(FnSupplier::new(supplier))
    }

    /// Apply `transform` to every lookup name before consulting the supplier.
    pub fn with_name_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.name_transform = Some(Box::new(transform));
        self
    }

    fn lookup_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match &self.name_transform {
            Some(transform) => Cow::Owned(transform(name)),
            None => Cow::Borrowed(name),
        }
    }

    /// Raw value for `name`, or `None` so the caller can delegate.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.supplier.get(&self.lookup_name(name))
    }

    /// Whether this store answers for `name`.
    pub fn has(&self, name: &str) -> bool {
        self.supplier.contains(&self.lookup_name(name))
    }

    /// Statically known contents. Keys are reported as the supplier holds them.
    pub fn aggregate(&self) -> Map<String, Value> {
        self.supplier.aggregate()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("name_transform", &self.name_transform.is_some())
            .finish_non_exhaustive()
    }
}
