//! Encoded attribute source
//!
//! A payload is the standard base64 encoding of a JSON object, the same
//! format [`conf_core::ConfigManager::to_base64`] produces. Payloads are
//! looked up by id in an [`AttributeSource`], typically a page or template
//! that embeds a snapshot taken elsewhere.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use conf_core::{Error, Result};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Encoded payloads addressed by id.
pub trait AttributeSource {
    /// Payload stored under `id`, if any.
    fn attribute(&self, id: &str) -> Option<String>;
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// Attribute source backed by a lookup callback.
pub struct FnAttributes<F>(pub F);

impl<F> AttributeSource for FnAttributes<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn attribute(&self, id: &str) -> Option<String> {
        (self.0)(id)
    }
}

/// Decode a base64 JSON object payload.
///
/// # Errors
///
/// Returns [`Error::Store`] if the payload is not valid base64, not valid
/// JSON, or not a JSON object.
pub fn decode_payload(id: &str, payload: &str) -> Result<Map<String, Value>> {
    let message = || format!("cannot read encoded payload {id}");

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::store(message(), e))?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|e| Error::store(message(), e))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::Store {
            message: format!("{}: expected an object, found {other}", message()),
            source: None,
        }),
    }
}

/// Store name for the payload `id`.
pub fn store_name(id: &str) -> String {
    format!("__encoded_{id}__")
}
