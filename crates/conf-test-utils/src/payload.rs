//! Encoded payload builders.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

/// Encode `value` the way `ConfigManager::to_base64` does.
pub fn encode(value: &Value) -> String {
    STANDARD.encode(value.to_string())
}

/// Base64 of arbitrary text, for malformed payload cases.
pub fn encode_text(text: &str) -> String {
    STANDARD.encode(text)
}
