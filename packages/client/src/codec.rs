//! JSON codec seam.
//!
//! Typed sends pass through a [`JsonCodec`] so callers can substitute their
//! own serializer settings without touching the client.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

/// Object-safe JSON encode/decode seam.
pub trait JsonCodec: Send + Sync {
    /// Render a JSON value as text.
    fn encode(&self, value: &Value) -> Result<String, Error>;

    /// Parse JSON text into a value.
    fn decode(&self, text: &str) -> Result<Value, Error>;
}

/// Codec backed directly by serde_json.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultJsonCodec;

impl JsonCodec for DefaultJsonCodec {
    fn encode(&self, value: &Value) -> Result<String, Error> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode(&self, text: &str) -> Result<Value, Error> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Serialize a typed value to JSON text through the codec.
pub fn serialize<T: Serialize>(codec: &dyn JsonCodec, value: &T) -> Result<String, Error> {
    codec.encode(&serde_json::to_value(value)?)
}

/// Deserialize JSON text into a typed value through the codec.
pub fn deserialize<T: DeserializeOwned>(codec: &dyn JsonCodec, text: &str) -> Result<T, Error> {
    Ok(serde_json::from_value(codec.decode(text)?)?)
}
