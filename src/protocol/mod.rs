//! # Protocol Module
//!
//! A [`Protocol`] is one serialization format a service can speak: it names
//! its content type and can decode a request body into a
//! [`serde_json::Value`] and encode a value back out.
//!
//! Protocols are registered with a [`Registry`](crate::registry::Registry),
//! which picks one per request from the client's `Accept` (for responses) or
//! the request's `Content-Type` (for bodies).
//!
//! ## Built-in Formats
//!
//! - [`JsonProtocol`] - `application/json` via `serde_json`
//! - [`XmlProtocol`] - `application/xml` via `quick-xml`
//! - [`YamlProtocol`] - `application/yaml` via `serde_yaml`
//! - [`MsgpackProtocol`] - `application/msgpack` via `rmp-serde`
//!
//! ## Custom Formats
//!
//! ```rust
//! use represent::protocol::{CodecError, Protocol};
//! use represent::registry::Registry;
//! use serde_json::Value;
//! use std::io::{Read, Write};
//! use std::sync::Arc;
//!
//! struct PlainText;
//!
//! impl Protocol for PlainText {
//!     fn content_type(&self) -> &str {
//!         "text/plain"
//!     }
//!
//!     fn decode(&self, source: &mut dyn Read) -> Result<Value, CodecError> {
//!         let mut text = String::new();
//!         source.read_to_string(&mut text)?;
//!         Ok(Value::String(text))
//!     }
//!
//!     fn encode(&self, value: &Value, sink: &mut dyn Write) -> Result<(), CodecError> {
//!         match value {
//!             Value::String(s) => sink.write_all(s.as_bytes())?,
//!             other => write!(sink, "{other}")?,
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let registry = Registry::new();
//! registry.register(Arc::new(PlainText));
//! ```

mod json;
mod msgpack;
mod xml;
mod yaml;

pub use json::JsonProtocol;
pub use msgpack::MsgpackProtocol;
pub use xml::XmlProtocol;
pub use yaml::YamlProtocol;

use crate::registry::Registry;
use serde_json::Value;
use std::io::{Read, Write};
use std::sync::Arc;

/// Error produced by a protocol's codec.
pub type CodecError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A pluggable serialization format.
///
/// Identity is by pointer: two `Arc`s to the same protocol are the same
/// protocol, even if another protocol advertises the same content type.
pub trait Protocol: Send + Sync {
    /// The media type this protocol produces and consumes, e.g. `application/json`.
    fn content_type(&self) -> &str;

    /// Read a complete body from `source`.
    fn decode(&self, source: &mut dyn Read) -> Result<Value, CodecError>;

    /// Serialize `value` into `sink`.
    fn encode(&self, value: &Value, sink: &mut dyn Write) -> Result<(), CodecError>;
}

/// Register the built-in formats on `registry`: JSON, XML, YAML, then
/// msgpack.
///
/// JSON is registered first, so it wins ties when no default is set.
pub fn register_builtins(registry: &Registry) {
    registry.register(Arc::new(JsonProtocol));
    registry.register(Arc::new(XmlProtocol));
    registry.register(Arc::new(YamlProtocol));
    registry.register(Arc::new(MsgpackProtocol));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtins_order() {
        let registry = Registry::new();
        register_builtins(&registry);
        assert_eq!(
            registry.content_types(),
            vec![
                "application/json".to_string(),
                "application/xml".to_string(),
                "application/yaml".to_string(),
                "application/msgpack".to_string(),
            ]
        );
    }
}
