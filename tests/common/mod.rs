#![allow(dead_code)]

use represent::protocol::{CodecError, Protocol};
use represent::registry::Registry;
use serde_json::Value;
use std::io::{Read, Write};
use std::sync::Arc;

/// A protocol that only knows its content type.
///
/// Encodes to `(encoded <content type>)` and decodes only that exact body.
pub struct CtProtocol(pub String);

impl CtProtocol {
    pub fn new(content_type: &str) -> Arc<Self> {
        Arc::new(Self(content_type.to_string()))
    }

    fn marker(&self) -> String {
        format!("(encoded {})", self.0)
    }
}

impl Protocol for CtProtocol {
    fn content_type(&self) -> &str {
        &self.0
    }

    fn decode(&self, source: &mut dyn Read) -> Result<Value, CodecError> {
        let mut body = String::new();
        source.read_to_string(&mut body)?;
        if body != self.marker() {
            return Err(format!("wrong content. expected '{}', got '{}'", self.marker(), body).into());
        }
        Ok(Value::String(body))
    }

    fn encode(&self, _value: &Value, sink: &mut dyn Write) -> Result<(), CodecError> {
        sink.write_all(self.marker().as_bytes())?;
        Ok(())
    }
}

/// A fresh registry with one `CtProtocol` per content type, in order.
pub fn registry_with(content_types: &[&str]) -> Registry {
    let registry = Registry::new();
    for ct in content_types {
        registry.register(CtProtocol::new(ct));
    }
    registry
}

/// Content type of the protocol selected for `header`, if any.
pub fn selected(registry: &Registry, header: &str) -> Option<String> {
    registry
        .match_header(header)
        .expect("header should parse")
        .map(|p| p.content_type().to_string())
}
