use super::{CodecError, Protocol};
use serde_json::Value;
use std::io::{Read, Write};

/// `application/json` backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProtocol;

impl Protocol for JsonProtocol {
    fn content_type(&self) -> &str {
        "application/json"
    }

    fn decode(&self, source: &mut dyn Read) -> Result<Value, CodecError> {
        Ok(serde_json::from_reader(source)?)
    }

    fn encode(&self, value: &Value, sink: &mut dyn Write) -> Result<(), CodecError> {
        serde_json::to_writer(&mut *sink, value)?;
        sink.write_all(b"\n")?;
        Ok(())
    }
}
