use super::{CodecError, Protocol};
use serde_json::Value;
use std::io::{Read, Write};

/// `application/msgpack` backed by `rmp-serde`. Maps keep their field names.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgpackProtocol;

impl Protocol for MsgpackProtocol {
    fn content_type(&self) -> &str {
        "application/msgpack"
    }

    fn decode(&self, source: &mut dyn Read) -> Result<Value, CodecError> {
        Ok(rmp_serde::from_read(source)?)
    }

    fn encode(&self, value: &Value, mut sink: &mut dyn Write) -> Result<(), CodecError> {
        rmp_serde::encode::write_named(&mut sink, value)?;
        Ok(())
    }
}
