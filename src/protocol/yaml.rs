use super::{CodecError, Protocol};
use serde_json::Value;
use std::io::{Read, Write};

/// `application/yaml` backed by `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlProtocol;

impl Protocol for YamlProtocol {
    fn content_type(&self) -> &str {
        "application/yaml"
    }

    fn decode(&self, source: &mut dyn Read) -> Result<Value, CodecError> {
        Ok(serde_yaml::from_reader(source)?)
    }

    fn encode(&self, value: &Value, sink: &mut dyn Write) -> Result<(), CodecError> {
        serde_yaml::to_writer(sink, value)?;
        Ok(())
    }
}
