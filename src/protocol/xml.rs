use super::{CodecError, Protocol};
use quick_xml::se::Serializer;
use serde::Serialize;
use serde_json::Value;
use std::io::{Read, Write};

/// Element wrapping every encoded document.
const ROOT_ELEMENT: &str = "value";

/// `application/xml` backed by `quick-xml`'s serde support.
///
/// Documents are wrapped in a `<value>` root element. XML has no scalar
/// types, so decoded leaves come back as strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlProtocol;

impl Protocol for XmlProtocol {
    fn content_type(&self) -> &str {
        "application/xml"
    }

    fn decode(&self, source: &mut dyn Read) -> Result<Value, CodecError> {
        let mut text = String::new();
        source.read_to_string(&mut text)?;
        Ok(quick_xml::de::from_str(&text)?)
    }

    fn encode(&self, value: &Value, sink: &mut dyn Write) -> Result<(), CodecError> {
        let mut text = String::new();
        value.serialize(Serializer::with_root(&mut text, Some(ROOT_ELEMENT))?)?;
        sink.write_all(text.as_bytes())?;
        sink.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_xml_encode_decode() {
        let value = json!({"name": "Fluffy", "species": "Cat"});
        let mut buf = Vec::new();
        XmlProtocol.encode(&value, &mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("<value>"));
        assert!(text.contains("<name>Fluffy</name>"));

        let decoded = XmlProtocol.decode(&mut buf.as_slice()).unwrap();
        assert!(decoded.get("name").is_some());
        assert!(decoded.get("species").is_some());
    }

    #[test]
    fn test_xml_decode_rejects_garbage() {
        assert!(XmlProtocol
            .decode(&mut &b"<value><name>Fluffy</value>"[..])
            .is_err());
    }
}
