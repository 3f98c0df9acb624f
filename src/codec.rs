//! Conversion between caller values and the wire document form.

use crate::error::Result;
use bson::de::DeserializerOptions;
use bson::ser::SerializerOptions;
use bson::Document;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The encode/decode configuration a handle consults for every document
/// conversion.
///
/// A registry is shared (behind an [std::sync::Arc]) by a database handle,
/// its derived copies, and the collection handles built from them. It is
/// never mutated after construction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CodecRegistry {
    /// Whether values serialize in their human-readable representation
    /// rather than the compact wire representation.
    human_readable: bool,
}

impl CodecRegistry {
    /// Creates a registry with the given readability setting.
    pub fn new(human_readable: bool) -> Self {
        CodecRegistry { human_readable }
    }

    /// Normalizes an arbitrary serializable value into a [Document].
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Document> {
        let options = SerializerOptions::builder()
            .human_readable(self.human_readable)
            .build();
        let doc = bson::to_document_with_options(value, options)?;
        Ok(doc)
    }

    /// Decodes a result [Document] into the caller's result type.
    pub fn decode<T: DeserializeOwned>(&self, document: Document) -> Result<T> {
        let options = DeserializerOptions::builder()
            .human_readable(self.human_readable)
            .build();
        let value = bson::from_document_with_options(document, options)?;
        Ok(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use anyhow::Result;
    use bson::doc;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Ping {
        ping: i32,
    }

    #[test]
    fn encode_normalizes_to_a_document() -> Result<()> {
        let registry = CodecRegistry::default();
        let doc = registry.encode(&Ping { ping: 1 })?;
        assert_eq!(doc, doc! { "ping": 1 });
        Ok(())
    }

    #[test]
    fn decode_round_trips_a_reply() -> Result<()> {
        let registry = CodecRegistry::default();
        let value: Ping = registry.decode(doc! { "ping": 42 })?;
        assert_eq!(value, Ping { ping: 42 });
        Ok(())
    }

    #[test]
    fn decode_reports_shape_mismatches() {
        let registry = CodecRegistry::default();
        let result: crate::error::Result<Ping> = registry.decode(doc! { "pong": 1 });
        assert!(result.is_err(), "Expected a decode failure");
    }
}
