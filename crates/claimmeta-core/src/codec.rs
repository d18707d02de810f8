use serde_json::{Map, Value};

/// Reversible text encoding for metadata.
///
/// Implementations turn a generic value into bytes and back. Validation never
/// depends on a particular encoding; it only sees the decoded mapping.
pub trait MetadataCodec {
    type Error: std::error::Error;

    fn encode(&self, value: &Value) -> Result<Vec<u8>, Self::Error>;

    /// Decode bytes into a raw field mapping.
    fn decode(&self, encoded: &[u8]) -> Result<Map<String, Value>, Self::Error>;
}
