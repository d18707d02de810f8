use serde_json::{Map, Value};
use thiserror::Error;

use claimmeta_core::MetadataCodec;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compact JSON with sorted keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl MetadataCodec for JsonCodec {
    type Error = CodecError;

    fn encode(&self, value: &Value) -> Result<Vec<u8>, Self::Error> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode(&self, encoded: &[u8]) -> Result<Map<String, Value>, Self::Error> {
        Ok(serde_json::from_slice(encoded.trim_ascii())?)
    }
}

/// JSON, hex encoded. This is the form metadata takes inside a claim.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexJsonCodec;

impl MetadataCodec for HexJsonCodec {
    type Error = CodecError;

    fn encode(&self, value: &Value) -> Result<Vec<u8>, Self::Error> {
        let json = JsonCodec.encode(value)?;
        Ok(hex::encode(json).into_bytes())
    }

    fn decode(&self, encoded: &[u8]) -> Result<Map<String, Value>, Self::Error> {
        let json = hex::decode(encoded.trim_ascii())?;
        JsonCodec.decode(&json)
    }
}

/// Encoding selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Hex,
    Json,
}

impl std::str::FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" => Ok(Encoding::Hex),
            "json" => Ok(Encoding::Json),
            other => Err(format!("unknown encoding: {}", other)),
        }
    }
}

impl MetadataCodec for Encoding {
    type Error = CodecError;

    fn encode(&self, value: &Value) -> Result<Vec<u8>, Self::Error> {
        match self {
            Encoding::Hex => HexJsonCodec.encode(value),
            Encoding::Json => JsonCodec.encode(value),
        }
    }

    fn decode(&self, encoded: &[u8]) -> Result<Map<String, Value>, Self::Error> {
        match self {
            Encoding::Hex => HexJsonCodec.decode(encoded),
            Encoding::Json => JsonCodec.decode(encoded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_keys_sorted() {
        let encoded = JsonCodec.encode(&json!({"b": 1, "a": 2})).unwrap();
        assert_eq!(encoded, br#"{"a":2,"b":1}"#);
    }

    #[test]
    fn test_hex_encode() {
        let encoded = HexJsonCodec.encode(&json!({"a": 1})).unwrap();
        assert_eq!(encoded, b"7b2261223a317d");
    }

    #[test]
    fn test_hex_decode_ignores_surrounding_whitespace() {
        let decoded = HexJsonCodec.decode(b"  7b2261223a317d\n").unwrap();
        assert_eq!(decoded.get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_hex_decode_errors() {
        assert!(matches!(HexJsonCodec.decode(b"zz"), Err(CodecError::Hex(_))));
        // "[1]" is valid JSON but not a mapping
        assert!(matches!(HexJsonCodec.decode(b"5b315d"), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_encoding_dispatch() {
        assert_eq!("hex".parse::<Encoding>(), Ok(Encoding::Hex));
        assert_eq!("json".parse::<Encoding>(), Ok(Encoding::Json));
        assert!("base64".parse::<Encoding>().is_err());

        let value = json!({"x": "y"});
        assert_eq!(
            Encoding::Hex.encode(&value).unwrap(),
            HexJsonCodec.encode(&value).unwrap()
        );
        assert_eq!(
            Encoding::Json.encode(&value).unwrap(),
            JsonCodec.encode(&value).unwrap()
        );
    }
}
