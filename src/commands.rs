use std::io::Read;

use serde_json::{json, Map, Value};
use thiserror::Error;

use claimmeta_core::{
    ClaimDraft, CoreError, Fee, FeeError, Metadata, MetadataError, ValidationError, Validator,
};

use crate::cli::Command;
use crate::config::Config;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input must be a JSON object")]
    NotAnObject,

    #[error("Input is not UTF-8")]
    Utf8,

    #[error("{0}")]
    Metadata(#[from] MetadataError),

    #[error("{0}")]
    Fee(#[from] FeeError),

    #[error("{0}")]
    Name(#[from] ValidationError),

    #[error("{0}")]
    Core(#[from] CoreError),
}

/// Run a parsed command, returning what should be printed on success.
pub fn run(command: &Command, config: &Config) -> Result<String, CommandError> {
    let output = match command {
        Command::Metadata { input, encoded } => {
            validate_metadata(&read_input(input)?, *encoded, config)?
        }
        Command::Fee { input } => validate_fee(&read_input(input)?, config)?,
        Command::Encode { input } => return encode_metadata(&read_input(input)?, config),
        Command::Claim {
            name,
            input,
            sd_hash,
            content_type,
        } => prepare_claim(name, &read_input(input)?, sd_hash, content_type, config)?,
        Command::Name { name } => {
            Validator::validate_name(name)?;
            json!({ "name": name, "valid": true })
        }
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Read a file, or stdin when `input` is "-".
pub fn read_input(input: &str) -> Result<Vec<u8>, CommandError> {
    if input == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read(input)?)
    }
}

pub fn validate_metadata(
    raw: &[u8],
    encoded: bool,
    config: &Config,
) -> Result<Value, CommandError> {
    let metadata = if encoded {
        Metadata::decode(&config.encoding, raw, &config.currencies)?
    } else {
        Metadata::new(&parse_object(raw)?, &config.currencies)?
    };

    Ok(json!({
        "meta_version": metadata.meta_version(),
        "metadata": metadata.to_value(),
    }))
}

pub fn validate_fee(raw: &[u8], config: &Config) -> Result<Value, CommandError> {
    let fee = Fee::new(&parse_object(raw)?, &config.currencies)?;

    Ok(json!({
        "fee_version": fee.fee_version(),
        "currency_symbol": fee.currency_symbol(),
        "amount": fee.amount(),
        "address": fee.address(),
    }))
}

/// Validate plain JSON metadata and encode it with the configured codec.
pub fn encode_metadata(raw: &[u8], config: &Config) -> Result<String, CommandError> {
    let metadata = Metadata::new(&parse_object(raw)?, &config.currencies)?;
    let encoded = metadata.encode(&config.encoding)?;
    String::from_utf8(encoded).map_err(|_| CommandError::Utf8)
}

pub fn prepare_claim(
    name: &str,
    raw: &[u8],
    sd_hash: &str,
    content_type: &str,
    config: &Config,
) -> Result<Value, CommandError> {
    let claim = ClaimDraft::new(name, parse_object(raw)?)
        .with_stream_hash(sd_hash)
        .with_content_type(content_type)
        .build(&config.currencies)?;
    let encoded = claim.metadata.encode(&config.encoding)?;

    Ok(json!({
        "name": claim.name,
        "meta_version": claim.metadata.meta_version(),
        "metadata": claim.metadata.to_value(),
        "encoded": String::from_utf8(encoded).map_err(|_| CommandError::Utf8)?,
    }))
}

fn parse_object(raw: &[u8]) -> Result<Map<String, Value>, CommandError> {
    match serde_json::from_slice::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(CommandError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimmeta_core::METADATA_V001;

    const BASELINE: &str = r#"{
        "sources": {"lbry_sd_hash": "abc"},
        "title": "t",
        "description": "d",
        "author": "a",
        "language": "en",
        "license": "l",
        "content-type": "video/mp4"
    }"#;

    #[test]
    fn test_validate_metadata_plain() {
        let output =
            validate_metadata(BASELINE.as_bytes(), false, &Config::for_testing()).unwrap();
        assert_eq!(output["meta_version"], METADATA_V001);
        assert_eq!(output["metadata"]["title"], "t");
    }

    #[test]
    fn test_validate_fee() {
        let raw = br#"{"USD": {"amount": "12.5", "address": "acct"}}"#;
        let output = validate_fee(raw, &Config::for_testing()).unwrap();
        assert_eq!(output["amount"], 12.5);
        assert_eq!(output["currency_symbol"], "USD");
    }

    #[test]
    fn test_non_object_input() {
        let err = validate_fee(b"[]", &Config::for_testing()).unwrap_err();
        assert!(matches!(err, CommandError::NotAnObject));
    }

    #[test]
    fn test_encode_then_validate_encoded() {
        let config = Config::for_testing();
        let encoded = encode_metadata(BASELINE.as_bytes(), &config).unwrap();
        let output = validate_metadata(encoded.as_bytes(), true, &config).unwrap();
        assert_eq!(output["meta_version"], METADATA_V001);
    }

    #[test]
    fn test_run_name() {
        let config = Config::for_testing();
        let valid = Command::Name {
            name: "ok-name".to_string(),
        };
        let invalid = Command::Name {
            name: "bad name".to_string(),
        };

        assert!(run(&valid, &config).is_ok());
        let err = run(&invalid, &config).unwrap_err();
        assert!(matches!(err, CommandError::Name(_)));
    }
}
