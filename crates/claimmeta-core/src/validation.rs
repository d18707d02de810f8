use serde_json::{Map, Value};

use crate::error::{MetadataError, ValidationError};
use crate::metadata::SourceType;

/// Validator for claim names and metadata sources.
pub struct Validator;

impl Validator {
    /// Whether `c` may appear in a claim name: ASCII letters, digits, and `-`.
    pub fn is_name_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-'
    }

    /// Validate claim name characters.
    /// Fails on the first character outside the allowed alphabet.
    pub fn validate_name(name: &str) -> Result<(), ValidationError> {
        if let Some((position, character)) =
            name.chars().enumerate().find(|(_, c)| !Self::is_name_char(*c))
        {
            return Err(ValidationError::InvalidNameCharacter {
                name: name.to_string(),
                character,
                position,
            });
        }
        Ok(())
    }

    /// Validate the `sources` field of raw metadata.
    /// Must be present, a mapping, and keyed only by known source types.
    pub fn validate_sources(metadata: &Map<String, Value>) -> Result<(), MetadataError> {
        let sources = metadata
            .get("sources")
            .ok_or(MetadataError::MissingSources)?
            .as_object()
            .ok_or(MetadataError::MalformedSources)?;

        for tag in sources.keys() {
            if tag.parse::<SourceType>().is_err() {
                return Err(MetadataError::UnknownSourceType(tag.clone()));
            }
        }
        Ok(())
    }
}
