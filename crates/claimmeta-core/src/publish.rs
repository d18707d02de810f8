use serde::Serialize;
use serde_json::{Map, Value};

use crate::currency::CurrencySet;
use crate::error::CoreError;
use crate::metadata::{Metadata, SourceType};
use crate::revision::CURRENT_METADATA_VERSION;
use crate::validation::Validator;

/// Metadata being prepared for a name claim.
///
/// The publisher supplies the descriptive fields; the draft fills in the
/// stream descriptor source, the content type and the current metadata
/// version before validating.
#[derive(Debug, Clone)]
pub struct ClaimDraft {
    name: String,
    metadata: Map<String, Value>,
}

impl ClaimDraft {
    pub fn new(name: impl Into<String>, metadata: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            metadata,
        }
    }

    /// Record the stream descriptor hash under `sources`.
    ///
    /// A `sources` value that is not a mapping is left alone so that
    /// validation rejects it.
    pub fn with_stream_hash(mut self, sd_hash: impl Into<String>) -> Self {
        let sources = self
            .metadata
            .entry("sources")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(sources) = sources {
            sources.insert(
                SourceType::LbrySdHash.tag().to_string(),
                Value::String(sd_hash.into()),
            );
        }
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.metadata.insert(
            "content-type".to_string(),
            Value::String(content_type.into()),
        );
        self
    }

    /// Check the name, stamp the current version and validate.
    pub fn build(mut self, currencies: &CurrencySet) -> Result<Claim, CoreError> {
        Validator::validate_name(&self.name)?;

        self.metadata.insert(
            "ver".to_string(),
            Value::String(CURRENT_METADATA_VERSION.to_string()),
        );
        let metadata = Metadata::new(&self.metadata, currencies)?;

        tracing::info!(
            name = %self.name,
            version = metadata.meta_version(),
            "prepared claim"
        );

        Ok(Claim {
            name: self.name,
            metadata,
        })
    }
}

/// A claim name with validated metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claim {
    pub name: String,
    pub metadata: Metadata,
}
