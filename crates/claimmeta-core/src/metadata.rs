use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::codec::MetadataCodec;
use crate::currency::CurrencySet;
use crate::error::{FeeError, MetadataError};
use crate::fee::Fee;
use crate::revision::{MatchError, METADATA_REVISIONS};
use crate::validation::Validator;

/// How a published item's content is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceType {
    /// Hash of the stream descriptor blob.
    LbrySdHash,
    Url,
    /// BitTorrent infohash.
    Btih,
}

impl SourceType {
    pub const ALL: [SourceType; 3] = [SourceType::LbrySdHash, SourceType::Url, SourceType::Btih];

    /// The tag used as a key in the `sources` mapping.
    pub fn tag(&self) -> &'static str {
        match self {
            SourceType::LbrySdHash => "lbry_sd_hash",
            SourceType::Url => "url",
            SourceType::Btih => "btih",
        }
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| format!("unknown source type: {}", s))
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Validated metadata for a published item.
///
/// Built once from a raw field mapping. The mapping is checked against the
/// metadata revisions in order and the first revision that consumes every
/// field is recorded as `meta_version`. An embedded `fee` is validated
/// separately and kept in typed form.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    meta_version: &'static str,
    fields: Map<String, Value>,
    fee: Option<Fee>,
}

impl Metadata {
    /// Validate metadata from an untyped value.
    pub fn from_value(raw: &Value, currencies: &CurrencySet) -> Result<Self, MetadataError> {
        match raw {
            Value::Object(map) => Self::new(map, currencies),
            _ => Err(MetadataError::NotAnObject),
        }
    }

    /// Validate metadata from a raw field mapping.
    pub fn new(raw: &Map<String, Value>, currencies: &CurrencySet) -> Result<Self, MetadataError> {
        Self::load(raw, currencies).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected metadata");
        })
    }

    /// Decode `encoded` with `codec`, then validate the result.
    pub fn decode<C: MetadataCodec>(
        codec: &C,
        encoded: &[u8],
        currencies: &CurrencySet,
    ) -> Result<Self, MetadataError> {
        let raw = codec
            .decode(encoded)
            .map_err(|e| MetadataError::Decode(e.to_string()))?;
        Self::new(&raw, currencies)
    }

    fn load(raw: &Map<String, Value>, currencies: &CurrencySet) -> Result<Self, MetadataError> {
        Validator::validate_sources(raw)?;

        let mut fee = None;
        let matched = METADATA_REVISIONS
            .match_fields_with(raw, |field, value| -> Result<Value, FeeError> {
                if field != "fee" {
                    return Ok(value);
                }
                let validated = Fee::from_value(&value, currencies)?;
                let normalized = validated.to_value();
                fee = Some(validated);
                Ok(normalized)
            })
            .map_err(|e| match e {
                MatchError::Claim(e) => MetadataError::InvalidFee(e),
                MatchError::Leftover(fields) => MetadataError::UnknownField(fields),
                MatchError::Unsatisfied {
                    missing,
                    unconsumed,
                } => MetadataError::SchemaMismatch {
                    missing,
                    unconsumed,
                },
            })?;

        Self::check_version(matched.revision, &matched.fields)?;

        let mut fields = matched.fields;
        let fee = match fields.remove("fee") {
            Some(_) => fee,
            None => None,
        };

        tracing::debug!(
            version = matched.revision,
            fields = fields.len(),
            has_fee = fee.is_some(),
            "metadata validated"
        );

        Ok(Self {
            meta_version: matched.revision,
            fields,
            fee,
        })
    }

    /// Revisions past the baseline that require `ver` must name themselves.
    fn check_version(
        revision: &'static str,
        fields: &Map<String, Value>,
    ) -> Result<(), MetadataError> {
        if METADATA_REVISIONS.is_baseline(revision) {
            return Ok(());
        }
        let requires_ver = METADATA_REVISIONS
            .get(revision)
            .is_some_and(|r| r.requires("ver"));
        if !requires_ver {
            return Ok(());
        }

        match fields.get("ver") {
            Some(Value::String(ver)) if ver == revision => Ok(()),
            Some(Value::String(ver)) => Err(MetadataError::VersionMismatch {
                expected: revision.to_string(),
                actual: ver.clone(),
            }),
            Some(other) => Err(MetadataError::VersionMismatch {
                expected: revision.to_string(),
                actual: other.to_string(),
            }),
            None => Err(MetadataError::VersionMismatch {
                expected: revision.to_string(),
                actual: "<missing>".to_string(),
            }),
        }
    }

    pub fn meta_version(&self) -> &'static str {
        self.meta_version
    }

    /// Validated fields, excluding `fee`.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fee(&self) -> Option<&Fee> {
        self.fee.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("content-type").and_then(Value::as_str)
    }

    /// Sources keyed by type, in tag order.
    pub fn sources(&self) -> Vec<(SourceType, &Value)> {
        self.get("sources")
            .and_then(Value::as_object)
            .map(|sources| {
                sources
                    .iter()
                    .filter_map(|(tag, value)| tag.parse::<SourceType>().ok().map(|t| (t, value)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The full validated mapping, with `fee` in raw form.
    pub fn to_value(&self) -> Value {
        let mut fields = self.fields.clone();
        if let Some(fee) = &self.fee {
            fields.insert("fee".to_string(), fee.to_value());
        }
        Value::Object(fields)
    }

    /// Encode the validated mapping with `codec`.
    pub fn encode<C: MetadataCodec>(&self, codec: &C) -> Result<Vec<u8>, MetadataError> {
        codec
            .encode(&self.to_value())
            .map_err(|e| MetadataError::Encode(e.to_string()))
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
