use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Fee error: {0}")]
    Fee(#[from] FeeError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid character {character:?} at position {position} in name {name:?}")]
    InvalidNameCharacter {
        name: String,
        character: char,
        position: usize,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum FeeError {
    #[error("Malformed fee: {0}")]
    Malformed(String),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Invalid fee amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid fee address: {0}")]
    InvalidAddress(String),

    #[error("No fee revision matches (missing: {missing:?}, unconsumed: {unconsumed:?})")]
    SchemaMismatch {
        missing: Vec<String>,
        unconsumed: Vec<String>,
    },

    #[error("Unknown fee fields: {0:?}")]
    UnknownField(Vec<String>),
}

#[derive(Error, Debug, PartialEq)]
pub enum MetadataError {
    #[error("Metadata must be a mapping")]
    NotAnObject,

    #[error("No sources given")]
    MissingSources,

    #[error("Sources must be a mapping of source type to value")]
    MalformedSources,

    #[error("Unknown source type: {0}")]
    UnknownSourceType(String),

    #[error("No metadata revision matches (missing: {missing:?}, unconsumed: {unconsumed:?})")]
    SchemaMismatch {
        missing: Vec<String>,
        unconsumed: Vec<String>,
    },

    #[error("Invalid fee: {0}")]
    InvalidFee(#[source] FeeError),

    #[error("Version mismatch: expected ver {expected}, found {actual}")]
    VersionMismatch { expected: String, actual: String },

    #[error("Unknown metadata fields: {0:?}")]
    UnknownField(Vec<String>),

    #[error("Failed to decode metadata: {0}")]
    Decode(String),

    #[error("Failed to encode metadata: {0}")]
    Encode(String),
}

impl From<FeeError> for MetadataError {
    fn from(e: FeeError) -> Self {
        MetadataError::InvalidFee(e)
    }
}
