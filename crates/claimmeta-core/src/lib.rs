//! Claimmeta Core - Versioned metadata and fee validation.
//!
//! This crate validates the metadata records filed under claim names and the
//! fee records embedded in them. Records written under any historical schema
//! revision are accepted, checked strictly, and tagged with the revision that
//! matched. It performs no I/O; encodings plug in through [`MetadataCodec`].

pub mod codec;
pub mod currency;
pub mod error;
pub mod fee;
pub mod metadata;
pub mod publish;
pub mod revision;
pub mod validation;

// Re-exports for convenience
pub use codec::MetadataCodec;
pub use currency::{CurrencyKind, CurrencySet};
pub use error::{CoreError, FeeError, MetadataError, ValidationError};
pub use fee::Fee;
pub use metadata::{Metadata, SourceType};
pub use publish::{Claim, ClaimDraft};
pub use revision::{
    MatchError, Matched, Revision, RevisionTable, CURRENT_FEE_VERSION, CURRENT_METADATA_VERSION,
    FEE_REVISIONS, FEE_V001, METADATA_REVISIONS, METADATA_V001, METADATA_V002,
};
pub use validation::Validator;
