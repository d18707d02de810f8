//! Schema revisions and the shared revision matcher.
//!
//! A [`RevisionTable`] is an ordered list of [`Revision`] descriptors. Matching
//! walks the table in declared order and claims the input for the first
//! revision that consumes every field. Each revision is tried against its own
//! copy of the input, so a failed trial never leaks into the next one.

use std::convert::Infallible;
use std::sync::LazyLock;

use serde_json::{Map, Value};

pub const METADATA_V001: &str = "0.0.1";
pub const METADATA_V002: &str = "0.0.2";
pub const CURRENT_METADATA_VERSION: &str = METADATA_V002;

pub const FEE_V001: &str = "0.0.1";
pub const CURRENT_FEE_VERSION: &str = FEE_V001;

/// Metadata revisions, oldest first.
pub static METADATA_REVISIONS: LazyLock<RevisionTable> = LazyLock::new(|| {
    let v001 = Revision::new(
        METADATA_V001,
        &[
            "title",
            "description",
            "author",
            "language",
            "license",
            "content-type",
            "sources",
        ],
        &["thumbnail", "preview", "fee", "contact", "pubkey"],
    );
    let v002 = v001.extending(METADATA_V002, &["nsfw", "ver"], &["license_url"]);
    RevisionTable::new(vec![v001, v002])
});

/// Fee revisions, oldest first.
pub static FEE_REVISIONS: LazyLock<RevisionTable> = LazyLock::new(|| {
    RevisionTable::new(vec![Revision::new(FEE_V001, &["amount", "address"], &[])])
});

/// A named schema version: the fields it requires and the fields it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub id: &'static str,
    pub required: Vec<&'static str>,
    pub optional: Vec<&'static str>,
}

impl Revision {
    pub fn new(id: &'static str, required: &[&'static str], optional: &[&'static str]) -> Self {
        Self {
            id,
            required: required.to_vec(),
            optional: optional.to_vec(),
        }
    }

    /// Build a revision that keeps every field of `self` and adds more.
    pub fn extending(
        &self,
        id: &'static str,
        required: &[&'static str],
        optional: &[&'static str],
    ) -> Self {
        let mut next = self.clone();
        next.id = id;
        next.required.extend_from_slice(required);
        next.optional.extend_from_slice(optional);
        next
    }

    /// Whether this revision refuses records without `field`.
    pub fn requires(&self, field: &str) -> bool {
        self.required.iter().any(|f| *f == field)
    }
}

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq)]
pub struct Matched {
    pub revision: &'static str,
    pub fields: Map<String, Value>,
}

/// Why no revision claimed the input.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchError<E> {
    /// The per-field hook rejected a value.
    Claim(E),
    /// Some revision had all of its required fields, but fields were left
    /// over. Carries the leftovers of the last such revision.
    Leftover(Vec<String>),
    /// No revision had all of its required fields.
    Unsatisfied {
        missing: Vec<String>,
        unconsumed: Vec<String>,
    },
}

/// An ordered, append-only list of revisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionTable {
    revisions: Vec<Revision>,
}

impl RevisionTable {
    pub fn new(revisions: Vec<Revision>) -> Self {
        Self { revisions }
    }

    /// The oldest revision.
    pub fn baseline(&self) -> Option<&Revision> {
        self.revisions.first()
    }

    pub fn get(&self, id: &str) -> Option<&Revision> {
        self.revisions.iter().find(|r| r.id == id)
    }

    pub fn is_baseline(&self, id: &str) -> bool {
        self.baseline().is_some_and(|r| r.id == id)
    }

    /// Match `remaining` against the table, moving values unchanged.
    pub fn match_fields(
        &self,
        remaining: &Map<String, Value>,
    ) -> Result<Matched, MatchError<Infallible>> {
        self.match_fields_with(remaining, |_, value| Ok(value))
    }

    /// Match `remaining` against the table.
    ///
    /// `claim` is called for every field a trial pulls out and may transform
    /// or reject its value. A rejection aborts matching immediately.
    pub fn match_fields_with<F, E>(
        &self,
        remaining: &Map<String, Value>,
        mut claim: F,
    ) -> Result<Matched, MatchError<E>>
    where
        F: FnMut(&str, Value) -> Result<Value, E>,
    {
        let mut missing = Vec::new();
        let mut leftover = None;

        for revision in &self.revisions {
            let mut trial = remaining.clone();

            let absent: Vec<String> = revision
                .required
                .iter()
                .filter(|field| !trial.contains_key(**field))
                .map(|field| field.to_string())
                .collect();
            if !absent.is_empty() {
                tracing::trace!(
                    revision = revision.id,
                    missing = ?absent,
                    "revision not satisfied"
                );
                missing = absent;
                continue;
            }

            let mut fields = Map::new();
            for field in revision.required.iter().chain(revision.optional.iter()) {
                if let Some(value) = trial.remove(*field) {
                    let value = claim(*field, value).map_err(MatchError::Claim)?;
                    fields.insert(field.to_string(), value);
                }
            }

            if trial.is_empty() {
                tracing::debug!(revision = revision.id, fields = fields.len(), "revision matched");
                return Ok(Matched {
                    revision: revision.id,
                    fields,
                });
            }

            tracing::trace!(
                revision = revision.id,
                leftover = trial.len(),
                "revision left fields over"
            );
            leftover = Some(trial.keys().cloned().collect());
        }

        match leftover {
            Some(fields) => Err(MatchError::Leftover(fields)),
            None => Err(MatchError::Unsatisfied {
                missing,
                unconsumed: remaining.keys().cloned().collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn two_step_table() -> RevisionTable {
        let first = Revision::new("1", &["a"], &["b"]);
        let second = first.extending("2", &["c"], &[]);
        RevisionTable::new(vec![first, second])
    }

    #[test]
    fn test_extending_keeps_earlier_fields() {
        let first = Revision::new("1", &["a"], &["b"]);
        let second = first.extending("2", &["c"], &["d"]);

        assert_eq!(second.id, "2");
        assert_eq!(second.required, vec!["a", "c"]);
        assert_eq!(second.optional, vec!["b", "d"]);
        assert!(second.requires("a"));
        assert!(second.requires("c"));
        assert!(!second.requires("b"));
    }

    #[test]
    fn test_match_first_revision() {
        let table = two_step_table();
        let matched = table.match_fields(&object(json!({"a": 1, "b": 2}))).unwrap();

        assert_eq!(matched.revision, "1");
        assert_eq!(matched.fields.len(), 2);
    }

    #[test]
    fn test_match_falls_through_to_later_revision() {
        let table = two_step_table();
        let matched = table.match_fields(&object(json!({"a": 1, "c": 3}))).unwrap();

        assert_eq!(matched.revision, "2");
        assert_eq!(matched.fields, object(json!({"a": 1, "c": 3})));
    }

    #[test]
    fn test_earliest_revision_wins_tie() {
        let first = Revision::new("old", &["a"], &[]);
        let second = Revision::new("new", &["a"], &[]);
        let table = RevisionTable::new(vec![first, second]);

        let matched = table.match_fields(&object(json!({"a": 1}))).unwrap();
        assert_eq!(matched.revision, "old");
    }

    #[test]
    fn test_leftover_fields_reported() {
        let table = two_step_table();
        let err = table
            .match_fields(&object(json!({"a": 1, "c": 3, "z": 0})))
            .unwrap_err();

        assert_eq!(err, MatchError::Leftover(vec!["z".to_string()]));
    }

    #[test]
    fn test_unsatisfied_reports_missing_and_unconsumed() {
        let table = two_step_table();
        let err = table.match_fields(&object(json!({"b": 2}))).unwrap_err();

        assert_eq!(
            err,
            MatchError::Unsatisfied {
                missing: vec!["a".to_string(), "c".to_string()],
                unconsumed: vec!["b".to_string()],
            }
        );
    }

    #[test]
    fn test_input_untouched_by_failed_trials() {
        let table = two_step_table();
        let input = object(json!({"a": 1, "c": 3}));
        let before = input.clone();

        table.match_fields(&input).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_claim_hook_transforms_values() {
        let table = two_step_table();
        let matched = table
            .match_fields_with(&object(json!({"a": 1})), |_, value| {
                Ok::<_, ()>(json!(value.as_i64().unwrap_or(0) * 10))
            })
            .unwrap();

        assert_eq!(matched.fields["a"], json!(10));
    }

    #[test]
    fn test_claim_hook_rejection_aborts() {
        let table = two_step_table();
        let err = table
            .match_fields_with(&object(json!({"a": 1, "c": 3})), |field, value| {
                if field == "a" {
                    Err("bad a")
                } else {
                    Ok(value)
                }
            })
            .unwrap_err();

        assert_eq!(err, MatchError::Claim("bad a"));
    }

    #[test]
    fn test_builtin_tables() {
        assert!(METADATA_REVISIONS.is_baseline(METADATA_V001));
        let current = METADATA_REVISIONS.get(CURRENT_METADATA_VERSION).unwrap();
        assert_eq!(current.id, METADATA_V002);
        assert!(current.requires("sources"));
        assert!(current.requires("ver"));
        assert!(!current.requires("fee"));
        assert!(current.optional.contains(&"fee"));

        assert!(FEE_REVISIONS.is_baseline(CURRENT_FEE_VERSION));
    }
}
