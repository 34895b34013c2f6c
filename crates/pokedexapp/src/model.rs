//! # Data Model
//!
//! Records are the only persisted entity. Everything else here is a transient
//! value passed between the client, the API and the store.
//!
//! ## Wire Names
//!
//! The Rust field names describe what a field is (`tags`, `image_ref`); the
//! serialized names are the ones the network contract fixes (`types`,
//! `sprite`):
//!
//! ```json
//! { "id": 25, "name": "Pikachu", "types": ["electric"], "sprite": "https://..." }
//! ```
//!
//! A page of records serializes as `{ "data": [...], "total": N }`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub name: String,
    #[serde(rename = "types")]
    pub tags: Vec<String>,
    #[serde(rename = "sprite")]
    pub image_ref: String,
}

impl Record {
    pub fn from_candidate(id: u64, candidate: NewRecord) -> Self {
        Self {
            id,
            name: candidate.name,
            tags: candidate.tags,
            image_ref: candidate.image_ref,
        }
    }
}

/// The fields of a record before the store assigns it an id.
///
/// Every field defaults to empty when missing from the payload so that an
/// incomplete submission is reported through validation, with all of its
/// problems at once, instead of failing deserialization on the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "types", default)]
    pub tags: Vec<String>,
    #[serde(rename = "sprite", default)]
    pub image_ref: String,
}

impl NewRecord {
    pub fn new(name: impl Into<String>, tags: Vec<String>, image_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags,
            image_ref: image_ref.into(),
        }
    }
}

/// One page of a listing plus the number of records matching the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(rename = "data")]
    pub records: Vec<Record>,
    pub total: usize,
}

impl PageResponse {
    pub fn new(records: Vec<Record>, total: usize) -> Self {
        Self { records, total }
    }

    /// A page past the end of the result set.
    pub fn empty(total: usize) -> Self {
        Self {
            records: Vec::new(),
            total,
        }
    }
}

/// A single violated creation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub code: String,
    pub message: String,
}

impl Violation {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Every rule a candidate record broke, in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.violations.iter().map(|v| v.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationFailure {}

/// Result of a creation that reached the store: the stored record, or the
/// reasons the candidate was rejected.
pub type CreateResult = std::result::Result<Record, ValidationFailure>;

/// What a client learns from a create call.
///
/// Transport problems and rejected input are distinct variants, so callers
/// never have to guess which one an error body represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Record),
    Invalid(Vec<Violation>),
    Failed(String),
}

impl CreateOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created(_))
    }
}

impl<E: fmt::Display> From<std::result::Result<CreateResult, E>> for CreateOutcome {
    fn from(result: std::result::Result<CreateResult, E>) -> Self {
        match result {
            Ok(Ok(record)) => CreateOutcome::Created(record),
            Ok(Err(failure)) => CreateOutcome::Invalid(failure.violations),
            Err(e) => CreateOutcome::Failed(e.to_string()),
        }
    }
}
