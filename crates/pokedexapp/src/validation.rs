//! Creation rules for new records.
//!
//! Valid candidates:
//! - Have a name that is not empty after trimming
//! - Have at least one type that is not empty after trimming
//! - Have a sprite that starts with `http` (so `https` too)
//!
//! Every rule is checked; a candidate that breaks several gets one
//! [`Violation`] per rule, in the order above.
//!
//! The sprite rule looks at the prefix only. `httpfoo` passes, `ftp://x`
//! does not. Renderers that need a real URL parse it themselves.

use crate::model::{NewRecord, ValidationFailure, Violation};
use crate::query::split_types;

/// One creation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRule {
    /// Name is empty or whitespace only
    Name,
    /// No non-empty type given
    Types,
    /// Sprite does not start with "http"
    Sprite,
}

impl RecordRule {
    pub const ALL: [RecordRule; 3] = [RecordRule::Name, RecordRule::Types, RecordRule::Sprite];

    pub fn code(&self) -> &'static str {
        match self {
            RecordRule::Name => "invalid_name",
            RecordRule::Types => "invalid_types",
            RecordRule::Sprite => "invalid_sprite",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RecordRule::Name => "Name cannot be empty or contain only spaces",
            RecordRule::Types => "At least one type must be specified",
            RecordRule::Sprite => "Sprite must be a string starting with \"http\" or \"https\"",
        }
    }

    pub fn is_satisfied_by(&self, candidate: &NewRecord) -> bool {
        match self {
            RecordRule::Name => !candidate.name.trim().is_empty(),
            RecordRule::Types => !normalize_tags(&candidate.tags).is_empty(),
            RecordRule::Sprite => candidate.image_ref.starts_with("http"),
        }
    }

    pub fn violation(&self) -> Violation {
        Violation::new(self.code(), self.message())
    }
}

/// Trims every type and drops the empty ones.
///
/// Entries are trimmed individually and never split further, since clients
/// send types already split. Callers holding a raw comma-separated string
/// use [`split_types`] first.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Checks a candidate against every rule.
///
/// # Examples
/// ```
/// use pokedexapp::model::NewRecord;
/// use pokedexapp::validation::validate;
///
/// let ok = NewRecord::new("Pikachu", vec!["electric".into()], "https://x/y.png");
/// assert!(validate(&ok).is_ok());
///
/// let bad = NewRecord::new(" ", vec![], "ftp://a");
/// assert_eq!(validate(&bad).unwrap_err().violations.len(), 3);
/// ```
pub fn validate(candidate: &NewRecord) -> Result<(), ValidationFailure> {
    let violations: Vec<Violation> = RecordRule::ALL
        .iter()
        .filter(|rule| !rule.is_satisfied_by(candidate))
        .map(RecordRule::violation)
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure { violations })
    }
}

/// Builds a candidate from the comma-separated form clients collect.
pub fn candidate_from_form(name: &str, raw_types: &str, sprite: &str) -> NewRecord {
    NewRecord::new(name, split_types(raw_types), sprite)
}
