use crate::error::Result;
use crate::model::{CreateResult, NewRecord};
use crate::store::RecordStore;
use crate::validation::{normalize_tags, validate};
use tracing::{info, warn};

/// Validates the candidate and, when every rule passes, stores it.
///
/// Rejected candidates are returned as `Ok(Err(ValidationFailure))` carrying
/// every violated rule; only store failures surface as `Err`. Stored types are
/// trimmed with empty entries dropped. The name and sprite are kept as given.
pub fn run<S: RecordStore + ?Sized>(store: &S, candidate: NewRecord) -> Result<CreateResult> {
    if let Err(failure) = validate(&candidate) {
        warn!(
            violations = failure.violations.len(),
            reason = %failure,
            "rejected record"
        );
        return Ok(Err(failure));
    }

    let tags = normalize_tags(&candidate.tags);
    let record = store.insert(NewRecord { tags, ..candidate })?;
    info!(id = record.id, name = %record.name, "record created");
    Ok(Ok(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PokedexError;
    use crate::query::Filter;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::validation::RecordRule;

    fn candidate(name: &str, tags: &[&str], sprite: &str) -> NewRecord {
        NewRecord::new(name, tags.iter().map(|t| t.to_string()).collect(), sprite)
    }

    #[test]
    fn test_create_returns_stored_record() {
        let fixture = StoreFixture::new().with_records(4, "normal");
        let before = fixture.store.count(&Filter::unconstrained()).unwrap();

        let record = run(
            &fixture.store,
            candidate("Pikachu", &["electric"], "https://x/y.png"),
        )
        .unwrap()
        .unwrap();

        assert_eq!(record.id, before as u64 + 1);
        assert_eq!(record.name, "Pikachu");
        assert_eq!(record.tags, vec!["electric"]);
        assert_eq!(record.image_ref, "https://x/y.png");
        assert_eq!(
            fixture.store.count(&Filter::unconstrained()).unwrap(),
            before + 1
        );
    }

    #[test]
    fn test_create_normalizes_types() {
        let store = InMemoryStore::new();
        let record = run(&store, candidate("Zubat", &[" poison ", "", "flying"], "http://z"))
            .unwrap()
            .unwrap();
        assert_eq!(record.tags, vec!["poison", "flying"]);
    }

    #[test]
    fn test_invalid_candidate_is_not_stored() {
        let store = InMemoryStore::new();
        let failure = run(&store, candidate("", &["x"], "https://a"))
            .unwrap()
            .unwrap_err();
        assert_eq!(failure.violations, vec![RecordRule::Name.violation()]);
        assert_eq!(store.count(&Filter::unconstrained()).unwrap(), 0);
    }

    #[test]
    fn test_all_violations_reported() {
        let store = InMemoryStore::new();
        let failure = run(&store, candidate(" ", &[], "ftp://a"))
            .unwrap()
            .unwrap_err();
        let codes: Vec<&str> = failure.violations.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, vec!["invalid_name", "invalid_types", "invalid_sprite"]);
    }

    #[test]
    fn test_store_failure_propagates() {
        let store = InMemoryStore::new();
        store.backend().set_simulate_write_error(true);
        let result = run(&store, candidate("Mew", &["psychic"], "https://m"));
        assert!(matches!(result, Err(PokedexError::Store(_))));
    }
}
