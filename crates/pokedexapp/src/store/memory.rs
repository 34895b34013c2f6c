use super::mem_backend::MemBackend;
use super::record_store::BackedStore;

pub type InMemoryStore = BackedStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        BackedStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::NewRecord;
    use crate::store::RecordStore;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` records named "Record N", all of the given type.
        pub fn with_records(self, count: usize, tag: &str) -> Self {
            for i in 0..count {
                let candidate = NewRecord::new(
                    format!("Record {}", i + 1),
                    vec![tag.to_string()],
                    format!("https://sprites.test/{}.png", i + 1),
                );
                self.store.insert(candidate).unwrap();
            }
            self
        }

        pub fn with_record(self, name: &str, tags: &[&str]) -> Self {
            let candidate = NewRecord::new(
                name,
                tags.iter().map(|t| t.to_string()).collect(),
                format!("https://sprites.test/{}.png", name.to_lowercase()),
            );
            self.store.insert(candidate).unwrap();
            self
        }
    }
}
