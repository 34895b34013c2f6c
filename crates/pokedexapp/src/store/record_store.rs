use super::backend::StorageBackend;
use super::RecordStore;
use crate::error::{PokedexError, Result};
use crate::model::{NewRecord, PageResponse, Record};
use crate::query::Filter;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// A [`RecordStore`] that keeps the record set in memory and writes it
/// through to a [`StorageBackend`] on every insert.
pub struct BackedStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    records: RwLock<Vec<Record>>,
}

impl<B: StorageBackend> BackedStore<B> {
    /// A store that starts empty, without reading the backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Open a store over the backend, loading whatever it already holds.
    pub fn open(backend: B) -> Result<Self> {
        let records = backend.load_records()?;
        debug!(
            location = %backend.location(),
            records = records.len(),
            "opened record store"
        );
        Ok(Self {
            backend,
            records: RwLock::new(records),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Record>>> {
        self.records
            .read()
            .map_err(|_| PokedexError::Store("record lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Record>>> {
        self.records
            .write()
            .map_err(|_| PokedexError::Store("record lock poisoned".to_string()))
    }
}

fn count_matching(records: &[Record], filter: &Filter) -> usize {
    if filter.is_empty() {
        return records.len();
    }
    records.iter().filter(|r| filter.matches(r)).count()
}

fn slice_matching(records: &[Record], filter: &Filter, offset: usize, limit: usize) -> Vec<Record> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .skip(offset)
        .take(limit)
        .cloned()
        .collect()
}

impl<B: StorageBackend> RecordStore for BackedStore<B> {
    fn count(&self, filter: &Filter) -> Result<usize> {
        let records = self.read()?;
        Ok(count_matching(&records, filter))
    }

    fn list(&self, filter: &Filter, offset: usize, limit: usize) -> Result<Vec<Record>> {
        let records = self.read()?;
        Ok(slice_matching(&records, filter, offset, limit))
    }

    fn insert(&self, candidate: NewRecord) -> Result<Record> {
        let mut records = self.write()?;
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = Record::from_candidate(id, candidate);
        records.push(record.clone());

        if let Err(e) = self.backend.save_records(&records) {
            records.pop();
            return Err(e);
        }

        debug!(id, location = %self.backend.location(), "inserted record");
        Ok(record)
    }

    fn count_and_list(
        &self,
        filter: &Filter,
        offset: usize,
        limit: usize,
    ) -> Result<Option<PageResponse>> {
        let records = self.read()?;
        let total = count_matching(&records, filter);
        let page = if offset >= total {
            Vec::new()
        } else {
            slice_matching(&records, filter, offset, limit)
        };
        Ok(Some(PageResponse::new(page, total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::build;
    use crate::store::mem_backend::MemBackend;

    fn candidate(name: &str, tags: &[&str]) -> NewRecord {
        NewRecord::new(
            name,
            tags.iter().map(|t| t.to_string()).collect(),
            "https://img",
        )
    }

    #[test]
    fn test_open_loads_existing_records() {
        let backend = MemBackend::new();
        backend
            .save_records(&[Record::from_candidate(4, candidate("Charmander", &["fire"]))])
            .unwrap();

        let store = BackedStore::open(backend).unwrap();
        assert_eq!(store.count(&Filter::unconstrained()).unwrap(), 1);
    }

    #[test]
    fn test_insert_assigns_next_id() {
        let store = BackedStore::open(MemBackend::new()).unwrap();
        let first = store.insert(candidate("Bulbasaur", &["grass"])).unwrap();
        let second = store.insert(candidate("Ivysaur", &["grass"])).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_insert_continues_after_highest_loaded_id() {
        let backend = MemBackend::new();
        backend
            .save_records(&[Record::from_candidate(10, candidate("Caterpie", &["bug"]))])
            .unwrap();
        let store = BackedStore::open(backend).unwrap();
        let record = store.insert(candidate("Metapod", &["bug"])).unwrap();
        assert_eq!(record.id, 11);
    }

    #[test]
    fn test_insert_writes_through_to_backend() {
        let store = BackedStore::open(MemBackend::new()).unwrap();
        store.insert(candidate("Pidgey", &["normal", "flying"])).unwrap();
        let saved = store.backend().load_records().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "Pidgey");
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let store = BackedStore::open(MemBackend::new()).unwrap();
        store.backend().set_simulate_write_error(true);

        let result = store.insert(candidate("Rattata", &["normal"]));
        assert!(matches!(result, Err(PokedexError::Store(_))));
        assert_eq!(store.count(&Filter::unconstrained()).unwrap(), 0);

        store.backend().set_simulate_write_error(false);
        let record = store.insert(candidate("Rattata", &["normal"])).unwrap();
        assert_eq!(record.id, 1);
    }

    #[test]
    fn test_list_filters_then_slices_in_insertion_order() {
        let store = BackedStore::open(MemBackend::new()).unwrap();
        store.insert(candidate("A", &["fire"])).unwrap();
        store.insert(candidate("B", &["grass"])).unwrap();
        store.insert(candidate("C", &["fire"])).unwrap();
        store.insert(candidate("D", &["water"])).unwrap();
        store.insert(candidate("E", &["fire"])).unwrap();

        let filter = build(Some("fire"));
        assert_eq!(store.count(&filter).unwrap(), 3);

        let names: Vec<String> = store
            .list(&filter, 1, 5)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["C", "E"]);
    }

    #[test]
    fn test_count_and_list_is_consistent() {
        let store = BackedStore::open(MemBackend::new()).unwrap();
        for name in ["A", "B", "C"] {
            store.insert(candidate(name, &["fire"])).unwrap();
        }

        let page = store
            .count_and_list(&Filter::unconstrained(), 2, 5)
            .unwrap()
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.records.len(), 1);

        let past_end = store
            .count_and_list(&Filter::unconstrained(), 3, 5)
            .unwrap()
            .unwrap();
        assert_eq!(past_end, PageResponse::empty(3));
    }
}
