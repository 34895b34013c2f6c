//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for listing and creation, whichever transport is in front of it
//! (the HTTP server, or the CLI working on a local data file).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Normalizes inputs**: raw `page`, `pageSize` and `query` values become a
//!   [`PageRequest`]; a missing page size falls back to the configured default
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types**, never strings
//!
//! ## Generic Over RecordStore
//!
//! `PokedexApi<S: RecordStore>` is generic over the storage backend:
//! - Server and CLI: `PokedexApi<Box<dyn RecordStore>>`, chosen at startup
//! - Testing: `PokedexApi<InMemoryStore>`
//!
//! Every method takes `&self`; stores synchronize internally, so one API value
//! can be shared across request handlers behind an `Arc`.

use crate::commands;
use crate::error::Result;
use crate::model::{CreateResult, NewRecord, PageResponse};
use crate::query::{build, PageRequest};
use crate::store::RecordStore;

pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// The main API facade for pokedex operations.
pub struct PokedexApi<S: RecordStore> {
    store: S,
    default_page_size: i64,
}

impl<S: RecordStore> PokedexApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_default_page_size(mut self, page_size: i64) -> Self {
        self.default_page_size = page_size.max(1);
        self
    }

    pub fn default_page_size(&self) -> i64 {
        self.default_page_size
    }

    /// One page of records matching `query` (comma-separated types).
    pub fn list_page(
        &self,
        page: Option<i64>,
        page_size: Option<i64>,
        query: Option<&str>,
    ) -> Result<PageResponse> {
        let request = PageRequest::new(
            page.unwrap_or(1),
            page_size.unwrap_or(self.default_page_size),
            build(query),
        );
        commands::list::run(&self.store, &request)
    }

    pub fn create_record(&self, candidate: NewRecord) -> Result<CreateResult> {
        commands::create::run(&self.store, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_list_page_defaults() {
        let api = PokedexApi::new(StoreFixture::new().with_records(8, "normal").store);
        let page = api.list_page(None, None, None).unwrap();
        assert_eq!(page.records.len(), 5);
        assert_eq!(page.total, 8);
    }

    #[test]
    fn test_configured_default_page_size() {
        let api = PokedexApi::new(StoreFixture::new().with_records(8, "normal").store)
            .with_default_page_size(3);
        let page = api.list_page(Some(3), None, None).unwrap();
        assert_eq!(page.records.len(), 2);
    }

    #[test]
    fn test_default_page_size_floor() {
        let api = PokedexApi::new(InMemoryStore::new()).with_default_page_size(0);
        assert_eq!(api.default_page_size(), 1);
    }

    #[test]
    fn test_list_page_passes_query() {
        let api = PokedexApi::new(
            StoreFixture::new()
                .with_records(3, "normal")
                .with_record("Abra", &["psychic"])
                .store,
        );
        let page = api.list_page(Some(1), Some(10), Some(" psychic ,")).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.records[0].name, "Abra");
    }

    #[test]
    fn test_create_then_list() {
        let api = PokedexApi::new(StoreFixture::new().with_records(2, "normal").store);
        let before = api.list_page(Some(1), Some(5), None).unwrap().total;

        let record = api
            .create_record(NewRecord::new(
                "Pikachu",
                vec!["electric".into()],
                "https://x/y.png",
            ))
            .unwrap()
            .unwrap();
        assert_eq!(record.id, before as u64 + 1);

        let after = api.list_page(Some(1), Some(5), None).unwrap();
        assert_eq!(after.total, before + 1);
        assert_eq!(after.records.last(), Some(&record));
    }
}
