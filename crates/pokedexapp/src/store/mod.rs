//! # Storage Layer
//!
//! The [`RecordStore`] trait is the only thing the listing and creation
//! commands know about storage. A store answers three questions about its
//! record set: how many records match a filter, which records make up a slice
//! of the matches, and where a new record goes.
//!
//! ## Ordering
//!
//! Stores keep records in insertion order. Listing slices that order, so
//! walking pages 1..k with a fixed page size visits every match exactly once.
//!
//! ## Consistency
//!
//! `count` and `list` are each consistent on their own, but nothing ties two
//! calls together: an insert landing between them can leave `total` one ahead
//! of the slice. Stores that can read both under one snapshot override
//! [`RecordStore::count_and_list`]; the listing command prefers it when it is
//! available and falls back to the two-call sequence otherwise.
//!
//! ## Identifiers
//!
//! Ids are assigned by the store inside its write critical section, as one
//! more than the highest id it holds. For an insert-only store that equals the
//! record count plus one, and two concurrent inserts can never share an id.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: records live for the life of the process.
//! - [`fs::FileStore`]: records persisted to a JSON file, rewritten atomically
//!   on every insert.
//!
//! Both are a [`record_store::BackedStore`] over a [`backend::StorageBackend`],
//! which handles only raw persistence.

use crate::error::Result;
use crate::model::{NewRecord, PageResponse, Record};
use crate::query::Filter;
use std::sync::Arc;

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod record_store;

/// Abstract interface over a set of records.
pub trait RecordStore: Send + Sync {
    /// Number of records matching the filter.
    fn count(&self, filter: &Filter) -> Result<usize>;

    /// Up to `limit` matching records, skipping the first `offset` matches.
    fn list(&self, filter: &Filter, offset: usize, limit: usize) -> Result<Vec<Record>>;

    /// Store a new record, assigning its id.
    fn insert(&self, candidate: NewRecord) -> Result<Record>;

    /// Count and slice under a single snapshot.
    ///
    /// Returns `Ok(None)` when the store cannot do both atomically.
    fn count_and_list(
        &self,
        _filter: &Filter,
        _offset: usize,
        _limit: usize,
    ) -> Result<Option<PageResponse>> {
        Ok(None)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn count(&self, filter: &Filter) -> Result<usize> {
        (**self).count(filter)
    }

    fn list(&self, filter: &Filter, offset: usize, limit: usize) -> Result<Vec<Record>> {
        (**self).list(filter, offset, limit)
    }

    fn insert(&self, candidate: NewRecord) -> Result<Record> {
        (**self).insert(candidate)
    }

    fn count_and_list(
        &self,
        filter: &Filter,
        offset: usize,
        limit: usize,
    ) -> Result<Option<PageResponse>> {
        (**self).count_and_list(filter, offset, limit)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    fn count(&self, filter: &Filter) -> Result<usize> {
        (**self).count(filter)
    }

    fn list(&self, filter: &Filter, offset: usize, limit: usize) -> Result<Vec<Record>> {
        (**self).list(filter, offset, limit)
    }

    fn insert(&self, candidate: NewRecord) -> Result<Record> {
        (**self).insert(candidate)
    }

    fn count_and_list(
        &self,
        filter: &Filter,
        offset: usize,
        limit: usize,
    ) -> Result<Option<PageResponse>> {
        (**self).count_and_list(filter, offset, limit)
    }
}
