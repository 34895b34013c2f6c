//! # Query Builder
//!
//! Turns the raw strings a client sends into typed listing requests.
//!
//! ## Filters
//!
//! A filter is written as a comma-separated list of types: `"fire, water"`.
//! Segments are trimmed, empty segments are dropped and duplicates collapse.
//! An absent or blank filter is unconstrained.
//!
//! Matching is **any-of**: a record matches when at least one of its types is
//! among the filter's types. `"fire,water"` therefore matches a superset of
//! what `"fire"` matches.
//!
//! ## Pages
//!
//! Pages are one-based on the wire. [`PageRequest`] clamps the page size to at
//! least one and derives `offset = (page - 1) * page_size`. A page below one
//! produces a negative offset, which the listing answers with an empty page.

use crate::model::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of types a listing is narrowed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    required_tags: BTreeSet<String>,
}

impl Filter {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn from_tags<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            required_tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.required_tags.is_empty()
    }

    pub fn required_tags(&self) -> &BTreeSet<String> {
        &self.required_tags
    }

    /// True when the filter is unconstrained or shares at least one type with
    /// the record.
    pub fn matches(&self, record: &Record) -> bool {
        self.is_empty() || record.tags.iter().any(|t| self.required_tags.contains(t))
    }
}

/// Builds a filter from the raw query string.
pub fn build(raw_filter: Option<&str>) -> Filter {
    match raw_filter {
        Some(raw) if !raw.trim().is_empty() => Filter::from_tags(split_types(raw)),
        _ => Filter::unconstrained(),
    }
}

/// Splits a comma-separated types string, trimming segments and dropping empty
/// ones. Order and duplicates are kept.
///
/// ```
/// use pokedexapp::query::split_types;
///
/// assert_eq!(split_types(" fire, ,flying "), vec!["fire", "flying"]);
/// assert!(split_types(" , ").is_empty());
/// ```
pub fn split_types(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A validated request for one page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
    filter: Filter,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64, filter: Filter) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
            filter,
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Number of matching records before this page. Negative for pages
    /// below one.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> usize {
        usize::try_from(self.page_size).unwrap_or(usize::MAX)
    }
}

/// The listing parameters as they travel on the wire:
/// `?page=2&pageSize=10&query=fire,water`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: i64,
    pub page_size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl PageQuery {
    pub fn new(page: i64, page_size: i64, query: Option<String>) -> Self {
        Self {
            page,
            page_size,
            query,
        }
    }

    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size, build(self.query.as_deref()))
    }
}
