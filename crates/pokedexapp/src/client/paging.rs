//! Paging state machine for a client browsing a filtered listing.
//!
//! ## State
//!
//! `{page, page_size, filter_text}`, starting at `{0, 5, ""}`. Pages are
//! zero-based here and one-based on the wire.
//!
//! ## Transitions
//!
//! | Transition | Effect | Refetch |
//! |------------|--------|---------|
//! | `change_page(n)` | `page = n` | yes |
//! | `change_page_size(s)` | `page_size = s`, `page = 0` | yes |
//! | `change_filter(text)` | `filter_text = text`, `page = 0` | yes |
//! | `external_invalidate()` | none | yes |
//!
//! Changing the page size or the filter moves back to the first page, since
//! the old offset means nothing under the new density or result set.
//!
//! ## Tickets and Stale Responses
//!
//! Every refetch hands a [`FetchTicket`] to the controller's
//! [`FetchDispatch`]. Whoever runs the fetch reports back through
//! [`PagingController::apply`] with the same ticket. Only the most recently
//! issued ticket is applied; responses to any earlier ticket are stale and
//! dropped, even though their request was allowed to complete. A failed
//! fetch keeps the previous page visible and records the error.

use super::InvalidationListener;
use crate::model::PageResponse;
use crate::query::PageQuery;
use std::fmt::Display;
use tracing::debug;

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingState {
    /// Zero-based page index.
    pub page: usize,
    pub page_size: usize,
    pub filter_text: String,
}

impl Default for PagingState {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            filter_text: String::new(),
        }
    }
}

impl PagingState {
    /// The wire parameters for this state: one-based page, filter omitted
    /// when blank.
    pub fn to_query(&self) -> PageQuery {
        let page = i64::try_from(self.page)
            .unwrap_or(i64::MAX)
            .saturating_add(1);
        let page_size = i64::try_from(self.page_size).unwrap_or(i64::MAX);
        let query = if self.filter_text.trim().is_empty() {
            None
        } else {
            Some(self.filter_text.clone())
        };
        PageQuery::new(page, page_size, query)
    }
}

/// One issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: PageQuery,
}

/// Where the controller sends the fetches it wants performed.
pub trait FetchDispatch {
    fn dispatch(&mut self, ticket: FetchTicket);
}

impl FetchDispatch for Vec<FetchTicket> {
    fn dispatch(&mut self, ticket: FetchTicket) {
        self.push(ticket);
    }
}

impl FetchDispatch for std::sync::mpsc::Sender<FetchTicket> {
    fn dispatch(&mut self, ticket: FetchTicket) {
        if self.send(ticket).is_err() {
            debug!("fetch receiver dropped, ticket discarded");
        }
    }
}

/// Outcome of [`PagingController::next_page`] and
/// [`PagingController::prev_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    /// Already on the first or last page.
    AtEdge,
    /// No current listing to move within yet.
    Pending,
}

/// What [`PagingController::apply`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The response is now the visible page.
    Rendered,
    /// The latest fetch failed; the previous page stays visible.
    Failed,
    /// A newer fetch was issued since; the response was ignored.
    Stale,
}

pub struct PagingController<D: FetchDispatch> {
    state: PagingState,
    dispatch: D,
    latest: u64,
    loading: bool,
    view: Option<PageResponse>,
    view_query: Option<PageQuery>,
    last_error: Option<String>,
}

impl<D: FetchDispatch> PagingController<D> {
    pub fn new(dispatch: D) -> Self {
        Self {
            state: PagingState::default(),
            dispatch,
            latest: 0,
            loading: false,
            view: None,
            view_query: None,
            last_error: None,
        }
    }

    /// Starts from a page size other than the default. Does not fetch.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.state.page_size = page_size.max(1);
        self
    }

    pub fn state(&self) -> &PagingState {
        &self.state
    }

    /// The page currently shown, if any fetch has succeeded yet.
    pub fn view(&self) -> Option<&PageResponse> {
        self.view.as_ref()
    }

    /// The parameters the visible page was fetched with.
    pub fn view_query(&self) -> Option<&PageQuery> {
        self.view_query.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatch
    }

    /// Issues the initial fetch.
    pub fn start(&mut self) {
        self.refetch();
    }

    pub fn change_page(&mut self, page: usize) {
        self.state.page = page;
        self.refetch();
    }

    pub fn change_page_size(&mut self, page_size: usize) {
        self.state.page_size = page_size.max(1);
        self.state.page = 0;
        self.refetch();
    }

    pub fn change_filter(&mut self, filter_text: impl Into<String>) {
        self.state.filter_text = filter_text.into();
        self.state.page = 0;
        self.refetch();
    }

    /// Refetches the current state, keeping the page. Used when the record set
    /// changed underneath the view.
    pub fn external_invalidate(&mut self) {
        self.refetch();
    }

    /// Moves one page forward if the visible listing has one.
    ///
    /// Refuses with [`Step::Pending`] while the latest fetch is outstanding or
    /// the visible page answers an earlier request, since there is no listing
    /// to judge the bound against yet.
    pub fn next_page(&mut self) -> Step {
        if !self.is_current() {
            return Step::Pending;
        }
        if !self.has_next() {
            return Step::AtEdge;
        }
        self.change_page(self.state.page.saturating_add(1));
        Step::Moved
    }

    /// Moves one page back unless already on the first.
    pub fn prev_page(&mut self) -> Step {
        if !self.has_prev() {
            return Step::AtEdge;
        }
        self.change_page(self.state.page - 1);
        Step::Moved
    }

    /// Whether the visible page answers the current state and nothing newer
    /// is in flight.
    pub fn is_current(&self) -> bool {
        !self.loading && self.view_query.as_ref() == Some(&self.state.to_query())
    }

    /// Feeds the result of a fetch back in.
    pub fn apply<E: Display>(
        &mut self,
        ticket: &FetchTicket,
        result: Result<PageResponse, E>,
    ) -> Applied {
        if ticket.generation != self.latest {
            debug!(
                generation = ticket.generation,
                latest = self.latest,
                "discarding stale page"
            );
            return Applied::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.view = Some(page);
                self.view_query = Some(ticket.query.clone());
                self.last_error = None;
                Applied::Rendered
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Applied::Failed
            }
        }
    }

    /// Number of pages in the visible listing, at the current page size.
    pub fn page_count(&self) -> usize {
        match &self.view {
            Some(view) => view.total.div_ceil(self.state.page_size),
            None => 0,
        }
    }

    /// Only meaningful for a current view; see [`Self::is_current`].
    pub fn has_next(&self) -> bool {
        self.is_current() && self.state.page.saturating_add(1) < self.page_count()
    }

    pub fn has_prev(&self) -> bool {
        self.state.page > 0
    }

    fn refetch(&mut self) {
        self.latest += 1;
        self.loading = true;
        let ticket = FetchTicket {
            generation: self.latest,
            query: self.state.to_query(),
        };
        debug!(
            generation = ticket.generation,
            page = ticket.query.page,
            page_size = ticket.query.page_size,
            "issuing fetch"
        );
        self.dispatch.dispatch(ticket);
    }
}

impl<D: FetchDispatch> InvalidationListener for PagingController<D> {
    fn on_invalidate(&mut self) {
        self.external_invalidate();
    }
}
