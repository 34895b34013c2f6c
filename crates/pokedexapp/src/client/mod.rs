//! # Client Side of the Listing Protocol
//!
//! A client browsing records keeps three pieces of state (page, page size,
//! filter) and refetches whenever one changes. [`paging::PagingController`] is
//! that state machine, written without any transport so it can be driven by
//! an async runtime, a terminal loop or a test.
//!
//! ## Invalidation
//!
//! Whoever creates records does not reach into the list view to refresh it.
//! The view exposes an [`InvalidationListener`], the creator holds it, and
//! [`notify_created`] calls it after a successful creation.

use crate::model::CreateOutcome;

pub mod paging;

/// Something that must refetch when the record set changes underneath it.
pub trait InvalidationListener {
    fn on_invalidate(&mut self);
}

/// Invalidates the listener when, and only when, the outcome is a creation.
/// Returns whether it did.
pub fn notify_created<L: InvalidationListener + ?Sized>(
    outcome: &CreateOutcome,
    listener: &mut L,
) -> bool {
    if outcome.is_created() {
        listener.on_invalidate();
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewRecord, Record, Violation};

    #[derive(Default)]
    struct CountingListener {
        invalidations: usize,
    }

    impl InvalidationListener for CountingListener {
        fn on_invalidate(&mut self) {
            self.invalidations += 1;
        }
    }

    #[test]
    fn test_notify_only_on_created() {
        let mut listener = CountingListener::default();
        let record = Record::from_candidate(1, NewRecord::new("Mew", vec!["psychic".into()], "https://m"));

        assert!(notify_created(&CreateOutcome::Created(record), &mut listener));
        assert!(!notify_created(
            &CreateOutcome::Invalid(vec![Violation::new("invalid_name", "bad")]),
            &mut listener
        ));
        assert!(!notify_created(
            &CreateOutcome::Failed("connection refused".into()),
            &mut listener
        ));
        assert_eq!(listener.invalidations, 1);
    }
}
