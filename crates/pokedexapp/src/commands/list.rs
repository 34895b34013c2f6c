use crate::error::Result;
use crate::model::PageResponse;
use crate::query::PageRequest;
use crate::store::RecordStore;
use tracing::debug;

/// Answers one page request.
///
/// `total` is the number of records matching the request's filter. A page
/// that starts at or past `total` (or before the first record) comes back
/// empty, never as an error. When the store can count and slice under one
/// snapshot it does; otherwise it is counted first and only listed when the
/// page is in range.
pub fn run<S: RecordStore + ?Sized>(store: &S, request: &PageRequest) -> Result<PageResponse> {
    let filter = request.filter();
    let offset = request.offset();
    let limit = request.limit();

    let Ok(offset) = usize::try_from(offset) else {
        let total = store.count(filter)?;
        debug!(page = request.page(), total, "page before first record");
        return Ok(PageResponse::empty(total));
    };

    if let Some(page) = store.count_and_list(filter, offset, limit)? {
        debug!(
            page = request.page(),
            page_size = request.page_size(),
            total = page.total,
            returned = page.records.len(),
            "listed page from snapshot"
        );
        return Ok(page);
    }

    let total = store.count(filter)?;
    if offset >= total {
        debug!(page = request.page(), total, "page past last record");
        return Ok(PageResponse::empty(total));
    }

    let records = store.list(filter, offset, limit)?;
    debug!(
        page = request.page(),
        page_size = request.page_size(),
        total,
        returned = records.len(),
        "listed page"
    );
    Ok(PageResponse::new(records, total))
}
