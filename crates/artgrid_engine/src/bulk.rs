use std::pin::pin;

use artgrid_core::{BulkCursor, BulkReport, BulkStatus, PageNumber, PageSelections, RecordId};
use artgrid_logging::{grid_debug, grid_warn};
use futures_util::stream::{self, Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::{BulkRequest, EngineEvent, EventSink, FetchError, PageFetcher};

/// Ids taken from one page of a bulk walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkStep {
    pub page: PageNumber,
    pub ids: Vec<RecordId>,
    pub remaining: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalkError {
    #[error("page {page}: {error}")]
    Fetch { page: PageNumber, error: FetchError },
    #[error("cancelled")]
    Cancelled,
}

/// Sequential walk over pages 1, 2, ... yielding the ids taken from each.
///
/// Page K+1 is only requested after page K resolved. The stream ends after
/// the cursor is satisfied or out of pages, and after the first error.
/// `cancel` is checked before each page request.
pub fn bulk_steps<'a>(
    fetcher: &'a dyn PageFetcher,
    cursor: BulkCursor,
    cancel: CancellationToken,
) -> impl Stream<Item = Result<BulkStep, WalkError>> + 'a {
    stream::unfold(Some(cursor), move |state| {
        let cancel = cancel.clone();
        async move {
            let mut cursor = state?;
            let page = cursor.next_page()?;
            if cancel.is_cancelled() {
                return Some((Err(WalkError::Cancelled), None));
            }
            match fetcher.fetch_page(page).await {
                Ok(output) => {
                    let page_ids: Vec<RecordId> =
                        output.records.iter().map(|record| record.id).collect();
                    let ids = cursor.take(&page_ids);
                    let step = BulkStep {
                        page,
                        ids,
                        remaining: cursor.remaining(),
                    };
                    Some((Ok(step), Some(cursor)))
                }
                Err(error) => Some((Err(WalkError::Fetch { page, error }), None)),
            }
        }
    })
}

/// Selects the first `request.count` records across pages and reports the
/// accumulated page -> ids map. Never fails: fetch errors and cancellation
/// end the walk early and are recorded in the report's status, with every
/// page gathered so far still included.
pub async fn select_first_n(
    fetcher: &dyn PageFetcher,
    request: BulkRequest,
    cancel: CancellationToken,
    sink: &dyn EventSink,
) -> BulkReport {
    let cursor = BulkCursor::new(request.count, request.page_size, request.total_records);
    let mut remaining = cursor.remaining();
    let mut selections = PageSelections::new();
    let mut halted = None;

    let mut steps = pin!(bulk_steps(fetcher, cursor, cancel));
    while let Some(item) = steps.next().await {
        match item {
            Ok(step) => {
                grid_debug!(
                    "Bulk #{} took {} ids from page {}, {} remaining",
                    request.request_id,
                    step.ids.len(),
                    step.page,
                    step.remaining
                );
                sink.emit(EngineEvent::BulkProgress {
                    request_id: request.request_id,
                    page: step.page,
                    taken: step.ids.len(),
                    remaining: step.remaining,
                });
                remaining = step.remaining;
                selections.insert(step.page, step.ids);
            }
            Err(WalkError::Cancelled) => {
                halted = Some(BulkStatus::Cancelled);
            }
            Err(err @ WalkError::Fetch { .. }) => {
                grid_warn!("Bulk #{} aborted: {}", request.request_id, err);
                halted = Some(BulkStatus::Failed {
                    reason: err.to_string(),
                });
            }
        }
    }

    let status = halted.unwrap_or(if remaining == 0 {
        BulkStatus::Completed
    } else {
        BulkStatus::Exhausted
    });

    BulkReport {
        request_id: request.request_id,
        requested: request.count,
        selections,
        status,
    }
}
