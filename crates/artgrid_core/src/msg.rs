use crate::{ArtworkRecord, BulkReport, PageNumber, RecordId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Table mounted; load the initial page.
    Started,
    /// Paginator moved to a one-based page.
    PageRequested(PageNumber),
    /// Engine delivered a page of records.
    PageLoaded {
        page: PageNumber,
        records: Vec<ArtworkRecord>,
        total_records: u64,
    },
    /// Engine failed to deliver a page.
    PageFailed { page: PageNumber, reason: String },
    /// User asked to reload the current page after a failure.
    RetryClicked,
    /// Table widget reported the full selection for the current page.
    RowSelectionChanged(Vec<RecordId>),
    /// User opened or closed the bulk selection overlay.
    BulkOverlayToggled,
    /// User edited the row count in the overlay.
    BulkCountChanged(String),
    /// User submitted the overlay.
    BulkSubmitted,
    /// User cancelled every in-flight bulk walk.
    BulkCancelClicked,
    /// Engine finished a bulk walk (successfully or not).
    BulkFinished(BulkReport),
    /// UI/render tick.
    Tick,
    NoOp,
}
