use crate::{ArtworkRecord, BulkStatus, PageNumber};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableViewModel {
    pub page: PageNumber,
    pub page_count: u32,
    /// Index of the first row on this page, for zero-based paginators.
    pub first_row_offset: u64,
    pub total_records: u64,
    pub rows: Vec<RowView>,
    pub selected_rows: Vec<ArtworkRecord>,
    pub total_selected: usize,
    pub is_loading: bool,
    pub load_error: Option<String>,
    pub bulk: BulkPanelView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub record: ArtworkRecord,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkPanelView {
    pub open: bool,
    pub input: String,
    pub input_error: Option<String>,
    pub in_flight: usize,
    pub last_report: Option<BulkNotice>,
}

/// Summary of the most recent bulk walk, shown next to the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkNotice {
    pub requested: usize,
    pub selected: usize,
    pub status: BulkStatus,
}
