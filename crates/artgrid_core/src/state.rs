use std::collections::BTreeSet;

use crate::view_model::{BulkNotice, BulkPanelView, RowView, TableViewModel};
use crate::{
    page_count, ArtworkRecord, BulkReport, BulkRequestId, BulkStatus, PageNumber, RecordId,
    SelectionIndex, PAGE_SIZE,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct BulkPanel {
    open: bool,
    input: String,
    input_error: Option<String>,
    in_flight: BTreeSet<BulkRequestId>,
    next_request_id: BulkRequestId,
    last_report: Option<BulkNotice>,
}

/// Table controller state: the one live page plus session-wide selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    page: PageNumber,
    records: Vec<ArtworkRecord>,
    total_records: u64,
    loading: bool,
    loaded_page: Option<PageNumber>,
    load_error: Option<String>,
    selection: SelectionIndex,
    bulk: BulkPanel,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> PageNumber {
        self.page
    }

    pub fn records(&self) -> &[ArtworkRecord] {
        &self.records
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selection(&self) -> &SelectionIndex {
        &self.selection
    }

    pub fn bulk_input(&self) -> &str {
        &self.bulk.input
    }

    pub fn bulk_in_flight(&self) -> impl Iterator<Item = BulkRequestId> + '_ {
        self.bulk.in_flight.iter().copied()
    }

    /// Current-page rows the table should render as checked.
    pub fn selected_rows(&self) -> Vec<ArtworkRecord> {
        self.records
            .iter()
            .filter(|record| self.selection.is_selected(self.page, record.id))
            .cloned()
            .collect()
    }

    pub fn view(&self) -> TableViewModel {
        let rows = self
            .records
            .iter()
            .map(|record| RowView {
                selected: self.selection.is_selected(self.page, record.id),
                record: record.clone(),
            })
            .collect();

        TableViewModel {
            page: self.page,
            page_count: page_count(self.total_records, PAGE_SIZE),
            first_row_offset: u64::from(self.page.zero_based()) * PAGE_SIZE as u64,
            total_records: self.total_records,
            rows,
            selected_rows: self.selected_rows(),
            total_selected: self.selection.total_selected(),
            is_loading: self.loading,
            load_error: self.load_error.clone(),
            bulk: BulkPanelView {
                open: self.bulk.open,
                input: self.bulk.input.clone(),
                input_error: self.bulk.input_error.clone(),
                in_flight: self.bulk.in_flight.len(),
                last_report: self.bulk.last_report.clone(),
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether a re-render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// True when `page` is current and either loading or already shown.
    pub(crate) fn is_current(&self, page: PageNumber) -> bool {
        page == self.page && (self.loading || self.loaded_page == Some(page))
    }

    /// Rows of the previous page are dropped here so they are never shown,
    /// or selected, under the new page number.
    pub(crate) fn begin_loading(&mut self, page: PageNumber) {
        self.page = page;
        self.records.clear();
        self.loaded_page = None;
        self.load_error = None;
        self.loading = true;
        self.dirty = true;
    }

    pub(crate) fn apply_page(
        &mut self,
        page: PageNumber,
        records: Vec<ArtworkRecord>,
        total_records: u64,
    ) {
        self.records = records;
        self.total_records = total_records;
        self.loaded_page = Some(page);
        self.load_error = None;
        self.loading = false;
        self.dirty = true;
    }

    /// Failed loads clear the rows instead of leaving the previous page's
    /// data on screen. The total is kept so the paginator stays usable.
    pub(crate) fn apply_page_failure(&mut self, reason: String) {
        self.records.clear();
        self.loaded_page = None;
        self.load_error = Some(reason);
        self.loading = false;
        self.dirty = true;
    }

    pub(crate) fn set_current_page_selection(&mut self, ids: Vec<RecordId>) {
        self.selection.set_selection(self.page, ids);
        self.dirty = true;
    }

    pub(crate) fn toggle_bulk_overlay(&mut self) {
        self.bulk.open = !self.bulk.open;
        self.dirty = true;
    }

    pub(crate) fn set_bulk_input(&mut self, text: String) {
        self.bulk.input = text;
        self.bulk.input_error = None;
        self.dirty = true;
    }

    pub(crate) fn reject_bulk_input(&mut self, reason: String) {
        self.bulk.input_error = Some(reason);
        self.dirty = true;
    }

    pub(crate) fn close_bulk_overlay(&mut self) {
        self.bulk.open = false;
        self.dirty = true;
    }

    pub(crate) fn start_bulk_request(&mut self) -> BulkRequestId {
        self.bulk.next_request_id += 1;
        let request_id = self.bulk.next_request_id;
        self.bulk.in_flight.insert(request_id);
        self.dirty = true;
        request_id
    }

    /// Merges a finished walk into the selection in one step. Partial results
    /// from failed or cancelled walks are merged as well.
    pub(crate) fn apply_bulk_report(&mut self, report: BulkReport) {
        self.bulk.in_flight.remove(&report.request_id);
        let notice = BulkNotice {
            requested: report.requested,
            selected: report.selected(),
            status: report.status.clone(),
        };
        if !matches!(report.status, BulkStatus::Failed { .. }) {
            self.bulk.open = false;
        }
        self.selection.merge_selections(report.selections);
        self.bulk.last_report = Some(notice);
        self.dirty = true;
    }
}
