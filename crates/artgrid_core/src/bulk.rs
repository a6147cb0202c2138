use crate::{page_count, PageNumber, PageSelections, RecordId};

pub type BulkRequestId = u64;

/// Walk state for "select the first N rows across pages".
///
/// The cursor never performs IO: the caller asks for the next page to fetch,
/// fetches it, then hands the page's ids back through [`BulkCursor::take`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkCursor {
    requested: usize,
    remaining: usize,
    page_size: usize,
    next_page: PageNumber,
    last_page: u32,
}

impl BulkCursor {
    pub fn new(count: usize, page_size: usize, total_records: u64) -> Self {
        Self {
            requested: count,
            remaining: count,
            page_size,
            next_page: PageNumber::FIRST,
            last_page: page_count(total_records, page_size),
        }
    }

    /// Page to fetch next, or `None` once the count is met or pages ran out.
    pub fn next_page(&self) -> Option<PageNumber> {
        if self.remaining == 0 || self.next_page.get() > self.last_page {
            return None;
        }
        Some(self.next_page)
    }

    /// Takes the leading ids of the page just fetched, in API order, and
    /// advances to the following page.
    pub fn take(&mut self, page_ids: &[RecordId]) -> Vec<RecordId> {
        let count = self.remaining.min(self.page_size).min(page_ids.len());
        self.remaining -= count;
        self.next_page = self.next_page.next();
        page_ids[..count].to_vec()
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.next_page().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkStatus {
    /// Exactly the requested number of rows was selected.
    Completed,
    /// Pages ran out first; fewer rows than requested were selected.
    Exhausted,
    /// A page fetch failed; rows gathered before it are kept.
    Failed { reason: String },
    /// Cancelled between pages; rows gathered before it are kept.
    Cancelled,
}

/// Result of one bulk selection walk, handed back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReport {
    pub request_id: BulkRequestId,
    pub requested: usize,
    pub selections: PageSelections,
    pub status: BulkStatus,
}

impl BulkReport {
    pub fn selected(&self) -> usize {
        self.selections.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowCountError {
    #[error("`{input}` is not a whole number of rows")]
    NotAWholeNumber { input: String },
}

/// Parses the row count typed into the bulk overlay.
///
/// Blank input means zero and negative counts clamp to zero. Anything that
/// is not an integer is rejected.
pub fn parse_row_count(raw: &str) -> Result<usize, RowCountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| RowCountError::NotAWholeNumber {
            input: trimmed.to_string(),
        })?;
    Ok(usize::try_from(value.max(0)).unwrap_or(usize::MAX))
}
