use std::fmt;

/// Rows per page as served by the remote API. Not configurable.
pub const PAGE_SIZE: usize = 10;

/// Placeholder shown for any record field the API left out.
pub const MISSING_FIELD: &str = "N/A";

pub type RecordId = u64;

/// One-based page number, as used by the API's `?page=` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(u32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    /// Returns `None` for zero.
    pub fn new(one_based: u32) -> Option<Self> {
        (one_based >= 1).then_some(Self(one_based))
    }

    /// Converts a zero-based paginator index into a page number. Returns
    /// `None` for `u32::MAX`, which has no one-based counterpart.
    pub fn from_zero_based(index: u32) -> Option<Self> {
        index.checked_add(1).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn zero_based(self) -> u32 {
        self.0 - 1
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn prev(self) -> Option<Self> {
        Self::new(self.0 - 1)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of pages needed to hold `total_records`, rounding up.
pub fn page_count(total_records: u64, page_size: usize) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_records.div_ceil(page_size as u64);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Display shape of one artwork row. Built fresh on every page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkRecord {
    pub id: RecordId,
    pub title: String,
    pub place_of_origin: String,
    pub artist_display: String,
    pub inscriptions: String,
    pub date_start: String,
    pub date_end: String,
}
