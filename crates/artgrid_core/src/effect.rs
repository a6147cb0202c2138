use crate::{BulkRequestId, PageNumber};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage {
        page: PageNumber,
    },
    BulkSelect {
        request_id: BulkRequestId,
        count: usize,
        page_size: usize,
        total_records: u64,
    },
    CancelBulk {
        request_id: BulkRequestId,
    },
}
