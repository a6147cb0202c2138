use std::fmt;

use artgrid_core::{ArtworkRecord, BulkReport, BulkRequestId, PageNumber};

/// One decoded page from the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutput {
    pub records: Vec<ArtworkRecord>,
    pub total_records: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkRequest {
    pub request_id: BulkRequestId,
    pub count: usize,
    pub page_size: usize,
    pub total_records: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        page: PageNumber,
        result: Result<PageOutput, FetchError>,
    },
    BulkProgress {
        request_id: BulkRequestId,
        page: PageNumber,
        taken: usize,
        remaining: usize,
    },
    BulkFinished(BulkReport),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
