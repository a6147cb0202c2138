use serde::Deserialize;

use crate::mapper::{map_artwork, RawArtwork};
use crate::PageOutput;

#[derive(Debug, Deserialize)]
struct RawPage {
    data: Vec<RawArtwork>,
    pagination: RawPagination,
}

#[derive(Debug, Deserialize)]
struct RawPagination {
    total: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid artworks payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes an `/artworks` response body into display records, keeping the
/// payload's row order.
pub fn decode_page(bytes: &[u8]) -> Result<PageOutput, DecodeError> {
    let page: RawPage = serde_json::from_slice(bytes)?;
    Ok(PageOutput {
        records: page.data.into_iter().map(map_artwork).collect(),
        total_records: page.pagination.total,
    })
}
