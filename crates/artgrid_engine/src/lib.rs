//! Artgrid engine: page fetching, record mapping and the bulk selection walk.
mod bulk;
mod decode;
mod engine;
mod fetch;
mod mapper;
mod types;

pub use bulk::{bulk_steps, select_first_n, BulkStep, WalkError};
pub use decode::{decode_page, DecodeError};
pub use engine::{EngineError, EngineHandle};
pub use fetch::{page_url, DEFAULT_BASE_URL, ChannelEventSink, EventSink, FetchSettings, PageFetcher, ReqwestPageFetcher};
pub use mapper::{display_field, map_artwork, RawArtwork};
pub use types::{BulkRequest, EngineEvent, FailureKind, FetchError, PageOutput};
