use std::time::Duration;

use artgrid_core::PageNumber;
use artgrid_logging::{grid_debug, grid_trace};
use futures_util::StreamExt;
use reqwest::Url;

use crate::decode::decode_page;
use crate::{EngineEvent, FailureKind, FetchError, PageOutput};

pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// API root; `/artworks` is appended to it.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request timeout. `None` lets a request run until the server
    /// answers or the connection drops.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Retrieves one page of artworks. Every call goes to the network; nothing
/// is cached or retried.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, page: PageNumber) -> Result<PageOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPageFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestPageFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl PageFetcher for ReqwestPageFetcher {
    async fn fetch_page(&self, page: PageNumber) -> Result<PageOutput, FetchError> {
        let url = page_url(&self.settings.base_url, page)?;
        grid_debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        grid_trace!("Page {}: read {} body bytes", page, bytes.len());
        let output = decode_page(&bytes)
            .map_err(|err| FetchError::new(FailureKind::MalformedBody, err.to_string()))?;
        grid_debug!(
            "Page {}: {} records, total {}",
            page,
            output.records.len(),
            output.total_records
        );
        Ok(output)
    }
}

/// Builds `<base>/artworks?page=N`, tolerating a trailing slash on the base.
pub fn page_url(base_url: &str, page: PageNumber) -> Result<Url, FetchError> {
    let mut url = Url::parse(base_url)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| FetchError::new(FailureKind::InvalidUrl, "base url cannot have a path"))?
        .pop_if_empty()
        .push("artworks");
    url.query_pairs_mut()
        .append_pair("page", &page.get().to_string());
    Ok(url)
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::MalformedBody, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
