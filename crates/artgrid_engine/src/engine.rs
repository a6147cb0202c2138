use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use artgrid_core::{BulkRequestId, PageNumber};
use artgrid_logging::{grid_debug, grid_info};
use tokio_util::sync::CancellationToken;

use crate::bulk::select_first_n;
use crate::fetch::{EventSink, FetchSettings, PageFetcher, ReqwestPageFetcher};
use crate::{BulkRequest, EngineEvent, FetchError};

enum EngineCommand {
    FetchPage { page: PageNumber },
    BulkSelect { request: BulkRequest },
    CancelBulk { request_id: BulkRequestId },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

type Cancellations = Arc<Mutex<HashMap<BulkRequestId, CancellationToken>>>;

/// Runs page fetches and bulk walks on a background tokio runtime and
/// reports results through an [`EventSink`].
///
/// Commands never block the caller and are not serialized against each
/// other: a page fetch and any number of bulk walks may be in flight at once.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let fetcher = Arc::new(ReqwestPageFetcher::new(settings)?);
        Self::with_fetcher(fetcher, sink)
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let cancellations: Cancellations = Arc::default();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let job = match command {
                    EngineCommand::FetchPage { page } => Job::Fetch { page },
                    EngineCommand::BulkSelect { request } => {
                        let cancel = CancellationToken::new();
                        if let Ok(mut tokens) = cancellations.lock() {
                            tokens.insert(request.request_id, cancel.clone());
                        }
                        Job::Bulk { request, cancel }
                    }
                    EngineCommand::CancelBulk { request_id } => {
                        cancel_bulk(&cancellations, request_id);
                        continue;
                    }
                };
                let fetcher = fetcher.clone();
                let sink = sink.clone();
                let cancellations = cancellations.clone();
                runtime.spawn(async move {
                    run_job(fetcher.as_ref(), job, sink.as_ref(), &cancellations).await;
                });
            }
            grid_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn fetch_page(&self, page: PageNumber) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage { page });
    }

    pub fn bulk_select(&self, request: BulkRequest) {
        let _ = self.cmd_tx.send(EngineCommand::BulkSelect { request });
    }

    pub fn cancel_bulk(&self, request_id: BulkRequestId) {
        let _ = self.cmd_tx.send(EngineCommand::CancelBulk { request_id });
    }
}

enum Job {
    Fetch {
        page: PageNumber,
    },
    Bulk {
        request: BulkRequest,
        cancel: CancellationToken,
    },
}

async fn run_job(
    fetcher: &dyn PageFetcher,
    job: Job,
    sink: &dyn EventSink,
    cancellations: &Cancellations,
) {
    match job {
        Job::Fetch { page } => {
            let result = fetcher.fetch_page(page).await;
            sink.emit(EngineEvent::PageFetched { page, result });
        }
        Job::Bulk { request, cancel } => {
            let report = select_first_n(fetcher, request, cancel, sink).await;
            if let Ok(mut tokens) = cancellations.lock() {
                tokens.remove(&request.request_id);
            }
            sink.emit(EngineEvent::BulkFinished(report));
        }
    }
}

fn cancel_bulk(cancellations: &Cancellations, request_id: BulkRequestId) {
    let token = cancellations
        .lock()
        .ok()
        .and_then(|tokens| tokens.get(&request_id).cloned());
    match token {
        Some(token) => {
            grid_info!("Cancelling bulk #{}", request_id);
            token.cancel();
        }
        None => grid_debug!("Bulk #{} already finished", request_id),
    }
}
