use std::sync::{mpsc, Arc};

use artgrid_core::{Effect, Msg};
use artgrid_engine::{
    BulkRequest, EngineError, EngineEvent, EngineHandle, EventSink, FetchSettings,
};
use artgrid_logging::{grid_debug, grid_info};

use crate::app::Input;

/// Executes controller effects on the engine.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings, input_tx: mpsc::Sender<Input>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings, Arc::new(MsgSink { input_tx }))?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage { page } => {
                    grid_info!("FetchPage page={}", page);
                    self.engine.fetch_page(page);
                }
                Effect::BulkSelect {
                    request_id,
                    count,
                    page_size,
                    total_records,
                } => {
                    grid_info!(
                        "BulkSelect request_id={} count={} total_records={}",
                        request_id,
                        count,
                        total_records
                    );
                    self.engine.bulk_select(BulkRequest {
                        request_id,
                        count,
                        page_size,
                        total_records,
                    });
                }
                Effect::CancelBulk { request_id } => {
                    self.engine.cancel_bulk(request_id);
                }
            }
        }
    }
}

/// Feeds engine events back into the message loop.
struct MsgSink {
    input_tx: mpsc::Sender<Input>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        if let Some(msg) = map_event(event) {
            let _ = self.input_tx.send(Input::Engine(msg));
        }
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::PageFetched { page, result } => Some(match result {
            Ok(output) => Msg::PageLoaded {
                page,
                records: output.records,
                total_records: output.total_records,
            },
            Err(err) => Msg::PageFailed {
                page,
                reason: err.to_string(),
            },
        }),
        EngineEvent::BulkProgress {
            request_id,
            page,
            taken,
            remaining,
        } => {
            grid_debug!(
                "Bulk #{} page {}: took {}, {} remaining",
                request_id,
                page,
                taken,
                remaining
            );
            None
        }
        EngineEvent::BulkFinished(report) => Some(Msg::BulkFinished(report)),
    }
}
