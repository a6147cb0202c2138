//! Artgrid core: pure table controller state machine, selection bookkeeping
//! and the bulk-selection cursor. No IO happens here.
mod bulk;
mod effect;
mod msg;
mod selection;
mod state;
mod types;
mod update;
mod view_model;

pub use bulk::{parse_row_count, BulkCursor, BulkReport, BulkRequestId, BulkStatus, RowCountError};
pub use effect::Effect;
pub use msg::Msg;
pub use selection::{PageSelection, PageSelections, SelectionIndex};
pub use state::AppState;
pub use types::{page_count, ArtworkRecord, PageNumber, RecordId, MISSING_FIELD, PAGE_SIZE};
pub use update::update;
pub use view_model::{BulkNotice, BulkPanelView, RowView, TableViewModel};
