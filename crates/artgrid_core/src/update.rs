use artgrid_logging::{grid_debug, grid_info, grid_warn};

use crate::{parse_row_count, AppState, Effect, Msg, PageNumber, PAGE_SIZE};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            let page = state.page();
            vec![fetch(&mut state, page)]
        }
        Msg::PageRequested(page) => {
            if state.is_current(page) {
                return (state, Vec::new());
            }
            vec![fetch(&mut state, page)]
        }
        Msg::PageLoaded {
            page,
            records,
            total_records,
        } => {
            if page != state.page() {
                grid_debug!("Dropping stale page {} (current {})", page, state.page());
                return (state, Vec::new());
            }
            state.apply_page(page, records, total_records);
            Vec::new()
        }
        Msg::PageFailed { page, reason } => {
            if page != state.page() {
                grid_debug!("Dropping stale failure for page {}: {}", page, reason);
                return (state, Vec::new());
            }
            grid_warn!("Page {} failed to load: {}", page, reason);
            state.apply_page_failure(reason);
            Vec::new()
        }
        Msg::RetryClicked => {
            if state.is_loading() {
                Vec::new()
            } else {
                let page = state.page();
                vec![fetch(&mut state, page)]
            }
        }
        Msg::RowSelectionChanged(ids) => {
            if state.is_loading() {
                grid_debug!(
                    "Ignoring selection of {} rows while page {} loads",
                    ids.len(),
                    state.page()
                );
                return (state, Vec::new());
            }
            state.set_current_page_selection(ids);
            Vec::new()
        }
        Msg::BulkOverlayToggled => {
            state.toggle_bulk_overlay();
            Vec::new()
        }
        Msg::BulkCountChanged(text) => {
            state.set_bulk_input(text);
            Vec::new()
        }
        Msg::BulkSubmitted => match parse_row_count(state.bulk_input()) {
            Err(err) => {
                state.reject_bulk_input(err.to_string());
                Vec::new()
            }
            Ok(0) => {
                state.close_bulk_overlay();
                Vec::new()
            }
            Ok(count) => {
                let request_id = state.start_bulk_request();
                grid_info!(
                    "Bulk select #{} of {} rows over {} records",
                    request_id,
                    count,
                    state.total_records()
                );
                vec![Effect::BulkSelect {
                    request_id,
                    count,
                    page_size: PAGE_SIZE,
                    total_records: state.total_records(),
                }]
            }
        },
        Msg::BulkCancelClicked => state
            .bulk_in_flight()
            .map(|request_id| Effect::CancelBulk { request_id })
            .collect(),
        Msg::BulkFinished(report) => {
            grid_info!(
                "Bulk select #{} finished: {:?}, {} of {} rows",
                report.request_id,
                report.status,
                report.selected(),
                report.requested
            );
            state.apply_bulk_report(report);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn fetch(state: &mut AppState, page: PageNumber) -> Effect {
    state.begin_loading(page);
    Effect::FetchPage { page }
}
