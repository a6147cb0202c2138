use std::collections::BTreeSet;
use std::sync::Once;

use artgrid_core::{
    update, AppState, ArtworkRecord, BulkReport, BulkStatus, Effect, Msg, PageNumber,
    PageSelection, PageSelections, RecordId, MISSING_FIELD, PAGE_SIZE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(artgrid_logging::initialize_for_tests);
}

fn page(n: u32) -> PageNumber {
    PageNumber::new(n).unwrap()
}

fn record(id: RecordId) -> ArtworkRecord {
    ArtworkRecord {
        id,
        title: format!("Artwork {id}"),
        place_of_origin: MISSING_FIELD.to_string(),
        artist_display: MISSING_FIELD.to_string(),
        inscriptions: MISSING_FIELD.to_string(),
        date_start: "1890".to_string(),
        date_end: "1891".to_string(),
    }
}

fn records_for(n: u32) -> Vec<ArtworkRecord> {
    let start = u64::from(n - 1) * PAGE_SIZE as u64 + 1;
    (start..start + PAGE_SIZE as u64).map(record).collect()
}

fn loaded(state: AppState, n: u32) -> AppState {
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            page: page(n),
            records: records_for(n),
            total_records: 25,
        },
    );
    state
}

/// Started + page 1 delivered.
fn ready() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    loaded(state, 1)
}

#[test]
fn started_fetches_first_page_and_shows_loading() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);

    assert_eq!(effects, vec![Effect::FetchPage { page: page(1) }]);
    assert!(state.view().is_loading);
}

#[test]
fn loaded_page_clears_loading_and_exposes_rows() {
    init_logging();
    let mut state = ready();
    let view = state.view();

    assert!(!view.is_loading);
    assert_eq!(view.rows.len(), PAGE_SIZE);
    assert_eq!(view.total_records, 25);
    assert_eq!(view.page_count, 3);
    assert_eq!(view.first_row_offset, 0);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn page_change_fetches_once_and_keeps_other_selection() {
    init_logging();
    let (state, _) = update(ready(), Msg::RowSelectionChanged(vec![1, 3]));

    let (state, effects) = update(state, Msg::PageRequested(page(2)));

    assert_eq!(effects, vec![Effect::FetchPage { page: page(2) }]);
    assert_eq!(state.selection().get_selection(page(1)), BTreeSet::from([1, 3]));
    assert_eq!(state.selection().page_selection(page(2)), PageSelection::Untouched);

    let state = loaded(state, 2);
    let view = state.view();
    assert_eq!(view.page, page(2));
    assert_eq!(view.first_row_offset, 10);
    assert!(view.selected_rows.is_empty());
}

#[test]
fn requesting_current_page_is_noop() {
    init_logging();
    let state = ready();
    let (next, effects) = update(state.clone(), Msg::PageRequested(page(1)));

    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn selection_is_written_under_current_page() {
    init_logging();
    let state = loaded(update(ready(), Msg::PageRequested(page(2))).0, 2);
    let (state, effects) = update(state, Msg::RowSelectionChanged(vec![12, 14]));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(
        view.selected_rows.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![12, 14]
    );
    assert_eq!(view.rows.iter().filter(|row| row.selected).count(), 2);
    assert_eq!(state.selection().page_selection(page(1)), PageSelection::Untouched);
}

#[test]
fn failed_page_shows_error_instead_of_stale_rows() {
    init_logging();
    let (state, _) = update(ready(), Msg::PageRequested(page(2)));
    let (state, effects) = update(
        state,
        Msg::PageFailed {
            page: page(2),
            reason: "network error: connection refused".to_string(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.is_loading);
    assert!(view.rows.is_empty());
    assert_eq!(view.total_records, 25);
    assert_eq!(
        view.load_error.as_deref(),
        Some("network error: connection refused")
    );

    let (state, effects) = update(state, Msg::RetryClicked);
    assert_eq!(effects, vec![Effect::FetchPage { page: page(2) }]);
    let state = loaded(state, 2);
    assert_eq!(state.view().load_error, None);
}

#[test]
fn stale_responses_are_dropped() {
    init_logging();
    let (state, _) = update(ready(), Msg::PageRequested(page(2)));
    let (state, _) = update(state, Msg::PageRequested(page(3)));

    let state = loaded(state, 2);
    assert!(state.view().is_loading);
    assert!(state.view().rows.is_empty());

    let (state, _) = update(
        state,
        Msg::PageFailed {
            page: page(2),
            reason: "late".to_string(),
        },
    );
    assert_eq!(state.view().load_error, None);
    assert!(state.view().is_loading);
}

#[test]
fn page_change_drops_previous_rows_while_loading() {
    init_logging();
    let (state, _) = update(ready(), Msg::PageRequested(page(2)));

    let view = state.view();
    assert_eq!(view.page, page(2));
    assert!(view.is_loading);
    assert!(view.rows.is_empty());
    assert!(view.selected_rows.is_empty());

    let (state, effects) = update(state, Msg::RowSelectionChanged(vec![1, 3]));
    assert!(effects.is_empty());
    assert_eq!(state.selection().page_selection(page(2)), PageSelection::Untouched);
    assert_eq!(state.selection().page_selection(page(1)), PageSelection::Untouched);

    let state = loaded(state, 2);
    let (state, _) = update(state, Msg::RowSelectionChanged(vec![11]));
    assert_eq!(state.selection().get_selection(page(2)), BTreeSet::from([11]));
}

#[test]
fn retry_while_loading_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (_, effects) = update(state, Msg::RetryClicked);

    assert!(effects.is_empty());
}

#[test]
fn bulk_submit_emits_walk_with_known_total() {
    init_logging();
    let (state, _) = update(ready(), Msg::BulkOverlayToggled);
    let (state, _) = update(state, Msg::BulkCountChanged("12".to_string()));
    let (state, effects) = update(state, Msg::BulkSubmitted);

    assert_eq!(
        effects,
        vec![Effect::BulkSelect {
            request_id: 1,
            count: 12,
            page_size: PAGE_SIZE,
            total_records: 25,
        }]
    );
    assert_eq!(state.view().bulk.in_flight, 1);
    assert!(state.view().bulk.open);
}

#[test]
fn bulk_submit_of_zero_closes_without_walk() {
    init_logging();
    let (state, _) = update(ready(), Msg::BulkOverlayToggled);
    let (state, _) = update(state, Msg::BulkCountChanged("-3".to_string()));
    let (state, effects) = update(state, Msg::BulkSubmitted);

    assert!(effects.is_empty());
    assert!(!state.view().bulk.open);
    assert_eq!(state.view().bulk.in_flight, 0);
}

#[test]
fn bulk_submit_rejects_non_integer_input() {
    init_logging();
    let (state, _) = update(ready(), Msg::BulkOverlayToggled);
    let (state, _) = update(state, Msg::BulkCountChanged("1.5".to_string()));
    let (state, effects) = update(state, Msg::BulkSubmitted);

    assert!(effects.is_empty());
    let bulk = state.view().bulk;
    assert!(bulk.open);
    assert!(bulk.input_error.is_some());

    let (state, _) = update(state, Msg::BulkCountChanged("2".to_string()));
    assert_eq!(state.view().bulk.input_error, None);
}

fn bulk_report(request_id: u64, status: BulkStatus) -> BulkReport {
    let mut selections = PageSelections::new();
    selections.insert(page(1), (1..=10).collect());
    selections.insert(page(2), vec![11, 12]);
    BulkReport {
        request_id,
        requested: 12,
        selections,
        status,
    }
}

#[test]
fn bulk_finish_merges_and_dismisses_overlay() {
    init_logging();
    let (state, _) = update(ready(), Msg::RowSelectionChanged(vec![4]));
    let (state, _) = update(state, Msg::BulkOverlayToggled);
    let (state, _) = update(state, Msg::BulkCountChanged("12".to_string()));
    let (state, _) = update(state, Msg::BulkSubmitted);

    let (state, effects) = update(state, Msg::BulkFinished(bulk_report(1, BulkStatus::Completed)));

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.bulk.open);
    assert_eq!(view.bulk.in_flight, 0);
    assert_eq!(view.selected_rows.len(), 10);
    assert_eq!(view.total_selected, 12);
    let notice = view.bulk.last_report.unwrap();
    assert_eq!(notice.selected, 12);
    assert_eq!(notice.status, BulkStatus::Completed);
}

#[test]
fn failed_bulk_keeps_partial_and_overlay_open() {
    init_logging();
    let (state, _) = update(ready(), Msg::BulkOverlayToggled);
    let mut report = bulk_report(1, BulkStatus::Failed {
        reason: "http status 500".to_string(),
    });
    report.selections.remove(&page(2));

    let (state, _) = update(state, Msg::BulkFinished(report));

    let view = state.view();
    assert!(view.bulk.open);
    assert_eq!(view.total_selected, 10);
    assert_eq!(state.selection().page_selection(page(2)), PageSelection::Untouched);
}

#[test]
fn cancel_targets_every_in_flight_walk() {
    init_logging();
    let (state, _) = update(ready(), Msg::BulkCountChanged("30".to_string()));
    let (state, _) = update(state, Msg::BulkSubmitted);
    let (state, _) = update(state, Msg::BulkSubmitted);

    let (state, effects) = update(state, Msg::BulkCancelClicked);
    assert_eq!(
        effects,
        vec![
            Effect::CancelBulk { request_id: 1 },
            Effect::CancelBulk { request_id: 2 },
        ]
    );

    let (state, _) = update(state, Msg::BulkFinished(bulk_report(2, BulkStatus::Cancelled)));
    let (_, effects) = update(state, Msg::BulkCancelClicked);
    assert_eq!(effects, vec![Effect::CancelBulk { request_id: 1 }]);
}

#[test]
fn later_bulk_completion_wins_per_page() {
    init_logging();
    let state = ready();
    let mut first = PageSelections::new();
    first.insert(page(1), vec![1, 2, 3]);
    let mut second = PageSelections::new();
    second.insert(page(1), vec![1]);

    let (state, _) = update(
        state,
        Msg::BulkFinished(BulkReport {
            request_id: 2,
            requested: 1,
            selections: second,
            status: BulkStatus::Completed,
        }),
    );
    let (state, _) = update(
        state,
        Msg::BulkFinished(BulkReport {
            request_id: 1,
            requested: 3,
            selections: first,
            status: BulkStatus::Completed,
        }),
    );

    assert_eq!(state.selection().get_selection(page(1)), BTreeSet::from([1, 2, 3]));
}

#[test]
fn zero_based_paginator_index_maps_to_one_based_page() {
    assert_eq!(PageNumber::from_zero_based(0), Some(page(1)));
    assert_eq!(PageNumber::from_zero_based(4), Some(page(5)));
    assert_eq!(PageNumber::from_zero_based(u32::MAX - 1), PageNumber::new(u32::MAX));
    assert_eq!(PageNumber::from_zero_based(u32::MAX), None);
    assert_eq!(page(5).zero_based(), 4);
    assert_eq!(page(1).prev(), None);
    assert_eq!(PageNumber::new(0), None);
}
