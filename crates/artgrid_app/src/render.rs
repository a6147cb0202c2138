use std::fmt::Write;

use artgrid_core::{BulkNotice, BulkStatus, RowView, TableViewModel, PAGE_SIZE};

const COLUMNS: [(&str, usize); 6] = [
    ("Title", 28),
    ("Place of Origin", 16),
    ("Artist Display", 24),
    ("Inscriptions", 16),
    ("Start", 6),
    ("End", 6),
];

pub fn render(view: &TableViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", status_line(view));
    if let Some(error) = &view.load_error {
        let _ = writeln!(out, "! could not load page {}: {} (type `retry`)", view.page, error);
    }

    let _ = write!(out, "    {:>7} ", "ID");
    for (header, width) in COLUMNS {
        let _ = write!(out, "| {} ", cell(header, width));
    }
    out.push('\n');
    for row in &view.rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    if view.rows.is_empty() && !view.is_loading {
        out.push_str("    (no rows)\n");
    }

    if view.bulk.open {
        let _ = writeln!(
            out,
            "Select rows: [{}]  (`count <n>`, then `submit`)",
            view.bulk.input
        );
        if let Some(error) = &view.bulk.input_error {
            let _ = writeln!(out, "  ! {error}");
        }
    }
    if view.bulk.in_flight > 0 {
        let _ = writeln!(out, "Bulk selections running: {}", view.bulk.in_flight);
    }
    if let Some(notice) = &view.bulk.last_report {
        let _ = writeln!(out, "{}", notice_line(notice));
    }
    out
}

fn status_line(view: &TableViewModel) -> String {
    let first = view.first_row_offset + 1;
    let last = (view.first_row_offset + PAGE_SIZE as u64).min(view.total_records);
    let rows = if last >= first {
        format!("rows {first}-{last} of {}", view.total_records)
    } else {
        format!("{} rows", view.total_records)
    };
    let mut line = format!(
        "Page {} of {} | {rows} | selected here {} | selected total {}",
        view.page,
        view.page_count.max(1),
        view.selected_rows.len(),
        view.total_selected
    );
    if view.is_loading {
        line.push_str(" | loading...");
    }
    line
}

fn format_row(row: &RowView) -> String {
    let record = &row.record;
    let mark = if row.selected { "[x]" } else { "[ ]" };
    let cells = [
        &record.title,
        &record.place_of_origin,
        &record.artist_display,
        &record.inscriptions,
        &record.date_start,
        &record.date_end,
    ];
    let mut line = format!("{mark} {:>7} ", record.id);
    for (text, (_, width)) in cells.into_iter().zip(COLUMNS) {
        let _ = write!(line, "| {} ", cell(text, width));
    }
    line.trim_end().to_string()
}

fn notice_line(notice: &BulkNotice) -> String {
    let outcome = match &notice.status {
        BulkStatus::Completed => "done".to_string(),
        BulkStatus::Exhausted => "only this many rows exist".to_string(),
        BulkStatus::Failed { reason } => format!("stopped early: {reason}"),
        BulkStatus::Cancelled => "cancelled".to_string(),
    };
    format!(
        "Bulk selection: {} of {} rows ({outcome})",
        notice.selected, notice.requested
    )
}

/// Fits `text` into exactly `width` characters on one line.
fn cell(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    let count = flat.chars().count();
    if count > width {
        let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    } else {
        format!("{flat}{}", " ".repeat(width - count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artgrid_core::{ArtworkRecord, BulkPanelView, PageNumber, MISSING_FIELD};

    fn row(id: u64, title: &str, selected: bool) -> RowView {
        RowView {
            record: ArtworkRecord {
                id,
                title: title.to_string(),
                place_of_origin: "France".to_string(),
                artist_display: "Claude Monet\nFrench, 1840-1926".to_string(),
                inscriptions: MISSING_FIELD.to_string(),
                date_start: "1906".to_string(),
                date_end: "1906".to_string(),
            },
            selected,
        }
    }

    #[test]
    fn cell_pads_and_truncates() {
        assert_eq!(cell("abc", 5), "abc  ");
        assert_eq!(cell("abcdefgh", 5), "abcd~");
        assert_eq!(cell("a\nb", 3), "a b");
    }

    #[test]
    fn renders_rows_status_and_bulk_notice() {
        let view = TableViewModel {
            page: PageNumber::new(2).unwrap(),
            page_count: 3,
            first_row_offset: 10,
            total_records: 25,
            rows: vec![row(11, "Water Lilies", true), row(12, "Haystacks", false)],
            selected_rows: Vec::new(),
            total_selected: 12,
            bulk: BulkPanelView {
                last_report: Some(BulkNotice {
                    requested: 40,
                    selected: 25,
                    status: BulkStatus::Exhausted,
                }),
                ..BulkPanelView::default()
            },
            ..TableViewModel::default()
        };

        let text = render(&view);

        assert!(text.starts_with("Page 2 of 3 | rows 11-20 of 25"));
        assert!(text.contains("[x]      11 | Water Lilies"));
        assert!(text.contains("[ ]      12 | Haystacks"));
        assert!(text.contains("Claude Monet French"));
        assert!(text.contains("Bulk selection: 25 of 40 rows (only this many rows exist)"));
    }

    #[test]
    fn renders_load_error() {
        let view = TableViewModel {
            load_error: Some("timeout: operation timed out".to_string()),
            ..TableViewModel::default()
        };

        let text = render(&view);

        assert!(text.contains("could not load page 1: timeout"));
        assert!(text.contains("(no rows)"));
    }
}
