use std::collections::BTreeSet;

use artgrid_core::{Msg, PageNumber, RecordId, TableViewModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Next,
    Prev,
    /// One-based page, as the API numbers them.
    Page(u32),
    /// Zero-based paginator index.
    Goto(u32),
    /// Replace the current page's selection.
    Select(Vec<RecordId>),
    /// Flip individual rows on the current page.
    Toggle(Vec<RecordId>),
    Clear,
    Bulk,
    Count(String),
    Submit,
    Cancel,
    Retry,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a valid number")]
    BadNumber(String),
}

pub const HELP: &str = "\
commands:
  next | prev            move one page
  page <n>               jump to page n (1-based)
  goto <i>               jump to paginator index i (0-based)
  select <id...>         set the selection on this page
  toggle <id...>         flip rows on this page
  clear                  clear the selection on this page
  bulk                   open/close the bulk selection panel
  count <n>              rows to select in bulk
  submit                 run the bulk selection
  cancel                 cancel running bulk selections
  retry                  reload the current page
  show                   redraw the table
  quit";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Show);
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "show" | "ls" => Command::Show,
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "page" => Command::Page(single_number(&rest, "page")?),
        "goto" => Command::Goto(single_number(&rest, "goto")?),
        "select" | "s" => Command::Select(ids(&rest)?),
        "toggle" | "t" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("toggle"));
            }
            Command::Toggle(ids(&rest)?)
        }
        "clear" => Command::Clear,
        "bulk" | "b" => Command::Bulk,
        "count" => Command::Count(rest.join(" ")),
        "submit" => Command::Submit,
        "cancel" => Command::Cancel,
        "retry" | "r" => Command::Retry,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Translates a shell command into a controller message, using the current
/// view for relative navigation and row lookups. `None` means nothing to do.
pub fn to_msg(command: Command, view: &TableViewModel) -> Option<Msg> {
    match command {
        Command::Next => {
            let next = view.page.next();
            (next.get() <= view.page_count).then_some(Msg::PageRequested(next))
        }
        Command::Prev => view.page.prev().map(Msg::PageRequested),
        Command::Page(n) => PageNumber::new(n).map(Msg::PageRequested),
        Command::Goto(index) => PageNumber::from_zero_based(index).map(Msg::PageRequested),
        Command::Select(ids) => Some(Msg::RowSelectionChanged(on_page(view, ids))),
        Command::Toggle(ids) => {
            let mut selected: BTreeSet<RecordId> =
                view.selected_rows.iter().map(|record| record.id).collect();
            for id in on_page(view, ids) {
                if !selected.remove(&id) {
                    selected.insert(id);
                }
            }
            Some(Msg::RowSelectionChanged(selected.into_iter().collect()))
        }
        Command::Clear => Some(Msg::RowSelectionChanged(Vec::new())),
        Command::Bulk => Some(Msg::BulkOverlayToggled),
        Command::Count(text) => Some(Msg::BulkCountChanged(text)),
        Command::Submit => Some(Msg::BulkSubmitted),
        Command::Cancel => Some(Msg::BulkCancelClicked),
        Command::Retry => Some(Msg::RetryClicked),
        Command::Show | Command::Help | Command::Quit => None,
    }
}

/// Keeps only ids of rows shown on the current page, in the order given.
fn on_page(view: &TableViewModel, ids: Vec<RecordId>) -> Vec<RecordId> {
    ids.into_iter()
        .filter(|id| view.rows.iter().any(|row| row.record.id == *id))
        .collect()
}

fn single_number(rest: &[&str], command: &'static str) -> Result<u32, CommandError> {
    let raw = rest.first().ok_or(CommandError::MissingArgument(command))?;
    raw.parse()
        .map_err(|_| CommandError::BadNumber((*raw).to_string()))
}

fn ids(rest: &[&str]) -> Result<Vec<RecordId>, CommandError> {
    rest.iter()
        .flat_map(|word| word.split(','))
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse()
                .map_err(|_| CommandError::BadNumber(part.to_string()))
        })
        .collect()
}
