use std::collections::{BTreeMap, BTreeSet};

use crate::{PageNumber, RecordId};

/// Ordered page -> ids map produced by a bulk selection walk.
pub type PageSelections = BTreeMap<PageNumber, Vec<RecordId>>;

/// What the index knows about one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection<'a> {
    /// No selection action has touched this page yet.
    Untouched,
    /// At least one action ran; the set may be empty.
    Selected(&'a BTreeSet<RecordId>),
}

/// Selected record ids, keyed strictly per page.
///
/// Entries are only ever replaced, never removed. Clearing a page means
/// writing an empty set for it, which is different from never touching it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionIndex {
    pages: BTreeMap<PageNumber, BTreeSet<RecordId>>,
}

impl SelectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection for `page` wholesale.
    pub fn set_selection(&mut self, page: PageNumber, ids: impl IntoIterator<Item = RecordId>) {
        self.pages.insert(page, ids.into_iter().collect());
    }

    /// Selected ids on `page`, empty when the page was never touched.
    pub fn get_selection(&self, page: PageNumber) -> BTreeSet<RecordId> {
        self.pages.get(&page).cloned().unwrap_or_default()
    }

    pub fn page_selection(&self, page: PageNumber) -> PageSelection<'_> {
        match self.pages.get(&page) {
            Some(ids) => PageSelection::Selected(ids),
            None => PageSelection::Untouched,
        }
    }

    pub fn is_selected(&self, page: PageNumber, id: RecordId) -> bool {
        self.pages.get(&page).is_some_and(|ids| ids.contains(&id))
    }

    /// Applies every entry of `selections` in one step. Each listed page is
    /// replaced; pages not listed keep their current entry.
    pub fn merge_selections(&mut self, selections: PageSelections) {
        for (page, ids) in selections {
            self.set_selection(page, ids);
        }
    }

    pub fn total_selected(&self) -> usize {
        self.pages.values().map(BTreeSet::len).sum()
    }

    pub fn pages(&self) -> impl Iterator<Item = (PageNumber, &BTreeSet<RecordId>)> {
        self.pages.iter().map(|(page, ids)| (*page, ids))
    }
}
