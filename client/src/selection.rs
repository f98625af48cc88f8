//! Bounded-capacity selection over hand cards and blank slots.

use punchline_shared::CardId;

/// One tentative pick: a hand card or a free-text blank slot.
///
/// Equality is plain enum equality, so a blank entry only ever matches
/// another blank with the same index; it never matches a card entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionEntry {
    Card(CardId),
    Blank(usize),
}

/// Ordered selection behaving as a bounded FIFO of size `capacity`.
///
/// Capacity is the current prompt's pick count and is passed per call because
/// it changes with the black card; the selection itself holds no game state.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
}

impl Selection {
    /// Toggle an entry. Deselecting preserves the relative order of the rest.
    /// Selecting beyond capacity evicts from the front until exactly
    /// `capacity - 1` entries remain, then appends. Capacity 0 makes every
    /// addition a no-op. Returns whether the selection changed.
    pub fn toggle(&mut self, entry: SelectionEntry, capacity: usize) -> bool {
        if let Some(pos) = self.entries.iter().position(|e| *e == entry) {
            self.entries.remove(pos);
            return true;
        }
        if capacity == 0 {
            return false;
        }
        if self.entries.len() >= capacity {
            self.entries.drain(..self.entries.len() - (capacity - 1));
        }
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, entry: &SelectionEntry) -> bool {
        self.entries.contains(entry)
    }

    /// 1-based position of an entry, for the selection badge on cards.
    pub fn position(&self, entry: &SelectionEntry) -> Option<usize> {
        self.entries.iter().position(|e| e == entry).map(|i| i + 1)
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Evict oldest entries until at most `capacity` remain. Used when a new
    /// prompt shrinks the pick count under an existing selection. Returns
    /// whether anything was evicted.
    pub fn truncate_front(&mut self, capacity: usize) -> bool {
        if self.entries.len() <= capacity {
            return false;
        }
        self.entries.drain(..self.entries.len() - capacity);
        true
    }

    /// Drop blank entries whose index is no longer within `[0, blanks)`.
    /// Used when a hand update shrinks the blank slot count under an
    /// existing selection. Returns whether anything was dropped.
    pub fn retain_valid_blanks(&mut self, blanks: usize) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !matches!(e, SelectionEntry::Blank(i) if *i >= blanks));
        self.entries.len() != before
    }
}
