//! Index-keyed cache of placement records.

use super::entry::ItemEntry;

/// Growable, index-keyed store of [`ItemEntry`] records.
///
/// Entries are created lazily the first time an index is placed and are the
/// source of truth from then on: they survive scroll direction reversal and
/// are consulted before the packing heuristic ever runs again. There is no
/// eviction; entries only disappear through structural invalidation.
///
/// The store is a dense vector rather than a map because indices are small,
/// contiguous and read on every placement.
#[derive(Clone, Debug, Default)]
pub struct ItemEntries {
    entries: Vec<Option<ItemEntry>>,
}

impl ItemEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached entry for `index`, if the index has been placed
    /// since the last invalidation covering it.
    pub fn get(&self, index: usize) -> Option<ItemEntry> {
        self.entries.get(index).copied().flatten()
    }

    /// Records the entry for `index`, growing the store as needed.
    ///
    /// Entries are immutable once created; callers only `set` an index they
    /// just placed for the first time or restored from persisted state.
    pub fn set(&mut self, index: usize, entry: ItemEntry) {
        if index >= self.entries.len() {
            self.entries.resize(index + 1, None);
        }
        self.entries[index] = Some(entry);
    }

    /// Drops every entry at or after `index`.
    ///
    /// Used on data-set mutation so lane assignments downstream of a
    /// structural change are never reused. O(affected suffix), which is fine
    /// because mutations are rare next to scroll ticks.
    pub fn invalidate_from(&mut self, index: usize) {
        self.entries.truncate(index);
    }

    /// Drops everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of index slots the store currently covers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the populated `(index, entry)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, ItemEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|entry| (index, entry)))
    }

    /// Replaces the store contents with previously exported pairs.
    pub fn restore(&mut self, pairs: impl IntoIterator<Item = (usize, ItemEntry)>) {
        self.clear();
        for (index, entry) in pairs {
            self.set(index, entry);
        }
    }
}
