// src/todos.rs
//! In-memory todo list as loaded from a store file.

#![deny(missing_docs)]

use crate::error::StoreError;
use crate::line::{self, PREFIX_LEN, STATUS_COMPLETE, STATUS_INCOMPLETE, TodoItem};
use std::io::{self, BufRead, Write};

/// Ordered raw lines of one load. `None` is a tombstone.
///
/// Indices are positions in this sequence. Tombstones keep the positions of
/// the other entries stable until the list is written back, where they are
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Todos {
    slots: Vec<Option<Vec<u8>>>,
}

impl Todos {
    /// Build a list from raw lines.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self {
            slots: lines.into_iter().map(Some).collect(),
        }
    }

    /// Read every raw line from `reader`.
    pub fn read_from<R: BufRead>(mut reader: R) -> io::Result<Self> {
        let mut lines = Vec::new();
        while let Some(l) = line::read_line(&mut reader)? {
            lines.push(l);
        }
        Ok(Self::from_lines(lines))
    }

    /// Write every non-tombstone line verbatim.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for raw in self.slots.iter().flatten() {
            if raw.is_empty() {
                continue;
            }
            writer.write_all(raw)?;
        }
        writer.flush()
    }

    /// Number of slots, tombstones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Decoded items with their positional index. Malformed lines and
    /// tombstones are skipped but still occupy their index.
    pub fn items(&self) -> impl Iterator<Item = (usize, TodoItem)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_deref().and_then(line::decode).map(|item| (i, item)))
    }

    fn live_mut(&mut self, index: usize) -> Result<&mut Vec<u8>, StoreError> {
        let len = self.slots.len();
        match self.slots.get_mut(index) {
            Some(Some(raw)) if !raw.is_empty() => Ok(raw),
            _ => Err(StoreError::IndexOutOfRange { index, len }),
        }
    }

    /// Mark the item at `index` complete.
    pub fn complete_at(&mut self, index: usize) -> Result<(), StoreError> {
        let len = self.slots.len();
        let raw = self.live_mut(index)?;
        // a lone "\n" has no status byte to flip
        if raw.len() < PREFIX_LEN {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        raw[0] = STATUS_COMPLETE;
        Ok(())
    }

    /// Tombstone the entry at `index`.
    pub fn delete_at(&mut self, index: usize) -> Result<(), StoreError> {
        self.live_mut(index)?;
        self.slots[index] = None;
        Ok(())
    }

    /// Tombstone every completed item. Returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        self.clear_where(|raw| raw[0] != STATUS_INCOMPLETE)
    }

    /// Tombstone every item regardless of status. Returns how many were removed.
    pub fn purge(&mut self) -> usize {
        self.clear_where(|_| true)
    }

    fn clear_where(&mut self, pred: impl Fn(&[u8]) -> bool) -> usize {
        let mut count = 0;
        for slot in &mut self.slots {
            let hit = matches!(slot, Some(raw) if raw.len() > PREFIX_LEN && pred(raw));
            if hit {
                *slot = None;
                count += 1;
            }
        }
        count
    }
}
