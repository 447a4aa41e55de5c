//! The conversion queue: an ordered, in-memory list of records.
//!
//! Capacity is enforced by intake before anything is appended; the
//! queue itself never refuses an append.

use crate::types::{ConvertedFile, FileId};

/// Ordered list of converted files, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    files: Vec<ConvertedFile>,
}

impl Queue {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Append records to the end, keeping their order.
    pub fn append(&mut self, records: impl IntoIterator<Item = ConvertedFile>) {
        self.files.extend(records);
    }

    /// Remove the record with `id`, returning it.
    ///
    /// Returns `None` and leaves the queue untouched if no record
    /// matches.
    pub fn remove(&mut self, id: FileId) -> Option<ConvertedFile> {
        let index = self.files.iter().position(|f| f.id() == id)?;
        Some(self.files.remove(index))
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: FileId) -> Option<&ConvertedFile> {
        self.files.iter().find(|f| f.id() == id)
    }

    /// Number of queued records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the queue holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns `true` once the queue holds `max` or more records.
    #[must_use]
    pub const fn is_full(&self, max: usize) -> bool {
        self.files.len() >= max
    }

    /// Iterate over the records in queue order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConvertedFile> {
        self.files.iter()
    }

    /// All records as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ConvertedFile] {
        &self.files
    }
}
