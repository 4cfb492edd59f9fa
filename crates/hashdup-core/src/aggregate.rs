use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::error::{RecordError, Result};
use crate::hex::{HexRecord, encode_upper};
use crate::record::RecordStore;

/// Entries are reserved this many at a time.
pub const TABLE_GROWTH_BLOCK: usize = 8192;

/// A duplicated record value and how many times it was seen again after
/// its first occurrence. A value present k times has `count == k - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEntry {
    #[serde(rename = "hash", serialize_with = "serialize_hex")]
    pub value: Box<[u8]>,
    pub count: usize,
}

impl DuplicateEntry {
    /// total number of times the value occurs in the input
    pub fn occurrences(&self) -> usize {
        self.count + 1
    }

    pub fn hex(&self) -> HexRecord<'_> {
        HexRecord(&self.value)
    }
}

fn serialize_hex<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&encode_upper(value))
}

/// Running count per distinct duplicated value, in first-submission order.
#[derive(Debug, Clone)]
pub struct DuplicateTable {
    width: usize,
    entries: Vec<DuplicateEntry>,
    index: HashMap<Box<[u8]>, usize>,
}

impl DuplicateTable {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Count one more repeat of `record`, inserting it with count 1 on first sight.
    pub fn submit(&mut self, record: &[u8]) -> Result<()> {
        if record.len() != self.width {
            return Err(RecordError::WidthMismatch {
                expected: self.width,
                actual: record.len(),
            });
        }

        if let Some(&idx) = self.index.get(record) {
            self.entries[idx].count += 1;
            return Ok(());
        }

        if self.entries.len() == self.entries.capacity() {
            self.grow()?;
        }
        let value: Box<[u8]> = record.into();
        self.index.insert(value.clone(), self.entries.len());
        self.entries.push(DuplicateEntry { value, count: 1 });
        Ok(())
    }

    fn grow(&mut self) -> Result<()> {
        let bytes = TABLE_GROWTH_BLOCK * (self.width + size_of::<DuplicateEntry>());
        self.entries
            .try_reserve_exact(TABLE_GROWTH_BLOCK)
            .map_err(|_e| RecordError::Allocation {
                what: "duplicate table",
                bytes,
            })?;
        self.index
            .try_reserve(TABLE_GROWTH_BLOCK)
            .map_err(|_e| RecordError::Allocation {
                what: "duplicate index",
                bytes,
            })?;
        log::trace!(
            "Duplicate table grown to {} entries",
            self.entries.capacity()
        );
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// number of distinct duplicated values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, value: &[u8]) -> Option<&DuplicateEntry> {
        self.index.get(value).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[DuplicateEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DuplicateEntry> {
        self.entries.iter()
    }

    /// sum of all repeat counts
    pub fn total_repeats(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn into_entries(self) -> Vec<DuplicateEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a DuplicateTable {
    type Item = &'a DuplicateEntry;
    type IntoIter = std::slice::Iter<'a, DuplicateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Scan a sorted store for runs of equal adjacent records.
///
/// Every record equal to the one that started its run is submitted to the
/// table, so a run of k records contributes k - 1 repeats. The store must
/// already be sorted for the result to cover every duplicated value.
pub fn aggregate(store: &RecordStore) -> Result<DuplicateTable> {
    let mut table = DuplicateTable::new(store.width());
    let mut prev = 0usize;

    for i in 1..store.len() {
        let record = store.record(i);
        if record == store.record(prev) {
            table.submit(record)?;
            log::trace!("Repeat of {} at index {i}", HexRecord(record));
        } else {
            prev = i;
        }
    }

    log::debug!(
        "Found {} duplicated values ({} repeats) among {} records",
        table.len(),
        table.total_repeats(),
        store.len()
    );
    Ok(table)
}
