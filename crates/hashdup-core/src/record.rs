use std::cmp::Ordering;
use std::ops::Range;

use crate::error::{RecordError, Result};

/// `RecordStore` holds N fixed-width records in one contiguous buffer.
///
/// Records are addressed by index; record `i` occupies bytes
/// `[i * width, (i + 1) * width)`. The buffer length is always an exact
/// multiple of the width. Apart from the buffer itself the store owns a
/// single scratch record used by [`RecordStore::swap`].
#[derive(Debug, Clone)]
pub struct RecordStore {
    buffer: Vec<u8>,
    width: usize,
    scratch: Vec<u8>,
}

impl RecordStore {
    pub fn new(buffer: Vec<u8>, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(RecordError::ZeroWidth);
        }
        if buffer.len() % width != 0 {
            return Err(RecordError::SizeMismatch {
                len: buffer.len(),
                width,
            });
        }

        let mut scratch = Vec::new();
        scratch
            .try_reserve_exact(width)
            .map_err(|_e| RecordError::Allocation {
                what: "scratch record",
                bytes: width,
            })?;
        scratch.resize(width, 0);

        log::debug!(
            "Record store holds {} records of {width} bytes",
            buffer.len() / width
        );

        Ok(Self {
            buffer,
            width,
            scratch,
        })
    }

    /// number of records
    pub fn len(&self) -> usize {
        self.buffer.len() / self.width
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Borrow the bytes of record `index`.
    pub fn record_at(&self, index: usize) -> Result<&[u8]> {
        if index >= self.len() {
            return Err(RecordError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(&self.buffer[self.span(index)])
    }

    /// Lexicographic comparison of records `i` and `j`, first byte most significant.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn compare(&self, i: usize, j: usize) -> Ordering {
        self.record(i).cmp(self.record(j))
    }

    /// Exchange records `i` and `j` through the scratch record.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let (a, b) = (self.span(i), self.span(j));
        let b_start = b.start;
        self.scratch.copy_from_slice(&self.buffer[a.clone()]);
        self.buffer.copy_within(b, a.start);
        self.buffer[b_start..b_start + self.width].copy_from_slice(&self.scratch);
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.buffer.chunks_exact(self.width)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Release the backing buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub(crate) fn record(&self, index: usize) -> &[u8] {
        &self.buffer[self.span(index)]
    }

    fn span(&self, index: usize) -> Range<usize> {
        let start = index * self.width;
        start..start + self.width
    }
}
