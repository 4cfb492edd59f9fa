//! In-memory duplicate detection over fixed-width binary records.
//!
//! A [`RecordStore`] wraps one contiguous buffer of records, a [`Sorter`]
//! orders it in place, and [`aggregate`] walks the sorted store collecting
//! every value that occurs more than once into a [`DuplicateTable`].

pub mod aggregate;
pub mod error;
pub mod hex;
pub mod record;
pub mod sort;

pub use aggregate::{DuplicateEntry, DuplicateTable, aggregate};
pub use error::RecordError;
pub use hex::{HexRecord, encode_upper};
pub use record::RecordStore;
pub use sort::{PivotStrategy, QuickSort, Sorter, is_sorted};

/// Sort `store` in place, then collect its duplicated values.
pub fn find_duplicates(
    store: &mut RecordStore,
    sorter: &dyn Sorter,
) -> Result<DuplicateTable, RecordError> {
    sorter.sort(store);
    aggregate(store)
}
