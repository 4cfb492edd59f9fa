use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::RecordStore;

/// In-place sort over a [`RecordStore`], driven only by `compare` and `swap`.
pub trait Sorter {
    fn sort(&self, store: &mut RecordStore);

    fn name(&self) -> &'static str;
}

/// Pivot choice for the quicksort partition step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotStrategy {
    /// Rightmost record of the range. Quadratic on sorted or all-equal input.
    Last,
    /// Median of the first, middle and last records, moved to the right end.
    #[default]
    #[serde(rename = "median3")]
    MedianOfThree,
}

impl AsRef<Self> for PivotStrategy {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl PivotStrategy {
    pub fn create_sorter(strategy: impl AsRef<Self>) -> Box<dyn Sorter> {
        match strategy.as_ref() {
            Self::Last => Box::new(QuickSort::new(Self::Last)),
            Self::MedianOfThree => Box::new(QuickSort::new(Self::MedianOfThree)),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Last => "last",
            Self::MedianOfThree => "median3",
        }
    }
}

impl Display for PivotStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PivotStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last" => Ok(Self::Last),
            "median3" | "median-of-three" => Ok(Self::MedianOfThree),
            other => Err(format!(
                "unknown pivot strategy '{other}', expected 'last' or 'median3'"
            )),
        }
    }
}

/// Quicksort with Lomuto partitioning over an explicit stack of ranges.
///
/// Ranges are inclusive `(lo, hi)` pairs and only non-trivial ranges are
/// ever pushed, so no index arithmetic can underflow at zero. The smaller
/// side of each partition is processed first, which keeps the stack at
/// O(log N) entries even when the partitions are badly unbalanced.
#[derive(Debug, Clone, Copy)]
pub struct QuickSort {
    pivot: PivotStrategy,
}

impl QuickSort {
    pub fn new(pivot: PivotStrategy) -> Self {
        Self { pivot }
    }

    pub fn pivot(&self) -> PivotStrategy {
        self.pivot
    }

    /// Lomuto partition of `lo..=hi` around the record at `hi`.
    ///
    /// Returns the final index of the pivot: everything left of it
    /// compares less, everything right of it compares greater or equal.
    pub fn partition(store: &mut RecordStore, lo: usize, hi: usize) -> usize {
        let mut i = lo;
        for j in lo..hi {
            if store.compare(j, hi) == Ordering::Less {
                store.swap(i, j);
                i += 1;
            }
        }
        store.swap(i, hi);
        i
    }

    /// Leave the median of `lo`, `mid` and `hi` at `hi`.
    fn median_to_end(store: &mut RecordStore, lo: usize, hi: usize) {
        let mid = lo + (hi - lo) / 2;
        if store.compare(mid, lo) == Ordering::Less {
            store.swap(mid, lo);
        }
        if store.compare(hi, lo) == Ordering::Less {
            store.swap(hi, lo);
        }
        // lo now holds the minimum; the smaller of mid and hi is the median
        if store.compare(mid, hi) == Ordering::Less {
            store.swap(mid, hi);
        }
    }
}

impl Sorter for QuickSort {
    fn sort(&self, store: &mut RecordStore) {
        let n = store.len();
        if n <= 1 {
            return;
        }

        let mut stack: Vec<(usize, usize)> = vec![(0, n - 1)];
        let mut partitions = 0usize;
        let mut max_depth = 1usize;

        while let Some((lo, hi)) = stack.pop() {
            if self.pivot == PivotStrategy::MedianOfThree && hi - lo >= 2 {
                Self::median_to_end(store, lo, hi);
            }
            let p = Self::partition(store, lo, hi);
            partitions += 1;

            let left = (p > lo + 1).then(|| (lo, p - 1));
            let right = (p + 1 < hi).then(|| (p + 1, hi));
            match (left, right) {
                (Some(l), Some(r)) => {
                    // push the larger range first so the smaller one is popped next
                    if l.1 - l.0 > r.1 - r.0 {
                        stack.push(l);
                        stack.push(r);
                    } else {
                        stack.push(r);
                        stack.push(l);
                    }
                }
                (Some(range), None) | (None, Some(range)) => stack.push(range),
                (None, None) => {}
            }
            max_depth = max_depth.max(stack.len());
        }

        log::debug!(
            "Sorted {n} records with {} pivot: {partitions} partitions, max stack depth {max_depth}",
            self.pivot
        );
    }

    fn name(&self) -> &'static str {
        match self.pivot {
            PivotStrategy::Last => "quicksort/last",
            PivotStrategy::MedianOfThree => "quicksort/median3",
        }
    }
}

/// Whether every adjacent pair of records is in non-decreasing order.
pub fn is_sorted(store: &RecordStore) -> bool {
    (1..store.len()).all(|i| store.compare(i - 1, i) != Ordering::Greater)
}
