use std::io::Write;

use hashdup_core::{PivotStrategy, aggregate};

use crate::cli::Settings;
use crate::error::Result;
use crate::loader::load_store;
use crate::report::Reporter;

/// What a finished run found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub width: usize,
    /// distinct duplicated values
    pub duplicates: usize,
    /// repeats beyond the first, summed over all values
    pub repeats: usize,
}

/// Load, sort, aggregate and report one file.
pub fn run<W: Write>(settings: &Settings, out: W) -> Result<Summary> {
    let mut store = load_store(&settings.file, settings.width)?;
    let mut reporter = Reporter::new(out, settings.format, settings.count);

    let sorter = PivotStrategy::create_sorter(settings.pivot);
    log::info!("Sorting hashes...");
    sorter.sort(&mut store);
    log::debug!("Sorted with {}", sorter.name());

    let mut summary = Summary {
        records: store.len(),
        width: store.width(),
        duplicates: 0,
        repeats: 0,
    };

    if settings.dump_sorted {
        reporter.write_sorted(&store)?;
        return Ok(summary);
    }

    log::info!("Finding collisions...");
    let table = aggregate(&store)?;
    // the record buffer is no longer needed once the table holds its own copies
    drop(store);

    summary.duplicates = table.len();
    summary.repeats = table.total_repeats();
    reporter.write_duplicates(table.entries())?;

    log::info!(
        "{} duplicated hashes, {} repeats in {} records",
        summary.duplicates,
        summary.repeats,
        summary.records
    );
    Ok(summary)
}
