//! Command-line driver for `hashdup-core`.
//!
//! Reads a flat file of fixed-width hashes, sorts it in memory and prints
//! every hash that occurs more than once.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;

pub use app::{Summary, run};
pub use cli::{Options, Settings, parse_args};
pub use config::Config;
pub use error::DriverError;

/// Initialise stderr logging. `RUST_LOG` still overrides `level`.
pub fn setup(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init()
        .ok();
}
