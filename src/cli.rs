use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use hashdup_core::PivotStrategy;

use crate::config::{Config, CountMode, OutputFormat};
use crate::error::{DriverError, Result};

/// Parsed command line. Unset options fall back to the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub file: PathBuf,
    pub width: usize,
    pub config: Option<PathBuf>,
    pub pivot: Option<PivotStrategy>,
    pub format: Option<OutputFormat>,
    pub count: Option<CountMode>,
    pub dump_sorted: bool,
    pub verbose: u8,
}

/// Effective settings for one run after merging CLI flags over the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub file: PathBuf,
    pub width: usize,
    pub pivot: PivotStrategy,
    pub format: OutputFormat,
    pub count: CountMode,
    pub dump_sorted: bool,
}

impl Options {
    pub fn merge(&self, config: &Config) -> Settings {
        Settings {
            file: self.file.clone(),
            width: self.width,
            pivot: self.pivot.unwrap_or(config.pivot),
            format: self.format.unwrap_or(config.format),
            count: self.count.unwrap_or(config.count),
            dump_sorted: self.dump_sorted || config.dump_sorted,
        }
    }

    /// `-v` count wins over the configured level.
    pub fn log_level(&self, config: &Config) -> log::LevelFilter {
        match self.verbose {
            0 => config.log_level.into(),
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn parse_width(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("hash size must be at least 1 byte".to_owned()),
        Ok(width) => Ok(width),
        Err(e) => Err(format!("invalid hash size '{s}': {e}")),
    }
}

pub fn command() -> Command {
    Command::new("hashdup")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Find duplicated fixed-width hashes in a binary file")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Flat binary file of hashes, no header or delimiters"),
        )
        .arg(
            Arg::new("width")
                .value_name("HASH_SIZE")
                .required(true)
                .value_parser(parse_width)
                .help("Size of one hash in bytes"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Settings file (default: ./hashdup.toml if present)"),
        )
        .arg(
            Arg::new("pivot")
                .long("pivot")
                .value_parser(["last", "median3"])
                .help("Quicksort pivot choice"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["text", "json"])
                .help("Report format"),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .value_parser(["repeats", "occurrences"])
                .help("Print repeats beyond the first, or total occurrences"),
        )
        .arg(
            Arg::new("dump-sorted")
                .long("dump-sorted")
                .action(ArgAction::SetTrue)
                .help("Print every sorted hash instead of the duplicate report"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("Set verbose output level"),
        )
}

/// Parse `args` (program name first).
///
/// Returns `Ok(None)` when help or version was requested and printed.
pub fn parse_args<I, T>(args: I) -> Result<Option<Options>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print().map_err(DriverError::Output)?;
            return Ok(None);
        }
        Err(e) => {
            return Err(DriverError::Usage(format!(
                "Arguments required: <file name> <hash size>\n{}",
                e.render()
            )));
        }
    };
    from_matches(&matches).map(Some)
}

fn from_matches(matches: &ArgMatches) -> Result<Options> {
    let file = matches
        .get_one::<PathBuf>("file")
        .cloned()
        .ok_or_else(|| DriverError::Usage("missing <file name>".to_owned()))?;
    let width = matches
        .get_one::<usize>("width")
        .copied()
        .ok_or_else(|| DriverError::Usage("missing <hash size>".to_owned()))?;

    Ok(Options {
        file,
        width,
        config: matches.get_one::<PathBuf>("config").cloned(),
        pivot: parse_choice(matches, "pivot")?,
        format: parse_choice(matches, "format")?,
        count: parse_choice(matches, "count")?,
        dump_sorted: matches.get_flag("dump-sorted"),
        verbose: matches.get_count("verbose"),
    })
}

fn parse_choice<T>(matches: &ArgMatches, id: &str) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    matches
        .get_one::<String>(id)
        .map(|s| s.parse().map_err(DriverError::Usage))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<Options>> {
        parse_args(std::iter::once("hashdup").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn test_positional_args() {
        let opts = parse(&["hashes.bin", "32"]).expect("parse").expect("options");
        assert_eq!(opts.file, PathBuf::from("hashes.bin"));
        assert_eq!(opts.width, 32);
        assert_eq!(opts.pivot, None);
        assert!(!opts.dump_sorted);
        assert_eq!(opts.verbose, 0);
    }

    #[test]
    fn test_wrong_arg_count_is_usage_error() {
        assert!(matches!(parse(&[]), Err(DriverError::Usage(_))));
        assert!(matches!(parse(&["hashes.bin"]), Err(DriverError::Usage(_))));
        assert!(matches!(
            parse(&["hashes.bin", "32", "extra"]),
            Err(DriverError::Usage(_))
        ));
    }

    #[test]
    fn test_bad_width_is_usage_error() {
        assert!(matches!(parse(&["h.bin", "0"]), Err(DriverError::Usage(_))));
        assert!(matches!(parse(&["h.bin", "abc"]), Err(DriverError::Usage(_))));
    }

    #[test]
    fn test_options_override_config() {
        let opts = parse(&[
            "h.bin",
            "4",
            "--pivot",
            "last",
            "--count",
            "occurrences",
            "-vv",
        ])
        .expect("parse")
        .expect("options");
        let config = Config {
            format: OutputFormat::Json,
            ..Config::default()
        };
        let settings = opts.merge(&config);

        assert_eq!(settings.pivot, PivotStrategy::Last);
        assert_eq!(settings.count, CountMode::Occurrences);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(opts.log_level(&config), log::LevelFilter::Trace);
    }
}
