#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Context as _;
use hashdup::{Config, parse_args};

fn main() -> anyhow::Result<()> {
    let Some(options) = parse_args(std::env::args_os())? else {
        return Ok(());
    };

    // `.env` may name the config file through HASHDUP_CONFIG
    dotenvy::dotenv().ok();
    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let config = Config::load(options.config.as_deref(), &cwd)?;
    hashdup::setup(options.log_level(&config));

    let settings = options.merge(&config);
    log::debug!("Running with {settings:?}");

    let stdout = std::io::BufWriter::new(std::io::stdout().lock());
    hashdup::run(&settings, stdout)?;
    Ok(())
}
