// src/bin/cli.rs
use clap::Parser;
use showdown_scrape::{cli, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = cli::Cli::parse();
    log::init(args.verbose, args.log_file.as_deref())?;
    cli::run(args)?;
    Ok(())
}
