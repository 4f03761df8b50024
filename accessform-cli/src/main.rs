mod cli;
mod commands;

use std::process;

use accessform::config::FormConfig;
use anyhow::{Context, Result};
use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use cli::{Cli, Command};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = WriteLogger::init(level, Config::default(), std::io::stderr()) {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => FormConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => FormConfig::default(),
    };
    log::debug!("Using config {:?}", config);

    let lines = match &cli.command {
        Command::Explain(args) => commands::explain(args, &config)?,
        Command::Table(args) => commands::table(args, &config),
        Command::Classify(args) => commands::classify(args),
    };
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
