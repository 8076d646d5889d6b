mod cli;
mod config;
mod convert;
mod input;
mod limit_cmd;
mod logging;
mod range_cmd;
mod timecheck_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Timecheck(args) => timecheck_cmd::run(args, &config),
        Command::Limit(args) => limit_cmd::run(args, &config),
        Command::Within(args) => range_cmd::within(args, &config),
        Command::Select(args) => range_cmd::select(args, &config),
        Command::Intersect(args) => range_cmd::intersect(args, &config),
    }
}
