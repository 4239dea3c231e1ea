mod app;
mod cli;
mod domain;
mod infra;
mod net;
mod ui;
mod usecases;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    app::run(cli)
}
