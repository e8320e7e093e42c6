//! Merge demo entry-point: parse flags, fold the operands, print the record.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use merge_demo::cli::DemoCli;
use merge_demo::error::Result;
use merge_demo::person::{base, merge_all, overlay};
use merge_demo::render::{emit, render};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    run(&DemoCli::parse()).map_err(color_eyre::eyre::Report::from)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &DemoCli) -> Result<()> {
    let mut operands = vec![base()];
    if !cli.no_overlay {
        operands.push(overlay());
    }
    operands.push(cli.overrides());
    let merged = merge_all(operands)?;
    let rendered = render(&merged, cli.format)?;
    emit(&mut std::io::stdout().lock(), &rendered)
}
