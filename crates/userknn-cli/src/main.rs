#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod output;
mod telemetry;

use std::io::{self, Write};
use std::process;

use anyhow::Context;
use userknn_core::Recommender;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "userknn_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "userknn_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "userknn_cli::config";
pub const TRACING_TARGET_DATASET: &str = "userknn_cli::dataset";

fn main() {
    let Err(error) = run() else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();
    cli.validate().context("invalid configuration")?;

    let dataset = cli.source.load()?;
    let recommender = Recommender::new(cli.recommender.clone());

    let weights = recommender
        .neighbor_weights(&dataset, &cli.user)
        .context("failed to select neighbors")?;

    let list = recommender
        .recommend_with_weights(&dataset, &cli.user, &weights)
        .context("failed to compute recommendations")?;

    if list.is_empty() {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            user = %cli.user,
            "no recommendations for user"
        );
    }

    let mut stdout = io::stdout().lock();
    let neighbors = cli.output.show_neighbors.then_some(&weights);
    output::render(&mut stdout, cli.output.format, &list, neighbors)?;
    stdout.flush().context("failed to flush output")?;

    Ok(())
}
