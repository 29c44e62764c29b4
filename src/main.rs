//! CPM CLI - C project builder
//!
//! Entry point for the cpm command-line application.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cpm::cli::output::{display_error, OutputConfig};
use cpm::cli::Cli;

fn main() {
    let cli = Cli::parse();

    let output_config = OutputConfig::new(cli.quiet, cli.verbose);

    // RUST_LOG takes precedence over -v/-q
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(output_config.level().to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli.run() {
        display_error(&e);
        std::process::exit(1);
    }
}
