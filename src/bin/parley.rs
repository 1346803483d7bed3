//! Parley CLI binary.

use std::process;

use clap::Parser;
use parley::cli::{args::ParleyArgs, commands::execute_command};
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command line arguments using clap
    let args = ParleyArgs::parse();

    // Logs go to stderr; stdout carries the results.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        tracing::error!(code = e.code(), "{e}");
        process::exit(1);
    }
}
