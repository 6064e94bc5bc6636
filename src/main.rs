//! FitLog - Exercise Session Tracker
//!
//! Main entry point for the command-line front end.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FitLog v{}", env!("CARGO_PKG_VERSION"));

    let args = cli::Cli::parse();

    if let Err(e) = cli::run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
