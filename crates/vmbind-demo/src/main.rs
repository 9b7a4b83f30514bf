#![forbid(unsafe_code)]

//! vmbind demo binary.
//!
//! Loads a seed dataset, builds a provider, view-model, and view, and drives
//! the view's "next" hook from stdin (or a scripted press count).

mod app;
mod cli;
mod dataset;
mod error;

use std::io;
use std::process;

use tracing_subscriber::EnvFilter;

fn init_logging(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let opts = cli::Opts::parse();
    init_logging(&opts.log);

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = app::run(&opts, stdin.lock(), &mut stdout.lock()) {
        eprintln!("error: {err}");
        process::exit(err.exit_code());
    }
}
