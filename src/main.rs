use std::process::ExitCode;

use clap::Parser;
use jira_commit::{app, cli::Args};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    app::run(&args)
}

/// Log to stderr as bare lines: no time, level or target
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .without_time()
        .with_level(false)
        .with_target(false)
        .init();
}
