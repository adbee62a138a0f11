//! Rulecheck - Main Entry Point
//!
//! Lints rule-set documents so malformed rules are caught before a test
//! suite runs them.

mod cli;
mod lint;

use std::process::ExitCode;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Command, LintArgs, USAGE, parse_args};
use crate::lint::{lint_file, placeholder_hooks};

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries one line per document
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match parse_args(std::env::args().skip(1)) {
        Ok(Command::Lint(args)) => run_lint(args).await,
        Ok(Command::Help) => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("rulecheck {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

async fn run_lint(args: LintArgs) -> ExitCode {
    let hooks = placeholder_hooks(&args.hooks);
    let mut failed = 0_usize;

    for path in &args.files {
        let report = lint_file(path, &hooks).await;
        if !report.is_ok() {
            failed += 1;
        }
        println!("{report}");
    }

    tracing::info!(documents = args.files.len(), failed, "lint finished");

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
