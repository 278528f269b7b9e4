//! Account API CLI
//!
//! Command-line interface for validating bank account definitions and
//! exchanging accounts with the account API.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- validate accounts.csv > valid.csv
//! cargo run -- --api-host http://localhost:8080 create accounts.csv > created.csv
//! cargo run -- fetch ad27e265-9605-4b4b-a0e5-3003ea9cc4dc
//! cargo run -- list --page first --page-size 50
//! cargo run -- delete ad27e265-9605-4b4b-a0e5-3003ea9cc4dc --version 0
//! cargo run -- health
//! ```
//!
//! Accounts are written to stdout as CSV. Logs go to stderr and are
//! filtered with `RUST_LOG` (default `info`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, invalid configuration, request failed, unhealthy service, etc.)

use account_api_client::cli;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Logs on stderr, CSV on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
