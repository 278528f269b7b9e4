//! Command execution
//!
//! Runs one parsed subcommand. Accounts are written to `output` as CSV;
//! diagnostics go through `tracing` so the output stays machine-readable.
//!
//! Batch commands (`validate`, `create`) keep going past bad rows: each
//! rejected row is logged at `warn` and skipped. Only failures that stop the
//! whole command (unreadable input, unusable configuration, a failed
//! single-account request) are returned as errors.

use crate::cli::args::{CliArgs, Command};
use crate::io::{write_accounts_csv, DefinitionReader, HttpClient};
use crate::types::Account;
use std::io::Write;
use std::path::Path;

/// Run the subcommand in `args`
///
/// # Arguments
///
/// * `args` - Parsed command-line arguments
/// * `output` - Writer receiving CSV account output
///
/// # Errors
///
/// Returns an error message if the command could not complete.
pub async fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), String> {
    match &args.command {
        Command::Validate { input_file } => {
            let accounts = validate_definitions(input_file)?;
            write_accounts_csv(&accounts, output)
        }
        Command::Create { input_file } => {
            let client = connect(args)?;
            let accounts = validate_definitions(input_file)?;

            let mut created = Vec::with_capacity(accounts.len());
            for account in &accounts {
                match client.create(account).await {
                    Ok(account) => created.push(account),
                    Err(e) => {
                        tracing::warn!(id = %account.id(), error = %e, "failed to create account")
                    }
                }
            }
            tracing::info!(
                created = created.len(),
                failed = accounts.len() - created.len(),
                "create finished"
            );

            write_accounts_csv(&created, output)
        }
        Command::Fetch { account_id } => {
            let account = connect(args)?
                .fetch(account_id)
                .await
                .map_err(|e| e.to_string())?;
            write_accounts_csv(std::slice::from_ref(&account), output)
        }
        Command::List { .. } => {
            let pagination = args.command.pagination();
            let accounts = connect(args)?
                .list(pagination.as_ref())
                .await
                .map_err(|e| e.to_string())?;
            write_accounts_csv(&accounts, output)
        }
        Command::Delete {
            account_id,
            version,
        } => {
            connect(args)?
                .delete(account_id, *version)
                .await
                .map_err(|e| e.to_string())?;
            tracing::info!(id = %account_id, version, "account deleted");
            Ok(())
        }
        Command::Health => {
            if connect(args)?.is_healthy().await {
                writeln!(output, "healthy").map_err(|e| format!("Failed to write output: {}", e))
            } else {
                Err(format!("account API at {} is not healthy", args.api_host))
            }
        }
    }
}

/// Read and validate every account definition in `path`
///
/// Rows that fail to parse or validate are logged and skipped.
///
/// # Errors
///
/// Returns an error message if the file could not be opened.
pub fn validate_definitions(path: &Path) -> Result<Vec<Account>, String> {
    let mut reader = DefinitionReader::new(path)?;
    let mut accounts = Vec::new();
    let mut rejected = 0usize;

    while let Some(row) = reader.next() {
        match row.and_then(|builder| {
            builder
                .validate()
                .map_err(|e| format!("Line {}: {}", reader.line(), e))
        }) {
            Ok(account) => accounts.push(account),
            Err(e) => {
                rejected += 1;
                tracing::warn!(error = %e, "account definition rejected");
            }
        }
    }

    tracing::info!(valid = accounts.len(), rejected, "account definitions validated");
    Ok(accounts)
}

fn connect(args: &CliArgs) -> Result<HttpClient, String> {
    HttpClient::new(&args.to_client_config()).map_err(|e| e.to_string())
}
