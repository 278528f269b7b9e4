use crate::io::http_client::{
    ClientConfig, PageNumber, Pagination, DEFAULT_API_ENDPOINT, DEFAULT_API_HOST, DEFAULT_TIMEOUT,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Default page size used by `list --page`
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Validate bank account definitions and exchange them with the account API
#[derive(Parser, Debug)]
#[command(name = "account-api")]
#[command(about = "Validate bank account definitions and exchange them with the account API", long_about = None)]
pub struct CliArgs {
    /// Base URL of the account API
    #[arg(
        long = "api-host",
        value_name = "URL",
        global = true,
        default_value = DEFAULT_API_HOST,
        help = "Scheme and authority of the account API"
    )]
    pub api_host: String,

    /// Path of the accounts collection
    #[arg(
        long = "api-endpoint",
        value_name = "PATH",
        global = true,
        default_value = DEFAULT_API_ENDPOINT,
        help = "Path of the accounts collection on the API host"
    )]
    pub api_endpoint: String,

    /// Request timeout in seconds
    #[arg(
        long = "timeout-secs",
        value_name = "SECONDS",
        global = true,
        help = "Whole-request timeout in seconds (default: 30)"
    )]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Validate account definitions and print the valid accounts as CSV
    Validate {
        #[arg(value_name = "INPUT", help = "Path to the account definitions CSV file")]
        input_file: PathBuf,
    },
    /// Validate account definitions and create the valid ones on the server
    Create {
        #[arg(value_name = "INPUT", help = "Path to the account definitions CSV file")]
        input_file: PathBuf,
    },
    /// Fetch one account by ID
    Fetch {
        #[arg(value_name = "ID")]
        account_id: String,
    },
    /// List accounts, optionally one page at a time
    List {
        #[arg(long, value_name = "PAGE", help = "Page to fetch: 'first', 'last' or a page number")]
        page: Option<PageNumber>,
        #[arg(
            long = "page-size",
            value_name = "SIZE",
            default_value_t = DEFAULT_PAGE_SIZE,
            help = "Accounts per page (used with --page)"
        )]
        page_size: u32,
    },
    /// Delete one version of an account
    Delete {
        #[arg(value_name = "ID")]
        account_id: String,
        #[arg(long, value_name = "VERSION")]
        version: u64,
    },
    /// Check the health endpoint of the account API
    Health,
}

impl CliArgs {
    /// Create a ClientConfig from CLI arguments
    ///
    /// A missing or zero timeout falls back to the default.
    pub fn to_client_config(&self) -> ClientConfig {
        let timeout = self
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        ClientConfig::new(self.api_host.clone(), self.api_endpoint.clone(), timeout)
    }
}

impl Command {
    /// Pagination requested by `list`, if any
    pub fn pagination(&self) -> Option<Pagination> {
        match self {
            Command::List {
                page: Some(page),
                page_size,
            } => Some(Pagination::new(*page, *page_size)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ID: &str = "ad27e265-9605-4b4b-a0e5-3003ea9cc4dc";

    #[rstest]
    #[case::validate(
        &["program", "validate", "accounts.csv"],
        Command::Validate { input_file: PathBuf::from("accounts.csv") }
    )]
    #[case::create(
        &["program", "create", "accounts.csv"],
        Command::Create { input_file: PathBuf::from("accounts.csv") }
    )]
    #[case::fetch(&["program", "fetch", ID], Command::Fetch { account_id: ID.to_string() })]
    #[case::list_all(&["program", "list"], Command::List { page: None, page_size: 100 })]
    #[case::list_page(
        &["program", "list", "--page", "last", "--page-size", "5"],
        Command::List { page: Some(PageNumber::Last), page_size: 5 }
    )]
    #[case::delete(
        &["program", "delete", ID, "--version", "2"],
        Command::Delete { account_id: ID.to_string(), version: 2 }
    )]
    #[case::health(&["program", "health"], Command::Health)]
    fn test_subcommand_parsing(#[case] args: &[&str], #[case] expected: Command) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.command, expected);
    }

    #[rstest]
    #[case::defaults(&["program", "health"], "http://localhost:8080", "/v1/organisation/accounts", 30)]
    #[case::custom_host(
        &["program", "--api-host", "http://accounts.test", "health"],
        "http://accounts.test",
        "/v1/organisation/accounts",
        30
    )]
    #[case::flags_after_subcommand(
        &["program", "fetch", ID, "--api-endpoint", "/v2/accounts", "--timeout-secs", "5"],
        "http://localhost:8080",
        "/v2/accounts",
        5
    )]
    #[case::zero_timeout(&["program", "--timeout-secs", "0", "health"], "http://localhost:8080", "/v1/organisation/accounts", 30)]
    fn test_client_config_conversion(
        #[case] args: &[&str],
        #[case] expected_host: &str,
        #[case] expected_endpoint: &str,
        #[case] expected_timeout_secs: u64,
    ) {
        let config = CliArgs::try_parse_from(args).unwrap().to_client_config();

        assert_eq!(config.api_host, expected_host);
        assert_eq!(config.api_endpoint, expected_endpoint);
        assert_eq!(config.timeout, Duration::from_secs(expected_timeout_secs));
    }

    #[rstest]
    #[case::no_page(&["program", "list", "--page-size", "5"], None)]
    #[case::numbered(
        &["program", "list", "--page", "3"],
        Some(Pagination::new(PageNumber::Number(3), 100))
    )]
    #[case::not_list(&["program", "health"], None)]
    fn test_pagination(#[case] args: &[&str], #[case] expected: Option<Pagination>) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.command.pagination(), expected);
    }

    #[rstest]
    #[case::missing_subcommand(&["program"])]
    #[case::missing_input(&["program", "validate"])]
    #[case::missing_version(&["program", "delete", ID])]
    #[case::negative_version(&["program", "delete", ID, "--version", "-1"])]
    #[case::invalid_page(&["program", "list", "--page", "next"])]
    #[case::invalid_timeout(&["program", "--timeout-secs", "soon", "health"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
