//! I/O module
//!
//! Handles everything that crosses the process boundary.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (definition rows, account output)
//! - `definition_reader` - CSV reader over account definitions with iterator interface
//! - `wire_format` - JSON envelope exchanged with the account API
//! - `http_client` - Async HTTP transport for the account API

pub mod csv_format;
pub mod definition_reader;
pub mod http_client;
pub mod wire_format;

pub use csv_format::{convert_csv_record, write_accounts_csv, AccountCsvRecord};
pub use definition_reader::DefinitionReader;
pub use http_client::{ClientConfig, HttpClient, PageNumber, Pagination};
pub use wire_format::{account_data, account_from, AccountData, Envelope, Links};
