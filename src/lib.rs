//! Account API Client Library
//! # Overview
//!
//! This library builds and validates bank account records before they are
//! exchanged with a remote account-management service.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Country registry, Account, errors)
//! - [`core`] - Account construction:
//!   - [`core::builder`] - Essential/optional attribute accumulation and `validate`
//!   - [`core::validation`] - Country-specific and generic rule passes
//! - [`io`] - CSV definitions and output, JSON wire format, HTTP transport
//! - [`cli`] - CLI arguments parsing and command execution
//!
//! # Building an Account
//!
//! ```
//! use account_api_client::{AccountBuilder, Country};
//!
//! let mut builder = AccountBuilder::new(Country::UnitedKingdom);
//! builder
//!     .set_id("ad27e265-9605-4b4b-a0e5-3003ea9cc4dc")
//!     .set_organisation_id("eb0bd6f5-c3f5-44b2-b677-acd23cdde73c")
//!     .set_bank_id("400300")
//!     .set_bic("NWBKGB22");
//! builder.optional().set_bank_account_name("Samantha Holder");
//!
//! let account = builder.validate().unwrap();
//! assert_eq!(account.bank_id_code(), Some("GBDSC"));
//! ```
//!
//! # Validation
//!
//! `validate` runs two passes and reports every violation at once:
//!
//! - **Country pass**: `bank_id`, `bic` and `iban` against the country profile
//! - **Generic pass**: identifiers, country, descriptive field lengths and the
//!   account classification
//!
//! A validated [`Account`] is immutable. To change one, seed a new builder
//! with [`AccountBuilder::from_account`] and validate again.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{AccountBuilder, ValidationEngine};
pub use io::{write_accounts_csv, ClientConfig, HttpClient};
pub use types::{
    Account, AccountClassification, AccountError, Country, CountryRegistry, Field,
    TransportError, Violation,
};
