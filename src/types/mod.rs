//! Types module
//!
//! Contains core data structures used throughout the client.
//! This module organizes types into logical submodules:
//! - `country`: Supported countries and their format profiles (the registry)
//! - `account`: The validated, immutable account record
//! - `error`: Error types for the core and the transport

pub mod account;
pub mod country;
pub mod error;

pub use account::{Account, AccountClassification};
pub use country::{Country, CountryProfile, CountryRegistry, FieldRule};
pub use error::{AccountError, Field, TransportError, Violation};
