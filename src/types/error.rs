//! Error types for the account API client
//!
//! Two disjoint families live here:
//!
//! - [`AccountError`] is returned by the core (registry, builder, validation).
//!   It is pure data: the core never logs and never retries.
//! - [`TransportError`] is returned by the HTTP collaborator and covers URL,
//!   network, status and decoding failures.
//!
//! Validation failures are always aggregated: a single `ValidationFailed`
//! carries every violated rule so callers can fix all fields in one go.

use std::fmt;
use thiserror::Error;

/// Attribute a validation rule is attached to
///
/// Displays as the wire attribute name so violations can be mapped back to
/// request payloads directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    OrganisationId,
    Country,
    BankId,
    Bic,
    Iban,
    BaseCurrency,
    Title,
    FirstName,
    BankAccountName,
    AltBankAccountNames,
    AccountClassification,
    SecondaryIdentification,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::OrganisationId => "organisation_id",
            Field::Country => "country",
            Field::BankId => "bank_id",
            Field::Bic => "bic",
            Field::Iban => "iban",
            Field::BaseCurrency => "base_currency",
            Field::Title => "title",
            Field::FirstName => "first_name",
            Field::BankAccountName => "bank_account_name",
            Field::AltBankAccountNames => "alternative_bank_account_names",
            Field::AccountClassification => "account_classification",
            Field::SecondaryIdentification => "secondary_identification",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The offending attribute
    pub field: Field,
    /// Human readable description of the broken rule
    pub reason: String,
}

impl Violation {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Violation {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Errors produced by the account construction core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountError {
    /// One or more rules failed during `validate()`
    ///
    /// The list is complete: both the country pass and the generic pass
    /// have run before this is returned.
    #[error("account validation failed: {}", join_violations(violations))]
    ValidationFailed {
        /// Every violated rule, country rules first
        violations: Vec<Violation>,
    },

    /// Country code outside the supported set
    ///
    /// Raised before any field-level check when a builder or profile is
    /// requested for an unknown code.
    #[error("unsupported country code '{code}'")]
    UnsupportedCountry {
        /// The rejected code, verbatim
        code: String,
    },
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AccountError {
    /// Create a ValidationFailed error
    pub fn validation_failed(violations: Vec<Violation>) -> Self {
        AccountError::ValidationFailed { violations }
    }

    /// Create an UnsupportedCountry error
    pub fn unsupported_country(code: &str) -> Self {
        AccountError::UnsupportedCountry {
            code: code.to_string(),
        }
    }

    /// Violations carried by this error, empty for configuration errors
    pub fn violations(&self) -> &[Violation] {
        match self {
            AccountError::ValidationFailed { violations } => violations,
            AccountError::UnsupportedCountry { .. } => &[],
        }
    }

    /// Whether any violation targets `field`
    pub fn has_violation(&self, field: Field) -> bool {
        self.violations().iter().any(|v| v.field == field)
    }
}

/// Errors produced by the HTTP transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// API host or endpoint could not be parsed or joined
    #[error("invalid API url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Identifier passed to a command is not a valid UUID
    #[error("provided account ID must be a valid UUID: '{id}'")]
    InvalidIdentifier {
        /// The rejected identifier
        id: String,
    },

    /// Network failure or client construction failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a status other than the expected one
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// Received HTTP status code
        status: u16,
        /// Raw response body, usually an API error message
        body: String,
    },

    /// Response body could not be decoded into the wire schema
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TransportError {
    /// Create an InvalidIdentifier error
    pub fn invalid_identifier(id: &str) -> Self {
        TransportError::InvalidIdentifier { id: id.to_string() }
    }

    /// Create an UnexpectedStatus error
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        TransportError::UnexpectedStatus {
            status,
            body: body.into(),
        }
    }
}
