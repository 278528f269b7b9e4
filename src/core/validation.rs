//! Account validation engine
//!
//! Decides whether the attributes accumulated by an `AccountBuilder` form a
//! legal account. Two passes run on every call:
//!
//! 1. **Country pass**: the `bank_id`, `bic` and `iban` rules from the
//!    country's [`CountryProfile`]. Skipped when the country is unsupported,
//!    which the generic pass reports instead.
//! 2. **Generic pass**: identifiers, country membership, ISO currency shape,
//!    length/cardinality limits on descriptive fields and the
//!    classification enum.
//!
//! Both passes always run and every violation is returned together, so a
//! caller never has to fix one field at a time. The engine holds no state;
//! each call is independent.

use crate::core::builder::{EssentialAttributes, OptionalAttributes};
use crate::types::{
    AccountClassification, AccountError, Country, CountryProfile, Field, Violation,
};
use iso_currency::Currency;
use uuid::Uuid;

/// Maximum length of `title` and `first_name`
pub const MAX_NAME_CHARS: usize = 40;

/// Maximum length of account names and secondary identification
pub const MAX_ACCOUNT_NAME_CHARS: usize = 140;

/// Maximum number of alternative bank account names
pub const MAX_ALT_NAMES: usize = 3;

/// Typed values extracted while validating
///
/// Returned only when every rule passed, so the builder can assemble an
/// account without re-parsing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedKeys {
    pub id: Uuid,
    pub organisation_id: Uuid,
    pub country: Country,
    pub account_classification: AccountClassification,
}

/// Stateless rule evaluator
pub struct ValidationEngine;

impl ValidationEngine {
    /// Run both passes over the accumulated attributes
    ///
    /// # Returns
    ///
    /// * `Ok(ValidatedKeys)` - every rule passed
    /// * `Err(AccountError::ValidationFailed)` - the complete list of
    ///   violations, country rules first
    pub fn validate(
        essential: &EssentialAttributes,
        optional: &OptionalAttributes,
    ) -> Result<ValidatedKeys, AccountError> {
        let country = essential.country.parse::<Country>();

        let mut violations = match &country {
            Ok(country) => Self::country_pass(essential, country.profile()),
            Err(_) => Vec::new(),
        };

        let id = uuid_rule(Field::Id, &essential.id);
        let organisation_id = uuid_rule(Field::OrganisationId, &essential.organisation_id);
        let account_classification = optional
            .account_classification
            .parse::<AccountClassification>()
            .map_err(|reason| Violation::new(Field::AccountClassification, reason));
        let country = country.map_err(|e| Violation::new(Field::Country, e.to_string()));

        violations.extend(id.as_ref().err().cloned());
        violations.extend(organisation_id.as_ref().err().cloned());
        violations.extend(country.as_ref().err().cloned());
        violations.extend(Self::optional_pass(optional));
        violations.extend(account_classification.as_ref().err().cloned());

        match (id, organisation_id, country, account_classification) {
            (Ok(id), Ok(organisation_id), Ok(country), Ok(account_classification))
                if violations.is_empty() =>
            {
                Ok(ValidatedKeys {
                    id,
                    organisation_id,
                    country,
                    account_classification,
                })
            }
            _ => Err(AccountError::validation_failed(violations)),
        }
    }

    /// Country-specific routing rules
    pub fn country_pass(
        essential: &EssentialAttributes,
        profile: &CountryProfile,
    ) -> Vec<Violation> {
        [
            (Field::BankId, profile.bank_id, essential.bank_id.as_str()),
            (Field::Bic, profile.bic, essential.bic.as_str()),
            (Field::Iban, profile.iban, essential.iban.as_str()),
        ]
        .into_iter()
        .filter_map(|(field, rule, value)| {
            rule.check(value)
                .err()
                .map(|reason| Violation::new(field, format!("{} ({})", reason, profile.code)))
        })
        .collect()
    }

    /// Length, cardinality and format rules on descriptive attributes
    ///
    /// The classification enum is checked by `validate` since it also yields
    /// the typed value.
    pub fn optional_pass(optional: &OptionalAttributes) -> Vec<Violation> {
        let mut violations = Vec::new();

        if !optional.base_currency.is_empty() && !is_currency_code(&optional.base_currency) {
            violations.push(Violation::new(
                Field::BaseCurrency,
                format!(
                    "must be an ISO 4217 code, got '{}'",
                    optional.base_currency
                ),
            ));
        }

        let limited = [
            (Field::Title, &optional.title, MAX_NAME_CHARS),
            (Field::FirstName, &optional.first_name, MAX_NAME_CHARS),
            (
                Field::BankAccountName,
                &optional.bank_account_name,
                MAX_ACCOUNT_NAME_CHARS,
            ),
            (
                Field::SecondaryIdentification,
                &optional.secondary_identification,
                MAX_ACCOUNT_NAME_CHARS,
            ),
        ];
        violations.extend(
            limited
                .into_iter()
                .filter_map(|(field, value, max)| max_chars_rule(field, value, max)),
        );

        let names = &optional.alt_bank_account_names;
        if names.len() > MAX_ALT_NAMES {
            violations.push(Violation::new(
                Field::AltBankAccountNames,
                format!(
                    "must have at most {} entries, got {}",
                    MAX_ALT_NAMES,
                    names.len()
                ),
            ));
        }
        for (index, name) in names.iter().enumerate() {
            let len = name.chars().count();
            if len > MAX_ACCOUNT_NAME_CHARS {
                violations.push(Violation::new(
                    Field::AltBankAccountNames,
                    format!(
                        "entry {} must be at most {} characters, got {}",
                        index, MAX_ACCOUNT_NAME_CHARS, len
                    ),
                ));
            }
        }

        violations
    }
}

/// Required, canonical hyphenated UUID
fn uuid_rule(field: Field, value: &str) -> Result<Uuid, Violation> {
    if value.is_empty() {
        return Err(Violation::new(field, "is required"));
    }
    // parse_str also accepts simple, braced and urn forms
    if value.len() != 36 {
        return Err(Violation::new(
            field,
            format!("must be a hyphenated UUID, got '{}'", value),
        ));
    }
    Uuid::parse_str(value)
        .map_err(|_| Violation::new(field, format!("must be a valid UUID, got '{}'", value)))
}

fn max_chars_rule(field: Field, value: &str, max: usize) -> Option<Violation> {
    let len = value.chars().count();
    (len > max).then(|| {
        Violation::new(
            field,
            format!("must be at most {} characters, got {}", max, len),
        )
    })
}

fn is_currency_code(value: &str) -> bool {
    Currency::from_code(value).is_some()
}
