//! Validated account record
//!
//! An [`Account`] can only be produced by `AccountBuilder::validate()` or by
//! decoding a response from the account API. It has no setters; to change an
//! account, seed a new builder with `AccountBuilder::from_account` and
//! validate again.

use super::country::Country;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Classification of an account holder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountClassification {
    #[default]
    Personal,
    Business,
}

impl AccountClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountClassification::Personal => "Personal",
            AccountClassification::Business => "Business",
        }
    }
}

impl fmt::Display for AccountClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountClassification {
    type Err = String;

    /// Exact, case-sensitive match on "Personal" or "Business"
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Personal" => Ok(AccountClassification::Personal),
            "Business" => Ok(AccountClassification::Business),
            other => Err(format!(
                "must be one of Personal, Business; got '{}'",
                other
            )),
        }
    }
}

impl From<AccountClassification> for String {
    fn from(classification: AccountClassification) -> Self {
        classification.as_str().to_string()
    }
}

/// Immutable, validated bank account
///
/// Empty optional attributes are represented as `None`. Timestamps are set
/// only by the remote service and are `None` on locally built accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub(crate) id: Uuid,
    pub(crate) organisation_id: Uuid,
    pub(crate) version: u64,
    pub(crate) created_on: Option<DateTime<Utc>>,
    pub(crate) modified_on: Option<DateTime<Utc>>,

    pub(crate) country: Country,
    pub(crate) bank_id_code: Option<String>,
    pub(crate) bank_id: Option<String>,
    pub(crate) bic: Option<String>,
    pub(crate) iban: Option<String>,

    pub(crate) base_currency: Option<String>,
    pub(crate) account_number: Option<String>,
    pub(crate) customer_id: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) first_name: Option<String>,
    pub(crate) bank_account_name: Option<String>,
    pub(crate) alt_bank_account_names: Vec<String>,
    pub(crate) account_classification: AccountClassification,
    pub(crate) joint_account: bool,
    pub(crate) account_matching_opt_out: bool,
    pub(crate) secondary_identification: Option<String>,
}

impl Account {
    /// Unique identifier of the account
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Identifier of the owning organisation
    pub fn organisation_id(&self) -> Uuid {
        self.organisation_id
    }

    /// Version of the record on the server. Must be supplied when patching or deleting.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// When the server created the account
    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.created_on
    }

    /// When the server last modified the account
    pub fn modified_on(&self) -> Option<DateTime<Utc>> {
        self.modified_on
    }

    pub fn country(&self) -> Country {
        self.country
    }

    /// Local clearing scheme the bank ID follows, e.g. `GBDSC`
    pub fn bank_id_code(&self) -> Option<&str> {
        self.bank_id_code.as_deref()
    }

    /// Local country bank identifier. Format depends on the country.
    pub fn bank_id(&self) -> Option<&str> {
        self.bank_id.as_deref()
    }

    /// SWIFT BIC in either 8 or 11 character format, e.g. `NWBKGB22`
    pub fn bic(&self) -> Option<&str> {
        self.bic.as_deref()
    }

    pub fn iban(&self) -> Option<&str> {
        self.iban.as_deref()
    }

    /// ISO 4217 base currency, e.g. `GBP`
    pub fn base_currency(&self) -> Option<&str> {
        self.base_currency.as_deref()
    }

    pub fn account_number(&self) -> Option<&str> {
        self.account_number.as_deref()
    }

    /// Free-format reference linking the account to an external system
    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    /// Account holder's title, e.g. Ms, Dr, Mr
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Primary account name, used for Confirmation of Payee matching
    pub fn bank_account_name(&self) -> Option<&str> {
        self.bank_account_name.as_deref()
    }

    /// Up to three alternative account names for Confirmation of Payee
    pub fn alt_bank_account_names(&self) -> &[String] {
        &self.alt_bank_account_names
    }

    pub fn account_classification(&self) -> AccountClassification {
        self.account_classification
    }

    pub fn is_joint_account(&self) -> bool {
        self.joint_account
    }

    /// True if the account opted out of account matching, e.g. Confirmation of Payee
    pub fn is_account_matching_opt_out(&self) -> bool {
        self.account_matching_opt_out
    }

    /// Secondary identification, e.g. building society roll number
    pub fn secondary_identification(&self) -> Option<&str> {
        self.secondary_identification.as_deref()
    }
}

/// Map an accumulated string to an optional attribute, empty meaning absent
pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Personal", Ok(AccountClassification::Personal))]
    #[case("Business", Ok(AccountClassification::Business))]
    #[case("business", Err(()))]
    #[case("Corporate", Err(()))]
    #[case("", Err(()))]
    fn test_classification_parsing(
        #[case] input: &str,
        #[case] expected: Result<AccountClassification, ()>,
    ) {
        assert_eq!(input.parse::<AccountClassification>().map_err(|_| ()), expected);
    }

    #[test]
    fn test_classification_defaults_to_personal() {
        assert_eq!(
            AccountClassification::default(),
            AccountClassification::Personal
        );
    }

    #[test]
    fn test_classification_into_string() {
        let value: String = AccountClassification::Business.into();
        assert_eq!(value, "Business");
    }

    #[rstest]
    #[case("", None)]
    #[case("GBP", Some("GBP".to_string()))]
    fn test_non_empty(#[case] input: &str, #[case] expected: Option<String>) {
        assert_eq!(non_empty(input), expected);
    }
}
