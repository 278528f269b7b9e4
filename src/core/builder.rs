//! Account builder
//!
//! The builder is the only way to create an [`Account`]. It accumulates two
//! groups of attributes:
//!
//! - **Essential**: identity and routing (`id`, `organisation_id`, `bank_id`,
//!   `bic`, `iban`), set directly on [`AccountBuilder`].
//! - **Optional**: descriptive attributes, set through the
//!   [`OptionalSetters`] facade returned by [`AccountBuilder::optional`].
//!
//! Setters store values verbatim and never fail. All checks are deferred to
//! [`AccountBuilder::validate`], which either returns a complete account or
//! every violated rule at once.
//!
//! # Examples
//!
//! ```
//! use account_api_client::core::AccountBuilder;
//! use account_api_client::types::Country;
//!
//! let mut builder = AccountBuilder::new(Country::UnitedKingdom);
//! builder
//!     .set_id("ad27e265-9605-4b4b-a0e5-3003ea9cc4dc")
//!     .set_organisation_id("eb0bd6f5-c3f5-44b2-b677-acd23cdde73c")
//!     .set_bank_id("400300");
//! builder.optional().set_title("Dr").set_first_name("Ada");
//!
//! let account = builder.validate().unwrap();
//! assert_eq!(account.bank_id_code(), Some("GBDSC"));
//! ```

use crate::core::validation::ValidationEngine;
use crate::types::account::non_empty;
use crate::types::{Account, AccountClassification, AccountError, Country};
use chrono::{DateTime, Utc};

/// Identity and routing attributes, as accumulated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EssentialAttributes {
    pub id: String,
    pub organisation_id: String,
    pub country: String,
    pub bank_id_code: String,
    pub bank_id: String,
    pub bic: String,
    pub iban: String,
}

/// Descriptive attributes, as accumulated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionalAttributes {
    pub version: u64,
    pub account_number: String,
    pub base_currency: String,
    pub customer_id: String,
    pub title: String,
    pub first_name: String,
    pub bank_account_name: String,
    pub alt_bank_account_names: Vec<String>,
    pub account_classification: String,
    pub secondary_identification: String,
    pub joint_account: bool,
    pub account_matching_opt_out: bool,
}

/// Mutable accumulator for one in-progress account
///
/// Not meant to be shared: use one builder per account under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBuilder {
    essential: EssentialAttributes,
    optional: OptionalAttributes,
    // Server-assigned, carried through unchanged when rebuilding a fetched account
    created_on: Option<DateTime<Utc>>,
    modified_on: Option<DateTime<Utc>>,
}

impl AccountBuilder {
    /// Create a builder for `country`
    ///
    /// Seeds the country code and its default bank ID code. The
    /// classification defaults to Personal.
    pub fn new(country: Country) -> Self {
        AccountBuilder {
            essential: EssentialAttributes {
                country: country.code().to_string(),
                bank_id_code: country.bank_id_code().to_string(),
                ..EssentialAttributes::default()
            },
            optional: OptionalAttributes {
                account_classification: AccountClassification::default().into(),
                ..OptionalAttributes::default()
            },
            created_on: None,
            modified_on: None,
        }
    }

    /// Create a builder from a raw country code
    ///
    /// # Errors
    ///
    /// Returns `AccountError::UnsupportedCountry` if `code` is not in the
    /// supported set.
    pub fn for_country_code(code: &str) -> Result<Self, AccountError> {
        code.parse::<Country>().map(Self::new)
    }

    /// Seed a builder with every attribute of an existing account
    ///
    /// This is the amend path: the builder carries the account's `id` and
    /// `version`, setters change what is needed, and `validate` produces a
    /// fresh account.
    pub fn from_account(account: &Account) -> Self {
        let text = |value: Option<&str>| value.unwrap_or_default().to_string();

        AccountBuilder {
            essential: EssentialAttributes {
                id: account.id().to_string(),
                organisation_id: account.organisation_id().to_string(),
                country: account.country().code().to_string(),
                bank_id_code: text(account.bank_id_code()),
                bank_id: text(account.bank_id()),
                bic: text(account.bic()),
                iban: text(account.iban()),
            },
            optional: OptionalAttributes {
                version: account.version(),
                account_number: text(account.account_number()),
                base_currency: text(account.base_currency()),
                customer_id: text(account.customer_id()),
                title: text(account.title()),
                first_name: text(account.first_name()),
                bank_account_name: text(account.bank_account_name()),
                alt_bank_account_names: account.alt_bank_account_names().to_vec(),
                account_classification: account.account_classification().into(),
                secondary_identification: text(account.secondary_identification()),
                joint_account: account.is_joint_account(),
                account_matching_opt_out: account.is_account_matching_opt_out(),
            },
            created_on: account.created_on(),
            modified_on: account.modified_on(),
        }
    }

    /// Account ID. A UUID, required for all accounts.
    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.essential.id = id.into();
        self
    }

    /// Organisation ID. A UUID, required for all accounts.
    pub fn set_organisation_id(&mut self, organisation_id: impl Into<String>) -> &mut Self {
        self.essential.organisation_id = organisation_id.into();
        self
    }

    /// Local country bank identifier. Format depends on the country.
    pub fn set_bank_id(&mut self, bank_id: impl Into<String>) -> &mut Self {
        self.essential.bank_id = bank_id.into();
        self
    }

    /// Override the country's default bank ID code
    pub fn set_bank_id_code(&mut self, bank_id_code: impl Into<String>) -> &mut Self {
        self.essential.bank_id_code = bank_id_code.into();
        self
    }

    /// SWIFT BIC in either 8 or 11 character format, e.g. `NWBKGB22`
    pub fn set_bic(&mut self, bic: impl Into<String>) -> &mut Self {
        self.essential.bic = bic.into();
        self
    }

    /// IBAN of the account. Not accepted for every country.
    pub fn set_iban(&mut self, iban: impl Into<String>) -> &mut Self {
        self.essential.iban = iban.into();
        self
    }

    /// Setters for descriptive attributes
    pub fn optional(&mut self) -> OptionalSetters<'_> {
        OptionalSetters {
            attributes: &mut self.optional,
        }
    }

    pub fn essential_attributes(&self) -> &EssentialAttributes {
        &self.essential
    }

    pub fn optional_attributes(&self) -> &OptionalAttributes {
        &self.optional
    }

    /// Validate the accumulated attributes and build the account
    ///
    /// The builder is left untouched, so a failed attempt can be corrected
    /// and validated again.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::ValidationFailed` carrying every violated
    /// rule. No account is produced in that case.
    pub fn validate(&self) -> Result<Account, AccountError> {
        let keys = ValidationEngine::validate(&self.essential, &self.optional)?;
        let essential = &self.essential;
        let optional = &self.optional;

        Ok(Account {
            id: keys.id,
            organisation_id: keys.organisation_id,
            version: optional.version,
            created_on: self.created_on,
            modified_on: self.modified_on,
            country: keys.country,
            bank_id_code: non_empty(&essential.bank_id_code),
            bank_id: non_empty(&essential.bank_id),
            bic: non_empty(&essential.bic),
            iban: non_empty(&essential.iban),
            base_currency: non_empty(&optional.base_currency),
            account_number: non_empty(&optional.account_number),
            customer_id: non_empty(&optional.customer_id),
            title: non_empty(&optional.title),
            first_name: non_empty(&optional.first_name),
            bank_account_name: non_empty(&optional.bank_account_name),
            alt_bank_account_names: optional.alt_bank_account_names.clone(),
            account_classification: keys.account_classification,
            joint_account: optional.joint_account,
            account_matching_opt_out: optional.account_matching_opt_out,
            secondary_identification: non_empty(&optional.secondary_identification),
        })
    }
}

/// Setters for the optional attribute group
///
/// Borrowed from an [`AccountBuilder`]; writes go straight into the
/// builder's accumulator.
pub struct OptionalSetters<'a> {
    attributes: &'a mut OptionalAttributes,
}

impl OptionalSetters<'_> {
    /// Version of the account. Must match the server's version when patching.
    pub fn set_version(&mut self, version: u64) -> &mut Self {
        self.attributes.version = version;
        self
    }

    /// Account number. Generated by the server if not provided.
    pub fn set_account_number(&mut self, account_number: impl Into<String>) -> &mut Self {
        self.attributes.account_number = account_number.into();
        self
    }

    /// ISO 4217 code of the base currency, e.g. `GBP`, `EUR`
    pub fn set_base_currency(&mut self, currency: impl Into<String>) -> &mut Self {
        self.attributes.base_currency = currency.into();
        self
    }

    /// Free-format reference linking the account to an external system
    pub fn set_customer_id(&mut self, customer_id: impl Into<String>) -> &mut Self {
        self.attributes.customer_id = customer_id.into();
        self
    }

    /// Account holder's title, up to 40 characters
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.attributes.title = title.into();
        self
    }

    /// Account holder's first name, up to 40 characters
    pub fn set_first_name(&mut self, first_name: impl Into<String>) -> &mut Self {
        self.attributes.first_name = first_name.into();
        self
    }

    /// Primary account name for Confirmation of Payee, up to 140 characters
    pub fn set_bank_account_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.attributes.bank_account_name = name.into();
        self
    }

    /// Up to 3 alternative account names, each up to 140 characters
    ///
    /// Replaces any names set before.
    pub fn set_alt_bank_account_names<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.alt_bank_account_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Personal or Business. Defaults to Personal.
    pub fn set_account_classification(&mut self, classification: impl Into<String>) -> &mut Self {
        self.attributes.account_classification = classification.into();
        self
    }

    pub fn set_joint_account(&mut self, joint_account: bool) -> &mut Self {
        self.attributes.joint_account = joint_account;
        self
    }

    /// Opt the account out of account matching, e.g. Confirmation of Payee
    pub fn set_account_matching_opt_out(&mut self, opt_out: bool) -> &mut Self {
        self.attributes.account_matching_opt_out = opt_out;
        self
    }

    /// Secondary identification, e.g. building society roll number, up to 140 characters
    pub fn set_secondary_identification(&mut self, secondary_id: impl Into<String>) -> &mut Self {
        self.attributes.secondary_identification = secondary_id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;
    use chrono::TimeZone;
    use uuid::Uuid;

    const ID: &str = "ad27e265-9605-4b4b-a0e5-3003ea9cc4dc";
    const ORG: &str = "eb0bd6f5-c3f5-44b2-b677-acd23cdde73c";

    fn gb_builder() -> AccountBuilder {
        let mut builder = AccountBuilder::new(Country::UnitedKingdom);
        builder
            .set_id(ID)
            .set_organisation_id(ORG)
            .set_bank_id("400300");
        builder
    }

    #[test]
    fn test_new_seeds_country_and_bank_id_code() {
        let builder = AccountBuilder::new(Country::Germany);
        assert_eq!(builder.essential_attributes().country, "DE");
        assert_eq!(builder.essential_attributes().bank_id_code, "DEBLZ");
        assert_eq!(
            builder.optional_attributes().account_classification,
            "Personal"
        );
    }

    #[test]
    fn test_for_country_code_rejects_unknown_code() {
        assert_eq!(
            AccountBuilder::for_country_code("XX"),
            Err(AccountError::unsupported_country("XX"))
        );
        assert!(AccountBuilder::for_country_code("PT").is_ok());
    }

    #[test]
    fn test_setters_store_verbatim() {
        let mut builder = AccountBuilder::new(Country::UnitedStates);
        builder
            .set_id("not a uuid")
            .set_bic("  bic ")
            .set_iban("anything");
        builder
            .optional()
            .set_title("t".repeat(100))
            .set_alt_bank_account_names(["a", "b", "c", "d"]);

        assert_eq!(builder.essential_attributes().id, "not a uuid");
        assert_eq!(builder.essential_attributes().bic, "  bic ");
        assert_eq!(builder.optional_attributes().title.len(), 100);
        assert_eq!(builder.optional_attributes().alt_bank_account_names.len(), 4);
    }

    #[test]
    fn test_validate_builds_account() {
        let mut builder = gb_builder();
        builder.set_bic("NWBKGB22");
        builder
            .optional()
            .set_version(3)
            .set_base_currency("GBP")
            .set_account_number("41426819")
            .set_customer_id("cust-1")
            .set_title("Dr")
            .set_first_name("Ada")
            .set_bank_account_name("Ada Lovelace")
            .set_alt_bank_account_names(["A Lovelace", "Countess Lovelace"])
            .set_account_classification(AccountClassification::Business)
            .set_joint_account(true)
            .set_account_matching_opt_out(true)
            .set_secondary_identification("roll-42");

        let account = builder.validate().unwrap();

        assert_eq!(account.id(), Uuid::parse_str(ID).unwrap());
        assert_eq!(account.organisation_id(), Uuid::parse_str(ORG).unwrap());
        assert_eq!(account.version(), 3);
        assert_eq!(account.country(), Country::UnitedKingdom);
        assert_eq!(account.bank_id_code(), Some("GBDSC"));
        assert_eq!(account.bank_id(), Some("400300"));
        assert_eq!(account.bic(), Some("NWBKGB22"));
        assert_eq!(account.iban(), None);
        assert_eq!(account.base_currency(), Some("GBP"));
        assert_eq!(account.account_number(), Some("41426819"));
        assert_eq!(account.customer_id(), Some("cust-1"));
        assert_eq!(account.title(), Some("Dr"));
        assert_eq!(account.first_name(), Some("Ada"));
        assert_eq!(account.bank_account_name(), Some("Ada Lovelace"));
        assert_eq!(
            account.alt_bank_account_names(),
            ["A Lovelace".to_string(), "Countess Lovelace".to_string()]
        );
        assert_eq!(
            account.account_classification(),
            AccountClassification::Business
        );
        assert!(account.is_joint_account());
        assert!(account.is_account_matching_opt_out());
        assert_eq!(account.secondary_identification(), Some("roll-42"));
        assert_eq!(account.created_on(), None);
        assert_eq!(account.modified_on(), None);
    }

    #[test]
    fn test_defaults_on_minimal_account() {
        let account = gb_builder().validate().unwrap();

        assert_eq!(account.version(), 0);
        assert_eq!(
            account.account_classification(),
            AccountClassification::Personal
        );
        assert!(!account.is_joint_account());
        assert!(!account.is_account_matching_opt_out());
        assert!(account.alt_bank_account_names().is_empty());
        assert_eq!(account.title(), None);
    }

    #[test]
    fn test_failed_validation_can_be_corrected() {
        let mut builder = gb_builder();
        builder.set_bank_id("12345");
        builder.optional().set_first_name("x".repeat(41));

        let error = builder.validate().unwrap_err();
        assert!(error.has_violation(Field::BankId));
        assert!(error.has_violation(Field::FirstName));

        builder.set_bank_id("123456");
        builder.optional().set_first_name("Ada");
        assert!(builder.validate().is_ok());
    }

    #[test]
    fn test_bank_id_code_override() {
        let mut builder = gb_builder();
        builder.set_bank_id_code("GBXYZ");
        assert_eq!(builder.validate().unwrap().bank_id_code(), Some("GBXYZ"));
    }

    #[test]
    fn test_netherlands_has_no_bank_id_code() {
        let mut builder = AccountBuilder::new(Country::Netherlands);
        builder.set_id(ID).set_organisation_id(ORG);
        let account = builder.validate().unwrap();
        assert_eq!(account.bank_id_code(), None);
        assert_eq!(account.bank_id(), None);
    }

    #[test]
    fn test_from_account_round_trip() {
        let mut builder = gb_builder();
        builder.set_iban("GB33BUKB20201555555555");
        builder
            .optional()
            .set_version(7)
            .set_title("Ms")
            .set_alt_bank_account_names(["one", "two", "three"])
            .set_account_classification("Business")
            .set_joint_account(true);
        let account = builder.validate().unwrap();

        let rebuilt = AccountBuilder::from_account(&account).validate().unwrap();
        assert_eq!(rebuilt, account);
    }

    #[test]
    fn test_from_account_keeps_server_timestamps() {
        let mut account = gb_builder().validate().unwrap();
        account.created_on = Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        account.modified_on = Some(Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap());

        let rebuilt = AccountBuilder::from_account(&account).validate().unwrap();
        assert_eq!(rebuilt, account);
        assert_eq!(rebuilt.created_on(), account.created_on());
    }

    #[test]
    fn test_from_account_then_amend() {
        let account = gb_builder().validate().unwrap();

        let mut builder = AccountBuilder::from_account(&account);
        builder.optional().set_version(1).set_first_name("Grace");
        let amended = builder.validate().unwrap();

        assert_eq!(amended.id(), account.id());
        assert_eq!(amended.version(), 1);
        assert_eq!(amended.first_name(), Some("Grace"));
        assert_eq!(account.first_name(), None);
    }
}
