//! CSV format handling for account definitions and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - AccountCsvRecord structure for deserializing account definitions
//! - Conversion from CSV records to account builders
//! - Account output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::core::AccountBuilder;
use crate::types::Account;
use serde::Deserialize;
use std::io::Write;

/// Separator between entries of `alternative_bank_account_names`
pub const ALT_NAME_SEPARATOR: char = ';';

/// One account definition row
///
/// Every column is optional in the header; missing columns take their
/// default. Values are passed to the builder verbatim and checked only when
/// the builder is validated.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AccountCsvRecord {
    pub country: String,
    pub id: String,
    pub organisation_id: String,
    pub bank_id: String,
    pub bank_id_code: Option<String>,
    pub bic: String,
    pub iban: String,
    pub base_currency: String,
    pub account_number: String,
    pub customer_id: String,
    pub title: String,
    pub first_name: String,
    pub bank_account_name: String,
    pub alternative_bank_account_names: String,
    pub account_classification: Option<String>,
    pub joint_account: Option<bool>,
    pub account_matching_opt_out: Option<bool>,
    pub secondary_identification: String,
    pub version: Option<u64>,
}

/// Convert an AccountCsvRecord to an AccountBuilder
///
/// This function:
/// - Resolves the country code (unsupported codes are an error)
/// - Copies essential and optional attributes into the builder
/// - Splits alternative account names on `;`
/// - Keeps the country's default bank ID code unless the row overrides it
///
/// # Arguments
///
/// * `record` - The deserialized CSV record
///
/// # Returns
///
/// Result containing either:
/// - Ok(AccountBuilder) - Builder ready for validation
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(record: AccountCsvRecord) -> Result<AccountBuilder, String> {
    let mut builder =
        AccountBuilder::for_country_code(&record.country).map_err(|e| e.to_string())?;

    builder
        .set_id(record.id)
        .set_organisation_id(record.organisation_id)
        .set_bank_id(record.bank_id)
        .set_bic(record.bic)
        .set_iban(record.iban);
    if let Some(code) = record.bank_id_code.filter(|code| !code.is_empty()) {
        builder.set_bank_id_code(code);
    }

    let alt_names = record
        .alternative_bank_account_names
        .split(ALT_NAME_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let mut optional = builder.optional();
    optional
        .set_version(record.version.unwrap_or_default())
        .set_base_currency(record.base_currency)
        .set_account_number(record.account_number)
        .set_customer_id(record.customer_id)
        .set_title(record.title)
        .set_first_name(record.first_name)
        .set_bank_account_name(record.bank_account_name)
        .set_alt_bank_account_names(alt_names)
        .set_joint_account(record.joint_account.unwrap_or_default())
        .set_account_matching_opt_out(record.account_matching_opt_out.unwrap_or_default())
        .set_secondary_identification(record.secondary_identification);
    if let Some(classification) = record
        .account_classification
        .filter(|classification| !classification.is_empty())
    {
        optional.set_account_classification(classification);
    }

    Ok(builder)
}

/// Write accounts to CSV format
///
/// Writes one row per account with the identity, routing and classification
/// columns. Accounts are written in the order given.
///
/// # Arguments
///
/// * `accounts` - Slice of accounts to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "id",
            "organisation_id",
            "version",
            "country",
            "bank_id_code",
            "bank_id",
            "bic",
            "iban",
            "account_number",
            "base_currency",
            "account_classification",
            "bank_account_name",
            "created_on",
            "modified_on",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for account in accounts {
        writer
            .write_record(&[
                account.id().to_string(),
                account.organisation_id().to_string(),
                account.version().to_string(),
                account.country().to_string(),
                account.bank_id_code().unwrap_or_default().to_string(),
                account.bank_id().unwrap_or_default().to_string(),
                account.bic().unwrap_or_default().to_string(),
                account.iban().unwrap_or_default().to_string(),
                account.account_number().unwrap_or_default().to_string(),
                account.base_currency().unwrap_or_default().to_string(),
                account.account_classification().to_string(),
                account.bank_account_name().unwrap_or_default().to_string(),
                account
                    .created_on()
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
                account
                    .modified_on()
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
