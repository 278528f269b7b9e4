//! JSON wire format of the account API
//!
//! This module owns the envelope schema exchanged with the remote service
//! and the conversions between it and [`Account`]:
//! - `account_data` serializes a validated account for requests
//! - `account_from` rebuilds an account from a response
//!
//! Responses are trusted: `account_from` does not run the validation engine.
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Account, AccountClassification, Country};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Resource type tag of account payloads
pub const ACCOUNT_RESOURCE_TYPE: &str = "accounts";

/// Top level `{ "data": ..., "links": ... }` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Envelope {
            data,
            links: Links::default(),
        }
    }
}

/// Pagination links returned by list responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

impl Links {
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
            && self.last.is_none()
            && self.next.is_none()
            && self.prev.is_none()
            && self.self_link.is_none()
    }
}

/// One account resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountData {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: Uuid,
    pub organisation_id: Uuid,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
    pub attributes: AccountAttributes,
}

/// Routing and descriptive attributes of an account resource
///
/// Empty optional attributes are omitted when serializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAttributes {
    pub country: Country,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_name: Option<String>,
    #[serde(
        rename = "alternative_bank_account_names",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub alt_bank_account_names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_classification: AccountClassification,
    #[serde(default, deserialize_with = "null_as_default")]
    pub joint_account: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_matching_opt_out: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_identification: Option<String>,
}

fn is_zero(version: &u64) -> bool {
    *version == 0
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Convert a validated account into its request representation
///
/// Server timestamps are never sent.
pub fn account_data(account: &Account) -> AccountData {
    AccountData {
        resource_type: ACCOUNT_RESOURCE_TYPE.to_string(),
        id: account.id,
        organisation_id: account.organisation_id,
        version: account.version,
        created_on: None,
        modified_on: None,
        attributes: AccountAttributes {
            country: account.country,
            base_currency: account.base_currency.clone(),
            bank_id: account.bank_id.clone(),
            bank_id_code: account.bank_id_code.clone(),
            account_number: account.account_number.clone(),
            bic: account.bic.clone(),
            iban: account.iban.clone(),
            customer_id: account.customer_id.clone(),
            title: account.title.clone(),
            first_name: account.first_name.clone(),
            bank_account_name: account.bank_account_name.clone(),
            alt_bank_account_names: account.alt_bank_account_names.clone(),
            account_classification: account.account_classification,
            joint_account: account.joint_account,
            account_matching_opt_out: account.account_matching_opt_out,
            secondary_identification: account.secondary_identification.clone(),
        },
    }
}

/// Rebuild an account from a response resource
///
/// Empty strings sent by the server are treated as absent, matching how the
/// builder represents them.
pub fn account_from(data: AccountData) -> Account {
    let attributes = data.attributes;
    let present = |value: Option<String>| value.filter(|v| !v.is_empty());

    Account {
        id: data.id,
        organisation_id: data.organisation_id,
        version: data.version,
        created_on: data.created_on,
        modified_on: data.modified_on,
        country: attributes.country,
        bank_id_code: present(attributes.bank_id_code),
        bank_id: present(attributes.bank_id),
        bic: present(attributes.bic),
        iban: present(attributes.iban),
        base_currency: present(attributes.base_currency),
        account_number: present(attributes.account_number),
        customer_id: present(attributes.customer_id),
        title: present(attributes.title),
        first_name: present(attributes.first_name),
        bank_account_name: present(attributes.bank_account_name),
        alt_bank_account_names: attributes.alt_bank_account_names,
        account_classification: attributes.account_classification,
        joint_account: attributes.joint_account,
        account_matching_opt_out: attributes.account_matching_opt_out,
        secondary_identification: present(attributes.secondary_identification),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AccountBuilder;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    const ID: &str = "ad27e265-9605-4b4b-a0e5-3003ea9cc4dc";
    const ORG: &str = "eb0bd6f5-c3f5-44b2-b677-acd23cdde73c";

    fn minimal_gb_account() -> Account {
        let mut builder = AccountBuilder::new(Country::UnitedKingdom);
        builder
            .set_id(ID)
            .set_organisation_id(ORG)
            .set_bank_id("400300");
        builder.validate().unwrap()
    }

    #[test]
    fn test_request_envelope_omits_empty_attributes() {
        let envelope = Envelope::new(account_data(&minimal_gb_account()));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            json!({
                "data": {
                    "type": "accounts",
                    "id": ID,
                    "organisation_id": ORG,
                    "attributes": {
                        "country": "GB",
                        "bank_id": "400300",
                        "bank_id_code": "GBDSC",
                        "account_classification": "Personal",
                        "joint_account": false,
                        "account_matching_opt_out": false
                    }
                }
            })
        );
    }

    #[test]
    fn test_request_envelope_carries_descriptive_attributes() {
        let mut builder = AccountBuilder::from_account(&minimal_gb_account());
        builder.set_bic("NWBKGB22");
        builder
            .optional()
            .set_version(2)
            .set_base_currency("GBP")
            .set_alt_bank_account_names(["Sam Holder"])
            .set_account_classification("Business")
            .set_joint_account(true);
        let account = builder.validate().unwrap();

        let value = serde_json::to_value(Envelope::new(account_data(&account))).unwrap();
        let attributes = &value["data"]["attributes"];

        assert_eq!(value["data"]["version"], 2);
        assert_eq!(attributes["bic"], "NWBKGB22");
        assert_eq!(attributes["base_currency"], "GBP");
        assert_eq!(
            attributes["alternative_bank_account_names"],
            json!(["Sam Holder"])
        );
        assert_eq!(attributes["account_classification"], "Business");
        assert_eq!(attributes["joint_account"], true);
        assert_eq!(attributes.get("iban"), None);
        assert_eq!(value["data"].get("created_on"), None);
    }

    #[test]
    fn test_response_with_timestamps_is_trusted() {
        let body = json!({
            "data": {
                "type": "accounts",
                "id": ID,
                "organisation_id": ORG,
                "version": 4,
                "created_on": "2024-03-01T10:15:30.000Z",
                "modified_on": "2024-03-02T11:00:00.000Z",
                "attributes": {
                    "country": "US",
                    "bank_id": "12",
                    "bank_id_code": "USABA",
                    "iban": "",
                    "account_classification": "Business",
                    "account_matching_opt_out": true
                }
            },
            "links": { "self": "/v1/organisation/accounts/ad27e265-9605-4b4b-a0e5-3003ea9cc4dc" }
        });

        let envelope: Envelope<AccountData> = serde_json::from_value(body).unwrap();
        assert!(envelope.links.self_link.is_some());

        let account = account_from(envelope.data);
        assert_eq!(account.id().to_string(), ID);
        assert_eq!(account.version(), 4);
        assert_eq!(account.country(), Country::UnitedStates);
        // bank_id is invalid for US but responses are not re-validated
        assert_eq!(account.bank_id(), Some("12"));
        assert_eq!(account.iban(), None);
        assert_eq!(
            account.created_on(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap())
        );
        assert!(account.modified_on().is_some());
        assert!(!account.is_joint_account());
        assert!(account.is_account_matching_opt_out());
    }

    #[test]
    fn test_missing_classification_defaults_to_personal() {
        let body = json!({
            "type": "accounts",
            "id": ID,
            "organisation_id": ORG,
            "attributes": { "country": "NL" }
        });

        let account = account_from(serde_json::from_value(body).unwrap());
        assert_eq!(
            account.account_classification(),
            AccountClassification::Personal
        );
        assert_eq!(account.version(), 0);
    }

    #[test]
    fn test_null_attributes_decode_as_defaults() {
        let body = json!({
            "type": "accounts",
            "id": ID,
            "organisation_id": ORG,
            "version": 1,
            "attributes": {
                "country": "GB",
                "bank_id": "400300",
                "bic": null,
                "alternative_bank_account_names": null,
                "account_classification": null,
                "joint_account": null,
                "account_matching_opt_out": null
            }
        });

        let account = account_from(serde_json::from_value(body).unwrap());

        assert!(account.alt_bank_account_names().is_empty());
        assert_eq!(
            account.account_classification(),
            AccountClassification::Personal
        );
        assert!(!account.is_joint_account());
        assert!(!account.is_account_matching_opt_out());
        assert_eq!(account.bic(), None);
        assert_eq!(account.version(), 1);
    }

    #[test]
    fn test_list_with_null_alt_names_decodes_every_entry() {
        let body = json!({
            "data": [
                { "type": "accounts", "id": ID, "organisation_id": ORG,
                  "attributes": { "country": "BE", "bank_id": "123", "alternative_bank_account_names": null } },
                { "type": "accounts", "id": ORG, "organisation_id": ORG,
                  "attributes": { "country": "BE", "bank_id": "124", "alternative_bank_account_names": ["Dupont"] } }
            ]
        });

        let envelope: Envelope<Vec<AccountData>> = serde_json::from_value(body).unwrap();
        let accounts: Vec<Account> = envelope.data.into_iter().map(account_from).collect();

        assert_eq!(accounts.len(), 2);
        assert!(accounts[0].alt_bank_account_names().is_empty());
        assert_eq!(accounts[1].alt_bank_account_names(), ["Dupont".to_string()]);
    }

    #[test]
    fn test_list_envelope() {
        let body = json!({
            "data": [
                { "type": "accounts", "id": ID, "organisation_id": ORG, "attributes": { "country": "BE", "bank_id": "123" } }
            ],
            "links": { "first": "/v1/organisation/accounts?page%5Bnumber%5D=first", "last": "/v1/organisation/accounts?page%5Bnumber%5D=last" }
        });

        let envelope: Envelope<Vec<AccountData>> = serde_json::from_value(body).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert!(envelope.links.first.is_some());
        assert!(envelope.links.next.is_none());
    }

    #[test]
    fn test_unknown_country_fails_to_decode() {
        let body = json!({
            "type": "accounts",
            "id": ID,
            "organisation_id": ORG,
            "attributes": { "country": "XX" }
        });

        assert!(serde_json::from_value::<AccountData>(body).is_err());
    }

    #[test]
    fn test_outbound_then_inbound_preserves_account() {
        let account = minimal_gb_account();
        let bytes = serde_json::to_vec(&Envelope::new(account_data(&account))).unwrap();
        let envelope: Envelope<AccountData> = serde_json::from_slice(&bytes).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert!(value.get("links").is_none());
        assert_eq!(account_from(envelope.data), account);
    }
}
