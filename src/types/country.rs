//! Country registry for the account API client
//!
//! Maps the closed set of supported ISO 3166 country codes to their account
//! format profile: the default bank ID code (local clearing scheme) and the
//! structural constraints on `bank_id`, `bic` and `iban`.
//!
//! The table is plain data. Adding a country means adding a `Country`
//! variant and one row to `PROFILES`, in the same position.

use crate::types::error::AccountError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Countries supported by the account API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "GB")]
    UnitedKingdom,
    #[serde(rename = "AU")]
    Australia,
    #[serde(rename = "BE")]
    Belgium,
    #[serde(rename = "CA")]
    Canada,
    #[serde(rename = "FR")]
    France,
    #[serde(rename = "DE")]
    Germany,
    #[serde(rename = "GR")]
    Greece,
    #[serde(rename = "HK")]
    HongKong,
    #[serde(rename = "IT")]
    Italy,
    #[serde(rename = "LU")]
    Luxembourg,
    #[serde(rename = "NL")]
    Netherlands,
    #[serde(rename = "PL")]
    Poland,
    #[serde(rename = "PT")]
    Portugal,
    #[serde(rename = "ES")]
    Spain,
    #[serde(rename = "CH")]
    Switzerland,
    #[serde(rename = "US")]
    UnitedStates,
}

impl Country {
    /// Every supported country, in `PROFILES` order
    pub const ALL: [Country; 16] = [
        Country::UnitedKingdom,
        Country::Australia,
        Country::Belgium,
        Country::Canada,
        Country::France,
        Country::Germany,
        Country::Greece,
        Country::HongKong,
        Country::Italy,
        Country::Luxembourg,
        Country::Netherlands,
        Country::Poland,
        Country::Portugal,
        Country::Spain,
        Country::Switzerland,
        Country::UnitedStates,
    ];

    /// ISO 3166-1 alpha-2 code
    pub fn code(self) -> &'static str {
        self.profile().code
    }

    /// Default bank ID code for accounts in this country
    ///
    /// Empty for countries without a local clearing scheme (NL).
    pub fn bank_id_code(self) -> &'static str {
        self.profile().bank_id_code
    }

    /// Format profile for this country
    pub fn profile(self) -> &'static CountryProfile {
        &PROFILES[self as usize]
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = AccountError;

    /// Parse an exact, upper case country code
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        PROFILES
            .iter()
            .find(|profile| profile.code == code)
            .map(|profile| profile.country)
            .ok_or_else(|| AccountError::unsupported_country(code))
    }
}

/// Structural constraint on a single routing attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Any value, including empty
    Unconstrained,
    /// Value must have one of the listed character lengths
    Length(&'static [usize]),
    /// Empty is allowed; a present value must have one of the listed lengths
    OptionalLength(&'static [usize]),
    /// Value must be empty
    Forbidden,
}

impl FieldRule {
    /// Check `value` against this rule
    ///
    /// Returns the violation reason on failure. Lengths are counted in
    /// characters.
    pub fn check(&self, value: &str) -> Result<(), String> {
        let len = value.chars().count();
        match self {
            FieldRule::Unconstrained => Ok(()),
            FieldRule::Forbidden if len == 0 => Ok(()),
            FieldRule::Forbidden => Err("must be empty for this country".to_string()),
            FieldRule::OptionalLength(_) if len == 0 => Ok(()),
            FieldRule::Length(allowed) | FieldRule::OptionalLength(allowed) => {
                if allowed.contains(&len) {
                    Ok(())
                } else {
                    Err(format!(
                        "length must be {} characters, got {}",
                        describe_lengths(allowed),
                        len
                    ))
                }
            }
        }
    }
}

fn describe_lengths(allowed: &[usize]) -> String {
    allowed
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Account format profile of one country
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryProfile {
    pub country: Country,
    pub code: &'static str,
    /// Default local clearing scheme identifier
    pub bank_id_code: &'static str,
    pub bank_id: FieldRule,
    pub bic: FieldRule,
    pub iban: FieldRule,
}

const BIC_8_OR_11: FieldRule = FieldRule::OptionalLength(&[8, 11]);

const fn profile(
    country: Country,
    code: &'static str,
    bank_id_code: &'static str,
    bank_id: FieldRule,
    bic: FieldRule,
    iban: FieldRule,
) -> CountryProfile {
    CountryProfile {
        country,
        code,
        bank_id_code,
        bank_id,
        bic,
        iban,
    }
}

use FieldRule::{Forbidden, Length, Unconstrained};

#[rustfmt::skip]
static PROFILES: [CountryProfile; 16] = [
    profile(Country::UnitedKingdom, "GB", "GBDSC", Length(&[6]),      BIC_8_OR_11,   Unconstrained),
    profile(Country::Australia,     "AU", "AUBSB", Unconstrained,     BIC_8_OR_11,   Forbidden),
    profile(Country::Belgium,       "BE", "BE",    Length(&[3]),      Unconstrained, Unconstrained),
    profile(Country::Canada,        "CA", "CACPA", Unconstrained,     BIC_8_OR_11,   Forbidden),
    profile(Country::France,        "FR", "FR",    Length(&[10]),     Unconstrained, Unconstrained),
    profile(Country::Germany,       "DE", "DEBLZ", Length(&[8]),      Unconstrained, Unconstrained),
    profile(Country::Greece,        "GR", "GRBIC", Length(&[7]),      Unconstrained, Unconstrained),
    profile(Country::HongKong,      "HK", "HKNCC", Unconstrained,     BIC_8_OR_11,   Forbidden),
    profile(Country::Italy,         "IT", "ITNCC", Length(&[10, 11]), Unconstrained, Unconstrained),
    profile(Country::Luxembourg,    "LU", "LULUX", Length(&[3]),      Unconstrained, Unconstrained),
    profile(Country::Netherlands,   "NL", "",      Forbidden,         BIC_8_OR_11,   Unconstrained),
    profile(Country::Poland,        "PL", "PLKNR", Length(&[8]),      Unconstrained, Unconstrained),
    profile(Country::Portugal,      "PT", "PTNCC", Length(&[8]),      Unconstrained, Unconstrained),
    profile(Country::Spain,         "ES", "ESNCC", Length(&[8]),      Unconstrained, Unconstrained),
    profile(Country::Switzerland,   "CH", "CHBCC", Length(&[5]),      Unconstrained, Unconstrained),
    profile(Country::UnitedStates,  "US", "USABA", Length(&[9]),      BIC_8_OR_11,   Forbidden),
];

/// Read-only lookup over the static country table
///
/// The table is immutable process-wide data, so lookups are safe from any
/// thread without synchronisation.
pub struct CountryRegistry;

impl CountryRegistry {
    /// Resolve the profile for a country code
    ///
    /// # Errors
    ///
    /// Returns `AccountError::UnsupportedCountry` for codes outside the
    /// supported set. Matching is exact and case-sensitive.
    pub fn profile_for(code: &str) -> Result<&'static CountryProfile, AccountError> {
        code.parse::<Country>().map(Country::profile)
    }

    /// All profiles, one per supported country
    pub fn profiles() -> &'static [CountryProfile] {
        &PROFILES
    }

    /// Whether `code` names a supported country
    pub fn is_supported(code: &str) -> bool {
        Self::profile_for(code).is_ok()
    }
}
