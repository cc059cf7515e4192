//! # ISO / SD-JWT Name Mapping
//!
//! Static translation from plain-JWT/ISO claim names to SD-JWT claim
//! paths, and conversion of whole claim sets between the flat ISO shape
//! and the nested SD-JWT shape.
//!
//! ## Invariants
//!
//! - Every claim in [`CLAIM_NAMES`](crate::scheme::CLAIM_NAMES) is either mapped in [`ISO_TO_SD_JWT`]
//!   or listed in [`UNMAPPED_CLAIM_NAMES`], never both.
//! - [`ISO_TO_SD_JWT_DIFFERENCES`] is exactly the subset of
//!   [`ISO_TO_SD_JWT`] whose name changes.
//! - The mapping is not guaranteed to be injective; reverse lookup
//!   ([`iso_names_for`]) returns every ISO name that maps to a path.
//!
//! ## Value Shapes
//!
//! Two claims change value shape between representations:
//!
//! - `nationality` (string or array) becomes `nationalities` (array).
//! - `gender` (ISO/IEC 5218 code) becomes the code's name, e.g. `"female"`.
//!
//! Claims without a counterpart are dropped and logged at debug level.

use serde_json::{Map, Value as JsonValue};

use crate::error::PidError;
use crate::gender::IsoIec5218Gender;
use crate::scheme::{attributes as a, sd_jwt_attributes as s};
use crate::{EuPidCredential, EuPidCredentialSdJwt};

/// ISO/VC claim name to SD-JWT claim path, for every mapped claim.
pub const ISO_TO_SD_JWT: &[(&str, &str)] = &[
    (a::FAMILY_NAME, s::FAMILY_NAME),
    (a::GIVEN_NAME, s::GIVEN_NAME),
    (a::BIRTH_DATE, s::BIRTH_DATE),
    (a::AGE_OVER_12, s::AGE_EQUAL_OR_OVER_12),
    (a::AGE_OVER_13, s::AGE_EQUAL_OR_OVER_13),
    (a::AGE_OVER_14, s::AGE_EQUAL_OR_OVER_14),
    (a::AGE_OVER_16, s::AGE_EQUAL_OR_OVER_16),
    (a::AGE_OVER_18, s::AGE_EQUAL_OR_OVER_18),
    (a::AGE_OVER_21, s::AGE_EQUAL_OR_OVER_21),
    (a::AGE_OVER_25, s::AGE_EQUAL_OR_OVER_25),
    (a::AGE_OVER_60, s::AGE_EQUAL_OR_OVER_60),
    (a::AGE_OVER_62, s::AGE_EQUAL_OR_OVER_62),
    (a::AGE_OVER_65, s::AGE_EQUAL_OR_OVER_65),
    (a::AGE_OVER_68, s::AGE_EQUAL_OR_OVER_68),
    (a::AGE_IN_YEARS, s::AGE_IN_YEARS),
    (a::AGE_BIRTH_YEAR, s::AGE_BIRTH_YEAR),
    (a::FAMILY_NAME_BIRTH, s::FAMILY_NAME_BIRTH),
    (a::GIVEN_NAME_BIRTH, s::GIVEN_NAME_BIRTH),
    (a::BIRTH_COUNTRY, s::PLACE_OF_BIRTH_COUNTRY),
    (a::BIRTH_STATE, s::PLACE_OF_BIRTH_REGION),
    (a::BIRTH_CITY, s::PLACE_OF_BIRTH_LOCALITY),
    (a::RESIDENT_ADDRESS, s::ADDRESS_FORMATTED),
    (a::RESIDENT_COUNTRY, s::ADDRESS_COUNTRY),
    (a::RESIDENT_STATE, s::ADDRESS_REGION),
    (a::RESIDENT_CITY, s::ADDRESS_LOCALITY),
    (a::RESIDENT_POSTAL_CODE, s::ADDRESS_POSTAL_CODE),
    (a::RESIDENT_STREET, s::ADDRESS_STREET),
    (a::RESIDENT_HOUSE_NUMBER, s::ADDRESS_HOUSE_NUMBER),
    (a::GENDER, s::GENDER),
    (a::SEX, s::SEX),
    (a::NATIONALITY, s::NATIONALITIES),
    (a::ISSUANCE_DATE, s::ISSUANCE_DATE),
    (a::EXPIRY_DATE, s::EXPIRY_DATE),
    (a::ISSUING_AUTHORITY, s::ISSUING_AUTHORITY),
    (a::DOCUMENT_NUMBER, s::DOCUMENT_NUMBER),
    (a::ADMINISTRATIVE_NUMBER, s::ADMINISTRATIVE_NUMBER),
    (a::ISSUING_COUNTRY, s::ISSUING_COUNTRY),
    (a::ISSUING_JURISDICTION, s::ISSUING_JURISDICTION),
    (a::PERSONAL_ADMINISTRATIVE_NUMBER, s::PERSONAL_ADMINISTRATIVE_NUMBER),
    (a::PORTRAIT, s::PORTRAIT),
    (a::EMAIL_ADDRESS, s::EMAIL),
    (a::MOBILE_PHONE_NUMBER, s::PHONE_NUMBER),
    (a::TRUST_ANCHOR, s::TRUST_ANCHOR),
    (a::LOCATION_STATUS, s::LOCATION_STATUS),
];

/// Entries of [`ISO_TO_SD_JWT`] whose name changes.
pub const ISO_TO_SD_JWT_DIFFERENCES: &[(&str, &str)] = &[
    (a::BIRTH_DATE, s::BIRTH_DATE),
    (a::AGE_OVER_12, s::AGE_EQUAL_OR_OVER_12),
    (a::AGE_OVER_13, s::AGE_EQUAL_OR_OVER_13),
    (a::AGE_OVER_14, s::AGE_EQUAL_OR_OVER_14),
    (a::AGE_OVER_16, s::AGE_EQUAL_OR_OVER_16),
    (a::AGE_OVER_18, s::AGE_EQUAL_OR_OVER_18),
    (a::AGE_OVER_21, s::AGE_EQUAL_OR_OVER_21),
    (a::AGE_OVER_25, s::AGE_EQUAL_OR_OVER_25),
    (a::AGE_OVER_60, s::AGE_EQUAL_OR_OVER_60),
    (a::AGE_OVER_62, s::AGE_EQUAL_OR_OVER_62),
    (a::AGE_OVER_65, s::AGE_EQUAL_OR_OVER_65),
    (a::AGE_OVER_68, s::AGE_EQUAL_OR_OVER_68),
    (a::FAMILY_NAME_BIRTH, s::FAMILY_NAME_BIRTH),
    (a::GIVEN_NAME_BIRTH, s::GIVEN_NAME_BIRTH),
    (a::BIRTH_COUNTRY, s::PLACE_OF_BIRTH_COUNTRY),
    (a::BIRTH_STATE, s::PLACE_OF_BIRTH_REGION),
    (a::BIRTH_CITY, s::PLACE_OF_BIRTH_LOCALITY),
    (a::RESIDENT_ADDRESS, s::ADDRESS_FORMATTED),
    (a::RESIDENT_COUNTRY, s::ADDRESS_COUNTRY),
    (a::RESIDENT_STATE, s::ADDRESS_REGION),
    (a::RESIDENT_CITY, s::ADDRESS_LOCALITY),
    (a::RESIDENT_POSTAL_CODE, s::ADDRESS_POSTAL_CODE),
    (a::RESIDENT_STREET, s::ADDRESS_STREET),
    (a::RESIDENT_HOUSE_NUMBER, s::ADDRESS_HOUSE_NUMBER),
    (a::NATIONALITY, s::NATIONALITIES),
    (a::ISSUANCE_DATE, s::ISSUANCE_DATE),
    (a::EXPIRY_DATE, s::EXPIRY_DATE),
    (a::PORTRAIT, s::PORTRAIT),
    (a::EMAIL_ADDRESS, s::EMAIL),
    (a::MOBILE_PHONE_NUMBER, s::PHONE_NUMBER),
];

/// Claims intentionally carried only in the ISO/VC representations.
///
/// `birth_place` is free text with no structured SD-JWT counterpart;
/// `portrait_capture_date` has no SD-JWT claim.
pub const UNMAPPED_CLAIM_NAMES: &[&str] = &[a::BIRTH_PLACE, a::PORTRAIT_CAPTURE_DATE];

/// SD-JWT path for an ISO/VC claim name, or `None` if it has no mapping.
pub fn sd_jwt_name_for(name: &str) -> Option<&'static str> {
    ISO_TO_SD_JWT
        .iter()
        .find(|(iso, _)| *iso == name)
        .map(|(_, path)| *path)
}

/// Every ISO/VC claim name mapping to `path`; empty if none does.
pub fn iso_names_for(path: &str) -> Vec<&'static str> {
    ISO_TO_SD_JWT
        .iter()
        .filter(|(_, p)| *p == path)
        .map(|(iso, _)| *iso)
        .collect()
}

/// A dotted SD-JWT claim path, split into its segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SdJwtPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> SdJwtPath<'a> {
    /// Split `path` at dots.
    pub fn parse(path: &'a str) -> Self {
        Self {
            segments: path.split('.').collect(),
        }
    }

    /// All segments, outermost first.
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Enclosing object names; empty for top-level claims.
    pub fn parents(&self) -> &[&'a str] {
        &self.segments[..self.segments.len().saturating_sub(1)]
    }

    /// Member name within the innermost object.
    pub fn leaf(&self) -> &'a str {
        self.segments.last().copied().unwrap_or_default()
    }

    /// Whether the claim sits inside a nested object.
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }
}

impl std::fmt::Display for SdJwtPath<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Value at `path` in a nested claim set.
pub fn lookup_path<'v>(claims: &'v Map<String, JsonValue>, path: &SdJwtPath<'_>) -> Option<&'v JsonValue> {
    let (first, rest) = path.segments().split_first()?;
    rest.iter().try_fold(claims.get(*first)?, |value, segment| value.get(*segment))
}

/// Insert `value` at `path`, creating enclosing objects as needed.
///
/// Returns `false` without inserting if an enclosing member exists and is
/// not an object.
fn insert_path(claims: &mut Map<String, JsonValue>, path: &SdJwtPath<'_>, value: JsonValue) -> bool {
    let mut target = claims;
    for parent in path.parents() {
        let entry = target
            .entry(parent.to_string())
            .or_insert_with(|| JsonValue::Object(Map::new()));
        match entry {
            JsonValue::Object(map) => target = map,
            _ => return false,
        }
    }
    target.insert(path.leaf().to_string(), value);
    true
}

/// Nested SD-JWT claim set from a flat ISO/VC claim set.
///
/// Null values are skipped; claims without a mapping are dropped.
pub fn iso_claims_to_sd_jwt(claims: &Map<String, JsonValue>) -> Map<String, JsonValue> {
    let mut out = Map::new();
    for (name, value) in claims {
        if value.is_null() {
            continue;
        }
        let Some(path) = sd_jwt_name_for(name) else {
            tracing::debug!(claim = %name, "no SD-JWT mapping, dropping claim");
            continue;
        };
        let Some(value) = iso_value_to_sd_jwt(name, value) else {
            tracing::debug!(claim = %name, "value has no SD-JWT form, dropping claim");
            continue;
        };
        if !insert_path(&mut out, &SdJwtPath::parse(path), value) {
            tracing::debug!(claim = %name, path, "enclosing SD-JWT member is not an object, dropping claim");
        }
    }
    out
}

/// Flat ISO/VC claim set from a nested SD-JWT claim set.
///
/// Nested objects of the rule book (`age_equal_or_over`, `place_of_birth`,
/// `address`) are flattened into dotted paths first; claims without a
/// mapping are dropped.
pub fn sd_jwt_claims_to_iso(claims: &Map<String, JsonValue>) -> Map<String, JsonValue> {
    let mut out = Map::new();
    for (path, value) in flatten_claims(claims) {
        if value.is_null() {
            continue;
        }
        let names = iso_names_for(&path);
        if names.is_empty() {
            tracing::debug!(claim = %path, "no ISO mapping, dropping claim");
            continue;
        }
        for name in names {
            match sd_jwt_value_to_iso(name, value) {
                Some(v) => {
                    out.insert(name.to_string(), v);
                }
                None => tracing::debug!(claim = %path, "value has no ISO form, dropping claim"),
            }
        }
    }
    out
}

/// Dotted paths of a nested SD-JWT claim set, with their values.
///
/// Only the rule book's nested objects are descended into; any other
/// object value is kept whole.
pub fn flatten_claims(claims: &Map<String, JsonValue>) -> Vec<(String, &JsonValue)> {
    let mut flat = Vec::with_capacity(claims.len());
    for (key, value) in claims {
        match value {
            JsonValue::Object(members) if is_nested_prefix(key) => {
                flat.extend(members.iter().map(|(member, v)| (format!("{key}.{member}"), v)));
            }
            _ => flat.push((key.clone(), value)),
        }
    }
    flat
}

fn is_nested_prefix(key: &str) -> bool {
    matches!(key, s::PREFIX_AGE_EQUAL_OR_OVER | s::PREFIX_PLACE_OF_BIRTH | s::PREFIX_ADDRESS)
}

fn iso_value_to_sd_jwt(name: &str, value: &JsonValue) -> Option<JsonValue> {
    match name {
        a::NATIONALITY => match value {
            JsonValue::String(_) => Some(JsonValue::Array(vec![value.clone()])),
            JsonValue::Array(items) if items.iter().all(JsonValue::is_string) => Some(value.clone()),
            _ => None,
        },
        a::GENDER => {
            let gender = IsoIec5218Gender::from_code(value.as_u64()?)?;
            Some(JsonValue::String(gender.as_str().to_string()))
        }
        _ => Some(value.clone()),
    }
}

fn sd_jwt_value_to_iso(name: &str, value: &JsonValue) -> Option<JsonValue> {
    match name {
        a::GENDER => {
            let gender: IsoIec5218Gender = value.as_str()?.parse().ok()?;
            Some(JsonValue::from(gender.code()))
        }
        _ => Some(value.clone()),
    }
}

impl EuPidCredential {
    /// SD-JWT record with the same claims.
    ///
    /// `birth_place` and `portrait_capture_date` have no SD-JWT form and
    /// are not carried over.
    pub fn to_sd_jwt(&self) -> Result<EuPidCredentialSdJwt, PidError> {
        EuPidCredentialSdJwt::from_claims(&iso_claims_to_sd_jwt(&self.to_claims()?))
    }
}

impl EuPidCredentialSdJwt {
    /// Plain/ISO record with the same claims, for subject `id`.
    pub fn to_credential(&self, id: impl Into<String>) -> Result<EuPidCredential, PidError> {
        EuPidCredential::from_claims(id, &sd_jwt_claims_to_iso(&self.to_claims()?))
    }
}
