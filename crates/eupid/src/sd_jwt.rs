//! # EU PID Credential (SD-JWT)
//!
//! Claim record of the SD-JWT representation, before selective-disclosure
//! redaction. Most claims are flat; age attestations, place of birth and
//! address are grouped in nested objects because SD-JWT discloses at the
//! granularity the rule book defines for them. Field names come from
//! [`sd_jwt_attributes`](crate::scheme::sd_jwt_attributes).
//!
//! Decoding ignores unknown fields; absent optional fields are omitted.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use vck_core::{LocalDateOrInstant, VckError};

use crate::error::PidError;
use crate::mapping::{lookup_path, SdJwtPath};
use crate::portrait::Portrait;
use crate::scheme::{sd_jwt_attributes as s, SD_JWT_REQUIRED_CLAIM_NAMES};

/// EU PID claims for SD-JWT.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EuPidCredentialSdJwt {
    /// `family_name`, text.
    pub family_name: String,

    /// `given_name`, text.
    pub given_name: String,

    /// `birthdate`, `YYYY-MM-DD`.
    #[serde(rename = "birthdate")]
    pub birth_date: NaiveDate,

    /// `age_equal_or_over` object; `18` is mandatory.
    pub age_equal_or_over: AgeEqualOrOver,

    /// `age_in_years`, unsigned integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_in_years: Option<u32>,

    /// `age_birth_year`, unsigned integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_birth_year: Option<u32>,

    /// `birth_family_name`, text.
    #[serde(rename = "birth_family_name", default, skip_serializing_if = "Option::is_none")]
    pub family_name_birth: Option<String>,

    /// `birth_given_name`, text.
    #[serde(rename = "birth_given_name", default, skip_serializing_if = "Option::is_none")]
    pub given_name_birth: Option<String>,

    /// `place_of_birth` object. Every member is deprecated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<PlaceOfBirth>,

    /// `address` object of residence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// Deprecated; the ISO/IEC 5218 name, e.g. `"female"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// `sex`, ISO/IEC 5218 based unsigned integer code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<u32>,

    /// `nationalities`, alpha-2 codes; serialized as a sorted array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationalities: Option<BTreeSet<String>>,

    /// `iat`, a date or an instant; epoch seconds accepted on decode.
    #[serde(rename = "iat")]
    pub issuance_date: LocalDateOrInstant,

    /// `exp`, a date or an instant; epoch seconds accepted on decode.
    #[serde(rename = "exp")]
    pub expiry_date: LocalDateOrInstant,

    /// `issuing_authority`, text.
    pub issuing_authority: String,

    /// `document_number`, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,

    /// `administrative_number`, text. Deprecated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative_number: Option<String>,

    /// `issuing_country`, alpha-2 code.
    pub issuing_country: String,

    /// `issuing_jurisdiction`, ISO 3166-2 code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuing_jurisdiction: Option<String>,

    /// `personal_administrative_number`, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_administrative_number: Option<String>,

    /// `picture`; base64url in JSON, byte string in CBOR.
    #[serde(rename = "picture", default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<Portrait>,

    /// `email`, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// `phone_number`, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// `trust_anchor`, URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_anchor: Option<String>,

    /// `location_status`, URL of status information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_status: Option<String>,
}

/// Members of `age_equal_or_over`. Only `18` is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgeEqualOrOver {
    /// Age attestation for 12, claim `"12"`.
    #[serde(rename = "12", default, skip_serializing_if = "Option::is_none")]
    pub equal_or_over_12: Option<bool>,

    /// Age attestation for 13, claim `"13"`.
    #[serde(rename = "13", default, skip_serializing_if = "Option::is_none")]
    pub equal_or_over_13: Option<bool>,

    /// Age attestation for 14, claim `"14"`.
    #[serde(rename = "14", default, skip_serializing_if = "Option::is_none")]
    pub equal_or_over_14: Option<bool>,

    /// Age attestation for 16, claim `"16"`.
    #[serde(rename = "16", default, skip_serializing_if = "Option::is_none")]
    pub equal_or_over_16: Option<bool>,

    /// Mandatory age attestation for 18, claim `"18"`.
    #[serde(rename = "18")]
    pub equal_or_over_18: bool,

    /// Age attestation for 21, claim `"21"`.
    #[serde(rename = "21", default, skip_serializing_if = "Option::is_none")]
    pub equal_or_over_21: Option<bool>,

    /// Age attestation for 25, claim `"25"`.
    #[serde(rename = "25", default, skip_serializing_if = "Option::is_none")]
    pub equal_or_over_25: Option<bool>,

    /// Age attestation for 60, claim `"60"`.
    #[serde(rename = "60", default, skip_serializing_if = "Option::is_none")]
    pub equal_or_over_60: Option<bool>,

    /// Age attestation for 62, claim `"62"`.
    #[serde(rename = "62", default, skip_serializing_if = "Option::is_none")]
    pub equal_or_over_62: Option<bool>,

    /// Age attestation for 65, claim `"65"`.
    #[serde(rename = "65", default, skip_serializing_if = "Option::is_none")]
    pub equal_or_over_65: Option<bool>,

    /// Age attestation for 68, claim `"68"`.
    #[serde(rename = "68", default, skip_serializing_if = "Option::is_none")]
    pub equal_or_over_68: Option<bool>,
}

impl AgeEqualOrOver {
    /// Only the mandatory 18+ attestation.
    pub fn new(equal_or_over_18: bool) -> Self {
        Self {
            equal_or_over_12: None,
            equal_or_over_13: None,
            equal_or_over_14: None,
            equal_or_over_16: None,
            equal_or_over_18,
            equal_or_over_21: None,
            equal_or_over_25: None,
            equal_or_over_60: None,
            equal_or_over_62: None,
            equal_or_over_65: None,
            equal_or_over_68: None,
        }
    }
}

/// Members of `place_of_birth`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceOfBirth {
    /// Alpha-2 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Region, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Locality, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
}

/// Members of `address`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// Full address as one string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,

    /// Alpha-2 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Region, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Locality, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    /// Postal code, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// `street_address`, text.
    #[serde(rename = "street_address", default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    /// House number, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
}

impl EuPidCredentialSdJwt {
    /// Record with the mandatory claims; every optional claim is absent.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        family_name: impl Into<String>,
        given_name: impl Into<String>,
        birth_date: NaiveDate,
        age_equal_or_over_18: bool,
        issuance_date: impl Into<LocalDateOrInstant>,
        expiry_date: impl Into<LocalDateOrInstant>,
        issuing_authority: impl Into<String>,
        issuing_country: impl Into<String>,
    ) -> Self {
        Self {
            family_name: family_name.into(),
            given_name: given_name.into(),
            birth_date,
            age_equal_or_over: AgeEqualOrOver::new(age_equal_or_over_18),
            age_in_years: None,
            age_birth_year: None,
            family_name_birth: None,
            given_name_birth: None,
            place_of_birth: None,
            address: None,
            gender: None,
            sex: None,
            nationalities: None,
            issuance_date: issuance_date.into(),
            expiry_date: expiry_date.into(),
            issuing_authority: issuing_authority.into(),
            document_number: None,
            administrative_number: None,
            issuing_country: issuing_country.into(),
            issuing_jurisdiction: None,
            personal_administrative_number: None,
            portrait: None,
            email: None,
            phone_number: None,
            trust_anchor: None,
            location_status: None,
        }
    }

    /// Deprecated claim paths this record populates.
    pub fn deprecated_claims_in_use(&self) -> Vec<&'static str> {
        let place = self.place_of_birth.as_ref();
        [
            (s::PLACE_OF_BIRTH_COUNTRY, place.and_then(|p| p.country.as_ref()).is_some()),
            (s::PLACE_OF_BIRTH_REGION, place.and_then(|p| p.region.as_ref()).is_some()),
            (s::PLACE_OF_BIRTH_LOCALITY, place.and_then(|p| p.locality.as_ref()).is_some()),
            (s::GENDER, self.gender.is_some()),
            (s::ADMINISTRATIVE_NUMBER, self.administrative_number.is_some()),
        ]
        .into_iter()
        .filter_map(|(path, set)| set.then_some(path))
        .collect()
    }

    /// Nested claim set, as fed to SD-JWT issuance.
    pub fn to_claims(&self) -> Result<Map<String, JsonValue>, PidError> {
        match serde_json::to_value(self)? {
            JsonValue::Object(map) => Ok(map),
            _ => Err(VckError::invalid_claim(s::FAMILY_NAME, "record did not serialize to an object").into()),
        }
    }

    /// Record from a nested claim set.
    ///
    /// Fails with [`PidError::MissingClaim`] naming the first absent
    /// mandatory claim path.
    pub fn from_claims(claims: &Map<String, JsonValue>) -> Result<Self, PidError> {
        if let Some(missing) = SD_JWT_REQUIRED_CLAIM_NAMES
            .iter()
            .find(|path| lookup_path(claims, &SdJwtPath::parse(path)).map_or(true, JsonValue::is_null))
        {
            return Err(PidError::MissingClaim(missing.to_string()));
        }
        Ok(serde_json::from_value(JsonValue::Object(claims.clone()))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> EuPidCredentialSdJwt {
        EuPidCredentialSdJwt::new(
            "Mustermann",
            "Erika",
            NaiveDate::from_ymd_opt(1984, 8, 12).unwrap(),
            true,
            LocalDateOrInstant::parse("2026-01-15T12:00:00Z").unwrap(),
            LocalDateOrInstant::parse("2036-01-14T12:00:00Z").unwrap(),
            "AT",
            "AT",
        )
    }

    #[test]
    fn nested_groups_serialize_as_objects() {
        let mut pid = minimal();
        pid.address = Some(Address {
            street: Some("Inffeldgasse".into()),
            house_number: Some("16a".into()),
            ..Address::default()
        });
        let json = serde_json::to_value(&pid).unwrap();
        assert_eq!(json["age_equal_or_over"], serde_json::json!({"18": true}));
        assert_eq!(
            json["address"],
            serde_json::json!({"street_address": "Inffeldgasse", "house_number": "16a"})
        );
        assert!(json.get("place_of_birth").is_none());
        assert_eq!(json["birthdate"], "1984-08-12");
        assert_eq!(json["iat"], "2026-01-15T12:00:00Z");
    }

    #[test]
    fn numeric_dates_are_accepted() {
        let mut claims = minimal().to_claims().unwrap();
        claims.insert("iat".into(), serde_json::json!(1768478400));
        let pid = EuPidCredentialSdJwt::from_claims(&claims).unwrap();
        assert_eq!(pid, minimal());
    }

    #[test]
    fn missing_nested_required_claim() {
        let mut claims = minimal().to_claims().unwrap();
        claims.insert("age_equal_or_over".into(), serde_json::json!({"21": true}));
        let err = EuPidCredentialSdJwt::from_claims(&claims).unwrap_err();
        assert!(matches!(err, PidError::MissingClaim(ref c) if c == "age_equal_or_over.18"));
    }

    #[test]
    fn deprecated_paths_are_reported() {
        let mut pid = minimal();
        assert!(pid.deprecated_claims_in_use().is_empty());
        pid.place_of_birth = Some(PlaceOfBirth {
            locality: Some("Graz".into()),
            ..PlaceOfBirth::default()
        });
        pid.gender = Some("female".into());
        assert_eq!(pid.deprecated_claims_in_use(), ["place_of_birth.locality", "gender"]);
    }
}
