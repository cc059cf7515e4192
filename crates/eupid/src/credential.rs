//! # EU PID Credential Subject (plain JWT / ISO)
//!
//! [`EuPidCredential`] is the flat claim record shared by the plain-JWT VC
//! representation (as the `credentialSubject`) and the ISO mobile document
//! (one `IssuerSignedItem` per field in the `eu.europa.ec.eudi.pid.1`
//! namespace). Every field serializes under its name from
//! [`attributes`](crate::scheme::attributes).
//!
//! ## Wire Contract
//!
//! - Unknown incoming fields are ignored, so claims added by later rule
//!   book revisions do not break decoding.
//! - Absent optional fields are omitted from the output, never `null`.
//! - `portrait` is compared and hashed by content.

use std::any::Any;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use vck_core::iso::{self, IssuerSignedItem};
use vck_core::subject::tagged_json;
use vck_core::{CredentialSubject, LocalDateOrInstant, VckError};

use crate::error::PidError;
use crate::gender::IsoIec5218Gender;
use crate::initializer::init_with_vck;
use crate::nationality::Nationality;
use crate::portrait::Portrait;
use crate::scheme::{attributes as a, DEPRECATED_CLAIM_NAMES, ISO_NAMESPACE, REQUIRED_CLAIM_NAMES, VC_TYPE};

const ID: &str = "id";

/// EU PID claims for plain-JWT VCs and ISO mobile documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EuPidCredential {
    /// Subject identifier.
    pub id: String,

    /// Current family name(s), text.
    pub family_name: String,

    /// Current given name(s), text.
    pub given_name: String,

    /// Date of birth, `YYYY-MM-DD`; full-date in ISO.
    pub birth_date: NaiveDate,

    /// Whether the holder is 12 or older.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_12: Option<bool>,

    /// Whether the holder is 13 or older.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_13: Option<bool>,

    /// Whether the holder is 14 or older.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_14: Option<bool>,

    /// Whether the holder is 16 or older.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_16: Option<bool>,

    /// Mandatory age attestation.
    pub age_over_18: bool,

    /// Whether the holder is 21 or older.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_21: Option<bool>,

    /// Whether the holder is 25 or older.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_25: Option<bool>,

    /// Whether the holder is 60 or older.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_60: Option<bool>,

    /// Whether the holder is 62 or older.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_62: Option<bool>,

    /// Whether the holder is 65 or older.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_65: Option<bool>,

    /// Whether the holder is 68 or older.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_68: Option<bool>,

    /// Current age in years, unsigned integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_in_years: Option<u32>,

    /// Year of birth, unsigned integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_birth_year: Option<u32>,

    /// Family name(s) at birth, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name_birth: Option<String>,

    /// Given name(s) at birth, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name_birth: Option<String>,

    /// Place of birth as free text. ISO/VC only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,

    /// Deprecated, see [`a::BIRTH_COUNTRY`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_country: Option<String>,

    /// Deprecated, see [`a::BIRTH_STATE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_state: Option<String>,

    /// Deprecated, see [`a::BIRTH_CITY`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_city: Option<String>,

    /// Full address of residence, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_address: Option<String>,

    /// Country of residence, alpha-2 code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_country: Option<String>,

    /// State, province or district of residence, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_state: Option<String>,

    /// Municipality of residence, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_city: Option<String>,

    /// Postal code of residence, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_postal_code: Option<String>,

    /// Street of residence, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_street: Option<String>,

    /// House number of residence, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_house_number: Option<String>,

    /// Deprecated, see [`a::GENDER`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<IsoIec5218Gender>,

    /// Sex, ISO/IEC 5218 based unsigned integer code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<u32>,

    /// Nationality, an alpha-2 code or an array of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<Nationality>,

    /// Start of validity, a date or an instant.
    pub issuance_date: LocalDateOrInstant,

    /// End of validity, a date or an instant.
    pub expiry_date: LocalDateOrInstant,

    /// Issuing authority name, or the issuing country's alpha-2 code.
    pub issuing_authority: String,

    /// Number of the PID document, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,

    /// Deprecated, see [`a::ADMINISTRATIVE_NUMBER`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative_number: Option<String>,

    /// Issuing country, alpha-2 code.
    pub issuing_country: String,

    /// Issuing subdivision, ISO 3166-2 code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuing_jurisdiction: Option<String>,

    /// Number assigned by the provider for administrative purposes, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_administrative_number: Option<String>,

    /// Facial image; base64url in JSON, byte string in ISO.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<Portrait>,

    /// Date the portrait was taken, `YYYY-MM-DD`. ISO/VC only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait_capture_date: Option<NaiveDate>,

    /// Electronic mail address, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,

    /// Mobile phone number with country code, text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone_number: Option<String>,

    /// URL of a trust anchor for verifying the PID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_anchor: Option<String>,

    /// Location of status information for the PID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_status: Option<String>,
}

impl EuPidCredential {
    /// Record with the mandatory claims; every optional claim is absent.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        family_name: impl Into<String>,
        given_name: impl Into<String>,
        birth_date: NaiveDate,
        age_over_18: bool,
        issuance_date: impl Into<LocalDateOrInstant>,
        expiry_date: impl Into<LocalDateOrInstant>,
        issuing_authority: impl Into<String>,
        issuing_country: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            family_name: family_name.into(),
            given_name: given_name.into(),
            birth_date,
            age_over_12: None,
            age_over_13: None,
            age_over_14: None,
            age_over_16: None,
            age_over_18,
            age_over_21: None,
            age_over_25: None,
            age_over_60: None,
            age_over_62: None,
            age_over_65: None,
            age_over_68: None,
            age_in_years: None,
            age_birth_year: None,
            family_name_birth: None,
            given_name_birth: None,
            birth_place: None,
            birth_country: None,
            birth_state: None,
            birth_city: None,
            resident_address: None,
            resident_country: None,
            resident_state: None,
            resident_city: None,
            resident_postal_code: None,
            resident_street: None,
            resident_house_number: None,
            gender: None,
            sex: None,
            nationality: None,
            issuance_date: issuance_date.into(),
            expiry_date: expiry_date.into(),
            issuing_authority: issuing_authority.into(),
            document_number: None,
            administrative_number: None,
            issuing_country: issuing_country.into(),
            issuing_jurisdiction: None,
            personal_administrative_number: None,
            portrait: None,
            portrait_capture_date: None,
            email_address: None,
            mobile_phone_number: None,
            trust_anchor: None,
            location_status: None,
        }
    }

    /// Nationality, if given as a single code.
    pub fn nationality(&self) -> Option<&str> {
        self.nationality.as_ref()?.single()
    }

    /// Nationalities, if given as an array of codes.
    pub fn nationalities(&self) -> Option<&[String]> {
        self.nationality.as_ref()?.many()
    }

    /// Deprecated claims this record populates, for callers that warn.
    pub fn deprecated_claims_in_use(&self) -> Vec<&'static str> {
        let populated = [
            (a::BIRTH_COUNTRY, self.birth_country.is_some()),
            (a::BIRTH_STATE, self.birth_state.is_some()),
            (a::BIRTH_CITY, self.birth_city.is_some()),
            (a::GENDER, self.gender.is_some()),
            (a::ADMINISTRATIVE_NUMBER, self.administrative_number.is_some()),
        ];
        debug_assert!(populated.iter().all(|(name, _)| DEPRECATED_CLAIM_NAMES.contains(name)));
        populated
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }

    /// Flat claim set, without the subject `id`.
    pub fn to_claims(&self) -> Result<Map<String, JsonValue>, PidError> {
        let mut claims = match serde_json::to_value(self)? {
            JsonValue::Object(map) => map,
            _ => return Err(VckError::invalid_claim(ID, "record did not serialize to an object").into()),
        };
        claims.remove(ID);
        Ok(claims)
    }

    /// Record from a flat claim set and a subject `id`.
    ///
    /// Fails with [`PidError::MissingClaim`] naming the first absent
    /// mandatory claim.
    pub fn from_claims(id: impl Into<String>, claims: &Map<String, JsonValue>) -> Result<Self, PidError> {
        if let Some(missing) = REQUIRED_CLAIM_NAMES
            .iter()
            .find(|name| claims.get(**name).map_or(true, JsonValue::is_null))
        {
            return Err(PidError::MissingClaim(missing.to_string()));
        }
        let mut claims = claims.clone();
        claims.insert(ID.to_string(), JsonValue::String(id.into()));
        Ok(serde_json::from_value(JsonValue::Object(claims))?)
    }

    /// ISO items for the `eu.europa.ec.eudi.pid.1` namespace.
    ///
    /// Registers the scheme with the host first if needed. A nationality
    /// that is neither a string nor an array of strings has no element
    /// encoding and is left out.
    pub fn to_iso_items(&self) -> Result<Vec<IssuerSignedItem>, PidError> {
        init_with_vck()?;
        let mut claims = self.to_claims()?;
        if self.nationality.as_ref().is_some_and(|n| !n.is_recognized()) {
            tracing::debug!(claim = a::NATIONALITY, "nationality has no ISO form, dropping claim");
            claims.remove(a::NATIONALITY);
        }
        Ok(iso::items_from_json(ISO_NAMESPACE, &claims)?)
    }

    /// Record from ISO items of the `eu.europa.ec.eudi.pid.1` namespace.
    pub fn from_iso_items(id: impl Into<String>, items: &[IssuerSignedItem]) -> Result<Self, PidError> {
        init_with_vck()?;
        Self::from_claims(id, &iso::claims_to_json(ISO_NAMESPACE, items))
    }
}

impl CredentialSubject for EuPidCredential {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_tag(&self) -> &'static str {
        VC_TYPE
    }

    fn to_json(&self) -> Result<JsonValue, VckError> {
        tagged_json(self, VC_TYPE)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
