//! # Registration with the Host
//!
//! [`init_with_vck`] plugs the EU PID scheme into the host registry: the
//! scheme descriptor, [`EuPidCredential`] as the `EuPid2023` credential
//! subject, the JSON value encoder, and an item value codec for every
//! claim whose type cannot be inferred from its CBOR encoding.
//!
//! Registration runs once per process. Later calls return the cached
//! outcome, including a cached conflict error.

use std::sync::OnceLock;

use serde_json::Value as JsonValue;

use vck_core::registry::register_extension_library;
use vck_core::value::bytes_to_base64url;
use vck_core::{ClaimValue, ExtensionLibrary, ItemValueCodec, RegistrationError, SubjectType};

use crate::credential::EuPidCredential;
use crate::gender::IsoIec5218Gender;
use crate::scheme::{attributes as a, EuPidScheme, VC_TYPE};

static SCHEME: EuPidScheme = EuPidScheme;

static REGISTRATION: OnceLock<Result<(), RegistrationError>> = OnceLock::new();

/// Item value codecs for the `eu.europa.ec.eudi.pid.1` namespace.
///
/// Claims not listed are text on the wire and decode by inference.
pub const ITEM_VALUE_CODECS: &[(&str, ItemValueCodec)] = &[
    (a::AGE_OVER_12, ItemValueCodec::Bool),
    (a::AGE_OVER_13, ItemValueCodec::Bool),
    (a::AGE_OVER_14, ItemValueCodec::Bool),
    (a::AGE_OVER_16, ItemValueCodec::Bool),
    (a::AGE_OVER_18, ItemValueCodec::Bool),
    (a::AGE_OVER_21, ItemValueCodec::Bool),
    (a::AGE_OVER_25, ItemValueCodec::Bool),
    (a::AGE_OVER_60, ItemValueCodec::Bool),
    (a::AGE_OVER_62, ItemValueCodec::Bool),
    (a::AGE_OVER_65, ItemValueCodec::Bool),
    (a::AGE_OVER_68, ItemValueCodec::Bool),
    (a::BIRTH_DATE, ItemValueCodec::LocalDate),
    (a::AGE_IN_YEARS, ItemValueCodec::UInt),
    (a::AGE_BIRTH_YEAR, ItemValueCodec::UInt),
    (
        a::GENDER,
        ItemValueCodec::Enumerated {
            name: "ISO/IEC 5218 gender",
            codes: &IsoIec5218Gender::CODES,
        },
    ),
    (a::SEX, ItemValueCodec::UInt),
    (a::NATIONALITY, ItemValueCodec::TextOrArray),
    (a::ISSUANCE_DATE, ItemValueCodec::LocalDateOrInstant),
    (a::EXPIRY_DATE, ItemValueCodec::LocalDateOrInstant),
    (a::PORTRAIT, ItemValueCodec::Bytes),
    (a::PORTRAIT_CAPTURE_DATE, ItemValueCodec::LocalDate),
];

/// Register the EU PID scheme with the host registry.
///
/// Idempotent; safe to call from several threads.
pub fn init_with_vck() -> Result<(), RegistrationError> {
    REGISTRATION
        .get_or_init(|| {
            let result = register_extension_library(extension_library());
            match &result {
                Ok(()) => tracing::debug!(vc_type = VC_TYPE, "EU PID scheme registered"),
                Err(e) => tracing::debug!(error = %e, "EU PID scheme registration failed"),
            }
            result
        })
        .clone()
}

/// Everything [`init_with_vck`] registers.
pub fn extension_library() -> ExtensionLibrary {
    ExtensionLibrary {
        scheme: &SCHEME,
        subject: Some(SubjectType::of::<EuPidCredential>(VC_TYPE)),
        json_value_encoder: Some(json_value_encoder),
        item_value_codecs: ITEM_VALUE_CODECS.to_vec(),
    }
}

/// Renders the portrait as base64url; everything else uses the default.
fn json_value_encoder(element: &str, value: &ClaimValue) -> Option<JsonValue> {
    match (element, value) {
        (a::PORTRAIT, ClaimValue::Bytes(bytes)) => Some(JsonValue::String(bytes_to_base64url(bytes))),
        _ => None,
    }
}
