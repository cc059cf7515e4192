//! # Verifiable Credential Envelope
//!
//! The plain-JWT representation carries a W3C VC whose `credentialSubject`
//! is polymorphic: its `type` member selects the registered record type.
//! The envelope is kept as JSON here; [`VerifiableCredential::subject`]
//! resolves the concrete record through the registry.
//!
//! Signing and proofs are out of scope. The envelope is the JWT `vc` claim
//! before signing and after verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VckError;
use crate::registry;
use crate::subject::{CredentialSubject, SUBJECT_TYPE_KEY};

/// Base VC type present in every credential's `type`.
pub const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";

/// Default JSON-LD context.
pub const CREDENTIALS_CONTEXT_V1: &str = "https://www.w3.org/2018/credentials/v1";

/// A W3C Verifiable Credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableCredential {
    /// JSON-LD context URIs.
    #[serde(rename = "@context", default)]
    pub context: ContextValue,

    /// Credential identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Credential type(s). MUST include `"VerifiableCredential"`.
    #[serde(rename = "type")]
    pub credential_type: CredentialTypeValue,

    /// Issuer identifier.
    pub issuer: String,

    /// When the credential was issued (UTC).
    #[serde(rename = "issuanceDate")]
    pub issuance_date: DateTime<Utc>,

    /// Optional expiration date (UTC).
    #[serde(rename = "expirationDate", default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,

    /// Subject JSON including its `type` discriminator.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: serde_json::Value,
}

impl VerifiableCredential {
    /// Envelope around `subject`, typed as `["VerifiableCredential", <tag>]`.
    pub fn new(
        issuer: impl Into<String>,
        issuance_date: DateTime<Utc>,
        expiration_date: Option<DateTime<Utc>>,
        subject: &dyn CredentialSubject,
    ) -> Result<Self, VckError> {
        Ok(Self {
            context: ContextValue::default(),
            id: None,
            credential_type: CredentialTypeValue::Array(vec![
                VERIFIABLE_CREDENTIAL_TYPE.to_string(),
                subject.type_tag().to_string(),
            ]),
            issuer: issuer.into(),
            issuance_date,
            expiration_date,
            credential_subject: subject.to_json()?,
        })
    }

    /// Discriminator of the embedded subject.
    pub fn subject_type(&self) -> Option<&str> {
        self.credential_subject.get(SUBJECT_TYPE_KEY)?.as_str()
    }

    /// Decode the subject into its registered record type.
    pub fn subject(&self) -> Result<Box<dyn CredentialSubject>, VckError> {
        let type_tag = self.subject_type().ok_or(VckError::MissingElement("credentialSubject.type"))?;
        registry::decode_subject(type_tag, self.credential_subject.clone())
    }
}

/// JSON-LD `@context` value, either a single string or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Single context URI string.
    Single(String),
    /// Array of context URI strings or objects.
    Array(Vec<serde_json::Value>),
}

impl Default for ContextValue {
    fn default() -> Self {
        Self::Array(vec![serde_json::Value::String(CREDENTIALS_CONTEXT_V1.to_string())])
    }
}

/// Credential `type` value, either a single string or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredentialTypeValue {
    /// Single type string.
    Single(String),
    /// Array of type strings.
    Array(Vec<String>),
}

impl CredentialTypeValue {
    /// Whether `t` is one of the types.
    pub fn contains(&self, t: &str) -> bool {
        match self {
            Self::Single(s) => s == t,
            Self::Array(arr) => arr.iter().any(|s| s == t),
        }
    }

    /// Check whether `"VerifiableCredential"` is included in the type.
    pub fn contains_vc_type(&self) -> bool {
        self.contains(VERIFIABLE_CREDENTIAL_TYPE)
    }
}
