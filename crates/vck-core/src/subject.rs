//! # Polymorphic Credential Subjects
//!
//! A VC's `credentialSubject` carries a `type` discriminator naming the
//! concrete subject type. Extension crates register a [`SubjectType`] per
//! discriminator; the registry then decodes subjects into the matching
//! record and hands them out as `Box<dyn CredentialSubject>`.

use std::any::Any;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::VckError;

/// Key of the polymorphic discriminator inside a credential subject.
pub const SUBJECT_TYPE_KEY: &str = "type";

/// A decoded credential subject.
pub trait CredentialSubject: std::fmt::Debug + Send + Sync + 'static {
    /// Subject identifier.
    fn id(&self) -> &str;

    /// Polymorphic type tag this subject is registered under.
    fn type_tag(&self) -> &'static str;

    /// JSON rendering including the `type` discriminator.
    fn to_json(&self) -> Result<JsonValue, VckError>;

    /// Upcast for downcasting to the concrete record.
    fn as_any(&self) -> &dyn Any;
}

impl dyn CredentialSubject {
    /// Downcast to a concrete subject record.
    pub fn downcast_ref<T: CredentialSubject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Decoder turning subject JSON into a boxed subject.
pub type SubjectDecoder = fn(JsonValue) -> Result<Box<dyn CredentialSubject>, VckError>;

/// A registrable credential subject case.
#[derive(Clone, Copy)]
pub struct SubjectType {
    /// Discriminator value.
    pub type_tag: &'static str,
    /// Decoder for subjects carrying this discriminator.
    pub decode: SubjectDecoder,
}

impl SubjectType {
    /// Subject type decoding into `T` via serde.
    pub fn of<T>(type_tag: &'static str) -> Self
    where
        T: CredentialSubject + DeserializeOwned,
    {
        Self {
            type_tag,
            decode: decode_as::<T>,
        }
    }
}

impl std::fmt::Debug for SubjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubjectType").field("type_tag", &self.type_tag).finish_non_exhaustive()
    }
}

fn decode_as<T>(value: JsonValue) -> Result<Box<dyn CredentialSubject>, VckError>
where
    T: CredentialSubject + DeserializeOwned,
{
    let subject: T = serde_json::from_value(value)?;
    Ok(Box::new(subject))
}

/// Serialize `record` and insert the `type` discriminator.
///
/// Helper for [`CredentialSubject::to_json`] implementations.
pub fn tagged_json<T: Serialize>(record: &T, type_tag: &str) -> Result<JsonValue, VckError> {
    let mut value = serde_json::to_value(record)?;
    match value.as_object_mut() {
        Some(map) => {
            map.insert(SUBJECT_TYPE_KEY.to_string(), JsonValue::String(type_tag.to_string()));
            Ok(value)
        }
        None => Err(VckError::invalid_claim(SUBJECT_TYPE_KEY, "credential subject must be a JSON object")),
    }
}
