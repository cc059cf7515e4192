//! # Error Types
//!
//! Errors raised by the host contract. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Decode failures name the claim and the reason, so a caller can tell
//!   which element of a credential was malformed.
//! - Registration conflicts are startup configuration failures and carry
//!   both the already-registered and the rejected scheme.

use thiserror::Error;

/// Top-level error type for the host contract.
#[derive(Error, Debug)]
pub enum VckError {
    /// A claim value did not match the type its codec expects.
    #[error("invalid value for claim '{claim}': {reason}")]
    InvalidClaimValue {
        /// Claim (element identifier) whose value was rejected.
        claim: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A required element was missing from an encoded structure.
    #[error("missing element '{0}'")]
    MissingElement(&'static str),

    /// No credential subject type is registered under this type tag.
    #[error("no credential subject registered for type '{0}'")]
    UnknownSubjectType(String),

    /// No scheme is registered for this ISO namespace.
    #[error("no credential scheme registered for ISO namespace '{0}'")]
    UnknownNamespace(String),

    /// Registering an extension library failed.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CBOR encoding failed.
    #[error("CBOR encoding error: {0}")]
    CborEncode(String),

    /// CBOR decoding failed.
    #[error("CBOR decoding error: {0}")]
    CborDecode(String),
}

/// Error while registering an extension library.
///
/// Cloneable so that a one-time registration outcome can be cached and
/// handed out to every caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Another scheme already claims the same identifier.
    #[error("{kind} '{value}' is already registered by {existing}, cannot register {attempted}")]
    Conflict {
        /// Which identifier collided (e.g. "VC type").
        kind: &'static str,
        /// The colliding identifier value.
        value: String,
        /// Schema URI of the scheme that registered first.
        existing: String,
        /// Schema URI of the scheme that was rejected.
        attempted: String,
    },
}

impl VckError {
    /// Shorthand for [`VckError::InvalidClaimValue`].
    pub fn invalid_claim(claim: &str, reason: impl Into<String>) -> Self {
        Self::InvalidClaimValue {
            claim: claim.to_string(),
            reason: reason.into(),
        }
    }
}
