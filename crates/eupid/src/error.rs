//! Errors raised by the EU PID records and conversions.

use thiserror::Error;
use vck_core::VckError;

/// Error type for EU PID record decoding and conversion.
#[derive(Error, Debug)]
pub enum PidError {
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the host contract (claim codecs, registration, CBOR).
    #[error(transparent)]
    Vck(#[from] VckError),

    /// A mandatory claim was absent, e.g. after a lossy conversion.
    #[error("missing required claim '{0}'")]
    MissingClaim(String),
}

impl From<vck_core::RegistrationError> for PidError {
    fn from(err: vck_core::RegistrationError) -> Self {
        Self::Vck(VckError::Registration(err))
    }
}
