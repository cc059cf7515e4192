//! Facial image bytes of the PID holder.
//!
//! Compared and hashed by content. Human-readable formats (JSON) carry the
//! image as base64url without padding; binary formats (CBOR) as a byte
//! string. Decoding also accepts an array of byte values.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Portrait image bytes.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Portrait(Vec<u8>);

impl Portrait {
    /// Wrap image bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Image bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take the image bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Base64url text without padding.
    pub fn to_base64url(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.0)
    }

    /// Parse base64url text; trailing padding is tolerated.
    pub fn from_base64url(s: &str) -> Result<Self, base64::DecodeError> {
        URL_SAFE_NO_PAD.decode(s.trim_end_matches('=')).map(Self)
    }
}

impl From<Vec<u8>> for Portrait {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Portrait {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Portrait {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Portrait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Portrait({})", self.to_base64url())
    }
}

impl Serialize for Portrait {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_base64url())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Portrait {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PortraitVisitor)
    }
}

struct PortraitVisitor;

impl<'de> Visitor<'de> for PortraitVisitor {
    type Value = Portrait;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("base64url text, a byte string or an array of bytes")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Portrait, E> {
        Portrait::from_base64url(v).map_err(|e| E::custom(format!("invalid base64url portrait: {e}")))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Portrait, E> {
        Ok(Portrait(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Portrait, E> {
        Ok(Portrait(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Portrait, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element::<u8>()? {
            bytes.push(b);
        }
        Ok(Portrait(bytes))
    }
}
