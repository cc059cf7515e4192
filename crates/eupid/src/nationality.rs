//! # Nationality Claim
//!
//! Rule book revisions changed `nationality` from a single alpha-2 string
//! to an array of them, and issuers emit both. [`Nationality`] keeps the
//! JSON element exactly as received and derives the typed views on first
//! access:
//!
//! - [`Nationality::single`] for the single-string shape,
//! - [`Nationality::many`] for the array-of-strings shape.
//!
//! Any other shape decodes fine and yields `None` from both accessors.
//! Equality, hashing and serialization use the raw element only.

use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// Nationality claim value: a string or an array of strings.
#[derive(Clone)]
pub struct Nationality {
    raw: JsonValue,
    single: OnceLock<Option<String>>,
    many: OnceLock<Option<Vec<String>>>,
}

impl Nationality {
    /// Wrap a raw JSON element of any shape.
    pub fn from_json(raw: JsonValue) -> Self {
        Self {
            raw,
            single: OnceLock::new(),
            many: OnceLock::new(),
        }
    }

    /// Single-string nationality.
    pub fn from_single(code: impl Into<String>) -> Self {
        Self::from_json(JsonValue::String(code.into()))
    }

    /// Array-of-strings nationality, in the given order.
    pub fn from_many<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_json(JsonValue::Array(codes.into_iter().map(|c| JsonValue::String(c.into())).collect()))
    }

    /// The JSON element as received.
    pub fn raw(&self) -> &JsonValue {
        &self.raw
    }

    /// The code, if the element is a single string.
    pub fn single(&self) -> Option<&str> {
        self.single
            .get_or_init(|| self.raw.as_str().map(str::to_string))
            .as_deref()
    }

    /// The codes, if the element is an array of strings.
    pub fn many(&self) -> Option<&[String]> {
        self.many
            .get_or_init(|| {
                self.raw
                    .as_array()?
                    .iter()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            })
            .as_deref()
    }

    /// Whether the element is a single string or an array of strings.
    pub fn is_recognized(&self) -> bool {
        self.single().is_some() || self.many().is_some()
    }

    /// All codes regardless of shape; empty for unexpected shapes.
    pub fn codes(&self) -> Vec<&str> {
        match (self.single(), self.many()) {
            (Some(code), _) => vec![code],
            (None, Some(codes)) => codes.iter().map(String::as_str).collect(),
            (None, None) => Vec::new(),
        }
    }
}

impl From<&str> for Nationality {
    fn from(code: &str) -> Self {
        Self::from_single(code)
    }
}

impl From<Vec<String>> for Nationality {
    fn from(codes: Vec<String>) -> Self {
        Self::from_many(codes)
    }
}

impl PartialEq for Nationality {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Nationality {}

impl Hash for Nationality {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_json(&self.raw, state);
    }
}

/// Structural hash agreeing with `JsonValue`'s `PartialEq`: integer and
/// float numbers never compare equal, and `0.0 == -0.0`.
fn hash_json<H: Hasher>(value: &JsonValue, state: &mut H) {
    match value {
        JsonValue::Null => state.write_u8(0),
        JsonValue::Bool(b) => {
            state.write_u8(1);
            b.hash(state);
        }
        JsonValue::Number(n) => {
            if let Some(u) = n.as_u64() {
                state.write_u8(2);
                u.hash(state);
            } else if let Some(i) = n.as_i64() {
                state.write_u8(3);
                i.hash(state);
            } else {
                state.write_u8(4);
                let f = n.as_f64().unwrap_or_default();
                let f = if f == 0.0 { 0.0 } else { f };
                f.to_bits().hash(state);
            }
        }
        JsonValue::String(s) => {
            state.write_u8(5);
            s.hash(state);
        }
        JsonValue::Array(items) => {
            state.write_u8(6);
            items.len().hash(state);
            for item in items {
                hash_json(item, state);
            }
        }
        JsonValue::Object(map) => {
            // Map iteration is key-ordered.
            state.write_u8(7);
            map.len().hash(state);
            for (k, v) in map {
                k.hash(state);
                hash_json(v, state);
            }
        }
    }
}

impl std::fmt::Debug for Nationality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Nationality").field(&self.raw).finish()
    }
}

impl Serialize for Nationality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Nationality {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Self::from_json)
    }
}
