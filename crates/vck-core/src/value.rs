//! # Claim Values and Item Value Codecs
//!
//! An ISO mobile-document element value is a bare CBOR data item. For most
//! claims the decoded Rust type follows from the CBOR major type, but some
//! do not: a full-date is a tagged text string, an age attestation must be
//! a boolean, a nationality may be a string or an array. Schemes register
//! an [`ItemValueCodec`] per such claim; everything else is decoded by wire
//! inference ([`infer_claim_value`]).
//!
//! ## CBOR Tags
//!
//! - `0` — tdate (RFC 3339 date-time text).
//! - `1004` — full-date (RFC 8943, `YYYY-MM-DD` text).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::NaiveDate;
use ciborium::value::{Integer, Value as CborValue};
use serde_json::Value as JsonValue;

use crate::error::VckError;
use crate::temporal::{format_date, parse_date, LocalDateOrInstant};

/// CBOR tag for an RFC 3339 date-time string.
pub const TAG_TDATE: u64 = 0;

/// CBOR tag for an RFC 8943 full-date string.
pub const TAG_FULL_DATE: u64 = 1004;

/// A decoded claim value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimValue {
    /// Boolean attestation.
    Bool(bool),
    /// Unsigned integer.
    UInt(u64),
    /// Text string.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Calendar date or instant.
    DateOrInstant(LocalDateOrInstant),
    /// Byte string.
    Bytes(Vec<u8>),
    /// Array of text strings, in wire order.
    TextArray(Vec<String>),
    /// Any other structured value.
    Json(JsonValue),
}

impl ClaimValue {
    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::UInt(_) => "uint",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::DateOrInstant(_) => "date-or-instant",
            Self::Bytes(_) => "bytes",
            Self::TextArray(_) => "text array",
            Self::Json(_) => "json",
        }
    }

    /// Default JSON rendering, used when no scheme encoder claims the value.
    ///
    /// Byte strings become arrays of numbers; dates become their wire text.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::UInt(n) => JsonValue::from(*n),
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::Date(d) => JsonValue::String(format_date(d)),
            Self::DateOrInstant(v) => JsonValue::String(v.to_wire_string()),
            Self::Bytes(b) => JsonValue::Array(b.iter().map(|x| JsonValue::from(*x)).collect()),
            Self::TextArray(items) => JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect()),
            Self::Json(v) => v.clone(),
        }
    }
}

impl From<bool> for ClaimValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<u32> for ClaimValue {
    fn from(n: u32) -> Self {
        Self::UInt(u64::from(n))
    }
}

impl From<u64> for ClaimValue {
    fn from(n: u64) -> Self {
        Self::UInt(n)
    }
}

impl From<&str> for ClaimValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDate> for ClaimValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<LocalDateOrInstant> for ClaimValue {
    fn from(v: LocalDateOrInstant) -> Self {
        Self::DateOrInstant(v)
    }
}

impl From<Vec<u8>> for ClaimValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<Vec<String>> for ClaimValue {
    fn from(items: Vec<String>) -> Self {
        Self::TextArray(items)
    }
}

/// Codec for one claim's element value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValueCodec {
    /// CBOR bool.
    Bool,
    /// CBOR unsigned integer.
    UInt,
    /// CBOR text.
    Text,
    /// full-date, tag 1004 (untagged text accepted on decode).
    LocalDate,
    /// tdate (tag 0) or full-date (tag 1004).
    LocalDateOrInstant,
    /// CBOR byte string.
    Bytes,
    /// Array of text, or a single text kept as [`ClaimValue::Text`].
    TextOrArray,
    /// Unsigned integer restricted to a fixed code list.
    Enumerated {
        /// Name of the enumeration, for error messages.
        name: &'static str,
        /// Allowed codes.
        codes: &'static [u64],
    },
}

impl ItemValueCodec {
    /// Decode a CBOR element value for `claim`.
    pub fn decode(&self, claim: &str, value: CborValue) -> Result<ClaimValue, VckError> {
        match (self, value) {
            (Self::Bool, CborValue::Bool(b)) => Ok(ClaimValue::Bool(b)),
            (Self::UInt, CborValue::Integer(i)) => decode_uint(claim, i).map(ClaimValue::UInt),
            (Self::Text, CborValue::Text(s)) => Ok(ClaimValue::Text(s)),
            (Self::LocalDate, value) => decode_full_date(claim, value).map(ClaimValue::Date),
            (Self::LocalDateOrInstant, value) => {
                decode_date_or_instant(claim, value).map(ClaimValue::DateOrInstant)
            }
            (Self::Bytes, CborValue::Bytes(b)) => Ok(ClaimValue::Bytes(b)),
            (Self::TextOrArray, CborValue::Text(s)) => Ok(ClaimValue::Text(s)),
            (Self::TextOrArray, CborValue::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    CborValue::Text(s) => Ok(s),
                    other => Err(VckError::invalid_claim(
                        claim,
                        format!("expected text array element, got {}", cbor_kind(&other)),
                    )),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ClaimValue::TextArray),
            (Self::Enumerated { name, codes }, CborValue::Integer(i)) => {
                let code = decode_uint(claim, i)?;
                if codes.contains(&code) {
                    Ok(ClaimValue::UInt(code))
                } else {
                    Err(VckError::invalid_claim(claim, format!("{code} is not a valid {name} code")))
                }
            }
            (codec, other) => Err(VckError::invalid_claim(
                claim,
                format!("expected {}, got {}", codec.expected(), cbor_kind(&other)),
            )),
        }
    }

    /// Encode `value` for `claim` as a CBOR element value.
    pub fn encode(&self, claim: &str, value: &ClaimValue) -> Result<CborValue, VckError> {
        match (self, value) {
            (Self::Bool, ClaimValue::Bool(b)) => Ok(CborValue::Bool(*b)),
            (Self::UInt, ClaimValue::UInt(n)) => Ok(CborValue::Integer(Integer::from(*n))),
            (Self::Text, ClaimValue::Text(s)) => Ok(CborValue::Text(s.clone())),
            (Self::LocalDate, ClaimValue::Date(d)) => Ok(full_date(d)),
            (Self::LocalDateOrInstant, ClaimValue::DateOrInstant(v)) => Ok(date_or_instant(v)),
            (Self::LocalDateOrInstant, ClaimValue::Date(d)) => Ok(full_date(d)),
            (Self::Bytes, ClaimValue::Bytes(b)) => Ok(CborValue::Bytes(b.clone())),
            (Self::TextOrArray, ClaimValue::TextArray(items)) => {
                Ok(CborValue::Array(items.iter().cloned().map(CborValue::Text).collect()))
            }
            (Self::TextOrArray, ClaimValue::Text(s)) => Ok(CborValue::Text(s.clone())),
            (Self::Enumerated { name, codes }, ClaimValue::UInt(code)) => {
                if codes.contains(code) {
                    Ok(CborValue::Integer(Integer::from(*code)))
                } else {
                    Err(VckError::invalid_claim(claim, format!("{code} is not a valid {name} code")))
                }
            }
            (codec, other) => Err(VckError::invalid_claim(
                claim,
                format!("codec expects {}, value is {}", codec.expected(), other.kind()),
            )),
        }
    }

    /// Decode a JSON claim value for `claim`.
    ///
    /// Byte strings are read from base64url text or from an array of numbers.
    pub fn decode_json(&self, claim: &str, value: &JsonValue) -> Result<ClaimValue, VckError> {
        let mismatch = || {
            VckError::invalid_claim(claim, format!("expected {}, got JSON {}", self.expected(), json_kind(value)))
        };
        match (self, value) {
            (Self::Bool, JsonValue::Bool(b)) => Ok(ClaimValue::Bool(*b)),
            (Self::UInt, JsonValue::Number(n)) => n.as_u64().map(ClaimValue::UInt).ok_or_else(mismatch),
            (Self::Text, JsonValue::String(s)) => Ok(ClaimValue::Text(s.clone())),
            (Self::LocalDate, JsonValue::String(s)) => {
                parse_date(s).map(ClaimValue::Date).map_err(|e| VckError::invalid_claim(claim, e.to_string()))
            }
            (Self::LocalDateOrInstant, JsonValue::String(s)) => LocalDateOrInstant::parse(s)
                .map(ClaimValue::DateOrInstant)
                .map_err(|e| VckError::invalid_claim(claim, e.to_string())),
            (Self::Bytes, JsonValue::String(s)) => URL_SAFE_NO_PAD
                .decode(s.trim_end_matches('='))
                .map(ClaimValue::Bytes)
                .map_err(|e| VckError::invalid_claim(claim, format!("invalid base64url: {e}"))),
            (Self::Bytes, JsonValue::Array(items)) => items
                .iter()
                .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()).ok_or_else(mismatch))
                .collect::<Result<Vec<u8>, _>>()
                .map(ClaimValue::Bytes),
            (Self::TextOrArray, JsonValue::String(s)) => Ok(ClaimValue::Text(s.clone())),
            (Self::TextOrArray, JsonValue::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(mismatch))
                .collect::<Result<Vec<_>, _>>()
                .map(ClaimValue::TextArray),
            (Self::Enumerated { name, codes }, JsonValue::Number(n)) => match n.as_u64() {
                Some(code) if codes.contains(&code) => Ok(ClaimValue::UInt(code)),
                _ => Err(VckError::invalid_claim(claim, format!("{n} is not a valid {name} code"))),
            },
            _ => Err(mismatch()),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::UInt => "unsigned integer",
            Self::Text => "text",
            Self::LocalDate => "full-date",
            Self::LocalDateOrInstant => "full-date or tdate",
            Self::Bytes => "byte string",
            Self::TextOrArray => "text or array of text",
            Self::Enumerated { name, .. } => *name,
        }
    }
}

/// Decode an element value without a registered codec.
///
/// Tagged dates are recognized; text, bool, unsigned integers and byte
/// strings map to their obvious variants. Anything else is carried as JSON.
pub fn infer_claim_value(claim: &str, value: CborValue) -> Result<ClaimValue, VckError> {
    match value {
        CborValue::Bool(b) => Ok(ClaimValue::Bool(b)),
        CborValue::Text(s) => Ok(ClaimValue::Text(s)),
        CborValue::Bytes(b) => Ok(ClaimValue::Bytes(b)),
        CborValue::Integer(i) => decode_uint(claim, i).map(ClaimValue::UInt),
        CborValue::Tag(TAG_FULL_DATE, _) | CborValue::Tag(TAG_TDATE, _) => {
            decode_date_or_instant(claim, value).map(ClaimValue::DateOrInstant)
        }
        other => cbor_to_json(claim, other).map(ClaimValue::Json),
    }
}

/// Decode a JSON claim value without a registered codec.
pub fn infer_json_claim_value(value: &JsonValue) -> ClaimValue {
    match value {
        JsonValue::Bool(b) => ClaimValue::Bool(*b),
        JsonValue::String(s) => ClaimValue::Text(s.clone()),
        JsonValue::Number(n) => match n.as_u64() {
            Some(u) => ClaimValue::UInt(u),
            None => ClaimValue::Json(value.clone()),
        },
        other => ClaimValue::Json(other.clone()),
    }
}

/// Encode a claim value without a registered codec.
pub fn encode_inferred(claim: &str, value: &ClaimValue) -> Result<CborValue, VckError> {
    match value {
        ClaimValue::Bool(b) => Ok(CborValue::Bool(*b)),
        ClaimValue::UInt(n) => Ok(CborValue::Integer(Integer::from(*n))),
        ClaimValue::Text(s) => Ok(CborValue::Text(s.clone())),
        ClaimValue::Date(d) => Ok(full_date(d)),
        ClaimValue::DateOrInstant(v) => Ok(date_or_instant(v)),
        ClaimValue::Bytes(b) => Ok(CborValue::Bytes(b.clone())),
        ClaimValue::TextArray(items) => Ok(CborValue::Array(items.iter().cloned().map(CborValue::Text).collect())),
        ClaimValue::Json(v) => CborValue::serialized(v).map_err(|e| VckError::invalid_claim(claim, e.to_string())),
    }
}

/// Base64url (no padding) text for a byte string.
pub fn bytes_to_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

fn decode_uint(claim: &str, i: Integer) -> Result<u64, VckError> {
    u64::try_from(i).map_err(|_| VckError::invalid_claim(claim, "expected unsigned integer"))
}

fn decode_full_date(claim: &str, value: CborValue) -> Result<NaiveDate, VckError> {
    match value {
        CborValue::Tag(TAG_FULL_DATE, inner) => match *inner {
            CborValue::Text(s) => parse_date(&s).map_err(|e| VckError::invalid_claim(claim, e.to_string())),
            other => Err(VckError::invalid_claim(
                claim,
                format!("full-date tag must wrap text, got {}", cbor_kind(&other)),
            )),
        },
        CborValue::Text(s) => parse_date(&s).map_err(|e| VckError::invalid_claim(claim, e.to_string())),
        other => Err(VckError::invalid_claim(claim, format!("expected full-date, got {}", cbor_kind(&other)))),
    }
}

fn decode_date_or_instant(claim: &str, value: CborValue) -> Result<LocalDateOrInstant, VckError> {
    let text = match value {
        CborValue::Tag(TAG_TDATE | TAG_FULL_DATE, inner) => match *inner {
            CborValue::Text(s) => s,
            other => {
                return Err(VckError::invalid_claim(
                    claim,
                    format!("date tag must wrap text, got {}", cbor_kind(&other)),
                ))
            }
        },
        CborValue::Text(s) => s,
        other => {
            return Err(VckError::invalid_claim(
                claim,
                format!("expected full-date or tdate, got {}", cbor_kind(&other)),
            ))
        }
    };
    LocalDateOrInstant::parse(&text).map_err(|e| VckError::invalid_claim(claim, e.to_string()))
}

fn full_date(d: &NaiveDate) -> CborValue {
    CborValue::Tag(TAG_FULL_DATE, Box::new(CborValue::Text(format_date(d))))
}

fn date_or_instant(v: &LocalDateOrInstant) -> CborValue {
    match v {
        LocalDateOrInstant::LocalDate(d) => full_date(d),
        LocalDateOrInstant::Instant(_) => CborValue::Tag(TAG_TDATE, Box::new(CborValue::Text(v.to_wire_string()))),
    }
}

fn cbor_to_json(claim: &str, value: CborValue) -> Result<JsonValue, VckError> {
    value
        .deserialized::<JsonValue>()
        .map_err(|e| VckError::invalid_claim(claim, format!("cannot represent value as JSON: {e}")))
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn cbor_kind(value: &CborValue) -> &'static str {
    match value {
        CborValue::Integer(_) => "integer",
        CborValue::Bytes(_) => "byte string",
        CborValue::Float(_) => "float",
        CborValue::Text(_) => "text",
        CborValue::Bool(_) => "bool",
        CborValue::Null => "null",
        CborValue::Tag(..) => "tagged item",
        CborValue::Array(_) => "array",
        CborValue::Map(_) => "map",
        _ => "unknown item",
    }
}
