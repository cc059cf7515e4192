//! # ISO Mobile-Document Items
//!
//! An `IssuerSignedItem` carries one claim of an ISO/IEC 18013-5 mobile
//! document. It is encoded as a CBOR map with the members `digestID`,
//! `random`, `elementIdentifier` and `elementValue`, in that order.
//!
//! The element value is encoded with the item value codec registered for
//! `(namespace, elementIdentifier)`, falling back to wire inference when no
//! codec is registered. Digests and MSO signing are out of scope; `random`
//! is carried through unchanged.

use ciborium::value::{Integer, Value as CborValue};
use serde_json::{Map, Value as JsonValue};

use crate::error::VckError;
use crate::registry;
use crate::value::{encode_inferred, infer_claim_value, infer_json_claim_value, ClaimValue};

const DIGEST_ID: &str = "digestID";
const RANDOM: &str = "random";
const ELEMENT_IDENTIFIER: &str = "elementIdentifier";
const ELEMENT_VALUE: &str = "elementValue";

/// One claim of an ISO mobile document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerSignedItem {
    /// Digest identifier, unique per namespace.
    pub digest_id: u64,
    /// Salt bytes.
    pub random: Vec<u8>,
    /// Claim name.
    pub element_identifier: String,
    /// Claim value.
    pub element_value: ClaimValue,
}

impl IssuerSignedItem {
    /// Item without salt.
    pub fn new(digest_id: u64, element_identifier: impl Into<String>, element_value: ClaimValue) -> Self {
        Self {
            digest_id,
            random: Vec::new(),
            element_identifier: element_identifier.into(),
            element_value,
        }
    }

    /// CBOR map for this item, encoding the value for `namespace`.
    pub fn to_cbor_value(&self, namespace: &str) -> Result<CborValue, VckError> {
        let claim = self.element_identifier.as_str();
        let value = match registry::item_value_codec(namespace, claim) {
            Some(codec) => codec.encode(claim, &self.element_value)?,
            None => encode_inferred(claim, &self.element_value)?,
        };
        Ok(CborValue::Map(vec![
            (CborValue::Text(DIGEST_ID.into()), CborValue::Integer(Integer::from(self.digest_id))),
            (CborValue::Text(RANDOM.into()), CborValue::Bytes(self.random.clone())),
            (CborValue::Text(ELEMENT_IDENTIFIER.into()), CborValue::Text(self.element_identifier.clone())),
            (CborValue::Text(ELEMENT_VALUE.into()), value),
        ]))
    }

    /// CBOR bytes for this item.
    pub fn to_cbor(&self, namespace: &str) -> Result<Vec<u8>, VckError> {
        let value = self.to_cbor_value(namespace)?;
        let mut out = Vec::new();
        ciborium::into_writer(&value, &mut out).map_err(|e| VckError::CborEncode(e.to_string()))?;
        Ok(out)
    }

    /// Decode an item from CBOR bytes, using the codecs of `namespace`.
    pub fn from_cbor(bytes: &[u8], namespace: &str) -> Result<Self, VckError> {
        let value: CborValue = ciborium::from_reader(bytes).map_err(|e| VckError::CborDecode(e.to_string()))?;
        Self::from_cbor_value(value, namespace)
    }

    /// Decode an item from a CBOR map.
    pub fn from_cbor_value(value: CborValue, namespace: &str) -> Result<Self, VckError> {
        let CborValue::Map(entries) = value else {
            return Err(VckError::CborDecode("IssuerSignedItem must be a CBOR map".into()));
        };

        let mut digest_id = None;
        let mut random = None;
        let mut element_identifier = None;
        let mut element_value = None;
        for (key, value) in entries {
            match key.as_text() {
                Some(DIGEST_ID) => digest_id = Some(value),
                Some(RANDOM) => random = Some(value),
                Some(ELEMENT_IDENTIFIER) => element_identifier = Some(value),
                Some(ELEMENT_VALUE) => element_value = Some(value),
                _ => {}
            }
        }

        let digest_id = match digest_id.ok_or(VckError::MissingElement(DIGEST_ID))? {
            CborValue::Integer(i) => {
                u64::try_from(i).map_err(|_| VckError::CborDecode("digestID must be unsigned".into()))?
            }
            _ => return Err(VckError::CborDecode("digestID must be an integer".into())),
        };
        let random = match random.ok_or(VckError::MissingElement(RANDOM))? {
            CborValue::Bytes(b) => b,
            _ => return Err(VckError::CborDecode("random must be a byte string".into())),
        };
        let element_identifier = match element_identifier.ok_or(VckError::MissingElement(ELEMENT_IDENTIFIER))? {
            CborValue::Text(s) => s,
            _ => return Err(VckError::CborDecode("elementIdentifier must be text".into())),
        };
        let raw = element_value.ok_or(VckError::MissingElement(ELEMENT_VALUE))?;
        let element_value = match registry::item_value_codec(namespace, &element_identifier) {
            Some(codec) => codec.decode(&element_identifier, raw)?,
            None => infer_claim_value(&element_identifier, raw)?,
        };

        Ok(Self {
            digest_id,
            random,
            element_identifier,
            element_value,
        })
    }
}

/// Flat JSON claim set from the items of one namespace.
///
/// Values go through the namespace's registered JSON value encoder.
pub fn claims_to_json(namespace: &str, items: &[IssuerSignedItem]) -> Map<String, JsonValue> {
    items
        .iter()
        .map(|item| {
            let json = registry::encode_json_value(namespace, &item.element_identifier, &item.element_value);
            (item.element_identifier.clone(), json)
        })
        .collect()
}

/// Items for `namespace` from a flat JSON claim set.
///
/// Digest identifiers are assigned in iteration order starting at zero;
/// salts are left empty.
pub fn items_from_json(namespace: &str, claims: &Map<String, JsonValue>) -> Result<Vec<IssuerSignedItem>, VckError> {
    claims
        .iter()
        .filter(|(_, value)| !value.is_null())
        .enumerate()
        .map(|(index, (name, value))| -> Result<IssuerSignedItem, VckError> {
            let element_value = match registry::item_value_codec(namespace, name) {
                Some(codec) => codec.decode_json(name, value)?,
                None => infer_json_claim_value(value),
            };
            Ok(IssuerSignedItem::new(index as u64, name.clone(), element_value))
        })
        .collect()
}
