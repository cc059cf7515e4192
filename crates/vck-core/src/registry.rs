//! # Extension Registry
//!
//! Process-wide registry of credential schemes plugged into the host.
//! An extension crate registers one [`ExtensionLibrary`] at startup; the
//! host then resolves schemes, credential subject decoders, JSON value
//! encoders and ISO item value codecs through the lookup functions here.
//!
//! ## Invariants
//!
//! - Registering the same scheme (by schema URI) twice is a no-op.
//! - A different scheme that claims an already-registered VC type, ISO
//!   namespace, SD-JWT type or subject type tag is rejected with
//!   [`RegistrationError::Conflict`]; the registry is left unchanged.
//!
//! Lookups take a read lock; registration takes the write lock once.

use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::RwLock;
use serde_json::Value as JsonValue;

use crate::error::{RegistrationError, VckError};
use crate::scheme::CredentialScheme;
use crate::subject::{CredentialSubject, SubjectType};
use crate::value::{ClaimValue, ItemValueCodec};

/// Scheme hook rendering a claim value as JSON.
///
/// Returns `None` to fall back to [`ClaimValue::to_json`].
pub type JsonValueEncoder = fn(&str, &ClaimValue) -> Option<JsonValue>;

/// Everything an extension crate registers with the host.
#[derive(Clone)]
pub struct ExtensionLibrary {
    /// Scheme descriptor.
    pub scheme: &'static dyn CredentialScheme,
    /// Credential subject case for the VC representation.
    pub subject: Option<SubjectType>,
    /// JSON value encoder for the scheme's ISO namespace.
    pub json_value_encoder: Option<JsonValueEncoder>,
    /// Item value codecs by element identifier, in the scheme's ISO namespace.
    pub item_value_codecs: Vec<(&'static str, ItemValueCodec)>,
}

impl ExtensionLibrary {
    /// Library with only a scheme descriptor.
    pub fn new(scheme: &'static dyn CredentialScheme) -> Self {
        Self {
            scheme,
            subject: None,
            json_value_encoder: None,
            item_value_codecs: Vec::new(),
        }
    }
}

impl std::fmt::Debug for ExtensionLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionLibrary")
            .field("scheme", &self.scheme)
            .field("subject", &self.subject)
            .field("json_value_encoder", &self.json_value_encoder.is_some())
            .field("item_value_codecs", &self.item_value_codecs.len())
            .finish()
    }
}

#[derive(Default)]
pub(crate) struct Registry {
    schemes: Vec<&'static dyn CredentialScheme>,
    subjects: HashMap<&'static str, (SubjectType, &'static str)>,
    json_value_encoders: HashMap<&'static str, JsonValueEncoder>,
    codecs: HashMap<&'static str, HashMap<&'static str, ItemValueCodec>>,
}

impl Registry {
    pub(crate) fn register(&mut self, library: ExtensionLibrary) -> Result<(), RegistrationError> {
        let scheme = library.scheme;
        if self.schemes.iter().any(|s| s.schema_uri() == scheme.schema_uri()) {
            tracing::debug!(schema_uri = scheme.schema_uri(), "scheme already registered");
            return Ok(());
        }

        for existing in &self.schemes {
            check_unique("VC type", existing.vc_type(), scheme.vc_type(), *existing, scheme)?;
            check_unique("ISO namespace", existing.iso_namespace(), scheme.iso_namespace(), *existing, scheme)?;
            check_unique("SD-JWT type", existing.sd_jwt_type(), scheme.sd_jwt_type(), *existing, scheme)?;
        }
        if let Some(subject) = &library.subject {
            if let Some((_, owner)) = self.subjects.get(subject.type_tag) {
                return Err(RegistrationError::Conflict {
                    kind: "subject type",
                    value: subject.type_tag.to_string(),
                    existing: owner.to_string(),
                    attempted: scheme.schema_uri().to_string(),
                });
            }
        }

        let namespace = scheme.iso_namespace();
        if let Some(subject) = library.subject {
            self.subjects.insert(subject.type_tag, (subject, scheme.schema_uri()));
        }
        if let Some(encoder) = library.json_value_encoder {
            self.json_value_encoders.insert(namespace, encoder);
        }
        let codec_count = library.item_value_codecs.len();
        self.codecs
            .entry(namespace)
            .or_default()
            .extend(library.item_value_codecs);
        self.schemes.push(scheme);

        tracing::debug!(
            schema_uri = scheme.schema_uri(),
            vc_type = scheme.vc_type(),
            iso_namespace = namespace,
            codecs = codec_count,
            "registered credential scheme"
        );
        Ok(())
    }

    fn scheme_where(&self, pred: impl Fn(&dyn CredentialScheme) -> bool) -> Option<&'static dyn CredentialScheme> {
        self.schemes.iter().copied().find(|s| pred(*s))
    }

    pub(crate) fn item_value_codec(&self, namespace: &str, element: &str) -> Option<ItemValueCodec> {
        self.codecs.get(namespace)?.get(element).copied()
    }

    pub(crate) fn encode_json_value(&self, namespace: &str, element: &str, value: &ClaimValue) -> JsonValue {
        self.json_value_encoders
            .get(namespace)
            .and_then(|encode| encode(element, value))
            .unwrap_or_else(|| value.to_json())
    }

    pub(crate) fn decode_subject(
        &self,
        type_tag: &str,
        value: JsonValue,
    ) -> Result<Box<dyn CredentialSubject>, VckError> {
        let (subject, _) = self
            .subjects
            .get(type_tag)
            .ok_or_else(|| VckError::UnknownSubjectType(type_tag.to_string()))?;
        (subject.decode)(value)
    }
}

fn check_unique(
    kind: &'static str,
    existing_value: &str,
    attempted_value: &str,
    existing: &dyn CredentialScheme,
    attempted: &dyn CredentialScheme,
) -> Result<(), RegistrationError> {
    if existing_value == attempted_value {
        return Err(RegistrationError::Conflict {
            kind,
            value: attempted_value.to_string(),
            existing: existing.schema_uri().to_string(),
            attempted: attempted.schema_uri().to_string(),
        });
    }
    Ok(())
}

static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();

fn registry() -> &'static RwLock<Registry> {
    REGISTRY.get_or_init(|| RwLock::new(Registry::default()))
}

/// Register an extension library with the process-wide registry.
pub fn register_extension_library(library: ExtensionLibrary) -> Result<(), RegistrationError> {
    registry().write().register(library)
}

/// Scheme whose VC type tag is `vc_type`.
pub fn scheme_for_vc_type(vc_type: &str) -> Option<&'static dyn CredentialScheme> {
    registry().read().scheme_where(|s| s.vc_type() == vc_type)
}

/// Scheme owning the ISO namespace `namespace`.
pub fn scheme_for_iso_namespace(namespace: &str) -> Option<&'static dyn CredentialScheme> {
    registry().read().scheme_where(|s| s.iso_namespace() == namespace)
}

/// Scheme whose SD-JWT `vct` is `sd_jwt_type`.
pub fn scheme_for_sd_jwt_type(sd_jwt_type: &str) -> Option<&'static dyn CredentialScheme> {
    registry().read().scheme_where(|s| s.sd_jwt_type() == sd_jwt_type)
}

/// Registered item value codec for `element` in `namespace`.
pub fn item_value_codec(namespace: &str, element: &str) -> Option<ItemValueCodec> {
    registry().read().item_value_codec(namespace, element)
}

/// JSON rendering of a claim value, via the namespace's encoder if any.
pub fn encode_json_value(namespace: &str, element: &str, value: &ClaimValue) -> JsonValue {
    registry().read().encode_json_value(namespace, element, value)
}

/// Decode a credential subject registered under `type_tag`.
pub fn decode_subject(type_tag: &str, value: JsonValue) -> Result<Box<dyn CredentialSubject>, VckError> {
    registry().read().decode_subject(type_tag, value)
}

/// All registered schemes, in registration order.
pub fn registered_schemes() -> Vec<&'static dyn CredentialScheme> {
    registry().read().schemes.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::CredentialRepresentation;

    struct TestScheme {
        uri: &'static str,
        vc_type: &'static str,
        namespace: &'static str,
        vct: &'static str,
    }

    impl CredentialScheme for TestScheme {
        fn schema_uri(&self) -> &'static str {
            self.uri
        }
        fn vc_type(&self) -> &'static str {
            self.vc_type
        }
        fn iso_namespace(&self) -> &'static str {
            self.namespace
        }
        fn iso_doc_type(&self) -> &'static str {
            self.namespace
        }
        fn sd_jwt_type(&self) -> &'static str {
            self.vct
        }
        fn supported_representations(&self) -> &'static [CredentialRepresentation] {
            &CredentialRepresentation::ALL
        }
        fn claim_names(&self) -> &'static [&'static str] {
            &["a", "b"]
        }
    }

    static FIRST: TestScheme = TestScheme {
        uri: "https://example.org/first.json",
        vc_type: "First",
        namespace: "org.example.first",
        vct: "urn:first",
    };
    static FIRST_AGAIN: TestScheme = TestScheme {
        uri: "https://example.org/first.json",
        vc_type: "Other",
        namespace: "org.example.other",
        vct: "urn:other",
    };
    static SAME_VC_TYPE: TestScheme = TestScheme {
        uri: "https://example.org/second.json",
        vc_type: "First",
        namespace: "org.example.second",
        vct: "urn:second",
    };
    static SAME_NAMESPACE: TestScheme = TestScheme {
        uri: "https://example.org/third.json",
        vc_type: "Third",
        namespace: "org.example.first",
        vct: "urn:third",
    };
    static SAME_VCT: TestScheme = TestScheme {
        uri: "https://example.org/fourth.json",
        vc_type: "Fourth",
        namespace: "org.example.fourth",
        vct: "urn:first",
    };

    fn first_library() -> ExtensionLibrary {
        let mut library = ExtensionLibrary::new(&FIRST);
        library.item_value_codecs = vec![("a", ItemValueCodec::Bool)];
        library
    }

    #[test]
    fn registering_same_scheme_twice_is_idempotent() {
        let mut reg = Registry::default();
        reg.register(first_library()).unwrap();
        reg.register(first_library()).unwrap();
        reg.register(ExtensionLibrary::new(&FIRST_AGAIN)).unwrap();
        assert_eq!(reg.schemes.len(), 1);
        assert_eq!(reg.schemes[0].vc_type(), "First");
    }

    #[test]
    fn conflicting_identifiers_are_rejected() {
        let mut reg = Registry::default();
        reg.register(first_library()).unwrap();

        for (scheme, kind) in [
            (&SAME_VC_TYPE, "VC type"),
            (&SAME_NAMESPACE, "ISO namespace"),
            (&SAME_VCT, "SD-JWT type"),
        ] {
            let err = reg.register(ExtensionLibrary::new(scheme)).unwrap_err();
            let RegistrationError::Conflict { kind: k, existing, attempted, .. } = err;
            assert_eq!(k, kind);
            assert_eq!(existing, FIRST.uri);
            assert_eq!(attempted, scheme.uri);
        }
        assert_eq!(reg.schemes.len(), 1);
    }

    #[test]
    fn codec_lookup_is_scoped_by_namespace() {
        let mut reg = Registry::default();
        reg.register(first_library()).unwrap();
        assert_eq!(reg.item_value_codec("org.example.first", "a"), Some(ItemValueCodec::Bool));
        assert_eq!(reg.item_value_codec("org.example.first", "b"), None);
        assert_eq!(reg.item_value_codec("org.example.other", "a"), None);
    }

    #[test]
    fn json_encoder_falls_back_to_default() {
        fn upper(element: &str, value: &ClaimValue) -> Option<JsonValue> {
            match (element, value) {
                ("a", ClaimValue::Text(s)) => Some(JsonValue::String(s.to_uppercase())),
                _ => None,
            }
        }
        let mut reg = Registry::default();
        let mut library = first_library();
        library.json_value_encoder = Some(upper);
        reg.register(library).unwrap();

        let text = ClaimValue::Text("x".into());
        assert_eq!(reg.encode_json_value("org.example.first", "a", &text), "X");
        assert_eq!(reg.encode_json_value("org.example.first", "b", &text), "x");
        assert_eq!(reg.encode_json_value("org.example.other", "a", &text), "x");
    }

    #[test]
    fn unknown_subject_type_is_an_error() {
        let reg = Registry::default();
        let err = reg.decode_subject("Nope", serde_json::json!({})).unwrap_err();
        assert!(matches!(err, VckError::UnknownSubjectType(t) if t == "Nope"));
    }
}
