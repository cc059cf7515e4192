//! # Credential Scheme Descriptors
//!
//! A credential scheme names a credential type in every representation the
//! host understands. Extension crates implement [`CredentialScheme`] on a
//! unit struct holding nothing but constants.

use serde::{Deserialize, Serialize};

/// A wire representation of a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialRepresentation {
    /// W3C VC data model, transported as a plain JWT.
    PlainJwt,
    /// Selective-disclosure JWT with nested claim objects.
    SdJwt,
    /// ISO/IEC 18013-5 mobile document, CBOR encoded.
    IsoMdoc,
}

impl CredentialRepresentation {
    /// All representations, in declaration order.
    pub const ALL: [CredentialRepresentation; 3] = [Self::PlainJwt, Self::SdJwt, Self::IsoMdoc];
}

impl std::fmt::Display for CredentialRepresentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PlainJwt => "PLAIN_JWT",
            Self::SdJwt => "SD_JWT",
            Self::IsoMdoc => "ISO_MDOC",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for CredentialRepresentation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "plain-jwt" | "jwt" | "vc" => Ok(Self::PlainJwt),
            "sd-jwt" => Ok(Self::SdJwt),
            "iso-mdoc" | "iso" | "mdoc" => Ok(Self::IsoMdoc),
            other => Err(format!("unknown credential representation: {other:?}")),
        }
    }
}

/// Descriptor contract for a credential type.
///
/// Implementations are static data; every method returns a constant.
pub trait CredentialScheme: Send + Sync + 'static {
    /// URI of the JSON schema describing the credential subject.
    fn schema_uri(&self) -> &'static str;

    /// Type tag used in the VC `type` array and as the polymorphic
    /// credential subject discriminator.
    fn vc_type(&self) -> &'static str;

    /// ISO mobile-document namespace holding the claims.
    fn iso_namespace(&self) -> &'static str;

    /// ISO mobile-document doc type.
    fn iso_doc_type(&self) -> &'static str;

    /// SD-JWT `vct` value.
    fn sd_jwt_type(&self) -> &'static str;

    /// Representations this scheme can be issued in.
    fn supported_representations(&self) -> &'static [CredentialRepresentation];

    /// Claim names in the generic (VC / ISO) namespace.
    fn claim_names(&self) -> &'static [&'static str];

    /// Whether the scheme can be issued in `representation`.
    fn supports(&self, representation: CredentialRepresentation) -> bool {
        self.supported_representations().contains(&representation)
    }
}

impl std::fmt::Debug for dyn CredentialScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialScheme")
            .field("schema_uri", &self.schema_uri())
            .field("vc_type", &self.vc_type())
            .finish()
    }
}
