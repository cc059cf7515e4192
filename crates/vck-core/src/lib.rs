//! # vck-core — Host Contract for Credential Schemes
//!
//! The types a credential scheme crate plugs into: scheme descriptors,
//! claim values and their ISO item codecs, the process-wide extension
//! registry, polymorphic credential subjects, and the VC and ISO item
//! encodings that consume them.
//!
//! ## Crate Policy
//!
//! - No signing, verification or selective-disclosure logic lives here.
//! - Registration happens once at startup; everything else is read-only.
//! - All fallible operations return [`VckError`].

pub mod credential;
pub mod error;
pub mod iso;
pub mod registry;
pub mod scheme;
pub mod subject;
pub mod temporal;
pub mod value;

pub use credential::{ContextValue, CredentialTypeValue, VerifiableCredential};
pub use error::{RegistrationError, VckError};
pub use iso::IssuerSignedItem;
pub use registry::{register_extension_library, ExtensionLibrary, JsonValueEncoder};
pub use scheme::{CredentialRepresentation, CredentialScheme};
pub use subject::{CredentialSubject, SubjectType};
pub use temporal::LocalDateOrInstant;
pub use value::{ClaimValue, ItemValueCodec};
