//! # eupid-credential — EU PID Credential Schema
//!
//! Claim names, records and name mappings for the EU Person Identification
//! Data credential (EU PID Rule Book v1.5.0), and the hook registering them
//! with the `vck-core` host.
//!
//! ## Modules
//!
//! - [`scheme`] — attribute registry: scheme constants and claim name tables.
//! - [`credential`] — [`EuPidCredential`], the plain-JWT / ISO record.
//! - [`sd_jwt`] — [`EuPidCredentialSdJwt`], the nested SD-JWT record.
//! - [`mapping`] — ISO to SD-JWT name table and claim set conversion.
//! - [`initializer`] — [`init_with_vck`], one-time host registration.
//!
//! Call [`init_with_vck`] at startup before decoding VCs or ISO items
//! through the host registry.

#![warn(missing_docs)]

pub mod credential;
pub mod error;
pub mod gender;
pub mod initializer;
pub mod mapping;
pub mod nationality;
pub mod portrait;
pub mod scheme;
pub mod sd_jwt;

pub use credential::EuPidCredential;
pub use error::PidError;
pub use gender::IsoIec5218Gender;
pub use initializer::init_with_vck;
pub use nationality::Nationality;
pub use portrait::Portrait;
pub use scheme::EuPidScheme;
pub use sd_jwt::{Address, AgeEqualOrOver, EuPidCredentialSdJwt, PlaceOfBirth};
