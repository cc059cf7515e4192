//! # EU PID Attribute Registry
//!
//! Claim names of the EU Person Identification Data credential, per
//! EU PID Rule Book v1.5.0, in the two naming variants the rule book uses:
//!
//! - [`attributes`] — plain-JWT/VC and ISO mobile-document names (one table,
//!   the ISO element identifiers double as VC claim names).
//! - [`sd_jwt_attributes`] — SD-JWT names; nested claims are dotted paths
//!   (`address.street_address`), with the nested member names in submodules.
//!
//! Everything here is static data. Consistency (uniqueness, required and
//! deprecated subsets) is checked by the tests.

use vck_core::{CredentialRepresentation, CredentialScheme};

/// URI of the JSON schema for the credential subject.
pub const SCHEMA_URI: &str = "https://wallet.a-sit.at/schemas/1.0.0/eupid.json";

/// VC type tag and polymorphic credential subject discriminator.
pub const VC_TYPE: &str = "EuPid2023";

/// ISO mobile-document namespace.
pub const ISO_NAMESPACE: &str = "eu.europa.ec.eudi.pid.1";

/// ISO mobile-document doc type.
pub const ISO_DOC_TYPE: &str = "eu.europa.ec.eudi.pid.1";

/// SD-JWT `vct`.
pub const SD_JWT_TYPE: &str = "urn:eu.europa.ec.eudi:pid:1";

/// Representations the EU PID can be issued in.
pub const SUPPORTED_REPRESENTATIONS: [CredentialRepresentation; 3] = CredentialRepresentation::ALL;

/// EU PID scheme descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EuPidScheme;

impl CredentialScheme for EuPidScheme {
    fn schema_uri(&self) -> &'static str {
        SCHEMA_URI
    }

    fn vc_type(&self) -> &'static str {
        VC_TYPE
    }

    fn iso_namespace(&self) -> &'static str {
        ISO_NAMESPACE
    }

    fn iso_doc_type(&self) -> &'static str {
        ISO_DOC_TYPE
    }

    fn sd_jwt_type(&self) -> &'static str {
        SD_JWT_TYPE
    }

    fn supported_representations(&self) -> &'static [CredentialRepresentation] {
        &SUPPORTED_REPRESENTATIONS
    }

    fn claim_names(&self) -> &'static [&'static str] {
        CLAIM_NAMES
    }
}

/// Claim names for plain-JWT/VC and ISO mobile documents.
pub mod attributes {
    /// Current last name(s) or surname(s).
    pub const FAMILY_NAME: &str = "family_name";
    /// Current first name(s), including middle name(s).
    pub const GIVEN_NAME: &str = "given_name";
    /// Day, month and year of birth.
    pub const BIRTH_DATE: &str = "birth_date";
    pub const AGE_OVER_12: &str = "age_over_12";
    pub const AGE_OVER_13: &str = "age_over_13";
    pub const AGE_OVER_14: &str = "age_over_14";
    pub const AGE_OVER_16: &str = "age_over_16";
    /// Whether the holder is currently 18 or older.
    pub const AGE_OVER_18: &str = "age_over_18";
    pub const AGE_OVER_21: &str = "age_over_21";
    pub const AGE_OVER_25: &str = "age_over_25";
    pub const AGE_OVER_60: &str = "age_over_60";
    pub const AGE_OVER_62: &str = "age_over_62";
    pub const AGE_OVER_65: &str = "age_over_65";
    pub const AGE_OVER_68: &str = "age_over_68";
    /// Current age in years.
    pub const AGE_IN_YEARS: &str = "age_in_years";
    /// Year of birth.
    pub const AGE_BIRTH_YEAR: &str = "age_birth_year";
    /// Last name(s) at the time of birth.
    pub const FAMILY_NAME_BIRTH: &str = "family_name_birth";
    /// First name(s) at the time of birth.
    pub const GIVEN_NAME_BIRTH: &str = "given_name_birth";
    /// Country, region or locality of birth as free text.
    pub const BIRTH_PLACE: &str = "birth_place";
    /// Country of birth, alpha-2 code. Deprecated in favour of [`BIRTH_PLACE`].
    pub const BIRTH_COUNTRY: &str = "birth_country";
    /// State, province or district of birth. Deprecated in favour of [`BIRTH_PLACE`].
    pub const BIRTH_STATE: &str = "birth_state";
    /// Municipality of birth. Deprecated in favour of [`BIRTH_PLACE`].
    pub const BIRTH_CITY: &str = "birth_city";
    /// Full address of residence.
    pub const RESIDENT_ADDRESS: &str = "resident_address";
    pub const RESIDENT_COUNTRY: &str = "resident_country";
    pub const RESIDENT_STATE: &str = "resident_state";
    pub const RESIDENT_CITY: &str = "resident_city";
    pub const RESIDENT_POSTAL_CODE: &str = "resident_postal_code";
    pub const RESIDENT_STREET: &str = "resident_street";
    pub const RESIDENT_HOUSE_NUMBER: &str = "resident_house_number";
    /// ISO/IEC 5218 gender code. Deprecated in favour of [`SEX`].
    pub const GENDER: &str = "gender";
    /// Sex as an ISO/IEC 5218 based code.
    pub const SEX: &str = "sex";
    /// Nationality or nationalities, alpha-2 codes.
    pub const NATIONALITY: &str = "nationality";
    pub const ISSUANCE_DATE: &str = "issuance_date";
    pub const EXPIRY_DATE: &str = "expiry_date";
    /// Name of the administrative authority that issued the PID, or the
    /// issuing country's alpha-2 code if there is no separate authority.
    pub const ISSUING_AUTHORITY: &str = "issuing_authority";
    pub const DOCUMENT_NUMBER: &str = "document_number";
    /// Deprecated in favour of [`PERSONAL_ADMINISTRATIVE_NUMBER`].
    pub const ADMINISTRATIVE_NUMBER: &str = "administrative_number";
    /// Alpha-2 code of the issuing country.
    pub const ISSUING_COUNTRY: &str = "issuing_country";
    /// Subdivision code of the issuing jurisdiction (ISO 3166-2).
    pub const ISSUING_JURISDICTION: &str = "issuing_jurisdiction";
    pub const PERSONAL_ADMINISTRATIVE_NUMBER: &str = "personal_administrative_number";
    /// Facial image of the holder.
    pub const PORTRAIT: &str = "portrait";
    pub const PORTRAIT_CAPTURE_DATE: &str = "portrait_capture_date";
    pub const EMAIL_ADDRESS: &str = "email_address";
    pub const MOBILE_PHONE_NUMBER: &str = "mobile_phone_number";
    /// URL of a machine-readable trust anchor for verifying the PID.
    pub const TRUST_ANCHOR: &str = "trust_anchor";
    /// Location of status information for the PID.
    pub const LOCATION_STATUS: &str = "location_status";
}

/// Claim names for SD-JWT.
pub mod sd_jwt_attributes {
    pub const FAMILY_NAME: &str = "family_name";
    pub const GIVEN_NAME: &str = "given_name";
    pub const BIRTH_DATE: &str = "birthdate";

    /// Object holding the age attestations.
    pub const PREFIX_AGE_EQUAL_OR_OVER: &str = "age_equal_or_over";
    pub const AGE_EQUAL_OR_OVER_12: &str = "age_equal_or_over.12";
    pub const AGE_EQUAL_OR_OVER_13: &str = "age_equal_or_over.13";
    pub const AGE_EQUAL_OR_OVER_14: &str = "age_equal_or_over.14";
    pub const AGE_EQUAL_OR_OVER_16: &str = "age_equal_or_over.16";
    pub const AGE_EQUAL_OR_OVER_18: &str = "age_equal_or_over.18";
    pub const AGE_EQUAL_OR_OVER_21: &str = "age_equal_or_over.21";
    pub const AGE_EQUAL_OR_OVER_25: &str = "age_equal_or_over.25";
    pub const AGE_EQUAL_OR_OVER_60: &str = "age_equal_or_over.60";
    pub const AGE_EQUAL_OR_OVER_62: &str = "age_equal_or_over.62";
    pub const AGE_EQUAL_OR_OVER_65: &str = "age_equal_or_over.65";
    pub const AGE_EQUAL_OR_OVER_68: &str = "age_equal_or_over.68";

    /// Members of the `age_equal_or_over` object.
    pub mod age_equal_or_over {
        pub const EQUAL_OR_OVER_12: &str = "12";
        pub const EQUAL_OR_OVER_13: &str = "13";
        pub const EQUAL_OR_OVER_14: &str = "14";
        pub const EQUAL_OR_OVER_16: &str = "16";
        pub const EQUAL_OR_OVER_18: &str = "18";
        pub const EQUAL_OR_OVER_21: &str = "21";
        pub const EQUAL_OR_OVER_25: &str = "25";
        pub const EQUAL_OR_OVER_60: &str = "60";
        pub const EQUAL_OR_OVER_62: &str = "62";
        pub const EQUAL_OR_OVER_65: &str = "65";
        pub const EQUAL_OR_OVER_68: &str = "68";
    }

    pub const AGE_IN_YEARS: &str = "age_in_years";
    pub const AGE_BIRTH_YEAR: &str = "age_birth_year";
    pub const FAMILY_NAME_BIRTH: &str = "birth_family_name";
    pub const GIVEN_NAME_BIRTH: &str = "birth_given_name";

    /// Object holding the place of birth.
    pub const PREFIX_PLACE_OF_BIRTH: &str = "place_of_birth";
    pub const PLACE_OF_BIRTH_COUNTRY: &str = "place_of_birth.country";
    pub const PLACE_OF_BIRTH_REGION: &str = "place_of_birth.region";
    pub const PLACE_OF_BIRTH_LOCALITY: &str = "place_of_birth.locality";

    /// Members of the `place_of_birth` object.
    pub mod place_of_birth {
        pub const COUNTRY: &str = "country";
        pub const REGION: &str = "region";
        pub const LOCALITY: &str = "locality";
    }

    /// Object holding the address of residence.
    pub const PREFIX_ADDRESS: &str = "address";
    pub const ADDRESS_FORMATTED: &str = "address.formatted";
    pub const ADDRESS_COUNTRY: &str = "address.country";
    pub const ADDRESS_REGION: &str = "address.region";
    pub const ADDRESS_LOCALITY: &str = "address.locality";
    pub const ADDRESS_POSTAL_CODE: &str = "address.postal_code";
    pub const ADDRESS_STREET: &str = "address.street_address";
    pub const ADDRESS_HOUSE_NUMBER: &str = "address.house_number";

    /// Members of the `address` object.
    pub mod address {
        pub const FORMATTED: &str = "formatted";
        pub const COUNTRY: &str = "country";
        pub const REGION: &str = "region";
        pub const LOCALITY: &str = "locality";
        pub const POSTAL_CODE: &str = "postal_code";
        pub const STREET: &str = "street_address";
        pub const HOUSE_NUMBER: &str = "house_number";
    }

    pub const GENDER: &str = "gender";
    pub const SEX: &str = "sex";
    pub const NATIONALITIES: &str = "nationalities";
    pub const ISSUANCE_DATE: &str = "iat";
    pub const EXPIRY_DATE: &str = "exp";
    pub const ISSUING_AUTHORITY: &str = "issuing_authority";
    pub const DOCUMENT_NUMBER: &str = "document_number";
    pub const ADMINISTRATIVE_NUMBER: &str = "administrative_number";
    pub const ISSUING_COUNTRY: &str = "issuing_country";
    pub const ISSUING_JURISDICTION: &str = "issuing_jurisdiction";
    pub const PERSONAL_ADMINISTRATIVE_NUMBER: &str = "personal_administrative_number";
    pub const PORTRAIT: &str = "picture";
    pub const EMAIL: &str = "email";
    pub const PHONE_NUMBER: &str = "phone_number";
    pub const TRUST_ANCHOR: &str = "trust_anchor";
    pub const LOCATION_STATUS: &str = "location_status";
}

use attributes as a;
use sd_jwt_attributes as s;

/// All plain-JWT/VC and ISO claim names, in rule book order.
pub const CLAIM_NAMES: &[&str] = &[
    a::FAMILY_NAME,
    a::GIVEN_NAME,
    a::BIRTH_DATE,
    a::AGE_OVER_12,
    a::AGE_OVER_13,
    a::AGE_OVER_14,
    a::AGE_OVER_16,
    a::AGE_OVER_18,
    a::AGE_OVER_21,
    a::AGE_OVER_25,
    a::AGE_OVER_60,
    a::AGE_OVER_62,
    a::AGE_OVER_65,
    a::AGE_OVER_68,
    a::AGE_IN_YEARS,
    a::AGE_BIRTH_YEAR,
    a::FAMILY_NAME_BIRTH,
    a::GIVEN_NAME_BIRTH,
    a::BIRTH_PLACE,
    a::BIRTH_COUNTRY,
    a::BIRTH_STATE,
    a::BIRTH_CITY,
    a::RESIDENT_ADDRESS,
    a::RESIDENT_COUNTRY,
    a::RESIDENT_STATE,
    a::RESIDENT_CITY,
    a::RESIDENT_POSTAL_CODE,
    a::RESIDENT_STREET,
    a::RESIDENT_HOUSE_NUMBER,
    a::GENDER,
    a::SEX,
    a::NATIONALITY,
    a::ISSUANCE_DATE,
    a::EXPIRY_DATE,
    a::ISSUING_AUTHORITY,
    a::DOCUMENT_NUMBER,
    a::ADMINISTRATIVE_NUMBER,
    a::ISSUING_COUNTRY,
    a::ISSUING_JURISDICTION,
    a::PERSONAL_ADMINISTRATIVE_NUMBER,
    a::PORTRAIT,
    a::PORTRAIT_CAPTURE_DATE,
    a::EMAIL_ADDRESS,
    a::MOBILE_PHONE_NUMBER,
    a::TRUST_ANCHOR,
    a::LOCATION_STATUS,
];

/// Claims every EU PID must carry.
pub const REQUIRED_CLAIM_NAMES: &[&str] = &[
    a::FAMILY_NAME,
    a::GIVEN_NAME,
    a::BIRTH_DATE,
    a::AGE_OVER_18,
    a::ISSUANCE_DATE,
    a::EXPIRY_DATE,
    a::ISSUING_AUTHORITY,
    a::ISSUING_COUNTRY,
];

/// Claims superseded by v1.5.0, still accepted from older issuers.
pub const DEPRECATED_CLAIM_NAMES: &[&str] = &[
    a::BIRTH_COUNTRY,
    a::BIRTH_STATE,
    a::BIRTH_CITY,
    a::GENDER,
    a::ADMINISTRATIVE_NUMBER,
];

/// SD-JWT counterparts of [`DEPRECATED_CLAIM_NAMES`].
pub const SD_JWT_DEPRECATED_CLAIM_NAMES: &[&str] = &[
    s::PLACE_OF_BIRTH_COUNTRY,
    s::PLACE_OF_BIRTH_REGION,
    s::PLACE_OF_BIRTH_LOCALITY,
    s::GENDER,
    s::ADMINISTRATIVE_NUMBER,
];

/// All SD-JWT claim paths, in rule book order.
pub const SD_JWT_CLAIM_NAMES: &[&str] = &[
    s::FAMILY_NAME,
    s::GIVEN_NAME,
    s::BIRTH_DATE,
    s::AGE_EQUAL_OR_OVER_12,
    s::AGE_EQUAL_OR_OVER_13,
    s::AGE_EQUAL_OR_OVER_14,
    s::AGE_EQUAL_OR_OVER_16,
    s::AGE_EQUAL_OR_OVER_18,
    s::AGE_EQUAL_OR_OVER_21,
    s::AGE_EQUAL_OR_OVER_25,
    s::AGE_EQUAL_OR_OVER_60,
    s::AGE_EQUAL_OR_OVER_62,
    s::AGE_EQUAL_OR_OVER_65,
    s::AGE_EQUAL_OR_OVER_68,
    s::AGE_IN_YEARS,
    s::AGE_BIRTH_YEAR,
    s::FAMILY_NAME_BIRTH,
    s::GIVEN_NAME_BIRTH,
    s::PLACE_OF_BIRTH_COUNTRY,
    s::PLACE_OF_BIRTH_REGION,
    s::PLACE_OF_BIRTH_LOCALITY,
    s::ADDRESS_FORMATTED,
    s::ADDRESS_COUNTRY,
    s::ADDRESS_REGION,
    s::ADDRESS_LOCALITY,
    s::ADDRESS_POSTAL_CODE,
    s::ADDRESS_STREET,
    s::ADDRESS_HOUSE_NUMBER,
    s::GENDER,
    s::SEX,
    s::NATIONALITIES,
    s::ISSUANCE_DATE,
    s::EXPIRY_DATE,
    s::ISSUING_AUTHORITY,
    s::DOCUMENT_NUMBER,
    s::ADMINISTRATIVE_NUMBER,
    s::ISSUING_COUNTRY,
    s::ISSUING_JURISDICTION,
    s::PERSONAL_ADMINISTRATIVE_NUMBER,
    s::PORTRAIT,
    s::EMAIL,
    s::PHONE_NUMBER,
    s::TRUST_ANCHOR,
    s::LOCATION_STATUS,
];

/// SD-JWT claims every EU PID must carry.
pub const SD_JWT_REQUIRED_CLAIM_NAMES: &[&str] = &[
    s::FAMILY_NAME,
    s::GIVEN_NAME,
    s::BIRTH_DATE,
    s::AGE_EQUAL_OR_OVER_18,
    s::ISSUANCE_DATE,
    s::EXPIRY_DATE,
    s::ISSUING_AUTHORITY,
    s::ISSUING_COUNTRY,
];

/// Claim names in the naming variant of `representation`.
pub fn claim_names_for(representation: CredentialRepresentation) -> &'static [&'static str] {
    match representation {
        CredentialRepresentation::PlainJwt | CredentialRepresentation::IsoMdoc => CLAIM_NAMES,
        CredentialRepresentation::SdJwt => SD_JWT_CLAIM_NAMES,
    }
}

/// Whether `name` is mandatory, in either naming variant.
pub fn is_required(name: &str) -> bool {
    REQUIRED_CLAIM_NAMES.contains(&name) || SD_JWT_REQUIRED_CLAIM_NAMES.contains(&name)
}

/// Whether `name` is deprecated, in either naming variant.
pub fn is_deprecated(name: &str) -> bool {
    DEPRECATED_CLAIM_NAMES.contains(&name) || SD_JWT_DEPRECATED_CLAIM_NAMES.contains(&name)
}
