//! Shared fixtures for the EU PID integration tests.

#![allow(dead_code)]

use std::collections::BTreeSet;

use chrono::{NaiveDate, TimeZone, Utc};

use eupid::{
    Address, AgeEqualOrOver, EuPidCredential, EuPidCredentialSdJwt, IsoIec5218Gender, Nationality, PlaceOfBirth,
    Portrait,
};
use vck_core::LocalDateOrInstant;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn instant(y: i32, m: u32, d: u32, h: u32) -> LocalDateOrInstant {
    LocalDateOrInstant::Instant(Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap())
}

/// Record with only the mandatory claims, dates given as instants.
pub fn minimal_pid() -> EuPidCredential {
    EuPidCredential::new(
        "urn:uuid:6f1c5a44-2b5e-4a6e-9c1e-0d3c9b0f6a11",
        "Mustermann",
        "Erika",
        date(1984, 8, 12),
        true,
        instant(2026, 1, 15, 12),
        instant(2036, 1, 14, 12),
        "Bundesministerium für Inneres",
        "AT",
    )
}

/// Record with every claim populated, dates given as local dates.
pub fn full_pid() -> EuPidCredential {
    let mut pid = EuPidCredential::new(
        "urn:uuid:0b3e2a9d-1c4f-4e7b-8a6d-5f2c1e9b7d30",
        "Mustermann",
        "Erika",
        date(1984, 8, 12),
        true,
        date(2026, 1, 15),
        date(2036, 1, 14),
        "Bundesministerium für Inneres",
        "AT",
    );
    pid.age_over_12 = Some(true);
    pid.age_over_13 = Some(true);
    pid.age_over_14 = Some(true);
    pid.age_over_16 = Some(true);
    pid.age_over_21 = Some(true);
    pid.age_over_25 = Some(true);
    pid.age_over_60 = Some(false);
    pid.age_over_62 = Some(false);
    pid.age_over_65 = Some(false);
    pid.age_over_68 = Some(false);
    pid.age_in_years = Some(41);
    pid.age_birth_year = Some(1984);
    pid.family_name_birth = Some("Gabler".into());
    pid.given_name_birth = Some("Erika Maria".into());
    pid.birth_place = Some("Graz, Steiermark, AT".into());
    pid.birth_country = Some("AT".into());
    pid.birth_state = Some("Steiermark".into());
    pid.birth_city = Some("Graz".into());
    pid.resident_address = Some("Heidestraße 17, 8010 Graz".into());
    pid.resident_country = Some("AT".into());
    pid.resident_state = Some("Steiermark".into());
    pid.resident_city = Some("Graz".into());
    pid.resident_postal_code = Some("8010".into());
    pid.resident_street = Some("Heidestraße".into());
    pid.resident_house_number = Some("17".into());
    pid.gender = Some(IsoIec5218Gender::Female);
    pid.sex = Some(2);
    pid.nationality = Some(Nationality::from_many(["AT", "DE"]));
    pid.document_number = Some("P1234567".into());
    pid.administrative_number = Some("ZMR-0042".into());
    pid.issuing_jurisdiction = Some("AT-6".into());
    pid.personal_administrative_number = Some("bPK-AT-9f8e".into());
    pid.portrait = Some(Portrait::new(vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10]));
    pid.portrait_capture_date = Some(date(2025, 11, 3));
    pid.email_address = Some("erika@example.at".into());
    pid.mobile_phone_number = Some("+436641234567".into());
    pid.trust_anchor = Some("https://pid.example.at/trust".into());
    pid.location_status = Some("https://pid.example.at/status/42".into());
    pid
}

/// SD-JWT record with every claim populated.
pub fn full_sd_jwt() -> EuPidCredentialSdJwt {
    let mut pid = EuPidCredentialSdJwt::new(
        "Mustermann",
        "Erika",
        date(1984, 8, 12),
        true,
        instant(2026, 1, 15, 12),
        instant(2036, 1, 14, 12),
        "Bundesministerium für Inneres",
        "AT",
    );
    pid.age_equal_or_over = AgeEqualOrOver {
        equal_or_over_12: Some(true),
        equal_or_over_13: Some(true),
        equal_or_over_14: Some(true),
        equal_or_over_16: Some(true),
        equal_or_over_18: true,
        equal_or_over_21: Some(true),
        equal_or_over_25: Some(true),
        equal_or_over_60: Some(false),
        equal_or_over_62: Some(false),
        equal_or_over_65: Some(false),
        equal_or_over_68: Some(false),
    };
    pid.age_in_years = Some(41);
    pid.age_birth_year = Some(1984);
    pid.family_name_birth = Some("Gabler".into());
    pid.given_name_birth = Some("Erika Maria".into());
    pid.place_of_birth = Some(PlaceOfBirth {
        country: Some("AT".into()),
        region: Some("Steiermark".into()),
        locality: Some("Graz".into()),
    });
    pid.address = Some(Address {
        formatted: Some("Heidestraße 17, 8010 Graz".into()),
        country: Some("AT".into()),
        region: Some("Steiermark".into()),
        locality: Some("Graz".into()),
        postal_code: Some("8010".into()),
        street: Some("Heidestraße".into()),
        house_number: Some("17".into()),
    });
    pid.gender = Some("female".into());
    pid.sex = Some(2);
    pid.nationalities = Some(BTreeSet::from(["AT".to_string(), "DE".to_string()]));
    pid.document_number = Some("P1234567".into());
    pid.administrative_number = Some("ZMR-0042".into());
    pid.issuing_jurisdiction = Some("AT-6".into());
    pid.personal_administrative_number = Some("bPK-AT-9f8e".into());
    pid.portrait = Some(Portrait::new(vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10]));
    pid.email = Some("erika@example.at".into());
    pid.phone_number = Some("+436641234567".into());
    pid.trust_anchor = Some("https://pid.example.at/trust".into());
    pid.location_status = Some("https://pid.example.at/status/42".into());
    pid
}
