//! # EU PID Representations
//!
//! Round trips of the EU PID records through every supported encoding:
//! the plain-JWT VC envelope (polymorphic subject decoding), SD-JWT claim
//! sets in JSON and CBOR, and ISO issuer-signed items in CBOR. Also covers
//! conversion between the flat and the nested record.

mod common;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{TimeZone, Utc};
use ciborium::value::Value as CborValue;
use proptest::prelude::*;
use serde_json::json;

use common::{date, full_pid, full_sd_jwt, instant, minimal_pid};
use eupid::scheme::{ISO_NAMESPACE, VC_TYPE};
use eupid::{init_with_vck, EuPidCredential, EuPidCredentialSdJwt, IsoIec5218Gender, Nationality, PidError, Portrait};
use vck_core::value::TAG_FULL_DATE;
use vck_core::{ClaimValue, IssuerSignedItem, VckError, VerifiableCredential};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut h = DefaultHasher::new();
    value.hash(&mut h);
    h.finish()
}

fn through_vc(pid: &EuPidCredential) -> EuPidCredential {
    init_with_vck().unwrap();
    let issued = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
    let vc = VerifiableCredential::new("did:example:pid-provider", issued, None, pid).unwrap();
    let wire = serde_json::to_string(&vc).unwrap();
    let back: VerifiableCredential = serde_json::from_str(&wire).unwrap();
    assert_eq!(back, vc);
    assert_eq!(back.subject_type(), Some(VC_TYPE));
    let subject = back.subject().unwrap();
    subject.downcast_ref::<EuPidCredential>().unwrap().clone()
}

fn through_iso(pid: &EuPidCredential) -> EuPidCredential {
    let items = pid.to_iso_items().unwrap();
    let decoded: Vec<IssuerSignedItem> = items
        .iter()
        .map(|item| {
            let bytes = item.to_cbor(ISO_NAMESPACE).unwrap();
            IssuerSignedItem::from_cbor(&bytes, ISO_NAMESPACE).unwrap()
        })
        .collect();
    assert_eq!(decoded, items);
    EuPidCredential::from_iso_items(pid.id.clone(), &decoded).unwrap()
}

fn element_value(pid: &EuPidCredential, name: &str) -> CborValue {
    let items = pid.to_iso_items().unwrap();
    let item = items.iter().find(|i| i.element_identifier == name).unwrap();
    match item.to_cbor_value(ISO_NAMESPACE).unwrap() {
        CborValue::Map(mut entries) => entries.remove(3).1,
        other => panic!("expected map, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Plain-JWT VC
// ---------------------------------------------------------------------------

#[test]
fn vc_roundtrip_with_instants() {
    let pid = minimal_pid();
    assert_eq!(through_vc(&pid), pid);
}

#[test]
fn vc_roundtrip_with_local_dates_and_all_claims() {
    let pid = full_pid();
    assert_eq!(through_vc(&pid), pid);
}

#[test]
fn vc_subject_json_shape() {
    let pid = full_pid();
    let vc = VerifiableCredential::new("did:example:pid-provider", Utc::now(), None, &pid).unwrap();
    let subject = &vc.credential_subject;
    assert_eq!(subject["type"], "EuPid2023");
    assert_eq!(subject["birth_date"], "1984-08-12");
    assert_eq!(subject["issuance_date"], "2026-01-15");
    assert_eq!(subject["gender"], 2);
    assert_eq!(subject["nationality"], json!(["AT", "DE"]));
    assert_eq!(subject["portrait"], "_9j_4AAQ");
    assert!(vc.credential_type.contains("VerifiableCredential"));
    assert!(vc.credential_type.contains(VC_TYPE));
}

#[test]
fn vc_subject_without_type_is_rejected() {
    init_with_vck().unwrap();
    let mut vc = VerifiableCredential::new("did:example:pid-provider", Utc::now(), None, &minimal_pid()).unwrap();
    vc.credential_subject.as_object_mut().unwrap().remove("type");
    assert!(matches!(vc.subject(), Err(VckError::MissingElement(_))));
}

// ---------------------------------------------------------------------------
// ISO items
// ---------------------------------------------------------------------------

#[test]
fn iso_roundtrip_with_instants() {
    let pid = minimal_pid();
    assert_eq!(through_iso(&pid), pid);
}

#[test]
fn iso_roundtrip_with_local_dates_and_all_claims() {
    let pid = full_pid();
    assert_eq!(through_iso(&pid), pid);
}

#[test]
fn iso_dates_are_tagged() {
    let pid = full_pid();
    assert_eq!(
        element_value(&pid, "birth_date"),
        CborValue::Tag(TAG_FULL_DATE, Box::new(CborValue::Text("1984-08-12".into())))
    );
    assert_eq!(
        element_value(&pid, "issuance_date"),
        CborValue::Tag(TAG_FULL_DATE, Box::new(CborValue::Text("2026-01-15".into())))
    );
    assert_eq!(
        element_value(&minimal_pid(), "expiry_date"),
        CborValue::Tag(0, Box::new(CborValue::Text("2036-01-14T12:00:00Z".into())))
    );
}

#[test]
fn iso_portrait_is_byte_string() {
    let pid = full_pid();
    assert_eq!(
        element_value(&pid, "portrait"),
        CborValue::Bytes(vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10])
    );
}

#[test]
fn iso_nationality_keeps_its_shape() {
    let mut pid = minimal_pid();
    pid.nationality = Some(Nationality::from_single("DE"));
    assert_eq!(element_value(&pid, "nationality"), CborValue::Text("DE".into()));
    assert_eq!(through_iso(&pid).nationality(), Some("DE"));

    pid.nationality = Some(Nationality::from_many(["DE", "AT"]));
    assert_eq!(
        element_value(&pid, "nationality"),
        CborValue::Array(vec![CborValue::Text("DE".into()), CborValue::Text("AT".into())])
    );
    let back = through_iso(&pid);
    assert_eq!(back.nationalities(), Some(&["DE".to_string(), "AT".to_string()][..]));
}

#[test]
fn unrecognized_nationality_is_dropped_not_fatal() {
    let base = minimal_pid();
    let mut claims = base.to_claims().unwrap();
    claims.insert("nationality".into(), json!(42));
    let pid = EuPidCredential::from_claims(base.id.clone(), &claims).unwrap();
    assert_eq!(pid.nationality.as_ref().map(Nationality::raw), Some(&json!(42)));
    assert_eq!(pid.nationality(), None);
    assert_eq!(pid.nationalities(), None);

    // The plain-JWT VC keeps the element as received.
    assert_eq!(through_vc(&pid), pid);

    assert_eq!(pid.to_sd_jwt().unwrap().nationalities, None);

    let items = pid.to_iso_items().unwrap();
    assert!(items.iter().all(|i| i.element_identifier != "nationality"));
    let back = through_iso(&pid);
    assert_eq!(back.nationality, None);
    assert_eq!(back, base);
}

#[test]
fn iso_rejects_unassigned_gender_code() {
    // Encode under a namespace without codecs so the value is not checked.
    let item = IssuerSignedItem::new(0, "gender", ClaimValue::UInt(7));
    let bytes = item.to_cbor("org.example.unchecked").unwrap();
    init_with_vck().unwrap();
    let err = IssuerSignedItem::from_cbor(&bytes, ISO_NAMESPACE).unwrap_err();
    assert!(matches!(err, VckError::InvalidClaimValue { ref claim, .. } if claim == "gender"));
}

#[test]
fn iso_rejects_mistyped_age_attestation() {
    let item = IssuerSignedItem::new(0, "age_over_18", ClaimValue::Text("yes".into()));
    let bytes = item.to_cbor("org.example.unchecked").unwrap();
    init_with_vck().unwrap();
    assert!(IssuerSignedItem::from_cbor(&bytes, ISO_NAMESPACE).is_err());
}

#[test]
fn iso_items_missing_mandatory_claim() {
    let items: Vec<_> = minimal_pid()
        .to_iso_items()
        .unwrap()
        .into_iter()
        .filter(|i| i.element_identifier != "family_name")
        .collect();
    let err = EuPidCredential::from_iso_items("urn:x", &items).unwrap_err();
    assert!(matches!(err, PidError::MissingClaim(ref c) if c == "family_name"));
}

// ---------------------------------------------------------------------------
// SD-JWT
// ---------------------------------------------------------------------------

#[test]
fn sd_jwt_json_roundtrip() {
    let pid = full_sd_jwt();
    let claims = pid.to_claims().unwrap();
    assert_eq!(claims["iat"], "2026-01-15T12:00:00Z");
    assert_eq!(claims["age_equal_or_over"]["18"], true);
    assert_eq!(claims["address"]["street_address"], "Heidestraße");
    assert_eq!(EuPidCredentialSdJwt::from_claims(&claims).unwrap(), pid);
}

#[test]
fn sd_jwt_cbor_roundtrip() {
    let pid = full_sd_jwt();
    let mut bytes = Vec::new();
    ciborium::into_writer(&pid, &mut bytes).unwrap();
    let back: EuPidCredentialSdJwt = ciborium::from_reader(bytes.as_slice()).unwrap();
    assert_eq!(back, pid);
}

#[test]
fn sd_jwt_accepts_epoch_seconds() {
    let mut claims = full_sd_jwt().to_claims().unwrap();
    claims.insert("iat".into(), json!(1_768_478_400));
    let pid = EuPidCredentialSdJwt::from_claims(&claims).unwrap();
    assert_eq!(pid.issuance_date, instant(2026, 1, 15, 12));
}

#[test]
fn sd_jwt_missing_nested_mandatory_claim() {
    let mut claims = full_sd_jwt().to_claims().unwrap();
    claims["age_equal_or_over"].as_object_mut().unwrap().remove("18");
    let err = EuPidCredentialSdJwt::from_claims(&claims).unwrap_err();
    assert!(matches!(err, PidError::MissingClaim(ref c) if c == "age_equal_or_over.18"));
}

// ---------------------------------------------------------------------------
// Conversion between the flat and nested records
// ---------------------------------------------------------------------------

#[test]
fn flat_to_nested_and_back() {
    let mut pid = full_pid();
    let sd = pid.to_sd_jwt().unwrap();
    assert_eq!(sd.gender.as_deref(), Some("female"));
    assert_eq!(sd.address.as_ref().and_then(|a| a.postal_code.as_deref()), Some("8010"));
    assert_eq!(sd.age_equal_or_over.equal_or_over_65, Some(false));

    // No SD-JWT counterpart.
    pid.birth_place = None;
    pid.portrait_capture_date = None;
    assert_eq!(sd.to_credential(pid.id.clone()).unwrap(), pid);
}

#[test]
fn nested_to_flat_and_back() {
    let sd = full_sd_jwt();
    let pid = sd.to_credential("urn:x").unwrap();
    assert_eq!(pid.gender, Some(IsoIec5218Gender::Female));
    assert_eq!(pid.resident_street.as_deref(), Some("Heidestraße"));
    assert_eq!(pid.birth_city.as_deref(), Some("Graz"));
    assert_eq!(pid.nationalities(), Some(&["AT".to_string(), "DE".to_string()][..]));
    assert_eq!(pid.to_sd_jwt().unwrap(), sd);
}

#[test]
fn single_nationality_becomes_array() {
    let mut pid = minimal_pid();
    pid.nationality = Some(Nationality::from_single("AT"));
    let sd = pid.to_sd_jwt().unwrap();
    assert_eq!(sd.nationalities.map(|n| n.into_iter().collect::<Vec<_>>()), Some(vec!["AT".to_string()]));
}

// ---------------------------------------------------------------------------
// Value semantics
// ---------------------------------------------------------------------------

#[test]
fn every_field_takes_part_in_equality_and_hash() {
    let mutations: &[(&str, fn(&mut EuPidCredential))] = &[
        ("id", |p| p.id.push('x')),
        ("family_name", |p| p.family_name.push('x')),
        ("given_name", |p| p.given_name.push('x')),
        ("birth_date", |p| p.birth_date = date(1984, 8, 13)),
        ("age_over_12", |p| p.age_over_12 = None),
        ("age_over_13", |p| p.age_over_13 = None),
        ("age_over_14", |p| p.age_over_14 = None),
        ("age_over_16", |p| p.age_over_16 = None),
        ("age_over_18", |p| p.age_over_18 = false),
        ("age_over_21", |p| p.age_over_21 = None),
        ("age_over_25", |p| p.age_over_25 = None),
        ("age_over_60", |p| p.age_over_60 = Some(true)),
        ("age_over_62", |p| p.age_over_62 = Some(true)),
        ("age_over_65", |p| p.age_over_65 = Some(true)),
        ("age_over_68", |p| p.age_over_68 = Some(true)),
        ("age_in_years", |p| p.age_in_years = Some(42)),
        ("age_birth_year", |p| p.age_birth_year = Some(1985)),
        ("family_name_birth", |p| p.family_name_birth = None),
        ("given_name_birth", |p| p.given_name_birth = None),
        ("birth_place", |p| p.birth_place = None),
        ("birth_country", |p| p.birth_country = None),
        ("birth_state", |p| p.birth_state = None),
        ("birth_city", |p| p.birth_city = None),
        ("resident_address", |p| p.resident_address = None),
        ("resident_country", |p| p.resident_country = None),
        ("resident_state", |p| p.resident_state = None),
        ("resident_city", |p| p.resident_city = None),
        ("resident_postal_code", |p| p.resident_postal_code = None),
        ("resident_street", |p| p.resident_street = None),
        ("resident_house_number", |p| p.resident_house_number = None),
        ("gender", |p| p.gender = Some(IsoIec5218Gender::Diverse)),
        ("sex", |p| p.sex = Some(5)),
        ("nationality", |p| p.nationality = Some(Nationality::from_many(["DE", "AT"]))),
        ("issuance_date", |p| p.issuance_date = instant(2026, 1, 15, 12)),
        ("expiry_date", |p| p.expiry_date = date(2036, 1, 15).into()),
        ("issuing_authority", |p| p.issuing_authority.push('x')),
        ("document_number", |p| p.document_number = None),
        ("administrative_number", |p| p.administrative_number = None),
        ("issuing_country", |p| p.issuing_country = "DE".into()),
        ("issuing_jurisdiction", |p| p.issuing_jurisdiction = None),
        ("personal_administrative_number", |p| p.personal_administrative_number = None),
        ("portrait", |p| p.portrait = Some(Portrait::new(vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x11]))),
        ("portrait_capture_date", |p| p.portrait_capture_date = None),
        ("email_address", |p| p.email_address = None),
        ("mobile_phone_number", |p| p.mobile_phone_number = None),
        ("trust_anchor", |p| p.trust_anchor = None),
        ("location_status", |p| p.location_status = None),
    ];
    let base = full_pid();
    for (field, mutate) in mutations {
        let mut changed = base.clone();
        mutate(&mut changed);
        assert_ne!(changed, base, "{field}");
        assert_ne!(hash_of(&changed), hash_of(&base), "{field}");
    }
}

#[test]
fn portrait_compares_by_content() {
    let mut a = full_pid();
    let mut b = full_pid();
    let mut storage = Vec::with_capacity(1024);
    storage.extend_from_slice(&[0xff, 0xd8]);
    a.portrait = Some(Portrait::new(vec![0xff, 0xd8]));
    b.portrait = Some(Portrait::from(storage));
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn unknown_claims_are_ignored() {
    let mut claims = minimal_pid().to_claims().unwrap();
    claims.insert("eye_colour".into(), json!("green"));
    claims.insert("height".into(), json!(172));
    let pid = EuPidCredential::from_claims(minimal_pid().id, &claims).unwrap();
    assert_eq!(pid, minimal_pid());

    let mut claims = full_sd_jwt().to_claims().unwrap();
    claims.insert("verified_claims".into(), json!({"trust_framework": "eidas"}));
    assert_eq!(EuPidCredentialSdJwt::from_claims(&claims).unwrap(), full_sd_jwt());
}

#[test]
fn absent_optionals_are_omitted() {
    let json = serde_json::to_string(&minimal_pid()).unwrap();
    assert!(!json.contains("null"));
    assert!(!json.contains("age_over_21"));
    let sd = minimal_pid().to_sd_jwt().unwrap();
    let claims = sd.to_claims().unwrap();
    assert!(!claims.contains_key("address"));
    assert!(!claims.contains_key("place_of_birth"));
    assert_eq!(claims["age_equal_or_over"], json!({"18": true}));
}

#[test]
fn deprecated_claims_are_reported_per_representation() {
    let pid = full_pid();
    assert_eq!(
        pid.deprecated_claims_in_use(),
        ["birth_country", "birth_state", "birth_city", "gender", "administrative_number"]
    );
    assert_eq!(
        full_sd_jwt().deprecated_claims_in_use(),
        [
            "place_of_birth.country",
            "place_of_birth.region",
            "place_of_birth.locality",
            "gender",
            "administrative_number"
        ]
    );
    assert!(minimal_pid().deprecated_claims_in_use().is_empty());
}

proptest! {
    #[test]
    fn records_survive_vc_and_iso(
        family_name in "[A-Za-zÄÖÜäöüß' -]{1,24}",
        day_offset in 0i64..30_000,
        age_over_18 in any::<bool>(),
        age_in_years in proptest::option::of(0u32..130),
        gender in proptest::option::of(proptest::sample::select(IsoIec5218Gender::ALL.to_vec())),
        nationality in proptest::option::of(proptest::collection::vec("[A-Z]{2}", 0..4)),
        portrait in proptest::option::of(proptest::collection::vec(any::<u8>(), 0..64)),
    ) {
        let mut pid = minimal_pid();
        pid.family_name = family_name;
        pid.birth_date = date(1940, 1, 1) + chrono::Duration::days(day_offset);
        pid.age_over_18 = age_over_18;
        pid.age_in_years = age_in_years;
        pid.gender = gender;
        pid.nationality = nationality.map(Nationality::from_many);
        pid.portrait = portrait.map(Portrait::new);

        prop_assert_eq!(&through_vc(&pid), &pid);
        prop_assert_eq!(&through_iso(&pid), &pid);
    }
}
