#![allow(missing_docs)]

use chrono::NaiveDate;
use obds_model::{Insurance, Sex, SourceAddress, YesNoUnknown};
use obds_transform::classify::{
    classify_insurance, classify_sex, is_currently_valid, own_service, select_address,
};
use obds_transform::therapy_type::classify_therapy_type;
use proptest::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

fn address(from: Option<&str>, until: Option<&str>, city: &str) -> SourceAddress {
    SourceAddress {
        city: Some(city.to_string()),
        valid_from: from.map(str::to_string),
        valid_until: until.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn test_insurance_substitute_code() {
    let insurance = classify_insurance(Some("970000011"), None).expect("classified");
    assert_eq!(
        insurance,
        Some(Insurance::Other {
            substitute_code: "970000011".to_string()
        })
    );
}

#[test]
fn test_insurance_private() {
    let insurance = classify_insurance(Some("168141347"), Some("P12345")).expect("classified");
    assert!(matches!(insurance, Some(Insurance::Private { .. })));

    let insurance = classify_insurance(Some("950123456"), Some("X1")).expect("classified");
    assert!(matches!(insurance, Some(Insurance::Private { .. })));
}

#[test]
fn test_insurance_statutory() {
    let insurance = classify_insurance(Some("109519005"), Some("A123456789")).expect("classified");
    assert_eq!(
        insurance,
        Some(Insurance::Statutory {
            iknr: "109519005".to_string(),
            member_number: "A123456789".to_string(),
        })
    );
}

#[test]
fn test_insurance_unmappable_and_absent() {
    assert!(
        classify_insurance(Some("109519005"), Some("123"))
            .unwrap_err()
            .is_unmappable()
    );
    assert!(classify_insurance(Some("123"), None).unwrap_err().is_unmappable());
    assert_eq!(classify_insurance(None, Some("A123456789")), Ok(None));
    assert_eq!(classify_insurance(Some("  "), None), Ok(None));
}

#[test]
fn test_sex_codes() {
    assert_eq!(classify_sex(Some("M")), Sex::Male);
    assert_eq!(classify_sex(Some("W")), Sex::Female);
    assert_eq!(classify_sex(Some("S")), Sex::Unknown);
    assert_eq!(classify_sex(None), Sex::Unknown);
}

#[test]
fn test_address_bounds_are_strict() {
    assert!(is_currently_valid(&address(None, None, "A"), today()));
    assert!(is_currently_valid(
        &address(Some("14.06.2024"), Some("16.06.2024"), "A"),
        today()
    ));
    assert!(!is_currently_valid(&address(Some("15.06.2024"), None, "A"), today()));
    assert!(!is_currently_valid(&address(None, Some("15.06.2024"), "A"), today()));
    assert!(!is_currently_valid(&address(Some("00.06.2024"), None, "A"), today()));
}

#[test]
fn test_address_selection() {
    let addresses = vec![
        address(None, Some("01.01.2020"), "Old"),
        address(Some("01.01.2020"), None, "Current"),
        address(Some("01.01.2021"), None, "Also current"),
    ];
    let selected = select_address(Some(addresses.as_slice()), today()).expect("address");
    assert_eq!(selected.city.as_deref(), Some("Current"));

    let expired = vec![address(None, Some("01.01.2020"), "Old")];
    assert_eq!(select_address(Some(expired.as_slice()), today()), None);

    let placeholder = select_address(None, today()).expect("placeholder");
    assert_eq!(placeholder.city, None);
}

#[test]
fn test_own_service() {
    assert_eq!(own_service(Some("12349999")), YesNoUnknown::No);
    assert_eq!(own_service(Some("1234")), YesNoUnknown::Yes);
    assert_eq!(own_service(None), YesNoUnknown::Yes);
}

#[test]
fn test_therapy_type_single_codes() {
    assert_eq!(classify_therapy_type(&["KM"]), Ok(Some("SZ".to_string())));
    assert_eq!(classify_therapy_type(&["CH"]), Ok(Some("CH".to_string())));
    assert_eq!(classify_therapy_type(&["CH", "CH"]), Ok(Some("CH".to_string())));
    assert_eq!(classify_therapy_type::<&str>(&[]), Ok(None));
}

#[test]
fn test_therapy_type_documented_combinations() {
    let cases: &[(&[&str], &str)] = &[
        (&["CH", "IM"], "CI"),
        (&["ZS", "CH"], "CZ"),
        (&["CH", "IM", "ZS"], "CIZ"),
        (&["IM", "ZS"], "IZ"),
        (&["SO", "IM", "CH"], "CI"),
        (&["CH", "SO"], "CH"),
    ];
    for (codes, expected) in cases {
        assert_eq!(
            classify_therapy_type(*codes),
            Ok(Some((*expected).to_string())),
            "codes {codes:?}"
        );
    }
}

#[test]
fn test_therapy_type_unknown_combination_is_fatal() {
    let error = classify_therapy_type(&["CH", "OP"]).unwrap_err();
    assert!(!error.is_unmappable());
    assert!(error.to_string().contains("CHOP"));

    for codes in [
        ["HO", "IM"],
        ["HO", "ZS"],
        ["SO", "ZS"],
        ["HO", "SO"],
        ["CH", "HO"],
    ] {
        let error = classify_therapy_type(&codes).unwrap_err();
        assert!(!error.is_unmappable(), "codes {codes:?}");
    }
}

proptest! {
    #[test]
    fn therapy_type_ignores_order(
        codes in proptest::sample::subsequence(vec!["CH", "HO", "IM", "SO", "ZS"], 1..=5),
        seed in any::<u64>(),
    ) {
        let mut shuffled = codes.clone();
        let len = shuffled.len();
        shuffled.rotate_left((seed as usize) % len);
        shuffled.reverse();
        prop_assert_eq!(
            classify_therapy_type(codes.as_slice()),
            classify_therapy_type(shuffled.as_slice())
        );
    }
}
