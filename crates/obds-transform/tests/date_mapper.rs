#![allow(missing_docs)]

use chrono::{Datelike, NaiveDate};
use obds_model::{DatePrecision, PrecisePrecision};
use obds_transform::date::{map_date, map_date_precise, parse_full_date};
use proptest::prelude::*;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn test_precision_tiers() {
    let full = map_date("01.01.2024").expect("full date");
    assert_eq!(full.value, ymd(2024, 1, 1));
    assert_eq!(full.precision, DatePrecision::Day);

    let month = map_date("00.10.2024").expect("month date");
    assert_eq!(month.value, ymd(2024, 10, 1));
    assert_eq!(month.precision, DatePrecision::Month);

    let year = map_date("00.00.2024").expect("year date");
    assert_eq!(year.value, ymd(2024, 1, 1));
    assert_eq!(year.precision, DatePrecision::Year);

    let unknown = map_date("00.00.0000").expect("unknown date");
    assert_eq!(unknown.value, ymd(1900, 1, 1));
    assert_eq!(unknown.precision, DatePrecision::Unknown);
}

#[test]
fn test_precise_date_defaults_to_month() {
    let date = map_date_precise("00.00.2020").expect("precise date");
    assert_eq!(date.value, ymd(2020, 1, 1));
    assert_eq!(date.precision, PrecisePrecision::Month);

    let date = map_date_precise("17.05.2021").expect("precise date");
    assert_eq!(date.precision, PrecisePrecision::Day);
    assert!(map_date_precise("00.00.0000").is_none());
}

#[test]
fn test_garbage_is_rejected() {
    assert!(map_date("somethingbad").is_none());
    assert!(map_date("").is_none());
    assert!(map_date("2024-01-01").is_none());
    assert!(map_date("32.01.2024").is_none());
    assert!(map_date("31.02.2024").is_none());
    assert!(map_date_precise("somethingbad").is_none());
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    assert_eq!(map_date(" 01.01.2024 ").map(|date| date.value), Some(ymd(2024, 1, 1)));
}

#[test]
fn test_full_date_requires_day_and_month() {
    assert_eq!(parse_full_date("15.08.2019"), Some(ymd(2019, 8, 15)));
    assert_eq!(parse_full_date("00.08.2019"), None);
}

proptest! {
    #[test]
    fn known_components_round_trip(year in 1800i32..2100, month in 1u32..=12, day in 1u32..=28) {
        let input = format!("{day:02}.{month:02}.{year}");
        let date = map_date(&input).expect("mapped date");
        prop_assert_eq!(date.precision, DatePrecision::Day);
        prop_assert_eq!((date.value.year(), date.value.month(), date.value.day()), (year, month, day));
    }

    #[test]
    fn unknown_day_keeps_month(year in 1800i32..2100, month in 1u32..=12) {
        let input = format!("00.{month:02}.{year}");
        let date = map_date(&input).expect("mapped date");
        prop_assert_eq!(date.precision, DatePrecision::Month);
        prop_assert_eq!(date.value, ymd(year, month, 1));
    }

    #[test]
    fn arbitrary_text_never_panics(input in "\\PC*") {
        let _ = map_date(&input);
        let _ = map_date_precise(&input);
    }
}
