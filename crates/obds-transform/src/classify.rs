//! Small classification rules for values oBDS v3 models differently.

use std::sync::LazyLock;

use chrono::NaiveDate;
use obds_model::{Address, Insurance, Sex, SourceAddress, YesNoUnknown};
use regex::Regex;

use crate::date::parse_full_date;
use crate::error::{Result, TransformError};

/// Registry substitute codes used in place of a payer IKNR.
pub const SUBSTITUTE_PAYER_CODES: [&str; 5] = [
    "970000011",
    "970001001",
    "970100001",
    "970000022",
    "970000099",
];

/// Reporter IDs containing this marker denote external services.
pub const EXTERNAL_REPORTER_MARKER: &str = "9999";

/// Default for missing laterality and performance status.
pub const UNKNOWN_CODE: &str = "U";

static PRIVATE_PAYER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:16\d{7}|950\d{6})$").expect("valid payer pattern"));
static STATUTORY_PAYER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^10\d{7}$").expect("valid payer pattern"));
static STATUTORY_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]\d{9}$").expect("valid member pattern"));

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Classify the insurance scheme from payer number (`KrankenkassenNr`) and
/// member number (`KrankenversichertenNr`).
///
/// A blank payer number means no insurance data. A payer number that fits no
/// scheme makes the patient unmappable.
pub fn classify_insurance(payer: Option<&str>, member: Option<&str>) -> Result<Option<Insurance>> {
    let Some(payer) = non_blank(payer) else {
        return Ok(None);
    };

    if SUBSTITUTE_PAYER_CODES.contains(&payer) {
        return Ok(Some(Insurance::Other {
            substitute_code: payer.to_string(),
        }));
    }
    if let Some(member) = non_blank(member)
        && PRIVATE_PAYER.is_match(payer)
    {
        return Ok(Some(Insurance::Private {
            iknr: payer.to_string(),
            member_number: member.to_string(),
        }));
    }
    if let Some(member) = member
        && STATUTORY_MEMBER.is_match(member)
        && STATUTORY_PAYER.is_match(payer)
    {
        return Ok(Some(Insurance::Statutory {
            iknr: payer.to_string(),
            member_number: member.to_string(),
        }));
    }
    Err(TransformError::unmappable("Unmappable 'Versichertendaten'"))
}

/// Only `M` and `W` survive; every other code, including the v2 code `S`,
/// becomes unknown.
pub fn classify_sex(code: Option<&str>) -> Sex {
    match code.map(str::trim) {
        Some("M") => Sex::Male,
        Some("W") => Sex::Female,
        _ => Sex::Unknown,
    }
}

/// Whether `today` lies strictly inside the address validity window.
///
/// Absent bounds are unbounded. A bound that is present but cannot be parsed
/// as a complete date makes the address invalid.
pub fn is_currently_valid(address: &SourceAddress, today: NaiveDate) -> bool {
    let after_start = match address.valid_from.as_deref() {
        None => true,
        Some(start) => parse_full_date(start).is_some_and(|start| start < today),
    };
    let before_end = match address.valid_until.as_deref() {
        None => true,
        Some(end) => parse_full_date(end).is_some_and(|end| end > today),
    };
    after_start && before_end
}

/// Pick the first currently valid address.
///
/// Without any address list an empty placeholder address is returned, since
/// the target requires the element.
pub fn select_address(addresses: Option<&[SourceAddress]>, today: NaiveDate) -> Option<Address> {
    let Some(addresses) = addresses else {
        return Some(Address::default());
    };
    addresses
        .iter()
        .find(|address| is_currently_valid(address, today))
        .map(|address| Address {
            street: address.street.clone(),
            house_number: address.house_number.clone(),
            country: address.country.clone(),
            postal_code: address.postal_code.clone(),
            city: address.city.clone(),
        })
}

/// `Eigene_Leistung`: services of external reporters are not own services.
pub fn own_service(reporter_id: Option<&str>) -> YesNoUnknown {
    if reporter_id.is_some_and(|id| id.contains(EXTERNAL_REPORTER_MARKER)) {
        YesNoUnknown::No
    } else {
        YesNoUnknown::Yes
    }
}

pub fn laterality_or_unknown(laterality: Option<&str>) -> String {
    laterality.unwrap_or(UNKNOWN_CODE).to_string()
}

pub fn performance_status_or_unknown(status: Option<&str>) -> String {
    status.unwrap_or(UNKNOWN_CODE).to_string()
}
