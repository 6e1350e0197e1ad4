//! Conversion of ADT_GEKID date strings.
//!
//! ADT_GEKID writes dates as `DD.MM.YYYY` where `00` marks an unknown day or
//! month. The year must lie within 1800..=2099. None of the functions here
//! fail; an unusable input yields `None` and the caller decides whether the
//! date was mandatory.
//!
//! | Input        | [`map_date`]           | [`map_date_precise`]  |
//! |--------------|------------------------|-----------------------|
//! | `01.01.2024` | 2024-01-01, `E`        | 2024-01-01, `E`       |
//! | `00.10.2024` | 2024-10-01, `T`        | 2024-10-01, `T`       |
//! | `00.00.2024` | 2024-01-01, `M`        | 2024-01-01, `T` (warn)|
//! | `00.00.0000` | 1900-01-01, `V`        | none                  |

use std::sync::LazyLock;

use chrono::NaiveDate;
use obds_model::{DatePrecision, DateValue, PreciseDate, PrecisePrecision};
use regex::Regex;
use tracing::{debug, warn};

/// Literal used by ADT_GEKID for a completely unknown date.
pub const UNKNOWN_DATE: &str = "00.00.0000";

/// Year the unknown date sentinel maps to.
pub const UNKNOWN_DATE_YEAR: i32 = 1900;

static SOURCE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<day>[0-2]\d|3[01])\.(?<month>0\d|1[0-2])\.(?<year>(?:18|19|20)\d\d)$")
        .expect("valid source date pattern")
});

/// Components of a matched source date. Zero means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateParts {
    year: i32,
    month: u32,
    day: u32,
}

impl DateParts {
    fn parse(input: &str) -> Option<Self> {
        let captures = SOURCE_DATE.captures(input.trim())?;
        Some(Self {
            year: captures["year"].parse().ok()?,
            month: captures["month"].parse().ok()?,
            day: captures["day"].parse().ok()?,
        })
    }

    /// Calendar date with unknown components set to 1.
    fn calendar_date(self) -> Option<NaiveDate> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month.max(1), self.day.max(1));
        if date.is_none() {
            debug!(
                year = self.year,
                month = self.month,
                day = self.day,
                "date components do not form a calendar date"
            );
        }
        date
    }
}

/// Map a source date to a date of any precision.
///
/// The year is always known, a non-zero month raises the precision to `T` and
/// a non-zero day to `E`. [`UNKNOWN_DATE`] maps to 1900-01-01 with precision
/// `V`.
pub fn map_date(input: &str) -> Option<DateValue> {
    if input.trim() == UNKNOWN_DATE {
        let value = NaiveDate::from_ymd_opt(UNKNOWN_DATE_YEAR, 1, 1)?;
        return Some(DateValue::new(value, DatePrecision::Unknown));
    }

    let parts = DateParts::parse(input)?;
    let mut precision = DatePrecision::Year;
    if parts.month > 0 {
        precision = DatePrecision::Month;
    }
    if parts.day > 0 {
        precision = DatePrecision::Day;
    }
    Some(DateValue::new(parts.calendar_date()?, precision))
}

/// Map a source date to a date known at least to the month.
///
/// When both day and month are unknown the date is still accepted with
/// precision `T` and a warning, because the target field cannot express a
/// year-only date.
pub fn map_date_precise(input: &str) -> Option<PreciseDate> {
    let parts = DateParts::parse(input)?;
    let precision = if parts.day > 0 {
        PrecisePrecision::Day
    } else {
        if parts.month == 0 {
            warn!(
                year = parts.year,
                "month and day are unknown but the field requires at least the month; \
                 defaulting to precision 'T'"
            );
        }
        PrecisePrecision::Month
    };
    Some(PreciseDate::new(parts.calendar_date()?, precision))
}

/// Map an ISO formatted (`YYYY-MM-DD`) date, as used by the prostate module.
pub fn map_iso_date(input: &str) -> Option<DateValue> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .ok()
        .map(|value| DateValue::new(value, DatePrecision::Day))
}

/// Parse a source date that must be complete, as used for address validity.
pub fn parse_full_date(input: &str) -> Option<NaiveDate> {
    let parts = DateParts::parse(input)?;
    NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_reject_out_of_range_years() {
        assert!(DateParts::parse("01.01.1799").is_none());
        assert!(DateParts::parse("01.01.2100").is_none());
        assert!(DateParts::parse("01.13.2000").is_none());
        assert!(DateParts::parse("32.01.2000").is_none());
    }

    #[test]
    fn parts_require_whole_input() {
        assert!(DateParts::parse("x01.01.2000").is_none());
        assert!(DateParts::parse("01.01.20001").is_none());
        assert_eq!(
            DateParts::parse(" 01.02.2000 "),
            Some(DateParts {
                year: 2000,
                month: 2,
                day: 1
            })
        );
    }

    #[test]
    fn impossible_calendar_dates_are_dropped() {
        assert!(map_date("31.02.2024").is_none());
        assert!(map_date_precise("30.02.2024").is_none());
    }
}
