//! Precision-qualified dates as used by the oBDS v3 schema.
//!
//! oBDS v3 never carries a bare calendar date for clinical events. Each date
//! is paired with a `Datumsgenauigkeit` attribute telling the reader which
//! components were actually known. Unknown components are filled with `01`.
//!
//! Two flavours exist because the schema uses two date types with different
//! minimum precision:
//!
//! - [`DateValue`] (`Datum_Tag_oder_Monat_oder_Jahr_oder_nicht_genau_Typ`)
//!   allows every tier including "no usable date".
//! - [`PreciseDate`] (`Datum_Tag_oder_Monat_genau_Typ`) requires at least the
//!   month to be known.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Precision tier of a date value, ordered from least to most precise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DatePrecision {
    /// No usable date (`V`, "vollständig geschätzt").
    Unknown,
    /// Year only (`M`, day and month estimated).
    Year,
    /// Year and month (`T`, day estimated).
    Month,
    /// Full date (`E`, exact).
    Day,
}

impl DatePrecision {
    /// Schema code written to the `Datumsgenauigkeit` attribute.
    pub fn code(self) -> &'static str {
        match self {
            DatePrecision::Unknown => "V",
            DatePrecision::Year => "M",
            DatePrecision::Month => "T",
            DatePrecision::Day => "E",
        }
    }

    /// Parse a `Datumsgenauigkeit` code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "V" => Some(DatePrecision::Unknown),
            "M" => Some(DatePrecision::Year),
            "T" => Some(DatePrecision::Month),
            "E" => Some(DatePrecision::Day),
            _ => None,
        }
    }
}

impl fmt::Display for DatePrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A calendar date with any precision tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateValue {
    pub value: NaiveDate,
    pub precision: DatePrecision,
}

impl DateValue {
    pub fn new(value: NaiveDate, precision: DatePrecision) -> Self {
        Self { value, precision }
    }

    /// ISO 8601 rendering of the calendar value (`YYYY-MM-DD`).
    pub fn iso(&self) -> String {
        self.value.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.iso(), self.precision)
    }
}

/// Precision of a [`PreciseDate`]: at least the month is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrecisePrecision {
    /// Year and month (`T`).
    Month,
    /// Full date (`E`).
    Day,
}

impl PrecisePrecision {
    pub fn code(self) -> &'static str {
        match self {
            PrecisePrecision::Month => "T",
            PrecisePrecision::Day => "E",
        }
    }
}

impl From<PrecisePrecision> for DatePrecision {
    fn from(precision: PrecisePrecision) -> Self {
        match precision {
            PrecisePrecision::Month => DatePrecision::Month,
            PrecisePrecision::Day => DatePrecision::Day,
        }
    }
}

/// A calendar date known at least to the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreciseDate {
    pub value: NaiveDate,
    pub precision: PrecisePrecision,
}

impl PreciseDate {
    pub fn new(value: NaiveDate, precision: PrecisePrecision) -> Self {
        Self { value, precision }
    }

    pub fn iso(&self) -> String {
        self.value.format("%Y-%m-%d").to_string()
    }
}

impl From<PreciseDate> for DateValue {
    fn from(date: PreciseDate) -> Self {
        DateValue::new(date.value, date.precision.into())
    }
}

impl fmt::Display for PreciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.iso(), self.precision.code())
    }
}
