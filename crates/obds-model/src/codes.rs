//! Small closed code lists shared by both schema versions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Administrative sex as accepted by oBDS v3 patient master data.
///
/// ADT_GEKID additionally knows `S` (other) which has no oBDS v3 counterpart
/// and is therefore reported as [`Sex::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "W",
            Sex::Unknown => "U",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The `J`/`N`/`U` triple used for yes/no/unknown flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNoUnknown {
    Yes,
    No,
    Unknown,
}

impl YesNoUnknown {
    pub fn code(self) -> &'static str {
        match self {
            YesNoUnknown::Yes => "J",
            YesNoUnknown::No => "N",
            YesNoUnknown::Unknown => "U",
        }
    }
}

impl fmt::Display for YesNoUnknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for YesNoUnknown {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "J" => Ok(YesNoUnknown::Yes),
            "N" => Ok(YesNoUnknown::No),
            "U" => Ok(YesNoUnknown::Unknown),
            other => Err(ModelError::UnknownCode {
                kind: "J/N/U",
                code: other.to_string(),
            }),
        }
    }
}
