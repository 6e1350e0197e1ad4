//! Schema versions known to the converter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// XML namespace of oBDS v3 documents.
pub const OBDS_NAMESPACE: &str = "http://www.basisdatensatz.de/oBDS/XML";

/// Schema version stamped onto every produced document.
pub const TARGET_SCHEMA_VERSION: &str = "3.0.4";

/// A concrete schema version a document can be validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaVersion {
    /// ADT_GEKID 2.2.3 (oBDS v2), the source format.
    AdtGekid2_2_3,
    /// oBDS 3.0.3.
    Obds3_0_3,
    /// oBDS 3.0.4, the target format.
    Obds3_0_4,
}

impl SchemaVersion {
    /// Name of the document root element.
    pub fn root_element(self) -> &'static str {
        match self {
            SchemaVersion::AdtGekid2_2_3 => "ADT_GEKID",
            SchemaVersion::Obds3_0_3 | SchemaVersion::Obds3_0_4 => "oBDS",
        }
    }

    /// Value of the `Schema_Version` root attribute.
    pub fn version(self) -> &'static str {
        match self {
            SchemaVersion::AdtGekid2_2_3 => "2.2.3",
            SchemaVersion::Obds3_0_3 => "3.0.3",
            SchemaVersion::Obds3_0_4 => "3.0.4",
        }
    }

    /// Namespace the root element must declare, if any.
    pub fn namespace(self) -> Option<&'static str> {
        match self {
            SchemaVersion::AdtGekid2_2_3 => None,
            SchemaVersion::Obds3_0_3 | SchemaVersion::Obds3_0_4 => Some(OBDS_NAMESPACE),
        }
    }

    pub fn is_target(self) -> bool {
        !matches!(self, SchemaVersion::AdtGekid2_2_3)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root_element(), self.version())
    }
}

impl FromStr for SchemaVersion {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2.2.3" => Ok(SchemaVersion::AdtGekid2_2_3),
            "3.0.3" => Ok(SchemaVersion::Obds3_0_3),
            "3.0.4" => Ok(SchemaVersion::Obds3_0_4),
            other => Err(ModelError::UnknownSchemaVersion(other.to_string())),
        }
    }
}
