//! Error types for schema validation.

use obds_model::SchemaVersion;
use obds_xml::XmlError;
use thiserror::Error;

use crate::issue::{Issue, Issues};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("document is not well-formed XML: {0}")]
    Malformed(#[from] XmlError),

    #[error("document does not conform to {schema}: {issues}")]
    Invalid {
        schema: SchemaVersion,
        issues: Issues,
    },
}

impl ValidationError {
    /// Structural issues, empty for malformed documents.
    pub fn issues(&self) -> &[Issue] {
        match self {
            ValidationError::Malformed(_) => &[],
            ValidationError::Invalid { issues, .. } => &issues.0,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
