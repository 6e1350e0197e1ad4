//! Error types for the conversion rules.

use thiserror::Error;

/// Message used when neither a tumor assignment nor a coded diagnosis exists.
pub const TUMOR_ASSIGNMENT_MISSING: &str =
    "tumor assignment missing: message has neither Tumorzuordnung nor a coded Diagnose";

/// Message used when no tumor identifier can be resolved.
pub const TUMOR_ID_MISSING: &str = "tumor identifier missing";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A value required by oBDS v3 has no source value and no default.
    ///
    /// Callers may drop the enclosing message or patient when the matching
    /// ignore option is enabled.
    #[error("unmappable item: {message}")]
    UnmappableItem { message: String },

    /// The source document violates a structural assumption. Never dropped.
    #[error("malformed input: {message}")]
    MalformedInput { message: String },
}

impl TransformError {
    pub fn unmappable(message: impl Into<String>) -> Self {
        Self::UnmappableItem {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    pub fn is_unmappable(&self) -> bool {
        matches!(self, Self::UnmappableItem { .. })
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
