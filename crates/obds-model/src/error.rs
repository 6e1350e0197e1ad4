use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown schema version: {0}")]
    UnknownSchemaVersion(String),
    #[error("unknown {kind} code: {code}")]
    UnknownCode { kind: &'static str, code: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
