//! Schema validation for ADT_GEKID and oBDS v3 documents.
//!
//! [`SchemaValidator`] is the seam used by the conversion pipeline;
//! [`StructuralValidator`] checks the document structure the converter reads
//! and writes.

mod error;
mod issue;
mod validator;

pub use error::{Result, ValidationError};
pub use issue::{Issue, Issues};
pub use validator::{SchemaValidator, StructuralValidator};
