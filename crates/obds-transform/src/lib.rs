//! Conversion rules from ADT_GEKID (oBDS v2) to oBDS v3.
//!
//! The conversion is a pure function of the source document and a
//! [`MapperOptions`] value. [`ObdsMapper`] walks the document top down:
//! patients, then messages, then the clinical sub-records of each message.
//! Values oBDS v3 requires but the source lacks raise
//! [`TransformError::UnmappableItem`]; whether that drops the message, drops
//! the patient or fails the run is decided by the options.

pub mod classify;
pub mod date;
pub mod document;
pub mod error;
pub mod identifier;
pub mod message;
pub mod options;
pub mod parties;
pub mod patient;
pub mod policy;
pub mod records;
pub mod therapy_type;

pub use document::ObdsMapper;
pub use error::{Result, TUMOR_ASSIGNMENT_MISSING, TUMOR_ID_MISSING, TransformError};
pub use identifier::{TumorIdSource, resolve_tumor_id, synthesize_tumor_id};
pub use message::MessageTransformer;
pub use options::MapperOptions;
pub use patient::PatientTransformer;
pub use policy::{drop_unmappable, filter_unmappable};
