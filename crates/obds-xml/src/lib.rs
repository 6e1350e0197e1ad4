//! XML reading and writing for the oBDS converter.
//!
//! - **ADT_GEKID** documents (oBDS v2) are read into
//!   [`obds_model::SourceDocument`]
//! - **oBDS v3** documents are written from [`obds_model::TargetDocument`]
//!
//! Both directions go through a small owned [`Element`] tree built on
//! quick-xml events.

mod element;
mod error;
mod source;
mod target;

pub use element::{Element, parse_element_tree, write_element_tree};
pub use error::{Result, XmlError};
pub use source::{SOURCE_ROOT, read_source_document};
pub use target::write_target_document;
