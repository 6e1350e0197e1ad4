//! Error types for XML reading and writing.

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] AttrError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid UTF-8 in XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("document has no root element")]
    MissingRoot,

    #[error("unexpected root element '{found}', expected '{expected}'")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("element '{element}' is not closed")]
    Unclosed { element: String },

    #[error("unknown entity reference '&{name};'")]
    UnknownEntity { name: String },
}

pub type Result<T> = std::result::Result<T, XmlError>;
