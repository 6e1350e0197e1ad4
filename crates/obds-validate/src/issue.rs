//! Validation issue types.
//!
//! Each variant carries only the data needed to locate the problem in the
//! document. Patients and messages are located by their 1-based position
//! and, where present, their identifier.

use std::fmt;

/// One structural problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    // Root checks
    /// Root element has the wrong name
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },
    /// Root element does not declare the required namespace
    NamespaceMismatch {
        expected: &'static str,
        found: Option<String>,
    },
    /// `Schema_Version` attribute is missing or names another version
    SchemaVersionMismatch {
        expected: &'static str,
        found: Option<String>,
    },

    // Presence checks
    /// Patient without `Patient_ID`
    MissingPatientId { patient: usize },
    /// Message without `Meldung_ID`
    MissingMessageId { patient: usize, message: usize },
    /// oBDS v3 message without `Tumorzuordnung`
    MissingTumorAssignment { message_id: String },
    /// oBDS v3 tumor assignment without `Tumor_ID`
    MissingTumorId { message_id: String },

    // Consistency checks
    /// oBDS v3 message without exactly one clinical payload
    PayloadCount { message_id: String, count: usize },
}

impl Issue {
    /// Short stable code, used in log output.
    pub fn code(&self) -> &'static str {
        match self {
            Issue::UnexpectedRoot { .. } => "ROOT",
            Issue::NamespaceMismatch { .. } => "NAMESPACE",
            Issue::SchemaVersionMismatch { .. } => "VERSION",
            Issue::MissingPatientId { .. } => "PATIENT_ID",
            Issue::MissingMessageId { .. } => "MESSAGE_ID",
            Issue::MissingTumorAssignment { .. } => "TUMOR_ASSIGNMENT",
            Issue::MissingTumorId { .. } => "TUMOR_ID",
            Issue::PayloadCount { .. } => "PAYLOAD",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::UnexpectedRoot { expected, found } => {
                write!(f, "root element is '{found}', expected '{expected}'")
            }
            Issue::NamespaceMismatch { expected, found } => match found {
                Some(found) => write!(f, "namespace is '{found}', expected '{expected}'"),
                None => write!(f, "namespace '{expected}' is not declared"),
            },
            Issue::SchemaVersionMismatch { expected, found } => match found {
                Some(found) => write!(f, "Schema_Version is '{found}', expected '{expected}'"),
                None => write!(f, "Schema_Version is missing, expected '{expected}'"),
            },
            Issue::MissingPatientId { patient } => {
                write!(f, "patient #{patient} has no Patient_ID")
            }
            Issue::MissingMessageId { patient, message } => {
                write!(f, "message #{message} of patient #{patient} has no Meldung_ID")
            }
            Issue::MissingTumorAssignment { message_id } => {
                write!(f, "message '{message_id}' has no Tumorzuordnung")
            }
            Issue::MissingTumorId { message_id } => {
                write!(f, "Tumorzuordnung of message '{message_id}' has no Tumor_ID")
            }
            Issue::PayloadCount { message_id, count } => write!(
                f,
                "message '{message_id}' carries {count} clinical payloads, expected exactly one"
            ),
        }
    }
}

/// The issues of one failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issues(pub Vec<Issue>);

impl Issues {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }
}

impl fmt::Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("no issues"),
            [issue] => write!(f, "{issue}"),
            [first, rest @ ..] => write!(f, "{first} (and {} more)", rest.len()),
        }
    }
}
