//! Structural validation of both document generations.
//!
//! The checks cover what the converter relies on when reading and what it
//! guarantees when writing: root element, namespace, schema version, patient
//! and message identifiers and, for oBDS v3, the tumor assignment and the
//! single clinical payload of every message.

use obds_model::SchemaVersion;
use obds_xml::{Element, parse_element_tree};
use tracing::{debug, info_span};

use crate::error::{Result, ValidationError};
use crate::issue::{Issue, Issues};

/// Clinical payload elements of an oBDS v3 `Meldung`.
const PAYLOAD_ELEMENTS: &[&str] = &[
    "Diagnose",
    "Pathologie",
    "OP",
    "ST",
    "SYST",
    "Tumorkonferenz",
    "Verlauf",
    "Tod",
];

/// Validates a serialized document against one schema version.
pub trait SchemaValidator {
    fn validate(&self, xml: &str, schema: SchemaVersion) -> Result<()>;
}

/// Validator implementing the structural rules in plain Rust.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl StructuralValidator {
    pub fn new() -> Self {
        Self
    }

    /// Collect all issues without failing.
    pub fn check(&self, root: &Element, schema: SchemaVersion) -> Vec<Issue> {
        let mut issues = Vec::new();

        if root.name != schema.root_element() {
            issues.push(Issue::UnexpectedRoot {
                expected: schema.root_element(),
                found: root.name.clone(),
            });
            return issues;
        }

        if let Some(namespace) = schema.namespace() {
            let found = root.attribute("xmlns");
            if found != Some(namespace) {
                issues.push(Issue::NamespaceMismatch {
                    expected: namespace,
                    found: found.map(str::to_string),
                });
            }
        }

        let found = root.value("Schema_Version");
        if !version_matches(found.as_deref(), schema) {
            issues.push(Issue::SchemaVersionMismatch {
                expected: schema.version(),
                found,
            });
        }

        let patients = root.items("Menge_Patient", "Patient");
        for (index, patient) in patients.into_iter().enumerate() {
            check_patient(patient, index + 1, schema, &mut issues);
        }
        issues
    }
}

impl SchemaValidator for StructuralValidator {
    fn validate(&self, xml: &str, schema: SchemaVersion) -> Result<()> {
        let _span = info_span!("validate", schema = %schema).entered();
        let root = parse_element_tree(xml)?;
        let issues = self.check(&root, schema);
        if issues.is_empty() {
            debug!("document is valid");
            return Ok(());
        }
        for issue in &issues {
            debug!(code = issue.code(), "{issue}");
        }
        Err(ValidationError::Invalid {
            schema,
            issues: Issues(issues),
        })
    }
}

/// oBDS v3 documents must name the exact version. ADT_GEKID documents are
/// accepted from any 2.x release since the binding only relies on elements
/// common to all of them.
fn version_matches(found: Option<&str>, schema: SchemaVersion) -> bool {
    let Some(found) = found.map(str::trim) else {
        return false;
    };
    if schema.is_target() {
        found == schema.version()
    } else {
        found.split('.').next() == schema.version().split('.').next()
    }
}

fn patient_id(patient: &Element, schema: SchemaVersion) -> Option<String> {
    if schema.is_target() {
        patient.value("Patient_ID")
    } else {
        patient
            .child("Patienten_Stammdaten")
            .and_then(|master| master.value("Patient_ID"))
    }
}

fn check_patient(
    patient: &Element,
    position: usize,
    schema: SchemaVersion,
    issues: &mut Vec<Issue>,
) {
    if patient_id(patient, schema).is_none() {
        issues.push(Issue::MissingPatientId { patient: position });
    }

    for (message_index, message) in patient
        .items("Menge_Meldung", "Meldung")
        .into_iter()
        .enumerate()
    {
        let Some(message_id) = message.value("Meldung_ID") else {
            issues.push(Issue::MissingMessageId {
                patient: position,
                message: message_index + 1,
            });
            continue;
        };
        if schema.is_target() {
            check_target_message(message, message_id, issues);
        }
    }
}

fn check_target_message(message: &Element, message_id: String, issues: &mut Vec<Issue>) {
    match message.child("Tumorzuordnung") {
        None => issues.push(Issue::MissingTumorAssignment {
            message_id: message_id.clone(),
        }),
        Some(assignment) if assignment.value("Tumor_ID").is_none() => {
            issues.push(Issue::MissingTumorId {
                message_id: message_id.clone(),
            });
        }
        Some(_) => {}
    }

    let count = message
        .children
        .iter()
        .filter(|child| PAYLOAD_ELEMENTS.contains(&child.name.as_str()))
        .count();
    if count != 1 {
        issues.push(Issue::PayloadCount { message_id, count });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_accepts_other_minor_releases() {
        assert!(version_matches(Some("2.1.1"), SchemaVersion::AdtGekid2_2_3));
        assert!(!version_matches(Some("3.0.4"), SchemaVersion::AdtGekid2_2_3));
        assert!(!version_matches(None, SchemaVersion::AdtGekid2_2_3));
    }

    #[test]
    fn target_requires_exact_version() {
        assert!(version_matches(Some(" 3.0.4 "), SchemaVersion::Obds3_0_4));
        assert!(!version_matches(Some("3.0.3"), SchemaVersion::Obds3_0_4));
    }
}
