#![allow(missing_docs)]

use obds_model::SchemaVersion;
use obds_validate::{Issue, SchemaValidator, StructuralValidator, ValidationError};

const VALID_TARGET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<oBDS xmlns="http://www.basisdatensatz.de/oBDS/XML" Schema_Version="3.0.4">
  <Menge_Patient>
    <Patient Patient_ID="P1">
      <Menge_Meldung>
        <Meldung Meldung_ID="M1">
          <Tumorzuordnung Tumor_ID="1"/>
          <Diagnose><Diagnosesicherung>7</Diagnosesicherung></Diagnose>
        </Meldung>
      </Menge_Meldung>
    </Patient>
  </Menge_Patient>
</oBDS>
"#;

const VALID_SOURCE: &str = r#"<ADT_GEKID Schema_Version="2.2.3">
  <Menge_Patient>
    <Patient>
      <Patienten_Stammdaten Patient_ID="P1"/>
      <Menge_Meldung>
        <Meldung Meldung_ID="M1"/>
      </Menge_Meldung>
    </Patient>
  </Menge_Patient>
</ADT_GEKID>
"#;

fn issues(xml: &str, schema: SchemaVersion) -> Vec<Issue> {
    match StructuralValidator::new().validate(xml, schema) {
        Ok(()) => Vec::new(),
        Err(error) => error.issues().to_vec(),
    }
}

#[test]
fn test_accepts_valid_documents() {
    let validator = StructuralValidator::new();
    assert!(validator.validate(VALID_TARGET, SchemaVersion::Obds3_0_4).is_ok());
    assert!(validator.validate(VALID_SOURCE, SchemaVersion::AdtGekid2_2_3).is_ok());
}

#[test]
fn test_rejects_wrong_target_version() {
    let found = issues(VALID_TARGET, SchemaVersion::Obds3_0_3);
    assert_eq!(
        found,
        vec![Issue::SchemaVersionMismatch {
            expected: "3.0.3",
            found: Some("3.0.4".to_string()),
        }]
    );
}

#[test]
fn test_rejects_wrong_root() {
    let found = issues(VALID_SOURCE, SchemaVersion::Obds3_0_4);
    assert_eq!(
        found,
        vec![Issue::UnexpectedRoot {
            expected: "oBDS",
            found: "ADT_GEKID".to_string(),
        }]
    );
}

#[test]
fn test_requires_namespace_for_target() {
    let xml = VALID_TARGET.replace(r#" xmlns="http://www.basisdatensatz.de/oBDS/XML""#, "");
    let found = issues(&xml, SchemaVersion::Obds3_0_4);
    assert!(matches!(
        found.as_slice(),
        [Issue::NamespaceMismatch { found: None, .. }]
    ));
}

#[test]
fn test_requires_tumor_id() {
    let xml = VALID_TARGET.replace(r#"<Tumorzuordnung Tumor_ID="1"/>"#, "<Tumorzuordnung/>");
    let found = issues(&xml, SchemaVersion::Obds3_0_4);
    assert_eq!(
        found,
        vec![Issue::MissingTumorId {
            message_id: "M1".to_string(),
        }]
    );

    let xml = VALID_TARGET.replace(r#"<Tumorzuordnung Tumor_ID="1"/>"#, "");
    let found = issues(&xml, SchemaVersion::Obds3_0_4);
    assert_eq!(
        found,
        vec![Issue::MissingTumorAssignment {
            message_id: "M1".to_string(),
        }]
    );
}

#[test]
fn test_requires_single_payload() {
    let xml = VALID_TARGET.replace("</Diagnose>", "</Diagnose><Tod/>");
    let found = issues(&xml, SchemaVersion::Obds3_0_4);
    assert_eq!(
        found,
        vec![Issue::PayloadCount {
            message_id: "M1".to_string(),
            count: 2,
        }]
    );
}

#[test]
fn test_requires_identifiers_in_source() {
    let xml = VALID_SOURCE
        .replace(r#" Patient_ID="P1""#, "")
        .replace(r#" Meldung_ID="M1""#, "");
    let found = issues(&xml, SchemaVersion::AdtGekid2_2_3);
    assert_eq!(
        found,
        vec![
            Issue::MissingPatientId { patient: 1 },
            Issue::MissingMessageId {
                patient: 1,
                message: 1
            },
        ]
    );
}

#[test]
fn test_reports_malformed_xml() {
    let error = StructuralValidator::new()
        .validate("<oBDS><Menge_Patient></oBDS>", SchemaVersion::Obds3_0_4)
        .expect_err("malformed");
    assert!(matches!(error, ValidationError::Malformed(_)));
    assert!(error.issues().is_empty());
}

#[test]
fn test_error_message_names_schema_and_first_issue() {
    let error = StructuralValidator::new()
        .validate(VALID_TARGET, SchemaVersion::Obds3_0_3)
        .expect_err("invalid");
    assert_eq!(
        error.to_string(),
        "document does not conform to oBDS 3.0.3: Schema_Version is '3.0.4', expected '3.0.3'"
    );
}
