//! Integration tests for the document model.

use chrono::NaiveDate;

use obds_model::{
    DatePrecision, DateValue, Diagnosis, Icd, Message, Payload, SchemaVersion, TumorAssignment,
    YesNoUnknown,
};

fn diagnosis_message(tumor_assignment: Option<TumorAssignment>) -> Message {
    Message {
        message_id: "M1".to_string(),
        reporter_id: Some("R1".to_string()),
        reporting_basis: Some("I".to_string()),
        own_service: YesNoUnknown::Yes,
        tumor_assignment,
        payload: Payload::Diagnosis(Diagnosis {
            diagnosis_text: None,
            certainty: "7".to_string(),
            prior_tumors: vec![],
            histology: None,
            metastases: vec![],
            clinical_tnm: None,
            pathological_tnm: None,
            further_classifications: vec![],
            prostate: None,
            performance_status: "U".to_string(),
        }),
        additional_items: vec![],
        remark: None,
    }
}

#[test]
fn test_schema_version_parse() {
    assert_eq!(
        "2.2.3".parse::<SchemaVersion>().unwrap(),
        SchemaVersion::AdtGekid2_2_3
    );
    assert_eq!(
        "3.0.4".parse::<SchemaVersion>().unwrap(),
        SchemaVersion::Obds3_0_4
    );
    assert!("4.0.0".parse::<SchemaVersion>().is_err());
}

#[test]
fn test_schema_version_roots() {
    assert_eq!(SchemaVersion::AdtGekid2_2_3.root_element(), "ADT_GEKID");
    assert_eq!(SchemaVersion::Obds3_0_4.root_element(), "oBDS");
    assert!(SchemaVersion::AdtGekid2_2_3.namespace().is_none());
    assert!(SchemaVersion::Obds3_0_3.is_target());
    assert_eq!(SchemaVersion::Obds3_0_4.to_string(), "oBDS 3.0.4");
}

#[test]
fn test_message_tumor_id_presence() {
    assert!(!diagnosis_message(None).has_tumor_id());

    let assignment = TumorAssignment {
        tumor_id: "T1".to_string(),
        icd: Icd {
            code: Some("C61".to_string()),
            version: Some("10 2024 GM".to_string()),
        },
        diagnosis_date: None,
        laterality: Some("U".to_string()),
    };
    let message = diagnosis_message(Some(assignment));
    assert!(message.has_tumor_id());
    assert_eq!(message.payload.element_name(), "Diagnose");
}

#[test]
fn test_date_value_serializes_iso() {
    let date = DateValue::new(
        NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        DatePrecision::Month,
    );
    let json = serde_json::to_value(date).unwrap();
    assert_eq!(json["value"], "2024-10-01");
    assert_eq!(json["precision"], "Month");
    assert_eq!(date.to_string(), "2024-10-01 (T)");
}
