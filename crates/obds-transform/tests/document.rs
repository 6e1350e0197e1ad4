#![allow(missing_docs)]

use chrono::NaiveDate;
use obds_model::{
    SourceDiagnosis, SourceDocument, SourceMasterData, SourceMessage, SourcePatient,
    SourceReporter, SourceSender, SourceTumorAssignment, TARGET_SCHEMA_VERSION,
};
use obds_transform::{MapperOptions, ObdsMapper, TUMOR_ID_MISSING, TransformError};

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

fn message(id: &str, report_date: &str) -> SourceMessage {
    SourceMessage {
        message_id: s(id),
        report_date: s(report_date),
        diagnosis: Some(SourceDiagnosis {
            icd_code: s("C61"),
            icd_version: s("10 2024 GM"),
            diagnosis_date: s("01.01.2024"),
            certainty: s("7"),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn patient(id: &str, messages: Vec<SourceMessage>) -> SourcePatient {
    SourcePatient {
        master_data: SourceMasterData {
            patient_id: s(id),
            sex: s("M"),
            birth_date: s("12.03.1950"),
            ..Default::default()
        },
        messages,
        ..Default::default()
    }
}

fn document(patients: Vec<SourcePatient>) -> SourceDocument {
    SourceDocument {
        schema_version: s("2.2.3"),
        sender: SourceSender {
            id: s("S1"),
            software_id: s("legacy"),
            name: s("Klinikum"),
            ..Default::default()
        },
        patients,
        reporters: vec![SourceReporter {
            id: s("R1"),
            iknr: s("260100001"),
            lanr: s("123456789"),
            ..Default::default()
        }],
    }
}

#[test]
fn test_end_to_end_with_fallback_id() {
    let mapper = ObdsMapper::new(MapperOptions::new().with_fix_missing_id(true));
    let source = document(vec![patient("P1", vec![message("M1", "05.01.2024")])]);

    let target = mapper.map_on(&source, today()).expect("converted");
    assert_eq!(target.schema_version, TARGET_SCHEMA_VERSION);
    assert_eq!(target.patients.len(), 1);
    assert_eq!(target.message_count(), 1);

    let message = &target.patients[0].messages[0];
    let assignment = message.tumor_assignment.as_ref().expect("assignment");
    assert_eq!(assignment.tumor_id, "TID_78dd017da9e73ba5");
    assert_eq!(assignment.icd.version.as_deref(), Some("10 2024 GM"));
    assert_eq!(message.payload.element_name(), "Diagnose");
}

#[test]
fn test_end_to_end_without_fallback_id() {
    let mapper = ObdsMapper::new(MapperOptions::new());
    let source = document(vec![patient("P1", vec![message("M1", "05.01.2024")])]);

    let error = mapper.map_on(&source, today()).unwrap_err();
    assert_eq!(error, TransformError::unmappable(TUMOR_ID_MISSING));
    assert!(error.to_string().contains("tumor identifier missing"));
}

#[test]
fn test_sender_and_reporters() {
    let mapper = ObdsMapper::new(MapperOptions::new().with_fix_missing_id(true));
    let target = mapper
        .map_on(&document(Vec::new()), today())
        .expect("converted");
    assert_eq!(target.sender.id.as_deref(), Some("S1"));
    assert_eq!(target.sender.software_id, "obds2to3");
    assert_eq!(target.sender.name.as_deref(), Some("Klinikum"));
    assert_eq!(target.reporters.len(), 1);
    assert_eq!(
        target.reporters[0].ident_numbers.lanr.as_deref(),
        Some("123456789")
    );
    assert_eq!(target.report_date, None);
}

#[test]
fn test_report_date_is_earliest_message_date() {
    let mapper = ObdsMapper::new(MapperOptions::new().with_fix_missing_id(true));
    let source = document(vec![
        patient("P1", vec![message("M1", "05.01.2024"), message("M2", "bad")]),
        patient("P2", vec![message("M3", "03.01.2024")]),
    ]);
    let target = mapper.map_on(&source, today()).expect("converted");
    assert_eq!(target.report_date, NaiveDate::from_ymd_opt(2024, 1, 3));
}

#[test]
fn test_unmappable_patients_are_dropped() {
    let mapper = ObdsMapper::new(MapperOptions::new().with_ignore_unmappable_patients(true));

    let mut bad_insurance = patient("P2", vec![message("M2", "05.01.2024")]);
    bad_insurance.master_data.payer_number = s("123");
    let mut missing_birth_date = patient("P3", vec![message("M3", "05.01.2024")]);
    missing_birth_date.master_data.birth_date = None;
    let mut valid = patient("P4", vec![message("M4", "05.01.2024")]);
    valid.messages[0].tumor_assignment = Some(SourceTumorAssignment {
        tumor_id: s("T4"),
        ..Default::default()
    });

    let source = document(vec![
        // Only message lacks a tumor id, so the patient ends up empty.
        patient("P1", vec![message("M1", "05.01.2024")]),
        bad_insurance,
        missing_birth_date,
        valid,
    ]);

    let target = mapper.map_on(&source, today()).expect("converted");
    let ids: Vec<_> = target
        .patients
        .iter()
        .map(|patient| patient.patient_id.as_deref())
        .collect();
    assert_eq!(ids, vec![Some("P4")]);
}

#[test]
fn test_unmappable_patient_fails_strict_run() {
    let mapper = ObdsMapper::new(MapperOptions::new().with_fix_missing_id(true));
    let mut bad_insurance = patient("P1", vec![message("M1", "05.01.2024")]);
    bad_insurance.master_data.payer_number = s("123");

    let error = mapper
        .map_on(&document(vec![bad_insurance]), today())
        .unwrap_err();
    assert!(error.is_unmappable());
}

#[test]
fn test_ignoring_messages_keeps_empty_patient() {
    let mapper = ObdsMapper::new(MapperOptions::new().with_ignore_unmappable_messages(true));
    let source = document(vec![patient("P1", vec![message("M1", "05.01.2024")])]);
    let target = mapper.map_on(&source, today()).expect("converted");
    assert_eq!(target.patients.len(), 1);
    assert!(target.patients[0].messages.is_empty());
}
