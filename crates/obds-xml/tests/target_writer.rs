#![allow(missing_docs)]

use chrono::NaiveDate;
use obds_model::{
    Address, Application, DatePrecision, DateValue, Death, Diagnosis, Icd, Insurance,
    Irradiation, MasterData, Message, OBDS_NAMESPACE, Patient, Payload, PreciseDate,
    PrecisePrecision, Radiotherapy, Sender, Sex, SideEffects, TARGET_SCHEMA_VERSION, TargetArea,
    TargetDocument, TumorAssignment, YesNoUnknown,
};
use obds_xml::{parse_element_tree, write_target_document};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn envelope(id: &str, payload: Payload) -> Message {
    Message {
        message_id: id.to_string(),
        reporter_id: Some("R1".to_string()),
        reporting_basis: Some("I".to_string()),
        own_service: YesNoUnknown::Yes,
        tumor_assignment: Some(TumorAssignment {
            tumor_id: "1".to_string(),
            icd: Icd {
                code: Some("C61".to_string()),
                version: Some("10 2024 GM".to_string()),
            },
            diagnosis_date: Some(PreciseDate::new(date(2024, 2, 1), PrecisePrecision::Month)),
            laterality: Some("T".to_string()),
        }),
        payload,
        additional_items: Vec::new(),
        remark: None,
    }
}

fn document(address: Option<Address>) -> TargetDocument {
    let diagnosis = Diagnosis {
        diagnosis_text: None,
        certainty: "7".to_string(),
        prior_tumors: Vec::new(),
        histology: None,
        metastases: Vec::new(),
        clinical_tnm: None,
        pathological_tnm: None,
        further_classifications: Vec::new(),
        prostate: None,
        performance_status: "U".to_string(),
    };
    let radiotherapy = Radiotherapy {
        courses: vec![Irradiation {
            application: Some(Application::Contact {
                target: TargetArea {
                    code: Some("3.6".to_string()),
                    side: Some("U".to_string()),
                },
                kind: Some("K".to_string()),
                rate_type: Some("HDR".to_string()),
                single_dose: None,
                total_dose: None,
            }),
            start: Some(date(2024, 3, 1)),
            end: None,
        }],
        side_effects: Some(SideEffects::MaxGradeTwoOrUnknown("U".to_string())),
        ..Default::default()
    };

    TargetDocument {
        schema_version: TARGET_SCHEMA_VERSION.to_string(),
        sender: Sender {
            id: Some("A1".to_string()),
            software_id: "obds2to3".to_string(),
            software_version: "0.1.0".to_string(),
            ..Default::default()
        },
        report_date: Some(date(2024, 3, 15)),
        patients: vec![Patient {
            patient_id: Some("P1".to_string()),
            remark: None,
            master_data: MasterData {
                insurance: Some(Insurance::Statutory {
                    iknr: "109519005".to_string(),
                    member_number: "A123456789".to_string(),
                }),
                last_name: Some("Muster".to_string()),
                first_names: None,
                birth_name: None,
                title: None,
                name_suffix: None,
                previous_names: None,
                sex: Sex::Female,
                birth_date: DateValue::new(date(1950, 2, 1), DatePrecision::Day),
                address,
            },
            messages: vec![
                envelope("M1", Payload::Diagnosis(diagnosis)),
                envelope("M1_ST1", Payload::Radiotherapy(radiotherapy)),
                envelope(
                    "M1__D",
                    Payload::Death(Death {
                        date: Some(date(2024, 5, 1)),
                        tumor_related: Some(YesNoUnknown::Yes),
                        causes: Vec::new(),
                    }),
                ),
            ],
        }],
        reporters: Vec::new(),
    }
}

#[test]
fn test_writes_declaration_and_namespace() {
    let xml = write_target_document(&document(None)).expect("written");
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));

    let root = parse_element_tree(&xml).expect("well-formed");
    assert_eq!(root.name, "oBDS");
    assert_eq!(root.attribute("xmlns"), Some(OBDS_NAMESPACE));
    assert_eq!(root.attribute("Schema_Version"), Some("3.0.4"));
    assert_eq!(root.value("Meldedatum").as_deref(), Some("2024-03-15"));
}

#[test]
fn test_writes_sender_as_attributes() {
    let xml = write_target_document(&document(None)).expect("written");
    let root = parse_element_tree(&xml).expect("well-formed");
    let sender = root.child("Absender").expect("sender");
    assert_eq!(sender.attribute("Absender_ID"), Some("A1"));
    assert_eq!(sender.attribute("Software_ID"), Some("obds2to3"));
    assert_eq!(sender.attribute("Software_Version"), Some("0.1.0"));
}

#[test]
fn test_writes_master_data() {
    let xml = write_target_document(&document(None)).expect("written");
    let root = parse_element_tree(&xml).expect("well-formed");
    let patient = root
        .child("Menge_Patient")
        .and_then(|patients| patients.child("Patient"))
        .expect("patient");
    assert_eq!(patient.attribute("Patient_ID"), Some("P1"));

    let master = patient.child("Patienten_Stammdaten").expect("master data");
    let insurance = master.child("Versichertendaten_GKV").expect("insurance");
    assert_eq!(insurance.value("IKNR").as_deref(), Some("109519005"));
    assert_eq!(
        insurance.value("GKV_Versichertennummer").as_deref(),
        Some("A123456789")
    );
    assert_eq!(master.value("Geschlecht").as_deref(), Some("W"));

    let birth_date = master.child("Geburtsdatum").expect("birth date");
    assert_eq!(birth_date.attribute("Datumsgenauigkeit"), Some("E"));
    assert_eq!(birth_date.text().as_deref(), Some("1950-02-01"));
    assert!(master.child("Adresse").is_none());
}

#[test]
fn test_keeps_empty_address_placeholder() {
    let xml = write_target_document(&document(Some(Address::default()))).expect("written");
    assert!(xml.contains("<Adresse/>"));
}

#[test]
fn test_omits_empty_elements() {
    let xml = write_target_document(&document(None)).expect("written");
    assert!(!xml.contains("<Vornamen"));
    assert!(!xml.contains("<Menge_Melder"));
    assert!(!xml.contains("<Menge_Zusatzitem"));
    assert!(!xml.contains("<Anmerkung"));
    assert!(!xml.contains("<cTNM"));
    assert!(!xml.contains("<Menge_Todesursachen"));
}

#[test]
fn test_writes_one_payload_per_message() {
    let xml = write_target_document(&document(None)).expect("written");
    let root = parse_element_tree(&xml).expect("well-formed");
    let messages: Vec<_> = root
        .child("Menge_Patient")
        .and_then(|patients| patients.child("Patient"))
        .and_then(|patient| patient.child("Menge_Meldung"))
        .expect("messages")
        .children("Meldung")
        .collect();
    assert_eq!(messages.len(), 3);

    let diagnosis = messages[0];
    assert_eq!(diagnosis.attribute("Meldung_ID"), Some("M1"));
    assert_eq!(diagnosis.value("Eigene_Leistung").as_deref(), Some("J"));
    let assignment = diagnosis.child("Tumorzuordnung").expect("assignment");
    assert_eq!(assignment.attribute("Tumor_ID"), Some("1"));
    let code = assignment.child("Primaertumor_ICD").expect("ICD");
    assert_eq!(code.value("Code").as_deref(), Some("C61"));
    assert_eq!(
        assignment
            .child("Diagnosedatum")
            .and_then(|date| date.attribute("Datumsgenauigkeit")),
        Some("T")
    );
    let payload = diagnosis.child("Diagnose").expect("diagnosis payload");
    assert_eq!(payload.value("Diagnosesicherung").as_deref(), Some("7"));

    let radiotherapy = messages[1].child("ST").expect("ST payload");
    let contact = radiotherapy
        .child("Menge_Bestrahlung")
        .and_then(|courses| courses.child("Bestrahlung"))
        .and_then(|course| course.child("Applikationsart"))
        .and_then(|application| application.child("Kontakt"))
        .expect("contact application");
    assert_eq!(contact.value("Interstitiell_endokavitaer").as_deref(), Some("K"));
    assert_eq!(contact.value("Rate_Type").as_deref(), Some("HDR"));
    assert_eq!(contact.value("Seite_Zielgebiet").as_deref(), Some("U"));
    assert_eq!(
        radiotherapy
            .child("Nebenwirkungen")
            .and_then(|effects| effects.value("Grad_maximal2_oder_unbekannt")),
        Some("U".to_string())
    );

    let death = messages[2].child("Tod").expect("death payload");
    assert_eq!(death.value("Sterbedatum").as_deref(), Some("2024-05-01"));
    assert_eq!(death.value("Tod_tumorbedingt").as_deref(), Some("J"));
}

#[test]
fn test_indents_nested_elements() {
    let xml = write_target_document(&document(None)).expect("written");
    assert!(xml.contains("\n  <Absender "));
    assert!(xml.contains("<Nachname>Muster</Nachname>"));
}
