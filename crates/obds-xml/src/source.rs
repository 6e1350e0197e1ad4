//! Binding of ADT_GEKID 2.x documents onto [`SourceDocument`].
//!
//! Identifiers such as `Meldung_ID` are attributes in the schema but some
//! exporting systems write them as child elements. [`Element::value`]
//! accepts both, so the binding does not care.

use obds_model::{
    SourceAdditionalItem, SourceAddress, SourceCancerShare, SourceDeath, SourceDiagnosis,
    SourceDocument, SourceDose, SourceFollowUp, SourceFurtherClassification, SourceGleasonScore,
    SourceHistology, SourceIrradiation, SourceMasterData, SourceMessage, SourceMetastasis,
    SourceOperation, SourcePatient, SourcePriorTumor, SourceProstateModule, SourceRadiotherapy,
    SourceReporter, SourceResidualStatus, SourceSender, SourceSideEffect, SourceSystemicTherapy,
    SourceTnm, SourceTumorAssignment, SourceTumorBoard,
};
use tracing::debug;

use crate::element::{Element, parse_element_tree};
use crate::error::{Result, XmlError};

/// Root element of ADT_GEKID documents.
pub const SOURCE_ROOT: &str = "ADT_GEKID";

/// Parse an ADT_GEKID document.
pub fn read_source_document(xml: &str) -> Result<SourceDocument> {
    let root = parse_element_tree(xml)?;
    if root.name != SOURCE_ROOT {
        return Err(XmlError::UnexpectedRoot {
            expected: SOURCE_ROOT,
            found: root.name,
        });
    }

    let document = SourceDocument {
        schema_version: root.value("Schema_Version"),
        sender: root.child("Absender").map(sender).unwrap_or_default(),
        patients: root
            .items("Menge_Patient", "Patient")
            .into_iter()
            .map(patient)
            .collect(),
        reporters: root
            .items("Menge_Melder", "Melder")
            .into_iter()
            .map(reporter)
            .collect(),
    };
    debug!(
        patients = document.patients.len(),
        reporters = document.reporters.len(),
        "source document read"
    );
    Ok(document)
}

fn optional_list(element: &Element, container: &str, item: &str) -> Option<Vec<String>> {
    element
        .child(container)
        .map(|_| element.item_values(container, item))
}

fn sender(element: &Element) -> SourceSender {
    SourceSender {
        id: element.value("Absender_ID"),
        software_id: element.value("Software_ID"),
        name: element.value("Absender_Bezeichnung"),
        contact_person: element.value("Absender_Ansprechpartner"),
        address: element.value("Absender_Anschrift"),
        phone: element.value("Absender_Telefon"),
        email: element.value("Absender_EMail"),
    }
}

fn reporter(element: &Element) -> SourceReporter {
    SourceReporter {
        id: element.value("Melder_ID"),
        reporting_unit: element.value("Meldende_Stelle"),
        department: element.value("Melder_KH_Abt_Station_Praxis"),
        physician_name: element.value("Melder_Arztname"),
        address: element.value("Melder_Anschrift"),
        postal_code: element.value("Melder_PLZ"),
        city: element.value("Melder_Ort"),
        bank_name: element.value("Melder_Bankname"),
        bic: element.value("Melder_BIC"),
        iban: element.value("Melder_IBAN"),
        account_holder: element.value("Melder_Kontoinhaber"),
        iknr: element.value("Melder_IKNR"),
        lanr: element.value("Melder_LANR"),
        bsnr: element.value("Melder_BSNR"),
    }
}

fn patient(element: &Element) -> SourcePatient {
    SourcePatient {
        remark: element.value("Anmerkung"),
        master_data: element
            .child("Patienten_Stammdaten")
            .map(master_data)
            .unwrap_or_default(),
        messages: element
            .items("Menge_Meldung", "Meldung")
            .into_iter()
            .map(message)
            .collect(),
    }
}

fn master_data(element: &Element) -> SourceMasterData {
    SourceMasterData {
        patient_id: element.value("Patient_ID"),
        member_number: element.value("KrankenversichertenNr"),
        payer_number: element.value("KrankenkassenNr"),
        last_name: element.value("Patienten_Nachname"),
        first_names: element.value("Patienten_Vornamen"),
        birth_name: element.value("Patienten_Geburtsname"),
        title: element.value("Patienten_Titel"),
        name_suffix: element.value("Patienten_Namenszusatz"),
        previous_names: optional_list(
            element,
            "Menge_Frueherer_Name",
            "Patienten_Frueherer_Name",
        ),
        sex: element.value("Patienten_Geschlecht"),
        birth_date: element.value("Patienten_Geburtsdatum"),
        addresses: element.child("Menge_Adresse").map(|_| {
            element
                .items("Menge_Adresse", "Adresse")
                .into_iter()
                .map(address)
                .collect()
        }),
    }
}

fn address(element: &Element) -> SourceAddress {
    SourceAddress {
        street: element.value("Patienten_Strasse"),
        house_number: element.value("Patienten_Hausnummer"),
        country: element.value("Patienten_Land"),
        postal_code: element.value("Patienten_PLZ"),
        city: element.value("Patienten_Ort"),
        valid_from: element.value("Gueltig_von"),
        valid_until: element.value("Gueltig_bis"),
    }
}

fn message(element: &Element) -> SourceMessage {
    SourceMessage {
        message_id: element.value("Meldung_ID"),
        reporter_id: element.value("Melder_ID"),
        report_date: element.value("Meldedatum"),
        reporting_basis: element.value("Meldebegruendung"),
        reporting_reason: element.value("Meldeanlass"),
        remark: element.value("Anmerkung"),
        tumor_assignment: element.child("Tumorzuordnung").map(tumor_assignment),
        diagnosis: element.child("Diagnose").map(diagnosis),
        operations: element
            .items("Menge_OP", "OP")
            .into_iter()
            .map(operation)
            .collect(),
        radiotherapies: element
            .items("Menge_ST", "ST")
            .into_iter()
            .map(radiotherapy)
            .collect(),
        systemic_therapies: element
            .items("Menge_SYST", "SYST")
            .into_iter()
            .map(systemic_therapy)
            .collect(),
        follow_ups: element
            .items("Menge_Verlauf", "Verlauf")
            .into_iter()
            .map(follow_up)
            .collect(),
        tumor_boards: element
            .items("Menge_Tumorkonferenz", "Tumorkonferenz")
            .into_iter()
            .map(tumor_board)
            .collect(),
        additional_items: element
            .items("Menge_Zusatzitem", "Zusatzitem")
            .into_iter()
            .map(additional_item)
            .collect(),
    }
}

fn tumor_assignment(element: &Element) -> SourceTumorAssignment {
    SourceTumorAssignment {
        tumor_id: element.value("Tumor_ID"),
        icd_code: element.value("Primaertumor_ICD_Code"),
        icd_version: element.value("Primaertumor_ICD_Version"),
        diagnosis_date: element.value("Diagnosedatum"),
        laterality: element.value("Seitenlokalisation"),
    }
}

fn diagnosis(element: &Element) -> SourceDiagnosis {
    SourceDiagnosis {
        tumor_id: element.value("Tumor_ID"),
        icd_code: element.value("Primaertumor_ICD_Code"),
        icd_version: element.value("Primaertumor_ICD_Version"),
        diagnosis_text: element.value("Primaertumor_Diagnosetext"),
        diagnosis_date: element.value("Diagnosedatum"),
        certainty: element.value("Diagnosesicherung"),
        laterality: element.value("Seitenlokalisation"),
        prior_tumors: element
            .items("Menge_Fruehere_Tumorerkrankung", "Fruehere_Tumorerkrankung")
            .into_iter()
            .map(prior_tumor)
            .collect(),
        histologies: element
            .items("Menge_Histologie", "Histologie")
            .into_iter()
            .map(histology)
            .collect(),
        metastases: metastases(element),
        clinical_tnm: element.child("cTNM").map(tnm),
        pathological_tnm: element.child("pTNM").map(tnm),
        further_classifications: further_classifications(element),
        performance_status: element.value("Allgemeiner_Leistungszustand"),
        prostate: element.child("Modul_Prostata").map(prostate_module),
    }
}

fn prior_tumor(element: &Element) -> SourcePriorTumor {
    SourcePriorTumor {
        free_text: element.value("Freitext"),
        icd_code: element.value("ICD_Code"),
        icd_version: element.value("ICD_Version"),
        diagnosis_date: element.value("Diagnosedatum"),
    }
}

fn histology(element: &Element) -> SourceHistology {
    SourceHistology {
        id: element.value("Histologie_ID"),
        date: element.value("Tumor_Histologiedatum"),
        submission_number: element.value("Histologie_EinsendeNr"),
        morphology_code: element.value("Morphologie_Code"),
        morphology_version: element.value("Morphologie_ICD_O_Version"),
        morphology_text: element.value("Morphologie_Freitext"),
        grading: element.value("Grading"),
        lymph_nodes_examined: element.value("LK_untersucht"),
        lymph_nodes_affected: element.value("LK_befallen"),
        sentinel_nodes_examined: element.value("Sentinel_LK_untersucht"),
        sentinel_nodes_affected: element.value("Sentinel_LK_befallen"),
    }
}

fn metastases(element: &Element) -> Vec<SourceMetastasis> {
    element
        .items("Menge_FM", "Fernmetastase")
        .into_iter()
        .map(|metastasis| SourceMetastasis {
            date: metastasis.value("FM_Diagnosedatum"),
            location: metastasis.value("FM_Lokalisation"),
        })
        .collect()
}

fn tnm(element: &Element) -> SourceTnm {
    SourceTnm {
        id: element.value("TNM_ID"),
        date: element.value("TNM_Datum"),
        version: element.value("TNM_Version"),
        y_symbol: element.value("TNM_y_Symbol"),
        r_symbol: element.value("TNM_r_Symbol"),
        a_symbol: element.value("TNM_a_Symbol"),
        prefix_t: element.value("TNM_c_p_u_Praefix_T"),
        t: element.value("TNM_T"),
        m_symbol: element.value("TNM_m_Symbol"),
        prefix_n: element.value("TNM_c_p_u_Praefix_N"),
        n: element.value("TNM_N"),
        prefix_m: element.value("TNM_c_p_u_Praefix_M"),
        m: element.value("TNM_M"),
        l: element.value("TNM_L"),
        v: element.value("TNM_V"),
        pn: element.value("TNM_Pn"),
        s: element.value("TNM_S"),
    }
}

fn further_classifications(element: &Element) -> Vec<SourceFurtherClassification> {
    element
        .items("Menge_Weitere_Klassifikation", "Weitere_Klassifikation")
        .into_iter()
        .map(|classification| SourceFurtherClassification {
            date: classification.value("Datum"),
            name: classification.value("Name"),
            stage: classification.value("Stadium"),
        })
        .collect()
}

fn prostate_module(element: &Element) -> SourceProstateModule {
    SourceProstateModule {
        gleason: element.child("GleasonScore").map(|gleason| SourceGleasonScore {
            primary_grade: gleason.value("GleasonGradPrimaer"),
            secondary_grade: gleason.value("GleasonGradSekundaer"),
            score: gleason.value("GleasonScoreErgebnis"),
        }),
        gleason_occasion: element.value("AnlassGleasonScore"),
        biopsy_date: element.value("DatumStanzen"),
        biopsy_count: element.value("AnzahlStanzen"),
        positive_biopsy_count: element.value("AnzahlPosStanzen"),
        cancer_share: element.child("CaBefallStanze").map(|share| SourceCancerShare {
            percentage: share.value("Prozentzahl"),
            unknown: share.value("U").or_else(|| share.child("U").map(|_| "U".to_string())),
        }),
        psa: element.value("PSA"),
        psa_date: element.value("DatumPSA"),
        clavien_dindo: element.value("KomplPostOPClavienDindo"),
    }
}

fn operation(element: &Element) -> SourceOperation {
    SourceOperation {
        id: element.value("OP_ID"),
        intention: element.value("OP_Intention"),
        date: element.value("OP_Datum"),
        ops_codes: element.item_values("Menge_OPS", "OP_OPS"),
        ops_version: element.value("OP_OPS_Version"),
        histology: element.child("Histologie").map(histology),
        tnm: element.child("TNM").map(tnm),
        complications: optional_list(element, "Menge_Komplikation", "OP_Komplikation"),
        residual_status: element
            .child("Residualstatus")
            .map(|residual| SourceResidualStatus {
                local: residual.value("Lokale_Beurteilung_Residualstatus"),
                overall: residual.value("Gesamtbeurteilung_Residualstatus"),
            }),
        prostate: element.child("Modul_Prostata").map(prostate_module),
    }
}

fn dose(element: &Element) -> SourceDose {
    SourceDose {
        dose: element.value("Dosis"),
        unit: element.value("Einheit"),
    }
}

fn side_effects(element: &Element, item: &str) -> Option<Vec<SourceSideEffect>> {
    element.child("Menge_Nebenwirkung").map(|_| {
        element
            .items("Menge_Nebenwirkung", item)
            .into_iter()
            .map(|side_effect| SourceSideEffect {
                grade: side_effect.value("Nebenwirkung_Grad"),
                category: side_effect.value("Nebenwirkung_Art"),
                version: side_effect.value("Nebenwirkung_Version"),
            })
            .collect()
    })
}

fn radiotherapy(element: &Element) -> SourceRadiotherapy {
    SourceRadiotherapy {
        id: element.value("ST_ID"),
        intention: element.value("ST_Intention"),
        op_sequence: element.value("ST_Stellung_OP"),
        end_reason: element.value("ST_Ende_Grund"),
        courses: element
            .items("Menge_Bestrahlung", "Bestrahlung")
            .into_iter()
            .map(|course| SourceIrradiation {
                target_area: course.value("ST_Zielgebiet"),
                target_side: course.value("ST_Seite_Zielgebiet"),
                start_date: course.value("ST_Beginn_Datum"),
                end_date: course.value("ST_Ende_Datum"),
                application_type: course.value("ST_Applikationsart"),
                total_dose: course.child("ST_Gesamtdosis").map(dose),
                single_dose: course.child("ST_Einzeldosis").map(dose),
            })
            .collect(),
        side_effects: side_effects(element, "ST_Nebenwirkung"),
    }
}

fn systemic_therapy(element: &Element) -> SourceSystemicTherapy {
    SourceSystemicTherapy {
        id: element.value("SYST_ID"),
        intention: element.value("SYST_Intention"),
        op_sequence: element.value("SYST_Stellung_OP"),
        therapy_types: element.item_values("Menge_Therapieart", "SYST_Therapieart"),
        protocol: element.value("SYST_Protokoll"),
        start_date: element.value("SYST_Beginn_Datum"),
        substances: optional_list(element, "Menge_Substanz", "SYST_Substanz"),
        end_reason: element.value("SYST_Ende_Grund"),
        end_date: element.value("SYST_Ende_Datum"),
        side_effects: side_effects(element, "SYST_Nebenwirkung"),
    }
}

fn follow_up(element: &Element) -> SourceFollowUp {
    SourceFollowUp {
        id: element.value("Verlauf_ID"),
        examination_date: element.value("Untersuchungsdatum_Verlauf"),
        overall_status: element.value("Gesamtbeurteilung_Tumorstatus"),
        local_status: element.value("Verlauf_Lokaler_Tumorstatus"),
        lymph_node_status: element.value("Verlauf_Tumorstatus_Lymphknoten"),
        metastasis_status: element.value("Verlauf_Tumorstatus_Fernmetastasen"),
        metastases: metastases(element),
        tnm: element.child("TNM").map(tnm),
        further_classifications: further_classifications(element),
        histology: element.child("Histologie").map(histology),
        performance_status: element.value("Allgemeiner_Leistungszustand"),
        death: element.child("Tod").map(|death| SourceDeath {
            date: death.value("Sterbedatum"),
            tumor_related: death.value("Tod_tumorbedingt"),
            causes: optional_list(death, "Menge_Todesursache", "Todesursache_ICD"),
            causes_version: death.value("Todesursache_ICD_Version"),
        }),
    }
}

fn tumor_board(element: &Element) -> SourceTumorBoard {
    SourceTumorBoard {
        id: element.value("Tumorkonferenz_ID"),
        date: element.value("Tumorkonferenz_Datum"),
        kind: element.value("Tumorkonferenz_Typ"),
        remark: element.value("Anmerkung"),
    }
}

fn additional_item(element: &Element) -> SourceAdditionalItem {
    SourceAdditionalItem {
        category: element.value("Art"),
        date: element.value("Datum"),
        value: element.value("Wert"),
        remark: element.value("Bemerkung"),
    }
}
