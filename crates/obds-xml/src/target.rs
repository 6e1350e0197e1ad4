//! Serialization of [`TargetDocument`] as oBDS v3 XML.
//!
//! The document is first built as an [`Element`] tree and pruned, so a field
//! without a value never produces an empty element.

use chrono::NaiveDate;
use obds_model::{
    AdditionalItem, Address, Application, CancerShare, DateValue, Death, Diagnosis, Dose,
    FollowUp, FurtherClassification, Histology, Icd, Insurance, MasterData, Message, Metastasis,
    OBDS_NAMESPACE, Operation, Pathology, Patient, Payload, PreciseDate, PriorTumor,
    ProstateModule, Radiotherapy, Reporter, SchemaVersion, Sender, SideEffects, SystemicTherapy,
    TargetArea, TargetDocument, Tnm, TumorAssignment, TumorBoard, YesNoUnknown,
};
use tracing::debug;

use crate::element::{Element, write_element_tree};
use crate::error::{Result, XmlError};

const DATE_FORMAT: &str = "%Y-%m-%d";
const PRECISION_ATTRIBUTE: &str = "Datumsgenauigkeit";

/// Serialize a converted document.
pub fn write_target_document(document: &TargetDocument) -> Result<String> {
    let root = Element::new(SchemaVersion::Obds3_0_4.root_element())
        .with_attribute("xmlns", Some(OBDS_NAMESPACE))
        .with_attribute("Schema_Version", Some(document.schema_version.as_str()))
        .with_child(sender(&document.sender))
        .with_child(
            Element::new("Menge_Patient").with_children(document.patients.iter().map(patient)),
        )
        .with_child(
            Element::new("Menge_Melder").with_children(document.reporters.iter().map(reporter)),
        )
        .with_leaf(
            "Meldedatum",
            document.report_date.map(format_date).as_deref(),
        );

    let root = root.pruned().ok_or(XmlError::MissingRoot)?;
    let xml = write_element_tree(&root)?;
    debug!(bytes = xml.len(), "target document written");
    Ok(xml)
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn date_element(name: &str, date: Option<NaiveDate>) -> Element {
    match date {
        Some(date) => Element::new(name).with_text(format_date(date)),
        None => Element::new(name),
    }
}

fn date_value_element(name: &str, date: Option<&DateValue>) -> Element {
    match date {
        Some(date) => Element::new(name)
            .with_attribute(PRECISION_ATTRIBUTE, Some(date.precision.code()))
            .with_text(format_date(date.value)),
        None => Element::new(name),
    }
}

fn precise_date_element(name: &str, date: Option<&PreciseDate>) -> Element {
    match date {
        Some(date) => Element::new(name)
            .with_attribute(PRECISION_ATTRIBUTE, Some(date.precision.code()))
            .with_text(format_date(date.value)),
        None => Element::new(name),
    }
}

fn code_element(name: &str, icd: &Icd) -> Element {
    Element::new(name)
        .with_leaf("Code", icd.code.as_deref())
        .with_leaf("Version", icd.version.as_deref())
}

fn sender(sender: &Sender) -> Element {
    Element::new("Absender")
        .with_attribute("Absender_ID", sender.id.as_deref())
        .with_attribute("Software_ID", Some(sender.software_id.as_str()))
        .with_attribute("Software_Version", Some(sender.software_version.as_str()))
        .with_leaf("Bezeichnung", sender.name.as_deref())
        .with_leaf("Ansprechpartner", sender.contact_person.as_deref())
        .with_leaf("Anschrift", sender.address.as_deref())
        .with_leaf("Telefon", sender.phone.as_deref())
        .with_leaf("E-Mail", sender.email.as_deref())
}

fn reporter(reporter: &Reporter) -> Element {
    let ident = &reporter.ident_numbers;
    Element::new("Melder")
        .with_attribute("ID", reporter.id.as_deref())
        .with_leaf("KH_Abt_Station_Praxis", reporter.department.as_deref())
        .with_leaf("Arztname", reporter.physician_name.as_deref())
        .with_leaf("Anschrift", reporter.address.as_deref())
        .with_leaf("PLZ", reporter.postal_code.as_deref())
        .with_leaf("Ort", reporter.city.as_deref())
        .with_leaf("Bankname", reporter.bank_name.as_deref())
        .with_leaf("Kontoinhaber", reporter.account_holder.as_deref())
        .with_leaf("BIC", reporter.bic.as_deref())
        .with_leaf("IBAN", reporter.iban.as_deref())
        .with_child(
            Element::new("Ident_Nummern")
                .with_leaf("IKNR", ident.iknr.as_deref())
                .with_leaf("LANR", ident.lanr.as_deref())
                .with_leaf("BSNR", ident.bsnr.as_deref()),
        )
}

fn patient(patient: &Patient) -> Element {
    Element::new("Patient")
        .with_attribute("Patient_ID", patient.patient_id.as_deref())
        .with_child(master_data(&patient.master_data))
        .with_child(Element::new("Menge_Meldung").with_children(patient.messages.iter().map(message)))
        .with_leaf("Anmerkung", patient.remark.as_deref())
}

fn insurance(insurance: &Insurance) -> Element {
    match insurance {
        Insurance::Statutory {
            iknr,
            member_number,
        } => Element::new("Versichertendaten_GKV")
            .with_leaf("IKNR", Some(iknr.as_str()))
            .with_leaf("GKV_Versichertennummer", Some(member_number.as_str())),
        Insurance::Private {
            iknr,
            member_number,
        } => Element::new("Versichertendaten_PKV")
            .with_leaf("IKNR", Some(iknr.as_str()))
            .with_leaf("PKV_Versichertennummer", Some(member_number.as_str())),
        Insurance::Other { substitute_code } => {
            Element::new("Versichertendaten_Sonstige")
                .with_leaf("Ersatzkode", Some(substitute_code.as_str()))
        }
    }
}

fn address(address: &Address) -> Element {
    Element::new("Adresse")
        .keep_empty()
        .with_leaf("Strasse", address.street.as_deref())
        .with_leaf("Hausnummer", address.house_number.as_deref())
        .with_leaf("Land", address.country.as_deref())
        .with_leaf("PLZ", address.postal_code.as_deref())
        .with_leaf("Ort", address.city.as_deref())
}

fn master_data(data: &MasterData) -> Element {
    let mut element = Element::new("Patienten_Stammdaten");
    if let Some(insurance_data) = &data.insurance {
        element = element.with_child(insurance(insurance_data));
    }
    element = element
        .with_leaf("Nachname", data.last_name.as_deref())
        .with_leaf("Vornamen", data.first_names.as_deref())
        .with_leaf("Geburtsname", data.birth_name.as_deref())
        .with_leaf("Titel", data.title.as_deref())
        .with_leaf("Namenszusatz", data.name_suffix.as_deref());
    if let Some(names) = &data.previous_names {
        element = element.with_child(Element::new("Menge_Frueherer_Name").with_children(
            names
                .iter()
                .map(|name| Element::new("Frueherer_Name").with_text(name.as_str())),
        ));
    }
    element = element
        .with_leaf("Geschlecht", Some(data.sex.code()))
        .with_child(date_value_element("Geburtsdatum", Some(&data.birth_date)));
    if let Some(patient_address) = &data.address {
        element = element.with_child(address(patient_address));
    }
    element
}

fn tumor_assignment(assignment: &TumorAssignment) -> Element {
    Element::new("Tumorzuordnung")
        .with_attribute("Tumor_ID", Some(assignment.tumor_id.as_str()))
        .with_child(code_element("Primaertumor_ICD", &assignment.icd))
        .with_child(precise_date_element(
            "Diagnosedatum",
            assignment.diagnosis_date.as_ref(),
        ))
        .with_leaf("Seitenlokalisation", assignment.laterality.as_deref())
}

fn message(message: &Message) -> Element {
    let mut element = Element::new("Meldung")
        .with_attribute("Meldung_ID", Some(message.message_id.as_str()))
        .with_attribute("Melder_ID", message.reporter_id.as_deref())
        .with_leaf("Meldebegruendung", message.reporting_basis.as_deref())
        .with_leaf("Eigene_Leistung", Some(message.own_service.code()));
    if let Some(assignment) = &message.tumor_assignment {
        element = element.with_child(tumor_assignment(assignment));
    }
    element
        .with_child(payload(&message.payload))
        .with_child(
            Element::new("Menge_Zusatzitem")
                .with_children(message.additional_items.iter().map(additional_item)),
        )
        .with_leaf("Anmerkung", message.remark.as_deref())
}

fn payload(payload: &Payload) -> Element {
    match payload {
        Payload::Diagnosis(diagnosis_data) => diagnosis(diagnosis_data),
        Payload::Pathology(pathology_data) => pathology(pathology_data),
        Payload::Operation(operation_data) => operation(operation_data),
        Payload::Radiotherapy(radiotherapy_data) => radiotherapy(radiotherapy_data),
        Payload::SystemicTherapy(therapy) => systemic_therapy(therapy),
        Payload::TumorBoard(board) => tumor_board(board),
        Payload::FollowUp(follow_up_data) => follow_up(follow_up_data),
        Payload::Death(death_data) => death(death_data),
    }
}

fn prior_tumor(tumor: &PriorTumor) -> Element {
    Element::new("Fruehere_Tumorerkrankung")
        .with_leaf("Freitext", tumor.free_text.as_deref())
        .with_child(code_element("ICD", &tumor.icd))
        .with_child(date_element("Diagnosedatum", Some(tumor.diagnosis_date)))
}

fn histology(histology: &Histology) -> Element {
    let mut element = Element::new("Histologie")
        .with_attribute("Histologie_ID", histology.id.as_deref())
        .with_child(date_value_element(
            "Tumor_Histologiedatum",
            histology.date.as_ref(),
        ))
        .with_leaf("Histologie_EinsendeNr", histology.submission_number.as_deref());
    if let Some(morphology) = &histology.morphology {
        element = element.with_child(code_element("Morphologie_ICD_O", morphology));
    }
    element
        .with_leaf("Morphologie_Freitext", histology.morphology_text.as_deref())
        .with_leaf("Grading", histology.grading.as_deref())
        .with_leaf("LK_untersucht", histology.lymph_nodes_examined.as_deref())
        .with_leaf("LK_befallen", histology.lymph_nodes_affected.as_deref())
        .with_leaf(
            "Sentinel_LK_untersucht",
            histology.sentinel_nodes_examined.as_deref(),
        )
        .with_leaf(
            "Sentinel_LK_befallen",
            histology.sentinel_nodes_affected.as_deref(),
        )
}

fn metastases(metastases: &[Metastasis]) -> Element {
    Element::new("Menge_FM").with_children(metastases.iter().map(|metastasis| {
        Element::new("Fernmetastase")
            .with_child(date_value_element("Diagnosedatum", Some(&metastasis.date)))
            .with_leaf("Lokalisation", metastasis.location.as_deref())
    }))
}

fn tnm(name: &str, tnm: &Tnm) -> Element {
    Element::new(name)
        .with_attribute("ID", tnm.id.as_deref())
        .with_child(date_element("Datum", tnm.date))
        .with_leaf("Version", tnm.version.as_deref())
        .with_leaf("y_Symbol", tnm.y_symbol.as_deref())
        .with_leaf("r_Symbol", tnm.r_symbol.as_deref())
        .with_leaf("a_Symbol", tnm.a_symbol.as_deref())
        .with_leaf("c_p_u_Praefix_T", tnm.prefix_t.as_deref())
        .with_leaf("T", tnm.t.as_deref())
        .with_leaf("m_Symbol", tnm.m_symbol.as_deref())
        .with_leaf("c_p_u_Praefix_N", tnm.prefix_n.as_deref())
        .with_leaf("N", tnm.n.as_deref())
        .with_leaf("c_p_u_Praefix_M", tnm.prefix_m.as_deref())
        .with_leaf("M", tnm.m.as_deref())
        .with_leaf("L", tnm.l.as_deref())
        .with_leaf("V", tnm.v.as_deref())
        .with_leaf("Pn", tnm.pn.as_deref())
        .with_leaf("S", tnm.s.as_deref())
}

fn optional_tnm(name: &str, value: Option<&Tnm>) -> Element {
    value.map_or_else(|| Element::new(name), |value| tnm(name, value))
}

fn further_classifications(classifications: &[FurtherClassification]) -> Element {
    Element::new("Menge_Weitere_Klassifikation").with_children(classifications.iter().map(
        |classification| {
            Element::new("Weitere_Klassifikation")
                .with_child(precise_date_element("Datum", Some(&classification.date)))
                .with_leaf("Name", classification.name.as_deref())
                .with_leaf("Stadium", classification.stage.as_deref())
        },
    ))
}

fn prostate(module: Option<&ProstateModule>) -> Element {
    let Some(module) = module else {
        return Element::new("Modul_Prostata");
    };
    let mut element = Element::new("Modul_Prostata");
    if let Some(gleason) = &module.gleason {
        element = element.with_child(
            Element::new("GleasonScore")
                .with_leaf("Grad_Primaer", gleason.primary_grade.as_deref())
                .with_leaf("Grad_Sekundaer", gleason.secondary_grade.as_deref())
                .with_leaf("Score_Ergebnis", gleason.score.as_deref()),
        );
    }
    element = element
        .with_leaf("Anlass_Gleason_Score", module.gleason_occasion.as_deref())
        .with_leaf("Datum_Stanzen", module.biopsy_date.as_deref())
        .with_leaf("Anzahl_Stanzen", module.biopsy_count.as_deref())
        .with_leaf("Anzahl_positive_Stanzen", module.positive_biopsy_count.as_deref());
    element = match &module.cancer_share {
        Some(CancerShare::Percentage(percentage)) => element.with_child(
            Element::new("Ca_Befall_Stanze").with_leaf("Prozentzahl", Some(percentage.as_str())),
        ),
        Some(CancerShare::Unknown) => {
            element.with_child(Element::new("Ca_Befall_Stanze").with_leaf("U", Some("U")))
        }
        None => element,
    };
    element
        .with_leaf("PSA", module.psa.as_deref())
        .with_child(date_value_element("Datum_PSA", module.psa_date.as_ref()))
        .with_leaf(
            "Kompl_postOP_Clavien_Dindo",
            module.clavien_dindo.map(YesNoUnknown::code),
        )
}

fn diagnosis(diagnosis: &Diagnosis) -> Element {
    Element::new("Diagnose")
        .with_leaf("Primaertumor_Diagnosetext", diagnosis.diagnosis_text.as_deref())
        .with_leaf("Diagnosesicherung", Some(diagnosis.certainty.as_str()))
        .with_child(
            Element::new("Menge_Fruehere_Tumorerkrankung")
                .with_children(diagnosis.prior_tumors.iter().map(prior_tumor)),
        )
        .with_children(diagnosis.histology.as_ref().map(histology))
        .with_child(metastases(&diagnosis.metastases))
        .with_child(optional_tnm("cTNM", diagnosis.clinical_tnm.as_ref()))
        .with_child(optional_tnm("pTNM", diagnosis.pathological_tnm.as_ref()))
        .with_child(further_classifications(&diagnosis.further_classifications))
        .with_leaf(
            "Allgemeiner_Leistungszustand",
            Some(diagnosis.performance_status.as_str()),
        )
        .with_child(prostate(diagnosis.prostate.as_ref()))
}

fn pathology(pathology: &Pathology) -> Element {
    let submitter = &pathology.submitter;
    Element::new("Pathologie")
        .with_child(
            Element::new("Einsender")
                .with_leaf("Einrichtung", submitter.institution.as_deref())
                .with_leaf("Abteilung", submitter.department.as_deref())
                .with_leaf("Strasse", submitter.street.as_deref())
                .with_leaf("Hausnummer", submitter.house_number.as_deref())
                .with_leaf("PLZ", submitter.postal_code.as_deref())
                .with_leaf("Ort", submitter.city.as_deref())
                .with_leaf("Land", Some(submitter.country.as_str())),
        )
        .with_leaf("Diagnosesicherung", Some(pathology.certainty.as_str()))
        .with_children(pathology.histology.as_ref().map(histology))
        .with_child(metastases(&pathology.metastases))
        .with_child(optional_tnm("cTNM", pathology.clinical_tnm.as_ref()))
        .with_child(optional_tnm("pTNM", pathology.pathological_tnm.as_ref()))
        .with_child(further_classifications(&pathology.further_classifications))
        .with_child(prostate(pathology.prostate.as_ref()))
}

fn operation(operation: &Operation) -> Element {
    let mut element = Element::new("OP")
        .with_attribute("OP_ID", operation.id.as_deref())
        .with_leaf("Intention", operation.intention.as_deref())
        .with_child(date_element("Datum", operation.date))
        .with_child(
            Element::new("Menge_OPS").with_children(
                operation
                    .procedures
                    .iter()
                    .map(|procedure| code_element("OPS", procedure)),
            ),
        )
        .with_children(operation.histology.as_ref().map(histology))
        .with_child(optional_tnm("TNM", operation.tnm.as_ref()));
    if let Some(residual) = &operation.residual_status {
        element = element.with_child(
            Element::new("Residualstatus")
                .with_leaf(
                    "Lokale_Beurteilung_Residualstatus",
                    residual.local.as_deref(),
                )
                .with_leaf(
                    "Gesamtbeurteilung_Residualstatus",
                    residual.overall.as_deref(),
                ),
        );
    }
    if let Some(complications) = &operation.complications {
        element = element.with_child(
            Element::new("Komplikationen")
                .with_leaf(
                    "Komplikation_nein_oder_unbekannt",
                    complications.none_or_unknown.as_deref(),
                )
                .with_child(Element::new("Menge_Komplikation").with_children(
                    complications.items.iter().map(|code| {
                        Element::new("Komplikation").with_leaf("Kuerzel", Some(code.as_str()))
                    }),
                )),
        );
    }
    element.with_child(prostate(operation.prostate.as_ref()))
}

fn dose(name: &str, dose: Option<&Dose>) -> Element {
    match dose {
        Some(dose) => Element::new(name)
            .with_leaf("Dosis", dose.dose.as_deref())
            .with_leaf("Einheit", dose.unit.as_deref()),
        None => Element::new(name),
    }
}

fn target_area(element: Element, target: &TargetArea) -> Element {
    element
        .with_leaf("Zielgebiet", target.code.as_deref())
        .with_leaf("Seite_Zielgebiet", target.side.as_deref())
}

fn application(application: &Application) -> Element {
    let element = target_area(
        Element::new(application.element_name()),
        application.target(),
    );
    match application {
        Application::Percutaneous {
            radiochemo,
            single_dose,
            total_dose,
            ..
        } => element
            .with_leaf("Radiochemo", radiochemo.as_deref())
            .with_child(dose("Einzeldosis", single_dose.as_ref()))
            .with_child(dose("Gesamtdosis", total_dose.as_ref())),
        Application::Contact {
            kind,
            rate_type,
            single_dose,
            total_dose,
            ..
        } => element
            .with_leaf("Interstitiell_endokavitaer", kind.as_deref())
            .with_leaf("Rate_Type", rate_type.as_deref())
            .with_child(dose("Einzeldosis", single_dose.as_ref()))
            .with_child(dose("Gesamtdosis", total_dose.as_ref())),
        Application::Metabolic { kind, .. } => {
            element.with_leaf("Metabolisch_Typ", kind.as_deref())
        }
        Application::Other {
            single_dose,
            total_dose,
            ..
        } => element
            .with_child(dose("Einzeldosis", single_dose.as_ref()))
            .with_child(dose("Gesamtdosis", total_dose.as_ref())),
    }
}

fn side_effects(side_effects: Option<&SideEffects>) -> Element {
    let element = Element::new("Nebenwirkungen");
    match side_effects {
        Some(SideEffects::MaxGradeTwoOrUnknown(grade)) => {
            element.with_leaf("Grad_maximal2_oder_unbekannt", Some(grade.as_str()))
        }
        Some(SideEffects::Itemized(items)) => element.with_child(
            Element::new("Menge_Nebenwirkung").with_children(items.iter().map(|item| {
                let category = if item.category.chars().all(|c| c.is_ascii_digit()) {
                    "MedDRA_Code"
                } else {
                    "Bezeichnung"
                };
                Element::new("Nebenwirkung")
                    .with_leaf("Grad", item.grade.as_deref())
                    .with_child(
                        Element::new("Art").with_leaf(category, Some(item.category.as_str())),
                    )
                    .with_leaf("Version", Some(item.version.as_str()))
            })),
        ),
        None => element,
    }
}

fn radiotherapy(therapy: &Radiotherapy) -> Element {
    Element::new("ST")
        .with_attribute("ST_ID", therapy.id.as_deref())
        .with_leaf("Meldeanlass", therapy.reporting_reason.as_deref())
        .with_leaf("Intention", therapy.intention.as_deref())
        .with_leaf("Stellung_OP", therapy.op_sequence.as_deref())
        .with_child(
            Element::new("Menge_Bestrahlung").with_children(therapy.courses.iter().map(|course| {
                Element::new("Bestrahlung")
                    .with_child(
                        Element::new("Applikationsart")
                            .with_children(course.application.as_ref().map(application)),
                    )
                    .with_child(date_element("Beginn", course.start))
                    .with_child(date_element("Ende", course.end))
            })),
        )
        .with_leaf("Ende_Grund", therapy.end_reason.as_deref())
        .with_child(side_effects(therapy.side_effects.as_ref()))
}

fn systemic_therapy(therapy: &SystemicTherapy) -> Element {
    Element::new("SYST")
        .with_attribute("SYST_ID", therapy.id.as_deref())
        .with_leaf("Meldeanlass", therapy.reporting_reason.as_deref())
        .with_leaf("Intention", therapy.intention.as_deref())
        .with_leaf("Stellung_OP", therapy.op_sequence.as_deref())
        .with_leaf("Therapieart", therapy.therapy_type.as_deref())
        .with_leaf("Protokoll", therapy.protocol.as_deref())
        .with_child(precise_date_element("Beginn", therapy.start.as_ref()))
        .with_child(
            Element::new("Menge_Substanz").with_children(therapy.substances.iter().map(
                |substance| {
                    Element::new("Substanz").with_leaf("Bezeichnung", Some(substance.as_str()))
                },
            )),
        )
        .with_leaf("Ende_Grund", therapy.end_reason.as_deref())
        .with_child(date_element("Ende", therapy.end))
        .with_child(side_effects(therapy.side_effects.as_ref()))
}

fn tumor_board(board: &TumorBoard) -> Element {
    Element::new("Tumorkonferenz")
        .with_attribute("Tumorkonferenz_ID", board.id.as_deref())
        .with_leaf("Meldeanlass", board.reporting_reason.as_deref())
        .with_child(date_value_element("Datum", board.date.as_ref()))
        .with_leaf("Typ", board.kind.as_deref())
}

fn follow_up(follow_up: &FollowUp) -> Element {
    Element::new("Verlauf")
        .with_attribute("Verlauf_ID", follow_up.id.as_deref())
        .with_leaf("Meldeanlass", follow_up.reporting_reason.as_deref())
        .with_child(date_element(
            "Untersuchungsdatum_Verlauf",
            follow_up.examination_date,
        ))
        .with_leaf(
            "Gesamtbeurteilung_Tumorstatus",
            follow_up.overall_status.as_deref(),
        )
        .with_leaf(
            "Verlauf_Lokaler_Tumorstatus",
            follow_up.local_status.as_deref(),
        )
        .with_leaf(
            "Verlauf_Tumorstatus_Lymphknoten",
            follow_up.lymph_node_status.as_deref(),
        )
        .with_leaf(
            "Verlauf_Tumorstatus_Fernmetastasen",
            follow_up.metastasis_status.as_deref(),
        )
        .with_child(metastases(&follow_up.metastases))
        .with_child(optional_tnm("TNM", follow_up.tnm.as_ref()))
        .with_child(further_classifications(&follow_up.further_classifications))
        .with_children(follow_up.histology.as_ref().map(histology))
        .with_leaf(
            "Allgemeiner_Leistungszustand",
            follow_up.performance_status.as_deref(),
        )
}

fn death(death: &Death) -> Element {
    Element::new("Tod")
        .with_child(date_element("Sterbedatum", death.date))
        .with_leaf(
            "Tod_tumorbedingt",
            death.tumor_related.map(YesNoUnknown::code),
        )
        .with_child(
            Element::new("Menge_Todesursachen").with_children(
                death
                    .causes
                    .iter()
                    .map(|cause| code_element("Todesursache_ICD", cause)),
            ),
        )
}

fn additional_item(item: &AdditionalItem) -> Element {
    Element::new("Zusatzitem")
        .with_leaf("Art", item.category.as_deref())
        .with_child(date_value_element("Datum", item.date.as_ref()))
        .with_leaf("Wert", item.value.as_deref())
        .with_leaf("Bemerkung", item.remark.as_deref())
}
