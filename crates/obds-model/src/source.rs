//! In-memory tree of an ADT_GEKID (oBDS v2) document.
//!
//! Leaves are kept as the raw strings found in the document. Nothing here is
//! validated; deciding what is usable is the converter's job. Collections
//! whose mere presence carries meaning (addresses, previous names,
//! complications, side effects, substances) are `Option<Vec<_>>`, all other
//! collections are plain `Vec`s where empty means absent.

use serde::{Deserialize, Serialize};

/// Root of an ADT_GEKID document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub schema_version: Option<String>,
    pub sender: SourceSender,
    pub patients: Vec<SourcePatient>,
    pub reporters: Vec<SourceReporter>,
}

/// `Absender`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSender {
    pub id: Option<String>,
    pub software_id: Option<String>,
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// `Melder`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReporter {
    pub id: Option<String>,
    pub reporting_unit: Option<String>,
    pub department: Option<String>,
    pub physician_name: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub bank_name: Option<String>,
    pub bic: Option<String>,
    pub iban: Option<String>,
    pub account_holder: Option<String>,
    pub iknr: Option<String>,
    pub lanr: Option<String>,
    pub bsnr: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePatient {
    pub remark: Option<String>,
    pub master_data: SourceMasterData,
    pub messages: Vec<SourceMessage>,
}

/// `Patienten_Stammdaten`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMasterData {
    pub patient_id: Option<String>,
    /// `KrankenversichertenNr`
    pub member_number: Option<String>,
    /// `KrankenkassenNr` (IKNR of the payer)
    pub payer_number: Option<String>,
    pub last_name: Option<String>,
    pub first_names: Option<String>,
    pub birth_name: Option<String>,
    pub title: Option<String>,
    pub name_suffix: Option<String>,
    pub previous_names: Option<Vec<String>>,
    pub sex: Option<String>,
    pub birth_date: Option<String>,
    pub addresses: Option<Vec<SourceAddress>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAddress {
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
}

/// One `Meldung`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMessage {
    pub message_id: Option<String>,
    pub reporter_id: Option<String>,
    pub report_date: Option<String>,
    /// `Meldebegruendung`
    pub reporting_basis: Option<String>,
    /// `Meldeanlass`
    pub reporting_reason: Option<String>,
    pub remark: Option<String>,
    pub tumor_assignment: Option<SourceTumorAssignment>,
    pub diagnosis: Option<SourceDiagnosis>,
    pub operations: Vec<SourceOperation>,
    pub radiotherapies: Vec<SourceRadiotherapy>,
    pub systemic_therapies: Vec<SourceSystemicTherapy>,
    pub follow_ups: Vec<SourceFollowUp>,
    pub tumor_boards: Vec<SourceTumorBoard>,
    pub additional_items: Vec<SourceAdditionalItem>,
}

/// `Tumorzuordnung`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTumorAssignment {
    pub tumor_id: Option<String>,
    pub icd_code: Option<String>,
    pub icd_version: Option<String>,
    pub diagnosis_date: Option<String>,
    pub laterality: Option<String>,
}

/// `Diagnose`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDiagnosis {
    pub tumor_id: Option<String>,
    pub icd_code: Option<String>,
    pub icd_version: Option<String>,
    pub diagnosis_text: Option<String>,
    pub diagnosis_date: Option<String>,
    /// `Diagnosesicherung`
    pub certainty: Option<String>,
    pub laterality: Option<String>,
    pub prior_tumors: Vec<SourcePriorTumor>,
    pub histologies: Vec<SourceHistology>,
    pub metastases: Vec<SourceMetastasis>,
    pub clinical_tnm: Option<SourceTnm>,
    pub pathological_tnm: Option<SourceTnm>,
    pub further_classifications: Vec<SourceFurtherClassification>,
    /// `Allgemeiner_Leistungszustand`
    pub performance_status: Option<String>,
    pub prostate: Option<SourceProstateModule>,
}

/// `Fruehere_Tumorerkrankung`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePriorTumor {
    pub free_text: Option<String>,
    pub icd_code: Option<String>,
    pub icd_version: Option<String>,
    pub diagnosis_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceHistology {
    pub id: Option<String>,
    pub date: Option<String>,
    pub submission_number: Option<String>,
    pub morphology_code: Option<String>,
    pub morphology_version: Option<String>,
    pub morphology_text: Option<String>,
    pub grading: Option<String>,
    pub lymph_nodes_examined: Option<String>,
    pub lymph_nodes_affected: Option<String>,
    pub sentinel_nodes_examined: Option<String>,
    pub sentinel_nodes_affected: Option<String>,
}

/// `Fernmetastase`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetastasis {
    pub date: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTnm {
    pub id: Option<String>,
    pub date: Option<String>,
    pub version: Option<String>,
    pub y_symbol: Option<String>,
    pub r_symbol: Option<String>,
    pub a_symbol: Option<String>,
    pub prefix_t: Option<String>,
    pub t: Option<String>,
    pub m_symbol: Option<String>,
    pub prefix_n: Option<String>,
    pub n: Option<String>,
    pub prefix_m: Option<String>,
    pub m: Option<String>,
    pub l: Option<String>,
    pub v: Option<String>,
    pub pn: Option<String>,
    pub s: Option<String>,
}

/// `Weitere_Klassifikation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFurtherClassification {
    pub date: Option<String>,
    pub name: Option<String>,
    pub stage: Option<String>,
}

/// `Modul_Prostata`. Its two dates are ISO formatted, unlike the rest of the
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProstateModule {
    pub gleason: Option<SourceGleasonScore>,
    pub gleason_occasion: Option<String>,
    pub biopsy_date: Option<String>,
    pub biopsy_count: Option<String>,
    pub positive_biopsy_count: Option<String>,
    pub cancer_share: Option<SourceCancerShare>,
    pub psa: Option<String>,
    pub psa_date: Option<String>,
    pub clavien_dindo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceGleasonScore {
    pub primary_grade: Option<String>,
    pub secondary_grade: Option<String>,
    pub score: Option<String>,
}

/// `Ca_Befall_Stanze`: either a percentage or the literal `U`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCancerShare {
    pub percentage: Option<String>,
    pub unknown: Option<String>,
}

/// `OP`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOperation {
    pub id: Option<String>,
    pub intention: Option<String>,
    pub date: Option<String>,
    pub ops_codes: Vec<String>,
    pub ops_version: Option<String>,
    pub histology: Option<SourceHistology>,
    pub tnm: Option<SourceTnm>,
    pub complications: Option<Vec<String>>,
    pub residual_status: Option<SourceResidualStatus>,
    pub prostate: Option<SourceProstateModule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceResidualStatus {
    pub local: Option<String>,
    pub overall: Option<String>,
}

/// `ST`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRadiotherapy {
    pub id: Option<String>,
    pub intention: Option<String>,
    pub op_sequence: Option<String>,
    pub end_reason: Option<String>,
    pub courses: Vec<SourceIrradiation>,
    pub side_effects: Option<Vec<SourceSideEffect>>,
}

/// `Bestrahlung`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceIrradiation {
    pub target_area: Option<String>,
    pub target_side: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub application_type: Option<String>,
    pub total_dose: Option<SourceDose>,
    pub single_dose: Option<SourceDose>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDose {
    pub dose: Option<String>,
    pub unit: Option<String>,
}

/// `ST_Nebenwirkung` / `SYST_Nebenwirkung`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSideEffect {
    pub grade: Option<String>,
    pub category: Option<String>,
    pub version: Option<String>,
}

/// `SYST`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSystemicTherapy {
    pub id: Option<String>,
    pub intention: Option<String>,
    pub op_sequence: Option<String>,
    pub therapy_types: Vec<String>,
    pub protocol: Option<String>,
    pub start_date: Option<String>,
    pub substances: Option<Vec<String>>,
    pub end_reason: Option<String>,
    pub end_date: Option<String>,
    pub side_effects: Option<Vec<SourceSideEffect>>,
}

/// `Verlauf`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFollowUp {
    pub id: Option<String>,
    pub examination_date: Option<String>,
    pub overall_status: Option<String>,
    pub local_status: Option<String>,
    pub lymph_node_status: Option<String>,
    pub metastasis_status: Option<String>,
    pub metastases: Vec<SourceMetastasis>,
    pub tnm: Option<SourceTnm>,
    pub further_classifications: Vec<SourceFurtherClassification>,
    pub histology: Option<SourceHistology>,
    pub performance_status: Option<String>,
    pub death: Option<SourceDeath>,
}

/// `Tod`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDeath {
    pub date: Option<String>,
    pub tumor_related: Option<String>,
    pub causes: Option<Vec<String>>,
    pub causes_version: Option<String>,
}

/// `Tumorkonferenz`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTumorBoard {
    pub id: Option<String>,
    pub date: Option<String>,
    pub kind: Option<String>,
    pub remark: Option<String>,
}

/// `Zusatzitem`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAdditionalItem {
    pub category: Option<String>,
    pub date: Option<String>,
    pub value: Option<String>,
    pub remark: Option<String>,
}
