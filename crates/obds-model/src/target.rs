//! In-memory tree of an oBDS v3 document.
//!
//! Every message carries exactly one clinical [`Payload`]. Optional schema
//! elements are `Option`s or empty `Vec`s; the writer omits them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codes::{Sex, YesNoUnknown};
use crate::date::{DateValue, PreciseDate};

/// Root of an oBDS v3 document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDocument {
    pub schema_version: String,
    pub sender: Sender,
    /// Document level `Meldedatum`.
    pub report_date: Option<NaiveDate>,
    pub patients: Vec<Patient>,
    pub reporters: Vec<Reporter>,
}

impl TargetDocument {
    /// Number of messages across all patients.
    pub fn message_count(&self) -> usize {
        self.patients.iter().map(|patient| patient.messages.len()).sum()
    }
}

/// `Absender`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub id: Option<String>,
    pub software_id: String,
    pub software_version: String,
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// `Melder`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reporter {
    pub id: Option<String>,
    pub department: Option<String>,
    pub physician_name: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub bank_name: Option<String>,
    pub account_holder: Option<String>,
    pub bic: Option<String>,
    pub iban: Option<String>,
    pub ident_numbers: IdentNumbers,
}

/// `Ident_Nummern`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentNumbers {
    pub iknr: Option<String>,
    pub lanr: Option<String>,
    pub bsnr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: Option<String>,
    pub remark: Option<String>,
    pub master_data: MasterData,
    pub messages: Vec<Message>,
}

/// `Patienten_Stammdaten`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterData {
    pub insurance: Option<Insurance>,
    pub last_name: Option<String>,
    pub first_names: Option<String>,
    pub birth_name: Option<String>,
    pub title: Option<String>,
    pub name_suffix: Option<String>,
    pub previous_names: Option<Vec<String>>,
    pub sex: Sex,
    pub birth_date: DateValue,
    pub address: Option<Address>,
}

/// Insurance block of the master data. oBDS v3 distinguishes the scheme,
/// oBDS v2 did not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Insurance {
    /// `Versichertendaten_GKV`
    Statutory { iknr: String, member_number: String },
    /// `Versichertendaten_PKV`
    Private { iknr: String, member_number: String },
    /// `Versichertendaten_Sonstige` carrying a registry substitute code.
    Other { substitute_code: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
}

/// One oBDS v3 `Meldung`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,
    pub reporter_id: Option<String>,
    pub reporting_basis: Option<String>,
    /// `Eigene_Leistung`
    pub own_service: YesNoUnknown,
    pub tumor_assignment: Option<TumorAssignment>,
    pub payload: Payload,
    pub additional_items: Vec<AdditionalItem>,
    pub remark: Option<String>,
}

impl Message {
    /// Whether the message carries a resolved tumor identifier.
    pub fn has_tumor_id(&self) -> bool {
        self.tumor_assignment
            .as_ref()
            .is_some_and(|assignment| !assignment.tumor_id.is_empty())
    }
}

/// The clinical content of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    Diagnosis(Diagnosis),
    Pathology(Pathology),
    Operation(Operation),
    Radiotherapy(Radiotherapy),
    SystemicTherapy(SystemicTherapy),
    TumorBoard(TumorBoard),
    FollowUp(FollowUp),
    Death(Death),
}

impl Payload {
    /// Schema element name of the payload.
    pub fn element_name(&self) -> &'static str {
        match self {
            Payload::Diagnosis(_) => "Diagnose",
            Payload::Pathology(_) => "Pathologie",
            Payload::Operation(_) => "OP",
            Payload::Radiotherapy(_) => "ST",
            Payload::SystemicTherapy(_) => "SYST",
            Payload::TumorBoard(_) => "Tumorkonferenz",
            Payload::FollowUp(_) => "Verlauf",
            Payload::Death(_) => "Tod",
        }
    }
}

/// `Tumorzuordnung`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TumorAssignment {
    pub tumor_id: String,
    pub icd: Icd,
    pub diagnosis_date: Option<PreciseDate>,
    pub laterality: Option<String>,
}

/// A code with its code-system version, e.g. ICD-10 or ICD-O.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icd {
    pub code: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub diagnosis_text: Option<String>,
    pub certainty: String,
    pub prior_tumors: Vec<PriorTumor>,
    pub histology: Option<Histology>,
    pub metastases: Vec<Metastasis>,
    pub clinical_tnm: Option<Tnm>,
    pub pathological_tnm: Option<Tnm>,
    pub further_classifications: Vec<FurtherClassification>,
    pub prostate: Option<ProstateModule>,
    pub performance_status: String,
}

/// `Pathologie`: the diagnosis findings of a histology/cytology report plus
/// the structured submitter block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pathology {
    pub submitter: Submitter,
    pub certainty: String,
    pub histology: Option<Histology>,
    pub metastases: Vec<Metastasis>,
    pub clinical_tnm: Option<Tnm>,
    pub pathological_tnm: Option<Tnm>,
    pub further_classifications: Vec<FurtherClassification>,
    pub prostate: Option<ProstateModule>,
}

/// `Einsender`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submitter {
    pub institution: Option<String>,
    pub department: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: String,
}

/// `Fruehere_Tumorerkrankung`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorTumor {
    pub icd: Icd,
    pub diagnosis_date: NaiveDate,
    pub free_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histology {
    pub id: Option<String>,
    pub date: Option<DateValue>,
    pub submission_number: Option<String>,
    pub morphology: Option<Icd>,
    pub morphology_text: Option<String>,
    pub grading: Option<String>,
    pub lymph_nodes_examined: Option<String>,
    pub lymph_nodes_affected: Option<String>,
    pub sentinel_nodes_examined: Option<String>,
    pub sentinel_nodes_affected: Option<String>,
}

/// `Fernmetastase`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metastasis {
    pub date: DateValue,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tnm {
    pub id: Option<String>,
    pub date: Option<NaiveDate>,
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
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurtherClassification {
    pub date: PreciseDate,
    pub name: Option<String>,
    pub stage: Option<String>,
}

/// `Modul_Prostata`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProstateModule {
    pub gleason: Option<GleasonScore>,
    pub gleason_occasion: Option<String>,
    pub biopsy_date: Option<String>,
    pub biopsy_count: Option<String>,
    pub positive_biopsy_count: Option<String>,
    pub cancer_share: Option<CancerShare>,
    pub psa: Option<String>,
    pub psa_date: Option<DateValue>,
    pub clavien_dindo: Option<YesNoUnknown>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GleasonScore {
    pub primary_grade: Option<String>,
    pub secondary_grade: Option<String>,
    pub score: Option<String>,
}

/// `Ca_Befall_Stanze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancerShare {
    Percentage(String),
    Unknown,
}

/// `OP`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub id: Option<String>,
    pub intention: Option<String>,
    pub date: Option<NaiveDate>,
    pub procedures: Vec<Icd>,
    pub histology: Option<Histology>,
    pub tnm: Option<Tnm>,
    pub residual_status: Option<ResidualStatus>,
    pub complications: Option<Complications>,
    pub prostate: Option<ProstateModule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualStatus {
    pub local: Option<String>,
    pub overall: Option<String>,
}

/// `Komplikationen`. Both fields may be set when the source reported
/// conflicting data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complications {
    /// `Komplikation_nein_oder_unbekannt`: `N` or `U`.
    pub none_or_unknown: Option<String>,
    pub items: Vec<String>,
}

/// `ST`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Radiotherapy {
    pub id: Option<String>,
    pub reporting_reason: Option<String>,
    pub intention: Option<String>,
    pub op_sequence: Option<String>,
    pub courses: Vec<Irradiation>,
    pub end_reason: Option<String>,
    pub side_effects: Option<SideEffects>,
}

/// `Bestrahlung`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Irradiation {
    pub application: Option<Application>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// `Applikationsart`: the delivery family of one irradiation course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Application {
    Percutaneous {
        target: TargetArea,
        /// `RCJ` or `RCN`
        radiochemo: Option<String>,
        single_dose: Option<Dose>,
        total_dose: Option<Dose>,
    },
    /// Contact as well as interstitial/endocavitary brachytherapy.
    Contact {
        target: TargetArea,
        /// `K` (contact) or `I` (interstitial/endocavitary)
        kind: Option<String>,
        /// `HDR`, `PDR` or `LDR`
        rate_type: Option<String>,
        single_dose: Option<Dose>,
        total_dose: Option<Dose>,
    },
    Metabolic {
        target: TargetArea,
        /// `SIRT` or `PRRT`
        kind: Option<String>,
    },
    Other {
        target: TargetArea,
        single_dose: Option<Dose>,
        total_dose: Option<Dose>,
    },
}

impl Application {
    pub fn element_name(&self) -> &'static str {
        match self {
            Application::Percutaneous { .. } => "Perkutan",
            Application::Contact { .. } => "Kontakt",
            Application::Metabolic { .. } => "Metabolisch",
            Application::Other { .. } => "Sonstige",
        }
    }

    pub fn target(&self) -> &TargetArea {
        match self {
            Application::Percutaneous { target, .. }
            | Application::Contact { target, .. }
            | Application::Metabolic { target, .. }
            | Application::Other { target, .. } => target,
        }
    }
}

/// `Zielgebiet` plus `Seite_Zielgebiet`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetArea {
    pub code: Option<String>,
    pub side: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dose {
    pub dose: Option<String>,
    pub unit: Option<String>,
}

/// `Nebenwirkungen`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideEffects {
    /// `Grad_maximal2_oder_unbekannt`: `K` or `U`.
    MaxGradeTwoOrUnknown(String),
    Itemized(Vec<SideEffect>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideEffect {
    pub category: String,
    pub version: String,
    pub grade: Option<String>,
}

/// `SYST`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemicTherapy {
    pub id: Option<String>,
    pub reporting_reason: Option<String>,
    pub intention: Option<String>,
    pub op_sequence: Option<String>,
    pub therapy_type: Option<String>,
    pub protocol: Option<String>,
    pub start: Option<PreciseDate>,
    pub substances: Vec<String>,
    pub end_reason: Option<String>,
    pub end: Option<NaiveDate>,
    pub side_effects: Option<SideEffects>,
}

/// `Tumorkonferenz`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TumorBoard {
    pub id: Option<String>,
    pub reporting_reason: Option<String>,
    pub date: Option<DateValue>,
    pub kind: Option<String>,
}

/// `Verlauf`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: Option<String>,
    pub reporting_reason: Option<String>,
    pub examination_date: Option<NaiveDate>,
    pub overall_status: Option<String>,
    pub local_status: Option<String>,
    pub lymph_node_status: Option<String>,
    pub metastasis_status: Option<String>,
    pub metastases: Vec<Metastasis>,
    pub tnm: Option<Tnm>,
    pub further_classifications: Vec<FurtherClassification>,
    pub histology: Option<Histology>,
    pub performance_status: Option<String>,
}

/// `Tod`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Death {
    pub date: Option<NaiveDate>,
    pub tumor_related: Option<YesNoUnknown>,
    pub causes: Vec<Icd>,
}

/// `Zusatzitem`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalItem {
    pub category: Option<String>,
    pub date: Option<DateValue>,
    pub value: Option<String>,
    pub remark: Option<String>,
}
