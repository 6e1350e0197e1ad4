//! `Pathologie`
//!
//! ADT_GEKID has no pathology report of its own. A message whose reporting
//! reason is `histologie_zytologie` carries the findings in its diagnosis,
//! and the submitting institution in additional items named
//! `Einsender_*`. Those items become the structured submitter block and are
//! removed from the item list.

use obds_model::{Diagnosis, Pathology, SourceAdditionalItem, Submitter};

/// Reporting reason that turns a diagnosis into a pathology report.
pub const PATHOLOGY_REPORTING_REASON: &str = "histologie_zytologie";

/// Category prefix of submitter additional items.
pub const SUBMITTER_PREFIX: &str = "Einsender";

/// The source never carries a country for the submitter.
pub const SUBMITTER_COUNTRY: &str = "DE";

pub fn is_pathology_report(reporting_reason: Option<&str>) -> bool {
    reporting_reason.is_some_and(|reason| reason.trim() == PATHOLOGY_REPORTING_REASON)
}

pub fn is_submitter_item(item: &SourceAdditionalItem) -> bool {
    item.category
        .as_deref()
        .is_some_and(|category| category.trim().starts_with(SUBMITTER_PREFIX))
}

fn submitter_value(items: &[SourceAdditionalItem], category: &str) -> Option<String> {
    items
        .iter()
        .find(|item| item.category.as_deref().map(str::trim) == Some(category))
        .and_then(|item| item.value.as_deref())
        .map(|value| value.trim().to_string())
}

pub fn map_submitter(items: &[SourceAdditionalItem]) -> Submitter {
    Submitter {
        institution: submitter_value(items, "Einsender_Einrichtung"),
        department: submitter_value(items, "Einsender_Abteilung"),
        street: submitter_value(items, "Einsender_Strasse"),
        house_number: submitter_value(items, "Einsender_Hausnummer"),
        postal_code: submitter_value(items, "Einsender_PLZ"),
        city: submitter_value(items, "Einsender_Ort"),
        country: SUBMITTER_COUNTRY.to_string(),
    }
}

/// Re-shape a mapped diagnosis into a pathology report.
pub fn map_pathology(diagnosis: Diagnosis, items: &[SourceAdditionalItem]) -> Pathology {
    Pathology {
        submitter: map_submitter(items),
        certainty: diagnosis.certainty,
        histology: diagnosis.histology,
        metastases: diagnosis.metastases,
        clinical_tnm: diagnosis.clinical_tnm,
        pathological_tnm: diagnosis.pathological_tnm,
        further_classifications: diagnosis.further_classifications,
        prostate: diagnosis.prostate,
    }
}
