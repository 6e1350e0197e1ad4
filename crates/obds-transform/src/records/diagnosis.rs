//! `Diagnose`

use obds_model::{Diagnosis, SourceDiagnosis};
use tracing::warn;

use super::prostate::map_prostate_module;
use super::shared::{
    map_further_classifications, map_histology, map_metastases, map_prior_tumor, map_tnm,
};
use crate::classify::performance_status_or_unknown;
use crate::error::{Result, TransformError};

/// Map a diagnosis sub-record.
///
/// oBDS v3 holds one histology and one prior malignancy per diagnosis; only
/// the first source entry of each is kept. The diagnosis certainty is
/// mandatory.
pub fn map_diagnosis(source: &SourceDiagnosis) -> Result<Diagnosis> {
    let certainty = source
        .certainty
        .as_deref()
        .map(str::trim)
        .filter(|certainty| !certainty.is_empty())
        .ok_or_else(|| TransformError::unmappable("diagnosis certainty (Diagnosesicherung) missing"))?;

    if source.prior_tumors.len() > 1 {
        warn!(
            count = source.prior_tumors.len(),
            "multiple prior malignancies, only the first is mapped"
        );
    }
    if source.histologies.len() > 1 {
        warn!(
            count = source.histologies.len(),
            "multiple histologies, only the first is mapped"
        );
    }

    Ok(Diagnosis {
        diagnosis_text: source.diagnosis_text.clone(),
        certainty: certainty.to_string(),
        prior_tumors: source
            .prior_tumors
            .first()
            .and_then(map_prior_tumor)
            .into_iter()
            .collect(),
        histology: source.histologies.first().map(map_histology),
        metastases: map_metastases(&source.metastases),
        clinical_tnm: source.clinical_tnm.as_ref().map(map_tnm),
        pathological_tnm: source.pathological_tnm.as_ref().map(map_tnm),
        further_classifications: map_further_classifications(&source.further_classifications),
        prostate: source.prostate.as_ref().map(map_prostate_module),
        performance_status: performance_status_or_unknown(source.performance_status.as_deref()),
    })
}
