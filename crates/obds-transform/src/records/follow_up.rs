//! `Verlauf`

use obds_model::{FollowUp, SourceFollowUp};

use super::shared::{map_further_classifications, map_histology, map_metastases, map_tnm};
use crate::date::map_date;

/// Map a follow-up. The performance status is kept only when reported; unlike
/// the diagnosis it has no default.
pub fn map_follow_up(source: &SourceFollowUp, reporting_reason: Option<&str>) -> FollowUp {
    FollowUp {
        id: source.id.clone(),
        reporting_reason: reporting_reason.map(str::to_string),
        examination_date: source
            .examination_date
            .as_deref()
            .and_then(map_date)
            .map(|date| date.value),
        overall_status: source.overall_status.clone(),
        local_status: source.local_status.clone(),
        lymph_node_status: source.lymph_node_status.clone(),
        metastasis_status: source.metastasis_status.clone(),
        metastases: map_metastases(&source.metastases),
        tnm: source.tnm.as_ref().map(map_tnm),
        further_classifications: map_further_classifications(&source.further_classifications),
        histology: source.histology.as_ref().map(map_histology),
        performance_status: source.performance_status.clone(),
    }
}
