//! Building blocks shared by several sub-record mappers.

use obds_model::{
    FurtherClassification, Histology, Icd, Metastasis, PriorTumor, SourceFurtherClassification,
    SourceHistology, SourceMetastasis, SourcePriorTumor, SourceTnm, Tnm,
};

use crate::date::{map_date, map_date_precise};

pub(crate) fn icd(code: Option<&String>, version: Option<&String>) -> Icd {
    Icd {
        code: code.cloned(),
        version: version.cloned(),
    }
}

pub fn map_histology(source: &SourceHistology) -> Histology {
    Histology {
        id: source.id.clone(),
        date: source.date.as_deref().and_then(map_date),
        submission_number: source.submission_number.clone(),
        morphology: source
            .morphology_code
            .as_ref()
            .map(|code| icd(Some(code), source.morphology_version.as_ref())),
        morphology_text: source.morphology_text.clone(),
        grading: source.grading.clone(),
        lymph_nodes_examined: source.lymph_nodes_examined.clone(),
        lymph_nodes_affected: source.lymph_nodes_affected.clone(),
        sentinel_nodes_examined: source.sentinel_nodes_examined.clone(),
        sentinel_nodes_affected: source.sentinel_nodes_affected.clone(),
    }
}

/// Distant metastases are dropped without a usable diagnosis date.
pub fn map_metastasis(source: &SourceMetastasis) -> Option<Metastasis> {
    let date = source.date.as_deref().and_then(map_date)?;
    Some(Metastasis {
        date,
        location: source.location.clone(),
    })
}

pub fn map_metastases(sources: &[SourceMetastasis]) -> Vec<Metastasis> {
    sources.iter().filter_map(map_metastasis).collect()
}

/// TNM is mapped even without a usable date.
pub fn map_tnm(source: &SourceTnm) -> Tnm {
    Tnm {
        id: source.id.clone(),
        date: source
            .date
            .as_deref()
            .and_then(map_date)
            .map(|date| date.value),
        version: source.version.clone(),
        y_symbol: source.y_symbol.clone(),
        r_symbol: source.r_symbol.clone(),
        a_symbol: source.a_symbol.clone(),
        prefix_t: source.prefix_t.clone(),
        t: source.t.clone(),
        m_symbol: source.m_symbol.clone(),
        prefix_n: source.prefix_n.clone(),
        n: source.n.clone(),
        prefix_m: source.prefix_m.clone(),
        m: source.m.clone(),
        l: source.l.clone(),
        v: source.v.clone(),
        pn: source.pn.clone(),
        s: source.s.clone(),
    }
}

/// Further classifications need a date known at least to the month.
pub fn map_further_classification(
    source: &SourceFurtherClassification,
) -> Option<FurtherClassification> {
    let date = source.date.as_deref().and_then(map_date_precise)?;
    Some(FurtherClassification {
        date,
        name: source.name.clone(),
        stage: source.stage.clone(),
    })
}

pub fn map_further_classifications(
    sources: &[SourceFurtherClassification],
) -> Vec<FurtherClassification> {
    sources
        .iter()
        .filter_map(map_further_classification)
        .collect()
}

pub fn map_prior_tumor(source: &SourcePriorTumor) -> Option<PriorTumor> {
    let date = source.diagnosis_date.as_deref().and_then(map_date)?;
    Some(PriorTumor {
        icd: icd(source.icd_code.as_ref(), source.icd_version.as_ref()),
        diagnosis_date: date.value,
        free_text: source.free_text.clone(),
    })
}
