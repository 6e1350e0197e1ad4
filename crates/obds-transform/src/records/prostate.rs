//! `Modul_Prostata`

use obds_model::{CancerShare, GleasonScore, ProstateModule, SourceProstateModule, YesNoUnknown};
use tracing::debug;

use crate::date::map_iso_date;

pub fn map_prostate_module(source: &SourceProstateModule) -> ProstateModule {
    let gleason = source.gleason.as_ref().map(|gleason| GleasonScore {
        primary_grade: gleason.primary_grade.clone(),
        secondary_grade: gleason.secondary_grade.clone(),
        score: gleason.score.clone(),
    });
    // The occasion only describes a Gleason score; without one it is dropped.
    let gleason_occasion = gleason
        .as_ref()
        .and_then(|_| source.gleason_occasion.clone());

    let cancer_share = source.cancer_share.as_ref().and_then(|share| {
        match (&share.percentage, &share.unknown) {
            (Some(percentage), _) => Some(CancerShare::Percentage(percentage.clone())),
            (None, Some(_)) => Some(CancerShare::Unknown),
            (None, None) => None,
        }
    });

    let clavien_dindo = source.clavien_dindo.as_deref().and_then(|code| {
        code.parse::<YesNoUnknown>()
            .inspect_err(|_| debug!(code, "ignoring unknown Clavien-Dindo flag"))
            .ok()
    });

    ProstateModule {
        gleason,
        gleason_occasion,
        // Already ISO formatted in the source.
        biopsy_date: source.biopsy_date.clone(),
        biopsy_count: source.biopsy_count.clone(),
        positive_biopsy_count: source.positive_biopsy_count.clone(),
        cancer_share,
        psa: source.psa.clone(),
        psa_date: source.psa_date.as_deref().and_then(map_iso_date),
        clavien_dindo,
    }
}
