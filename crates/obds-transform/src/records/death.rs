//! `Tod`
//!
//! ADT_GEKID nests the death record inside a follow-up. oBDS v3 reports it as
//! a message of its own.

use obds_model::{Death, SourceFollowUp, YesNoUnknown};
use tracing::{debug, warn};

use super::shared::icd;
use crate::date::map_date;

/// Map the death record of the first follow-up that carries one.
pub fn map_death(follow_ups: &[SourceFollowUp]) -> Option<Death> {
    let with_death: Vec<_> = follow_ups
        .iter()
        .filter_map(|follow_up| follow_up.death.as_ref())
        .collect();
    if with_death.len() > 1 {
        warn!(
            count = with_death.len(),
            "multiple follow-ups report a death, only the first is mapped"
        );
    }
    let source = with_death.first()?;

    let tumor_related = source.tumor_related.as_deref().and_then(|code| {
        code.parse::<YesNoUnknown>()
            .inspect_err(|_| debug!(code, "unknown tumor-related death code"))
            .ok()
    });

    Some(Death {
        date: source.date.as_deref().and_then(map_date).map(|date| date.value),
        tumor_related,
        causes: source
            .causes
            .iter()
            .flatten()
            .map(|cause| icd(Some(cause), source.causes_version.as_ref()))
            .collect(),
    })
}
