//! `SYST` (systemic therapy)

use obds_model::{SourceSystemicTherapy, SystemicTherapy};

use super::side_effects::map_side_effects;
use crate::date::{map_date, map_date_precise};
use crate::error::Result;
use crate::therapy_type::classify_therapy_type;

/// Map a systemic therapy.
///
/// The combined therapy type is derived from all source type codes; an
/// unsupported combination fails the conversion.
pub fn map_systemic_therapy(
    source: &SourceSystemicTherapy,
    reporting_reason: Option<&str>,
) -> Result<SystemicTherapy> {
    Ok(SystemicTherapy {
        id: source.id.clone(),
        reporting_reason: reporting_reason.map(str::to_string),
        intention: source.intention.clone(),
        op_sequence: source.op_sequence.clone(),
        therapy_type: classify_therapy_type(&source.therapy_types)?,
        protocol: source.protocol.clone(),
        start: source.start_date.as_deref().and_then(map_date_precise),
        substances: source.substances.clone().unwrap_or_default(),
        end_reason: source.end_reason.clone(),
        end: source
            .end_date
            .as_deref()
            .and_then(map_date)
            .map(|date| date.value),
        side_effects: source
            .side_effects
            .as_deref()
            .and_then(|entries| map_side_effects(entries, "SYST")),
    })
}
