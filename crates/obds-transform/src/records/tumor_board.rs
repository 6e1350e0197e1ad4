//! `Tumorkonferenz`

use obds_model::{SourceTumorBoard, TumorBoard};

use crate::date::map_date;

pub fn map_tumor_board(source: &SourceTumorBoard, reporting_reason: Option<&str>) -> TumorBoard {
    TumorBoard {
        id: source.id.clone(),
        reporting_reason: reporting_reason.map(str::to_string),
        date: source.date.as_deref().and_then(map_date),
        kind: source.kind.clone(),
    }
}
