//! `OP`

use obds_model::{Complications, Icd, Operation, ResidualStatus, SourceOperation};
use tracing::{debug, warn};

use super::prostate::map_prostate_module;
use super::shared::{map_histology, map_tnm};
use crate::date::map_date;

/// Complication codes meaning "none" or "unknown".
const NO_OR_UNKNOWN_COMPLICATION: [&str; 2] = ["N", "U"];

pub fn map_operation(source: &SourceOperation) -> Operation {
    let operation_id = source.id.as_deref().unwrap_or_default();
    Operation {
        id: source.id.clone(),
        intention: source.intention.clone(),
        date: source.date.as_deref().and_then(map_date).map(|date| date.value),
        procedures: source
            .ops_codes
            .iter()
            .map(|code| Icd {
                code: Some(code.clone()),
                version: source.ops_version.clone(),
            })
            .collect(),
        histology: source.histology.as_ref().map(map_histology),
        tnm: source.tnm.as_ref().map(map_tnm),
        residual_status: source.residual_status.as_ref().map(|residual| {
            if residual.overall.is_none() {
                debug!(operation_id, "operation has no overall residual status");
            }
            if residual.local.is_none() {
                debug!(operation_id, "operation has no local residual status");
            }
            ResidualStatus {
                local: residual.local.clone(),
                overall: residual.overall.clone(),
            }
        }),
        complications: source
            .complications
            .as_deref()
            .map(|codes| map_complications(codes, operation_id)),
        prostate: source.prostate.as_ref().map(map_prostate_module),
    }
}

/// `N`/`U` are exclusive in oBDS v3 but conflicting source data is kept in
/// both fields.
fn map_complications(codes: &[String], operation_id: &str) -> Complications {
    let mut complications = Complications::default();
    for code in codes {
        if NO_OR_UNKNOWN_COMPLICATION.contains(&code.as_str()) {
            if codes.len() > 1 {
                warn!(
                    operation_id,
                    "operation has multiple complications but one of them is 'N' or 'U'"
                );
            }
            complications.none_or_unknown = Some(code.clone());
        } else {
            complications.items.push(code.clone());
        }
    }
    complications
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn none_code_is_exclusive_value() {
        let complications = map_complications(&codes(&["N"]), "OP1");
        assert_eq!(complications.none_or_unknown.as_deref(), Some("N"));
        assert!(complications.items.is_empty());
    }

    #[test]
    fn conflicting_complications_keep_both() {
        let complications = map_complications(&codes(&["U", "BLU", "ANI"]), "OP1");
        assert_eq!(complications.none_or_unknown.as_deref(), Some("U"));
        assert_eq!(complications.items, codes(&["BLU", "ANI"]));
    }
}
