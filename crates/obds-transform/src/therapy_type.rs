//! Systemic therapy type (`SYST_Therapieart`) classification.
//!
//! ADT_GEKID lists every therapy type separately while oBDS v3 has a single
//! code with dedicated values for common combinations:
//!
//! | v3 code | meaning                                |
//! |---------|----------------------------------------|
//! | `CI`    | chemo + immunotherapy                  |
//! | `CZ`    | chemo + targeted therapy               |
//! | `CIZ`   | chemo + immuno + targeted therapy      |
//! | `IZ`    | immuno + targeted therapy              |
//! | `SZ`    | stem cell (incl. bone marrow) transplant |
//!
//! Multiple codes are deduplicated, sorted and concatenated into a lookup key,
//! so the result does not depend on input order.

use std::collections::BTreeSet;

use tracing::warn;

use crate::error::{Result, TransformError};

/// v2 code for bone marrow transplantation.
pub const BONE_MARROW_TRANSPLANT: &str = "KM";
/// v3 code for stem cell transplantation.
pub const STEM_CELL_TRANSPLANT: &str = "SZ";

/// Sorted combination key to v3 code.
const COMBINATIONS: &[(&str, &str)] = &[
    ("CHIM", "CI"),
    ("CHIMZS", "CIZ"),
    ("CHZS", "CZ"),
    ("IMZS", "IZ"),
];

/// Combinations without a v3 code of their own. The `SO` part is lost.
const FALLBACKS: &[(&str, &str)] = &[("CHIMSO", "CI"), ("CHSO", "CH")];

/// Classify the therapy type of a systemic therapy.
///
/// Returns `None` for an empty list. `CHIMSO` and `CHSO` fall back to `CI`
/// and `CH` with a warning. Any other combination missing from the lookup
/// table is a [`TransformError::MalformedInput`], which no ignore option
/// suppresses.
pub fn classify_therapy_type<S: AsRef<str>>(codes: &[S]) -> Result<Option<String>> {
    let codes: BTreeSet<&str> = codes
        .iter()
        .map(|code| code.as_ref().trim())
        .filter(|code| !code.is_empty())
        .collect();

    match codes.len() {
        0 => Ok(None),
        1 => {
            let code = codes.first().copied().unwrap_or_default();
            if code == BONE_MARROW_TRANSPLANT {
                Ok(Some(STEM_CELL_TRANSPLANT.to_string()))
            } else {
                Ok(Some(code.to_string()))
            }
        }
        _ => {
            let key: String = codes.iter().copied().collect();
            if let Some(target) = lookup(FALLBACKS, &key) {
                warn!(
                    combination = %key,
                    therapy_type = %target,
                    "therapy type combination not directly mappable, information is lost"
                );
                return Ok(Some(target.to_string()));
            }
            let Some(target) = lookup(COMBINATIONS, &key) else {
                return Err(TransformError::malformed(format!(
                    "unsupported therapy type combination: {key}"
                )));
            };
            Ok(Some(target.to_string()))
        }
    }
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(combination, _)| *combination == key)
        .map(|(_, target)| *target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combination_keys_are_sorted() {
        for (key, _) in COMBINATIONS.iter().chain(FALLBACKS) {
            let mut parts: Vec<&str> = (0..key.len())
                .step_by(2)
                .map(|start| &key[start..start + 2])
                .collect();
            let original = parts.clone();
            parts.sort_unstable();
            assert_eq!(parts, original, "key {key} is not sorted");
        }
    }
}
