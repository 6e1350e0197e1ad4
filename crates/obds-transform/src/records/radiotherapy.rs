//! `ST` (radiotherapy)
//!
//! The application type code of each irradiation course selects the delivery
//! family in oBDS v3:
//!
//! | v2 code                     | family       | extra fields                  |
//! |-----------------------------|--------------|-------------------------------|
//! | `P`, `PRCJ`, `PRCN`         | percutaneous | radio-chemo `RCJ`/`RCN`       |
//! | `K`, `KHDR`, `KPDR`, `KLDR` | contact      | kind `K`, rate type           |
//! | `I`, `IHDR`, `IPDR`, `ILDR` | contact      | kind `I`, rate type           |
//! | `M`, `MSIRT`, `MPRRT`       | metabolic    | `SIRT`/`PRRT`                 |
//! | `S` or missing              | other        |                               |
//!
//! Percutaneous and contact irradiation require the target side and fall
//! back to `U`; metabolic and other leave it unset.

use obds_model::{
    Application, Dose, Irradiation, Radiotherapy, SourceDose, SourceIrradiation,
    SourceRadiotherapy, TargetArea,
};
use tracing::warn;

use super::side_effects::map_side_effects;
use crate::classify::UNKNOWN_CODE;
use crate::date::map_date;

/// Application type assumed when the source has none.
const DEFAULT_APPLICATION_TYPE: &str = "S";

pub fn map_radiotherapy(source: &SourceRadiotherapy, reporting_reason: Option<&str>) -> Radiotherapy {
    Radiotherapy {
        id: source.id.clone(),
        reporting_reason: reporting_reason.map(str::to_string),
        intention: source.intention.clone(),
        op_sequence: source.op_sequence.clone(),
        courses: source.courses.iter().map(map_irradiation).collect(),
        end_reason: source.end_reason.clone(),
        side_effects: source
            .side_effects
            .as_deref()
            .and_then(|entries| map_side_effects(entries, "ST")),
    }
}

fn map_irradiation(source: &SourceIrradiation) -> Irradiation {
    Irradiation {
        application: map_application(source),
        start: source
            .start_date
            .as_deref()
            .and_then(map_date)
            .map(|date| date.value),
        end: source
            .end_date
            .as_deref()
            .and_then(map_date)
            .map(|date| date.value),
    }
}

fn map_dose(source: &SourceDose) -> Dose {
    Dose {
        dose: source.dose.clone(),
        unit: source.unit.clone(),
    }
}

fn required_side(side: Option<&String>, family: &str) -> Option<String> {
    match side {
        Some(side) => Some(side.clone()),
        None => {
            warn!(
                family,
                "target side is unset but required for this application type, defaulting to 'U'"
            );
            Some(UNKNOWN_CODE.to_string())
        }
    }
}

/// Suffix of a known code within its family, or `None` with a warning for an
/// unknown code that still starts with the family letter.
fn variant<'a>(code: &'a str, family: &str, known: &[&'a str]) -> Option<&'a str> {
    let suffix = &code[family.len()..];
    if suffix.is_empty() || known.contains(&suffix) {
        Some(suffix).filter(|suffix| !suffix.is_empty())
    } else {
        warn!(code, "unknown radiation type, keeping the base application family");
        None
    }
}

/// Determine the delivery family of one irradiation course.
pub fn map_application(source: &SourceIrradiation) -> Option<Application> {
    let code = match source.application_type.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => code,
        _ => {
            warn!("application type is unset, defaulting to 'S' (other)");
            DEFAULT_APPLICATION_TYPE
        }
    };

    let area = source.target_area.clone();
    let single_dose = source.single_dose.as_ref().map(map_dose);
    let total_dose = source.total_dose.as_ref().map(map_dose);

    let application = if code.starts_with('P') {
        Application::Percutaneous {
            target: TargetArea {
                code: area,
                side: required_side(source.target_side.as_ref(), "P"),
            },
            radiochemo: variant(code, "P", &["RCJ", "RCN"]).map(str::to_string),
            single_dose,
            total_dose,
        }
    } else if code.starts_with('K') || code.starts_with('I') {
        let family = &code[..1];
        // The bare family letter carries no interstitial/endocavitary kind.
        let rate_type = variant(code, family, &["HDR", "PDR", "LDR"]);
        Application::Contact {
            target: TargetArea {
                code: area,
                side: required_side(source.target_side.as_ref(), family),
            },
            kind: rate_type.map(|_| family.to_string()),
            rate_type: rate_type.map(str::to_string),
            single_dose,
            total_dose,
        }
    } else if code.starts_with('M') {
        Application::Metabolic {
            target: TargetArea {
                code: area,
                side: source.target_side.clone(),
            },
            kind: variant(code, "M", &["SIRT", "PRRT"]).map(str::to_string),
        }
    } else if code == DEFAULT_APPLICATION_TYPE {
        Application::Other {
            target: TargetArea {
                code: area,
                side: source.target_side.clone(),
            },
            single_dose,
            total_dose,
        }
    } else {
        warn!(code, "unexpected radiation type, application is not mapped");
        return None;
    };
    Some(application)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: Option<&str>, side: Option<&str>) -> SourceIrradiation {
        SourceIrradiation {
            target_area: Some("1.1".to_string()),
            target_side: side.map(str::to_string),
            application_type: code.map(str::to_string),
            total_dose: Some(SourceDose {
                dose: Some("60".to_string()),
                unit: Some("Gy".to_string()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn percutaneous_radiochemo() {
        let Some(Application::Percutaneous {
            target, radiochemo, total_dose, ..
        }) = map_application(&course(Some("PRCJ"), None))
        else {
            panic!("expected percutaneous application");
        };
        assert_eq!(radiochemo.as_deref(), Some("RCJ"));
        assert_eq!(target.side.as_deref(), Some("U"));
        assert_eq!(total_dose.and_then(|dose| dose.dose).as_deref(), Some("60"));
    }

    #[test]
    fn interstitial_is_contact_with_kind() {
        let Some(Application::Contact {
            kind, rate_type, target, ..
        }) = map_application(&course(Some("IHDR"), Some("L")))
        else {
            panic!("expected contact application");
        };
        assert_eq!(kind.as_deref(), Some("I"));
        assert_eq!(rate_type.as_deref(), Some("HDR"));
        assert_eq!(target.side.as_deref(), Some("L"));
    }

    #[test]
    fn bare_contact_family_has_no_kind() {
        for code in ["K", "I"] {
            let Some(Application::Contact {
                kind, rate_type, target, ..
            }) = map_application(&course(Some(code), None))
            else {
                panic!("expected contact application for {code}");
            };
            assert_eq!(kind, None, "code {code}");
            assert_eq!(rate_type, None, "code {code}");
            assert_eq!(target.side.as_deref(), Some("U"));
        }
    }

    #[test]
    fn metabolic_keeps_side_unset() {
        let Some(Application::Metabolic { kind, target }) =
            map_application(&course(Some("MSIRT"), None))
        else {
            panic!("expected metabolic application");
        };
        assert_eq!(kind.as_deref(), Some("SIRT"));
        assert_eq!(target.side, None);
    }

    #[test]
    fn missing_type_defaults_to_other() {
        let application = map_application(&course(None, None)).expect("application");
        assert_eq!(application.element_name(), "Sonstige");
        assert_eq!(application.target().side, None);
    }

    #[test]
    fn unknown_variant_keeps_family() {
        let Some(Application::Percutaneous { radiochemo, .. }) =
            map_application(&course(Some("PXYZ"), Some("R")))
        else {
            panic!("expected percutaneous application");
        };
        assert_eq!(radiochemo, None);
    }

    #[test]
    fn unexpected_type_has_no_application() {
        assert_eq!(map_application(&course(Some("X"), None)), None);
    }
}
