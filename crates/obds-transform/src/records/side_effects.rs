//! Side effects (`Nebenwirkungen`) of radiotherapy and systemic therapy.
//!
//! oBDS v3 either reports a single "at most grade 2 or unknown" value (`K` or
//! `U`) or an itemized list. ADT_GEKID mixes both in one list.

use obds_model::{SideEffect, SideEffects, SourceSideEffect};
use tracing::warn;

/// Default for a missing side-effect category or version.
pub const OTHER: &str = "Sonstige";

fn is_capped_or_unknown(grade: Option<&str>) -> bool {
    matches!(grade.map(str::trim), Some("K" | "U"))
}

/// Collapse the source entries. `therapy` names the owning therapy for log
/// output (`ST` or `SYST`).
pub fn map_side_effects(entries: &[SourceSideEffect], therapy: &str) -> Option<SideEffects> {
    if entries.is_empty() {
        return None;
    }

    let mut itemized = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(grade) = entry
            .grade
            .as_deref()
            .filter(|grade| is_capped_or_unknown(Some(grade)))
        {
            if entries.len() > 1 {
                warn!(
                    therapy,
                    "multiple side effects, but only one is allowed with grade 'K' or 'U'"
                );
            }
            if entry.category.is_some() {
                warn!(
                    therapy,
                    "side effect grade is 'K' or 'U' but a category is set; the category is lost"
                );
            }
            return Some(SideEffects::MaxGradeTwoOrUnknown(grade.trim().to_string()));
        }

        let category = match &entry.category {
            Some(category) => category.clone(),
            None => {
                warn!(therapy, "side effect category is unset, defaulting to '{OTHER}'");
                OTHER.to_string()
            }
        };
        itemized.push(SideEffect {
            category,
            version: entry.version.clone().unwrap_or_else(|| OTHER.to_string()),
            grade: entry.grade.clone(),
        });
    }
    Some(SideEffects::Itemized(itemized))
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn with_logs<T>(run: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        let result = tracing::subscriber::with_default(subscriber, run);
        let output = String::from_utf8_lossy(&logs.0.lock().expect("log buffer")).into_owned();
        (result, output)
    }

    fn entry(grade: &str, category: Option<&str>) -> SourceSideEffect {
        SourceSideEffect {
            grade: Some(grade.to_string()),
            category: category.map(str::to_string),
            version: None,
        }
    }

    #[test]
    fn capped_grade_collapses_list() {
        let entries = vec![entry("3", Some("10017955")), entry("K", None)];
        assert_eq!(
            map_side_effects(&entries, "ST"),
            Some(SideEffects::MaxGradeTwoOrUnknown("K".to_string()))
        );
    }

    #[test]
    fn collapsing_logs_lost_entries() {
        let entries = vec![entry("U", Some("10017955")), entry("3", Some("10028813"))];
        let (mapped, logs) = with_logs(|| map_side_effects(&entries, "SYST"));
        assert_eq!(
            mapped,
            Some(SideEffects::MaxGradeTwoOrUnknown("U".to_string()))
        );
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("only one is allowed with grade 'K' or 'U'"), "{logs}");
        assert!(logs.contains("the category is lost"), "{logs}");
    }

    #[test]
    fn single_capped_entry_logs_nothing() {
        let (mapped, logs) = with_logs(|| map_side_effects(&[entry("K", None)], "ST"));
        assert_eq!(
            mapped,
            Some(SideEffects::MaxGradeTwoOrUnknown("K".to_string()))
        );
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn itemized_entries_get_defaults() {
        let entries = vec![entry("3", None)];
        let Some(SideEffects::Itemized(items)) = map_side_effects(&entries, "SYST") else {
            panic!("expected itemized side effects");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, OTHER);
        assert_eq!(items[0].version, OTHER);
        assert_eq!(items[0].grade.as_deref(), Some("3"));
    }

    #[test]
    fn empty_list_maps_to_nothing() {
        assert_eq!(map_side_effects(&[], "ST"), None);
    }
}
