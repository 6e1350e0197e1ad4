//! Document level conversion.

use chrono::{Local, NaiveDate};
use obds_model::{SourceDocument, TARGET_SCHEMA_VERSION, TargetDocument};
use tracing::{debug, info};

use crate::date::map_date;
use crate::error::Result;
use crate::options::MapperOptions;
use crate::parties::{map_reporter, map_sender};
use crate::patient::PatientTransformer;
use crate::policy::filter_unmappable;

/// Entry point of the conversion.
///
/// ```ignore
/// let mapper = ObdsMapper::new(MapperOptions::new().with_fix_missing_id(true));
/// let target = mapper.map(&source)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObdsMapper {
    options: MapperOptions,
}

impl ObdsMapper {
    pub fn new(options: MapperOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// Convert using the local date as reference day for address validity.
    pub fn map(&self, source: &SourceDocument) -> Result<TargetDocument> {
        self.map_on(source, Local::now().date_naive())
    }

    /// Convert with an explicit reference day.
    pub fn map_on(&self, source: &SourceDocument, today: NaiveDate) -> Result<TargetDocument> {
        let transformer = PatientTransformer::new(&self.options, today);
        let ignore_patients = self.options.ignores_unmappable_patients();

        let patients: Vec<_> = filter_unmappable(
            source
                .patients
                .iter()
                .map(|patient| transformer.transform(patient)),
            ignore_patients,
            "patient",
        )?
        .into_iter()
        .filter(|patient| {
            let keep = !ignore_patients || !patient.messages.is_empty();
            if !keep {
                debug!(
                    patient_id = patient.patient_id.as_deref().unwrap_or_default(),
                    "dropping patient without messages"
                );
            }
            keep
        })
        .collect();

        let report_date = source
            .patients
            .iter()
            .flat_map(|patient| &patient.messages)
            .filter_map(|message| message.report_date.as_deref().and_then(map_date))
            .map(|date| date.value)
            .min();

        let document = TargetDocument {
            schema_version: TARGET_SCHEMA_VERSION.to_string(),
            sender: map_sender(&source.sender),
            report_date,
            patients,
            reporters: source.reporters.iter().map(map_reporter).collect(),
        };
        info!(
            patients = document.patients.len(),
            messages = document.message_count(),
            "document converted"
        );
        Ok(document)
    }
}
