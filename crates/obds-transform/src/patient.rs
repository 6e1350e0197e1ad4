//! Patient level conversion.

use chrono::NaiveDate;
use obds_model::{MasterData, Patient, SourceMasterData, SourcePatient};
use tracing::info_span;

use crate::classify::{classify_insurance, classify_sex, select_address};
use crate::date::map_date;
use crate::error::{Result, TransformError};
use crate::message::MessageTransformer;
use crate::options::MapperOptions;
use crate::policy::filter_unmappable;

/// Converts patients. `today` is the reference day for address validity.
#[derive(Debug, Clone, Copy)]
pub struct PatientTransformer<'a> {
    options: &'a MapperOptions,
    today: NaiveDate,
}

impl<'a> PatientTransformer<'a> {
    pub fn new(options: &'a MapperOptions, today: NaiveDate) -> Self {
        Self { options, today }
    }

    /// Convert a patient with all of its messages flattened into one list.
    ///
    /// Unmappable messages are dropped according to the message policy. An
    /// unmappable master data record fails the patient.
    pub fn transform(&self, source: &SourcePatient) -> Result<Patient> {
        let patient_id = source.master_data.patient_id.clone();
        let _span = info_span!("patient", patient_id = patient_id.as_deref().unwrap_or_default())
            .entered();

        let master_data = self.master_data(&source.master_data)?;
        let transformer = MessageTransformer::new(self.options);
        let messages = filter_unmappable(
            source
                .messages
                .iter()
                .map(|message| transformer.transform(message)),
            self.options.ignores_unmappable_messages(),
            "message",
        )?
        .into_iter()
        .flatten()
        .collect();

        Ok(Patient {
            patient_id,
            remark: source.remark.clone(),
            master_data,
            messages,
        })
    }

    fn master_data(&self, source: &SourceMasterData) -> Result<MasterData> {
        let birth_date = source
            .birth_date
            .as_deref()
            .and_then(map_date)
            .ok_or_else(|| TransformError::unmappable("birth date missing or unmappable"))?;

        Ok(MasterData {
            insurance: classify_insurance(
                source.payer_number.as_deref(),
                source.member_number.as_deref(),
            )?,
            last_name: source.last_name.clone(),
            first_names: source.first_names.clone(),
            birth_name: source.birth_name.clone(),
            title: source.title.clone(),
            name_suffix: source.name_suffix.clone(),
            previous_names: source.previous_names.clone(),
            sex: classify_sex(source.sex.as_deref()),
            birth_date,
            address: select_address(source.addresses.as_deref(), self.today),
        })
    }
}
