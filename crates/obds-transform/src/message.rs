//! Expansion of one ADT_GEKID message into oBDS v3 messages.
//!
//! An ADT_GEKID message may carry a diagnosis together with any number of
//! operations, radiotherapies, systemic therapies, tumor boards and
//! follow-ups. oBDS v3 allows exactly one clinical payload per message, so
//! each sub-record becomes a message of its own sharing the envelope of the
//! source message.
//!
//! Every target message needs a tumor identifier. Messages that have none
//! after the repair pass are dropped or fail the conversion depending on
//! [`MapperOptions::ignores_unmappable_messages`].

use obds_model::{
    Icd, Message, Payload, SourceDiagnosis, SourceMessage, SourceTumorAssignment,
    TumorAssignment,
};
use tracing::{debug, info_span};

use crate::classify::{laterality_or_unknown, own_service};
use crate::date::map_date_precise;
use crate::error::{Result, TUMOR_ASSIGNMENT_MISSING, TUMOR_ID_MISSING, TransformError};
use crate::identifier::{TumorIdSource, resolve_tumor_id};
use crate::options::MapperOptions;
use crate::policy::{drop_unmappable, filter_unmappable};
use crate::records::{
    is_pathology_report, is_submitter_item, map_additional_items, map_death, map_diagnosis,
    map_follow_up, map_operation, map_pathology, map_radiotherapy, map_systemic_therapy,
    map_tumor_board,
};

/// Suffix of the message ID of the death message.
pub const DEATH_MESSAGE_SUFFIX: &str = "__D";

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|value| value.trim()).filter(|value| !value.is_empty())
}

/// ID of a message derived from a sub-record. A sub-record without its own
/// ID is identified by its 1-based position.
fn sub_message_id(message_id: &str, sub_id: Option<&String>, position: usize) -> String {
    match non_blank(sub_id) {
        Some(sub_id) => format!("{message_id}_{sub_id}"),
        None => format!("{message_id}_{position}"),
    }
}

/// Whether the diagnosis carries enough to stand in for a missing tumor
/// assignment.
fn has_coded_diagnosis(diagnosis: Option<&SourceDiagnosis>) -> bool {
    diagnosis.is_some_and(|diagnosis| {
        non_blank(diagnosis.icd_code.as_ref()).is_some()
            && non_blank(diagnosis.icd_version.as_ref()).is_some()
    })
}

/// Converts source messages under a fixed set of options.
#[derive(Debug, Clone, Copy)]
pub struct MessageTransformer<'a> {
    options: &'a MapperOptions,
}

impl<'a> MessageTransformer<'a> {
    pub fn new(options: &'a MapperOptions) -> Self {
        Self { options }
    }

    /// Convert one source message into zero or more target messages.
    ///
    /// Fails with [`TransformError::MalformedInput`] on a blank message ID
    /// and with [`TransformError::UnmappableItem`] when the message cannot
    /// be assigned to a tumor and unmappable messages are not ignored.
    pub fn transform(&self, source: &SourceMessage) -> Result<Vec<Message>> {
        let message_id = non_blank(source.message_id.as_ref())
            .ok_or_else(|| TransformError::malformed("message ID (Meldung_ID) missing"))?;
        let _span = info_span!("message", message_id).entered();

        if source.tumor_assignment.is_none() && !has_coded_diagnosis(source.diagnosis.as_ref()) {
            return Err(TransformError::unmappable(TUMOR_ASSIGNMENT_MISSING));
        }

        let envelope = self.envelope(source, message_id)?;
        let ignore = self.options.ignores_unmappable_messages();

        let candidates = filter_unmappable(
            self.candidates(source, message_id, &envelope),
            ignore,
            "message",
        )?;

        let mut messages = Vec::with_capacity(candidates.len());
        for mut message in candidates {
            if message.tumor_assignment.is_none()
                && let Some(diagnosis) = source.diagnosis.as_ref()
                && let Some(assignment) =
                    drop_unmappable(self.repair(diagnosis, message_id), ignore, "message")?
            {
                debug!(
                    message_id = %message.message_id,
                    "tumor assignment derived from diagnosis"
                );
                message.tumor_assignment = Some(assignment);
            }
            messages.push(message);
        }

        filter_unmappable(
            messages.into_iter().map(|message| {
                if message.has_tumor_id() {
                    Ok(message)
                } else {
                    Err(TransformError::unmappable(TUMOR_ID_MISSING))
                }
            }),
            ignore,
            "message",
        )
    }

    /// Fields shared by every message derived from `source`. The payload is a
    /// placeholder that each candidate replaces.
    fn envelope(&self, source: &SourceMessage, message_id: &str) -> Result<Message> {
        let tumor_assignment = source
            .tumor_assignment
            .as_ref()
            .map(|assignment| self.assignment(assignment, message_id))
            .transpose()?;

        Ok(Message {
            message_id: message_id.to_string(),
            reporter_id: source.reporter_id.clone(),
            reporting_basis: source.reporting_basis.clone(),
            own_service: own_service(source.reporter_id.as_deref()),
            tumor_assignment,
            payload: Payload::Death(Default::default()),
            additional_items: Vec::new(),
            remark: source.remark.clone(),
        })
    }

    fn assignment(
        &self,
        source: &SourceTumorAssignment,
        message_id: &str,
    ) -> Result<TumorAssignment> {
        let tumor_id = resolve_tumor_id(
            TumorIdSource {
                existing: non_blank(source.tumor_id.as_ref()),
                diagnosis_date: source.diagnosis_date.as_deref(),
                icd_code: source.icd_code.as_deref(),
                message_id: Some(message_id),
            },
            self.options.fix_missing_id,
        )?;
        Ok(TumorAssignment {
            tumor_id,
            icd: Icd {
                code: source.icd_code.clone(),
                version: source.icd_version.clone(),
            },
            diagnosis_date: source.diagnosis_date.as_deref().and_then(map_date_precise),
            laterality: Some(laterality_or_unknown(source.laterality.as_deref())),
        })
    }

    /// Tumor assignment taken from the diagnosis of the message. Requires
    /// diagnosis date, ICD code and ICD version.
    fn repair(&self, diagnosis: &SourceDiagnosis, message_id: &str) -> Result<TumorAssignment> {
        let (Some(date), Some(code), Some(_)) = (
            non_blank(diagnosis.diagnosis_date.as_ref()),
            non_blank(diagnosis.icd_code.as_ref()),
            non_blank(diagnosis.icd_version.as_ref()),
        ) else {
            return Err(TransformError::unmappable(TUMOR_ASSIGNMENT_MISSING));
        };

        let tumor_id = resolve_tumor_id(
            TumorIdSource {
                existing: non_blank(diagnosis.tumor_id.as_ref()),
                diagnosis_date: Some(date),
                icd_code: Some(code),
                message_id: Some(message_id),
            },
            self.options.fix_missing_id,
        )?;
        Ok(TumorAssignment {
            tumor_id,
            icd: Icd {
                code: diagnosis.icd_code.clone(),
                version: diagnosis.icd_version.clone(),
            },
            diagnosis_date: map_date_precise(date),
            laterality: diagnosis.laterality.clone(),
        })
    }

    /// One candidate per clinical sub-record, in the order diagnosis or
    /// pathology, operations, radiotherapies, systemic therapies, tumor
    /// boards, follow-ups and death.
    fn candidates(
        &self,
        source: &SourceMessage,
        message_id: &str,
        envelope: &Message,
    ) -> Vec<Result<Message>> {
        let reason = source.reporting_reason.as_deref();
        let derive = |id: String, payload: Payload| Message {
            message_id: id,
            payload,
            ..envelope.clone()
        };
        let mut candidates = Vec::new();

        match source.diagnosis.as_ref() {
            Some(diagnosis) => candidates.push(map_diagnosis(diagnosis).map(|diagnosis| {
                let (payload, additional_items) = if is_pathology_report(reason) {
                    (
                        Payload::Pathology(map_pathology(diagnosis, &source.additional_items)),
                        map_additional_items(&source.additional_items, |item| {
                            !is_submitter_item(item)
                        }),
                    )
                } else {
                    (
                        Payload::Diagnosis(diagnosis),
                        map_additional_items(&source.additional_items, |_| true),
                    )
                };
                Message {
                    additional_items,
                    ..derive(message_id.to_string(), payload)
                }
            })),
            None if !source.additional_items.is_empty() => {
                debug!(
                    count = source.additional_items.len(),
                    "additional items without diagnosis are not mapped"
                );
            }
            None => {}
        }

        for (index, operation) in source.operations.iter().enumerate() {
            candidates.push(Ok(derive(
                sub_message_id(message_id, operation.id.as_ref(), index + 1),
                Payload::Operation(map_operation(operation)),
            )));
        }

        for (index, radiotherapy) in source.radiotherapies.iter().enumerate() {
            candidates.push(Ok(derive(
                sub_message_id(message_id, radiotherapy.id.as_ref(), index + 1),
                Payload::Radiotherapy(map_radiotherapy(radiotherapy, reason)),
            )));
        }

        for (index, therapy) in source.systemic_therapies.iter().enumerate() {
            let id = sub_message_id(message_id, therapy.id.as_ref(), index + 1);
            candidates.push(
                map_systemic_therapy(therapy, reason)
                    .map(|therapy| derive(id, Payload::SystemicTherapy(therapy))),
            );
        }

        for (index, board) in source.tumor_boards.iter().enumerate() {
            candidates.push(Ok(Message {
                remark: board.remark.clone(),
                ..derive(
                    sub_message_id(message_id, board.id.as_ref(), index + 1),
                    Payload::TumorBoard(map_tumor_board(board, reason)),
                )
            }));
        }

        for (index, follow_up) in source.follow_ups.iter().enumerate() {
            if follow_up.death.is_some() {
                continue;
            }
            candidates.push(Ok(derive(
                sub_message_id(message_id, follow_up.id.as_ref(), index + 1),
                Payload::FollowUp(map_follow_up(follow_up, reason)),
            )));
        }

        if let Some(death) = map_death(&source.follow_ups) {
            candidates.push(Ok(derive(
                format!("{message_id}{DEATH_MESSAGE_SUFFIX}"),
                Payload::Death(death),
            )));
        }

        candidates
    }
}
