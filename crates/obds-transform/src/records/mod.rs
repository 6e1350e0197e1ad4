//! Mappers for the clinical sub-records of a message.
//!
//! Each mapper converts one source sub-record into its oBDS v3 counterpart.
//! They never decide whether a message survives; that is left to
//! [`crate::message`].

mod additional;
mod death;
mod diagnosis;
mod follow_up;
mod operation;
mod pathology;
mod prostate;
mod radiotherapy;
mod shared;
mod side_effects;
mod systemic;
mod tumor_board;

pub use additional::{map_additional_item, map_additional_items};
pub use death::map_death;
pub use diagnosis::map_diagnosis;
pub use follow_up::map_follow_up;
pub use operation::map_operation;
pub use pathology::{
    PATHOLOGY_REPORTING_REASON, is_pathology_report, is_submitter_item, map_pathology,
    map_submitter,
};
pub use prostate::map_prostate_module;
pub use radiotherapy::{map_application, map_radiotherapy};
pub use shared::{
    map_further_classification, map_histology, map_metastasis, map_prior_tumor, map_tnm,
};
pub use side_effects::map_side_effects;
pub use systemic::map_systemic_therapy;
pub use tumor_board::map_tumor_board;
