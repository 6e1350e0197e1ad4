//! Document model for the oBDS v2 to v3 converter.
//!
//! [`source`] holds the tree read from ADT_GEKID documents, [`target`] the
//! tree written as oBDS v3. Both are plain data; the conversion rules live in
//! `obds-transform`.

pub mod codes;
pub mod date;
pub mod error;
pub mod schema;
pub mod source;
pub mod target;

pub use codes::{Sex, YesNoUnknown};
pub use date::{DatePrecision, DateValue, PreciseDate, PrecisePrecision};
pub use error::{ModelError, Result};
pub use schema::{OBDS_NAMESPACE, SchemaVersion, TARGET_SCHEMA_VERSION};
pub use source::{
    SourceAdditionalItem, SourceAddress, SourceCancerShare, SourceDeath, SourceDiagnosis,
    SourceDocument, SourceDose, SourceFollowUp, SourceFurtherClassification, SourceGleasonScore,
    SourceHistology, SourceIrradiation, SourceMasterData, SourceMessage, SourceMetastasis,
    SourceOperation, SourcePatient, SourcePriorTumor, SourceProstateModule, SourceRadiotherapy,
    SourceReporter, SourceResidualStatus, SourceSender, SourceSideEffect, SourceSystemicTherapy,
    SourceTnm, SourceTumorAssignment, SourceTumorBoard,
};
pub use target::{
    AdditionalItem, Address, Application, CancerShare, Complications, Death, Diagnosis, Dose,
    FollowUp, FurtherClassification, GleasonScore, Histology, Icd, IdentNumbers, Insurance,
    Irradiation, MasterData, Message, Metastasis, Operation, Pathology, Patient, Payload,
    PriorTumor, ProstateModule, Radiotherapy, Reporter, ResidualStatus, Sender, SideEffect,
    SideEffects, Submitter, SystemicTherapy, TargetArea, TargetDocument, Tnm, TumorAssignment,
    TumorBoard,
};
