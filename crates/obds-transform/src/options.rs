//! Configuration options for a conversion run.

use serde::{Deserialize, Serialize};

/// Policy flags fixed for the duration of one conversion.
///
/// The value is passed by reference into every mapper; nothing reads policy
/// from global state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperOptions {
    /// Drop messages that cannot be represented in oBDS v3 instead of failing.
    pub ignore_unmappable_messages: bool,
    /// Drop patients that cannot be represented in oBDS v3 instead of failing.
    /// Implies [`Self::ignore_unmappable_messages`].
    pub ignore_unmappable_patients: bool,
    /// Derive a tumor identifier from diagnosis date, ICD code and message ID
    /// when the source lacks one.
    pub fix_missing_id: bool,
    /// Skip schema validation of input and output documents.
    pub disable_schema_validation: bool,
}

impl MapperOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ignore_unmappable_messages(mut self, enable: bool) -> Self {
        self.ignore_unmappable_messages = enable;
        self
    }

    #[must_use]
    pub fn with_ignore_unmappable_patients(mut self, enable: bool) -> Self {
        self.ignore_unmappable_patients = enable;
        self
    }

    #[must_use]
    pub fn with_fix_missing_id(mut self, enable: bool) -> Self {
        self.fix_missing_id = enable;
        self
    }

    #[must_use]
    pub fn with_disable_schema_validation(mut self, disable: bool) -> Self {
        self.disable_schema_validation = disable;
        self
    }

    /// Whether unmappable messages are dropped.
    pub fn ignores_unmappable_messages(&self) -> bool {
        self.ignore_unmappable_messages || self.ignore_unmappable_patients
    }

    /// Whether unmappable patients are dropped.
    pub fn ignores_unmappable_patients(&self) -> bool {
        self.ignore_unmappable_patients
    }

    pub fn validates_schema(&self) -> bool {
        !self.disable_schema_validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignoring_patients_implies_ignoring_messages() {
        let options = MapperOptions::new().with_ignore_unmappable_patients(true);
        assert!(options.ignores_unmappable_messages());
        assert!(options.ignores_unmappable_patients());

        let options = MapperOptions::new().with_ignore_unmappable_messages(true);
        assert!(options.ignores_unmappable_messages());
        assert!(!options.ignores_unmappable_patients());
    }

    #[test]
    fn defaults_are_strict() {
        let options = MapperOptions::default();
        assert!(!options.ignores_unmappable_messages());
        assert!(!options.fix_missing_id);
        assert!(options.validates_schema());
    }

    #[test]
    fn options_serialize() {
        let options = MapperOptions::new().with_fix_missing_id(true);
        let json = serde_json::to_string(&options).expect("serialize options");
        let round: MapperOptions = serde_json::from_str(&json).expect("deserialize options");
        assert_eq!(round, options);
    }
}
