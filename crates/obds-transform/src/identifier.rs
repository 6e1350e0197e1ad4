//! Tumor identifier resolution.
//!
//! oBDS v3 requires a `Tumor_ID` on every message. When the source lacks one
//! and [`MapperOptions::fix_missing_id`](crate::MapperOptions) is enabled, an
//! identifier is derived from diagnosis date, ICD code and message ID so that
//! independent consumers computing the same digest arrive at the same value.

use sha1::{Digest, Sha1};

use crate::error::{Result, TransformError, TUMOR_ID_MISSING};

/// Prefix of every derived tumor identifier.
pub const TUMOR_ID_PREFIX: &str = "TID_";

/// Number of hex characters of the digest kept after the prefix.
pub const TUMOR_ID_DIGEST_LEN: usize = 16;

/// Inputs of the tumor identifier resolution. All values are the raw source
/// strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TumorIdSource<'a> {
    pub existing: Option<&'a str>,
    pub diagnosis_date: Option<&'a str>,
    pub icd_code: Option<&'a str>,
    pub message_id: Option<&'a str>,
}

/// Derive `TID_` followed by the first 16 hex characters of
/// `sha1("{date}_{code}_{message_id}")`.
pub fn synthesize_tumor_id(diagnosis_date: &str, icd_code: &str, message_id: &str) -> String {
    let digest = Sha1::digest(format!("{diagnosis_date}_{icd_code}_{message_id}").as_bytes());
    let hex = hex::encode(digest);
    format!("{TUMOR_ID_PREFIX}{}", &hex[..TUMOR_ID_DIGEST_LEN])
}

/// Resolve the tumor identifier.
///
/// An existing identifier is kept verbatim. An absent one is derived when
/// `fix_missing_id` is set and date, code and message ID are all present.
/// Anything else is unmappable.
pub fn resolve_tumor_id(source: TumorIdSource<'_>, fix_missing_id: bool) -> Result<String> {
    if fix_missing_id
        && source.existing.is_none()
        && let (Some(date), Some(code), Some(message_id)) =
            (source.diagnosis_date, source.icd_code, source.message_id)
    {
        return Ok(synthesize_tumor_id(date, code, message_id));
    }
    match source.existing {
        Some(id) => Ok(id.to_string()),
        None => Err(TransformError::unmappable(TUMOR_ID_MISSING)),
    }
}
