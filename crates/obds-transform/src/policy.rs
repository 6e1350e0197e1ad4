//! The drop-or-fail policy applied at message, patient and document level.
//!
//! Every nesting level hands its per-item results to [`filter_unmappable`]
//! together with the ignore flag of that level. Only
//! [`TransformError::UnmappableItem`] is ever dropped; any other error is
//! returned unchanged.

use tracing::debug;

use crate::error::{Result, TransformError};

/// Keep successful items, drop unmappable ones when `ignore` is set and fail
/// on everything else.
pub fn filter_unmappable<T, I>(results: I, ignore: bool, scope: &str) -> Result<Vec<T>>
where
    I: IntoIterator<Item = Result<T>>,
{
    let mut kept = Vec::new();
    for result in results {
        if let Some(item) = drop_unmappable(result, ignore, scope)? {
            kept.push(item);
        }
    }
    Ok(kept)
}

/// Single item form of [`filter_unmappable`].
pub fn drop_unmappable<T>(result: Result<T>, ignore: bool, scope: &str) -> Result<Option<T>> {
    match result {
        Ok(item) => Ok(Some(item)),
        Err(TransformError::UnmappableItem { message }) if ignore => {
            debug!(scope, reason = %message, "dropping unmappable item");
            Ok(None)
        }
        Err(error) => Err(error),
    }
}
