//! `Zusatzitem`

use obds_model::{AdditionalItem, SourceAdditionalItem};

use crate::date::map_date;

fn trimmed(value: Option<&String>) -> Option<String> {
    value.map(|value| value.trim().to_string())
}

pub fn map_additional_item(source: &SourceAdditionalItem) -> AdditionalItem {
    AdditionalItem {
        category: trimmed(source.category.as_ref()),
        date: source.date.as_deref().and_then(map_date),
        value: trimmed(source.value.as_ref()),
        remark: trimmed(source.remark.as_ref()),
    }
}

/// Map every item accepted by `keep`.
pub fn map_additional_items<F>(sources: &[SourceAdditionalItem], keep: F) -> Vec<AdditionalItem>
where
    F: Fn(&SourceAdditionalItem) -> bool,
{
    sources
        .iter()
        .filter(|item| keep(item))
        .map(map_additional_item)
        .collect()
}
