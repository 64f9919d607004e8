//! Shortfall report derived from the cached items

use crate::cache::ItemCache;
use crate::item::ItemId;

/// One line of the report
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub id: ItemId,
    pub name: String,
    /// `desired - actual`; negative when overstocked
    pub needed: i64,
}

/// Report rows in cache order. Not persisted; recomputed on every render.
pub fn report_rows(cache: &ItemCache) -> Vec<ReportRow> {
    cache
        .items()
        .iter()
        .map(|item| ReportRow {
            id: item.id,
            name: item.name.clone(),
            needed: item.needed(),
        })
        .collect()
}

/// Sum of positive shortfalls, i.e. units to order
pub fn total_shortfall(rows: &[ReportRow]) -> i64 {
    rows.iter().map(|row| row.needed.max(0)).sum()
}
