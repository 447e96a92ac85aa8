//! Per-provider line-item extraction strategies.
//!
//! Every variant produces normalized, categorized [`LineItem`]s. Rows whose
//! label matches a sum keyword never become items, and non-positive or
//! unparsable amounts are silently dropped rather than treated as errors.

pub mod packed;
pub mod priced;
pub mod sections;
pub mod zoned;

use rust_decimal::Decimal;

use crate::invoice::normalize;
use crate::models::document::TableCell;
use crate::models::invoice::{ItemCategory, LineItem};

/// Build a line item from a raw label, running name normalization.
pub(crate) fn new_item(raw_name: &str, net_amount: Decimal, category: ItemCategory) -> LineItem {
    LineItem::new(normalize::canonical_name(raw_name), net_amount, category)
}

/// Text of a cell at the given column, empty when missing or null.
pub(crate) fn cell_text(row: &[TableCell], column: usize) -> String {
    row.get(column)
        .and_then(|cell| cell.as_deref())
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Find the first column whose header contains one of the keywords.
pub(crate) fn find_column(header: &[TableCell], keywords: &[&str]) -> Option<usize> {
    for (idx, cell) in header.iter().enumerate() {
        let Some(cell) = cell.as_deref() else { continue };
        let lower = cell.to_lowercase();
        if keywords.iter().any(|k| lower.contains(k)) {
            return Some(idx);
        }
    }
    None
}
