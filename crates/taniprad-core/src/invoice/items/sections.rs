//! Generic line-item extraction: named text sections plus a table fallback.
//!
//! This is the E.ON layout and the universal fallback for unknown providers.
//! The net amount is picked by position from the end of the numeric tokens
//! on the line: rows that print a VAT-rate column carry six tokens
//! (quantity, price, net, rate, vat, gross) and the net sits fourth from the
//! end; shorter rows omit the rate and the net sits third from the end.
//! These offsets are empirically tuned to the layout and pinned by tests.

use rust_decimal::Decimal;
use tracing::debug;

use crate::invoice::normalize;
use crate::invoice::rules::{is_sum_row, numbers::numeric_tokens};
use crate::invoice::rules::patterns::ITEM_NAME_PREFIX;
use crate::models::document::Table;
use crate::models::invoice::{ItemCategory, LineItem};

use super::{cell_text, find_column, new_item};

const SUPPLY_SECTION: &str = "Sprzedaż energii elektrycznej";
const DISTRIBUTION_SECTION: &str = "Dystrybucja energii elektrycznej";
const COMBINED_SECTION: &str = "Sprzedaż i dystrybucja energii elektrycznej";

/// Words that open a parsable item row inside a section.
const ITEM_TRIGGERS: [&str; 2] = ["Energia czynna", "Opłata"];

/// Extract items from the text sections; fall back to the tables when the
/// text yields nothing.
pub fn extract(tables: &[Table], text: &str) -> Vec<LineItem> {
    let items = extract_from_text(text);
    if !items.is_empty() {
        return items;
    }
    extract_from_tables(tables)
}

/// Scan the two named sections of the flat text.
pub fn extract_from_text(text: &str) -> Vec<LineItem> {
    let mut items = Vec::new();
    let mut section: Option<ItemCategory> = None;

    for line in text.lines() {
        if line.contains(SUPPLY_SECTION) {
            section = Some(ItemCategory::Supply);
            continue;
        } else if line.contains(DISTRIBUTION_SECTION) {
            section = Some(ItemCategory::Distribution);
            continue;
        } else if line.contains(COMBINED_SECTION) || line.contains("Razem") {
            section = None;
            continue;
        }

        let Some(category) = section else { continue };
        if !ITEM_TRIGGERS.iter().any(|t| line.contains(t)) {
            continue;
        }
        if is_sum_row(line) {
            continue;
        }

        let numbers = numeric_tokens(line);
        let net = match numbers.len() {
            n if n >= 6 => numbers[n - 4],
            n if n >= 3 => numbers[n - 3],
            _ => continue,
        };
        if net <= Decimal::ZERO {
            continue;
        }

        let Some(caps) = ITEM_NAME_PREFIX.captures(line) else {
            continue;
        };
        let name = caps[1].trim().to_string();
        if name.is_empty() {
            continue;
        }

        items.push(new_item(&name, net, category));
    }

    debug!(count = items.len(), "section scan items");
    items
}

/// Fallback: any table with an item-description header.
pub fn extract_from_tables(tables: &[Table]) -> Vec<LineItem> {
    let mut items = Vec::new();

    for table in tables {
        let Some(header_idx) = table.iter().position(|row| {
            row.iter()
                .flatten()
                .any(|cell| cell.to_lowercase().contains("pozycja"))
        }) else {
            continue;
        };

        let header = &table[header_idx];
        let name_col = find_column(header, &["pozycja", "opis"]).unwrap_or(0);
        let net_col = find_column(header, &["netto"]);
        let gross_col = find_column(header, &["brutto"]);

        for row in &table[header_idx + 1..] {
            if row.len() < 2 {
                continue;
            }
            let name = cell_text(row, name_col);
            if name.is_empty() || is_sum_row(&name) {
                continue;
            }

            let net = match (net_col, gross_col) {
                (Some(col), _) if !cell_text(row, col).is_empty() => {
                    crate::invoice::rules::parse_amount(&cell_text(row, col))
                }
                // no net column: back out of gross at the standard rate
                (_, Some(col)) => crate::invoice::rules::parse_amount(&cell_text(row, col))
                    .map(|gross| (gross / Decimal::new(123, 2)).round_dp(2)),
                _ => None,
            };

            let Some(net) = net else { continue };
            if net <= Decimal::ZERO {
                continue;
            }

            let canonical = normalize::canonical_name(&name);
            let category = normalize::categorize(&canonical);
            items.push(LineItem::new(canonical, net, category));
        }
    }

    items
}
