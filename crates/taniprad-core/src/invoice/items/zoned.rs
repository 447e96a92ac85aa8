//! Tauron line-item extraction from multi-line first cells.
//!
//! The Tauron layout lists supply items first, then a "Razem za sprzedaż"
//! marker row, then distribution items, then "Razem za dystrybucję". The
//! first cell of a data row can hold several physical lines: name-only
//! header lines and data lines carrying at least three decimal-comma tokens
//! (quantity, net value, gross value) - the second token is the net amount.
//! Data lines that open with a bare tariff-zone qualifier inherit the name
//! of the preceding header line.

use rust_decimal::Decimal;
use tracing::debug;

use crate::invoice::rules::numbers::{comma_token_strs, parse_amount};
use crate::invoice::rules::patterns::ITEM_NAME_PREFIX;
use crate::invoice::rules::is_sum_row;
use crate::models::document::Table;
use crate::models::invoice::{ItemCategory, LineItem};

use super::{cell_text, new_item, sections};

const SUPPLY_TOTAL_MARKER: &str = "razem za sprzedaż";
const DISTRIBUTION_TOTAL_MARKER: &str = "razem za dystrybucję";

/// Bare qualifiers that open a zone data line without repeating the name.
const ZONE_QUALIFIERS: [&str; 5] = [
    "dzienna",
    "nocna",
    "szczytowa",
    "pozaszczytowa",
    "całodobowa",
];

/// Table pass first; the flat-text section scanner is the fallback when the
/// tables yield nothing.
pub fn extract(tables: &[Table], text: &str) -> Vec<LineItem> {
    let items = extract_from_tables(tables);
    if !items.is_empty() {
        return items;
    }
    debug!("zoned table pass empty, falling back to section scan");
    sections::extract_from_text(text)
}

fn extract_from_tables(tables: &[Table]) -> Vec<LineItem> {
    let mut items = Vec::new();

    for table in tables {
        let mut section = ItemCategory::Supply;
        let mut current_name: Option<String> = None;

        'rows: for row in table {
            let first = cell_text(row, 0);
            if first.is_empty() {
                continue;
            }
            let lower = first.to_lowercase();

            if lower.contains(SUPPLY_TOTAL_MARKER) {
                section = ItemCategory::Distribution;
                current_name = None;
                continue;
            }
            if lower.contains(DISTRIBUTION_TOTAL_MARKER) {
                break 'rows;
            }

            for physical in first.split('\n') {
                let physical = physical.trim();
                if physical.is_empty() || is_sum_row(physical) {
                    continue;
                }

                let commas = comma_token_strs(physical);
                if commas.is_empty() && !physical.chars().any(|c| c.is_ascii_digit()) {
                    // name-only header line
                    current_name = Some(physical.to_string());
                    continue;
                }
                if commas.len() < 3 {
                    continue;
                }

                let Some(net) = parse_amount(commas[1]) else {
                    continue;
                };
                if net <= Decimal::ZERO {
                    continue;
                }

                let name = if starts_with_zone_qualifier(physical) {
                    current_name.clone()
                } else {
                    let fragment = ITEM_NAME_PREFIX
                        .captures(physical)
                        .map(|caps| caps[1].trim().to_string())
                        .filter(|name| !name.is_empty());
                    if let Some(fragment) = &fragment {
                        current_name = Some(fragment.clone());
                    }
                    fragment.or_else(|| current_name.clone())
                };

                let Some(name) = name else { continue };
                items.push(new_item(&name, net, section));
            }
        }
    }

    items
}

fn starts_with_zone_qualifier(line: &str) -> bool {
    let lower = line.to_lowercase();
    ZONE_QUALIFIERS.iter().any(|q| lower.starts_with(q))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn cell(text: &str) -> Vec<Option<String>> {
        vec![Some(text.to_string())]
    }

    fn tauron_table() -> Table {
        vec![
            cell("Energia czynna\ndzienna 220,000 92,40 113,65\nnocna 80,000 33,60 41,33"),
            cell("Razem za sprzedaż energii 126,00"),
            cell("Opłata sieciowa zmienna\ncałodobowa 300,000 72,00 88,56\nOpłata mocowa 1,000 12,00 14,76"),
            cell("Razem za dystrybucję 84,00"),
        ]
    }

    #[test]
    fn test_zone_lines_inherit_header_name() {
        let items = extract_from_tables(&[tauron_table()]);

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].name, "Energia czynna");
        assert_eq!(items[0].net_amount, dec("92.40"));
        assert_eq!(items[0].category, ItemCategory::Supply);
        assert_eq!(items[1].name, "Energia czynna");
        assert_eq!(items[1].net_amount, dec("33.60"));
    }

    #[test]
    fn test_marker_rows_flip_section() {
        let items = extract_from_tables(&[tauron_table()]);

        assert_eq!(items[2].name, "Opłata sieciowa zmienna");
        assert_eq!(items[2].net_amount, dec("72.00"));
        assert_eq!(items[2].category, ItemCategory::Distribution);

        // a data line with its own name fragment does not inherit
        assert_eq!(items[3].name, "Opłata mocowa");
        assert_eq!(items[3].net_amount, dec("12.00"));
        assert_eq!(items[3].category, ItemCategory::Distribution);
    }

    #[test]
    fn test_falls_back_to_section_scan() {
        let text = "Sprzedaż energii elektrycznej\n\
                    Energia czynna 300 0,4500 135,00 23 31,05 166,05";
        let items = extract(&[], text);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Energia czynna");
    }
}
