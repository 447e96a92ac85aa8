//! PGE/Lumi line-item extraction from packed table cells.
//!
//! The shared PGE layout packs several line items into a single table cell,
//! one per physical line, with the matching net amounts packed the same way
//! in the net-value column. Both cells are split on line breaks and paired
//! positionally. Results are aggregated by canonical name across the whole
//! document, which merges multi-tariff-zone rows into one item.

use rust_decimal::Decimal;
use tracing::debug;

use crate::invoice::normalize;
use crate::invoice::rules::{is_sum_row, parse_amount};
use crate::models::document::{Table, TableCell};
use crate::models::invoice::LineItem;

use super::find_column;

/// Sub-header lines inside a description cell; they name a tariff zone or
/// grouping, not a billable item.
const SUBHEADER_MARKERS: [&str; 2] = ["strefa", "w tym"];

pub fn extract(tables: &[Table]) -> Vec<LineItem> {
    // (canonical name, summed amount) in first-seen order
    let mut aggregated: Vec<(String, Decimal)> = Vec::new();

    for table in tables {
        let Some(header_idx) = table.iter().position(|row| {
            find_column(row, &["opis"]).is_some() && find_column(row, &["netto"]).is_some()
        }) else {
            continue;
        };

        let header = &table[header_idx];
        let desc_col = find_column(header, &["opis"]).unwrap_or(0);
        let net_col = match find_column(header, &["netto"]) {
            Some(col) => col,
            None => continue,
        };

        for row in &table[header_idx + 1..] {
            // cells stay untrimmed: a leading empty line keeps its slot in
            // the positional pairing
            let desc_cell = raw_cell(row, desc_col);
            if desc_cell.trim().is_empty() {
                continue;
            }
            let net_cell = raw_cell(row, net_col);

            // lock-step pairing of packed physical lines
            for (name, net_raw) in desc_cell.split('\n').zip(net_cell.split('\n')) {
                let name = name.trim();
                if name.is_empty() || is_subheader(name) || is_sum_row(name) {
                    continue;
                }
                let Some(net) = parse_amount(net_raw) else {
                    continue;
                };
                if net <= Decimal::ZERO {
                    continue;
                }

                let canonical = normalize::canonical_name(name);
                match aggregated.iter_mut().find(|(n, _)| *n == canonical) {
                    Some(slot) => slot.1 += net,
                    None => aggregated.push((canonical, net)),
                }
            }
        }
    }

    debug!(count = aggregated.len(), "packed-cell items aggregated");

    aggregated
        .into_iter()
        .map(|(name, net)| {
            let category = normalize::categorize(&name);
            LineItem::new(name, net, category)
        })
        .collect()
}

fn raw_cell<'a>(row: &'a [TableCell], column: usize) -> &'a str {
    row.get(column)
        .and_then(|cell| cell.as_deref())
        .unwrap_or_default()
}

fn is_subheader(name: &str) -> bool {
    let lower = name.to_lowercase();
    SUBHEADER_MARKERS.iter().any(|m| lower.starts_with(m))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use crate::models::invoice::ItemCategory;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn pge_table() -> Table {
        vec![
            vec![
                Some("Opis opłaty".to_string()),
                Some("Ilość".to_string()),
                Some("Wartość netto [zł]".to_string()),
            ],
            vec![
                Some("Energia czynna strefa I\nEnergia czynna strefa II\nOpłata handlowa".to_string()),
                Some("523\n301\n1".to_string()),
                Some("98,50\n45,20\n9,90".to_string()),
            ],
            vec![
                Some("Strefa pozaszczytowa\nOpłata mocowa".to_string()),
                Some("\n1".to_string()),
                Some("0,00\n12,00".to_string()),
            ],
            vec![
                Some("Razem".to_string()),
                None,
                Some("165,60".to_string()),
            ],
        ]
    }

    #[test]
    fn test_lock_step_pairing_and_aggregation() {
        let items = extract(&[pge_table()]);

        assert_eq!(items.len(), 3);

        // both zone rows merged into one canonical item
        assert_eq!(items[0].name, "Energia czynna");
        assert_eq!(items[0].net_amount, dec("143.70"));
        assert_eq!(items[0].category, ItemCategory::Supply);

        assert_eq!(items[1].name, "Opłata handlowa");
        assert_eq!(items[1].net_amount, dec("9.90"));

        assert_eq!(items[2].name, "Opłata mocowa");
        assert_eq!(items[2].net_amount, dec("12.00"));
        assert_eq!(items[2].category, ItemCategory::Distribution);
    }

    #[test]
    fn test_subheader_and_sum_rows_skipped() {
        let items = extract(&[pge_table()]);
        assert!(items.iter().all(|i| i.name != "Strefa pozaszczytowa"));
        assert!(items.iter().all(|i| i.name != "Razem"));
    }

    #[test]
    fn test_no_matching_header_yields_nothing() {
        let table = vec![vec![Some("Lp.".to_string()), Some("Kwota".to_string())]];
        assert!(extract(&[table]).is_empty());
    }
}
