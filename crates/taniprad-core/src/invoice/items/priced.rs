//! Enea line-item extraction from flat text.
//!
//! The Enea tables come out unusable, so items are read from the text. Two
//! exact headings open the sections. Inside a section, a line without
//! digits becomes the current sub-name; a data line starts with a unit
//! literal and alternates quantity/price/amount tokens, where unit prices
//! carry four decimals and net amounts two - the last two-decimal token is
//! the amount, attributed to the current sub-name. Zero-valued entries are
//! dropped, not reported.

use rust_decimal::Decimal;
use tracing::debug;

use crate::invoice::rules::is_sum_row;
use crate::invoice::rules::numbers::{comma_fraction_digits, parse_amount};
use crate::invoice::rules::patterns::COMMA_NUMBER;
use crate::models::document::Table;
use crate::models::invoice::{ItemCategory, LineItem};

use super::new_item;

const SUPPLY_HEADING: &str = "Sprzedaż energii elektrycznej";
const DISTRIBUTION_HEADING: &str = "Usługa dystrybucji";

/// Units that open a data line.
const UNIT_LITERALS: [&str; 5] = ["kWh", "MWh", "zł/mc", "mc", "szt."];

/// The tables parameter keeps the strategy signature uniform; this variant
/// reads the flat text only.
pub fn extract(_tables: &[Table], text: &str) -> Vec<LineItem> {
    let mut items = Vec::new();
    let mut section: Option<ItemCategory> = None;
    let mut current_name: Option<String> = None;

    for line in text.lines().map(str::trim) {
        if line == SUPPLY_HEADING {
            section = Some(ItemCategory::Supply);
            current_name = None;
            continue;
        }
        if line == DISTRIBUTION_HEADING {
            section = Some(ItemCategory::Distribution);
            current_name = None;
            continue;
        }

        let Some(category) = section else { continue };
        if line.is_empty() {
            continue;
        }
        if is_sum_row(line) {
            section = None;
            continue;
        }

        if !line.chars().any(|c| c.is_ascii_digit()) {
            current_name = Some(line.to_string());
            continue;
        }

        if !starts_with_unit_literal(line) {
            continue;
        }

        // the last two-decimal token on the line is the net amount;
        // four-decimal tokens are unit prices
        let mut amount: Option<Decimal> = None;
        for m in COMMA_NUMBER.find_iter(line) {
            if comma_fraction_digits(m.as_str()) == 2 {
                amount = parse_amount(m.as_str());
            }
        }

        let Some(net) = amount else { continue };
        if net <= Decimal::ZERO {
            continue;
        }
        let Some(name) = current_name.as_deref() else {
            continue;
        };

        items.push(new_item(name, net, category));
    }

    debug!(count = items.len(), "priced-line items");
    items
}

fn starts_with_unit_literal(line: &str) -> bool {
    UNIT_LITERALS.iter().any(|u| line.starts_with(u))
}
