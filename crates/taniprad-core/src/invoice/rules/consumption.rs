//! Energy consumption (kWh) extraction.
//!
//! Candidates outside [`CONSUMPTION_RANGE_KWH`] are rejected and the search
//! continues; when every strategy comes up empty the value stays 0, which
//! downstream code reads as "unknown".

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::document::Table;

use super::numbers::{parse_amount, parse_kwh_thousands_aware};
use super::patterns::{KWH_ANY, KWH_ENERGIA, KWH_LABELED, KWH_RAZEM, KWH_TAURON};

/// Plausible monthly-to-yearly household/SME consumption window.
pub const CONSUMPTION_RANGE_KWH: (u32, u32) = (50, 100_000);

fn in_range(value: Decimal) -> bool {
    value >= Decimal::from(CONSUMPTION_RANGE_KWH.0)
        && value <= Decimal::from(CONSUMPTION_RANGE_KWH.1)
}

fn first_valid(
    regex: &Regex,
    text: &str,
    parse: impl Fn(&str) -> Option<Decimal>,
) -> Option<Decimal> {
    for caps in regex.captures_iter(text) {
        if let Some(value) = parse(&caps[1]) {
            if in_range(value) {
                return Some(value);
            }
            debug!(%value, "consumption candidate out of range, continuing");
        }
    }
    None
}

/// Generic labeled patterns, most specific first.
pub fn labeled(text: &str) -> Option<Decimal> {
    first_valid(&KWH_LABELED, text, parse_amount)
        .or_else(|| first_valid(&KWH_ENERGIA, text, parse_amount))
        .or_else(|| first_valid(&KWH_RAZEM, text, parse_amount))
}

/// Tauron prints readings with a dotted thousands separator ("1.234 kWh").
pub fn tauron_readings(text: &str) -> Option<Decimal> {
    first_valid(&KWH_TAURON, text, parse_kwh_thousands_aware)
}

/// PGE/Lumi detailed tables: add up every active-energy row billed in kWh.
pub fn active_energy_sum(tables: &[Table]) -> Option<Decimal> {
    let mut sum = Decimal::ZERO;

    for table in tables {
        for row in table {
            let named = row.iter().flatten().any(|cell| {
                cell.to_lowercase().contains("energia czynna")
            });
            if !named {
                continue;
            }

            let Some(unit_idx) = row.iter().position(|cell| {
                cell.as_deref()
                    .is_some_and(|c| c.trim().eq_ignore_ascii_case("kwh"))
            }) else {
                continue;
            };

            // the quantity sits directly before its unit cell
            let quantity = unit_idx
                .checked_sub(1)
                .and_then(|idx| row[idx].as_deref())
                .and_then(parse_amount);
            if let Some(quantity) = quantity {
                if quantity > Decimal::ZERO {
                    sum += quantity;
                }
            }
        }
    }

    if sum > Decimal::ZERO && in_range(sum) {
        Some(sum)
    } else {
        None
    }
}

/// Last resort: any "<number> kWh" occurrence in the text or a table cell.
pub fn any_kwh(text: &str, tables: &[Table]) -> Option<Decimal> {
    if let Some(value) = first_valid(&KWH_ANY, text, parse_amount) {
        return Some(value);
    }

    for table in tables {
        for row in table {
            for cell in row.iter().flatten() {
                if let Some(value) = first_valid(&KWH_ANY, cell, parse_amount) {
                    return Some(value);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_labeled_consumption() {
        assert_eq!(labeled("Zużycie: 850 kWh"), Some(dec("850")));
        assert_eq!(
            labeled("Energia czynna za okres 300 kWh"),
            Some(dec("300"))
        );
    }

    #[test]
    fn test_range_boundaries() {
        assert_eq!(labeled("Zużycie: 49 kWh"), None);
        assert_eq!(labeled("Zużycie: 50 kWh"), Some(dec("50")));
        assert_eq!(labeled("Zużycie: 100000 kWh"), Some(dec("100000")));
        assert_eq!(labeled("Zużycie: 100001 kWh"), None);
    }

    #[test]
    fn test_out_of_range_candidate_continues() {
        // the first occurrence is a meter constant, not a reading
        let text = "Zużycie: 2 kWh na dobę\nZużycie: 850 kWh";
        assert_eq!(labeled(text), Some(dec("850")));
    }

    #[test]
    fn test_tauron_thousands_separator() {
        assert_eq!(
            tauron_readings("Energia czynna pobrana 1.234 kWh"),
            Some(dec("1234"))
        );
        assert_eq!(tauron_readings("Zużycie 850 kWh"), Some(dec("850")));
    }

    #[test]
    fn test_active_energy_sum() {
        let tables = vec![vec![
            vec![
                Some("Energia czynna strefa I".to_string()),
                Some("523,000".to_string()),
                Some("kWh".to_string()),
            ],
            vec![
                Some("Energia czynna strefa II".to_string()),
                Some("301,000".to_string()),
                Some("kWh".to_string()),
            ],
            vec![
                Some("Opłata mocowa".to_string()),
                Some("1".to_string()),
                Some("szt.".to_string()),
            ],
        ]];

        assert_eq!(active_energy_sum(&tables), Some(dec("824.000")));
    }

    #[test]
    fn test_any_kwh_in_cells() {
        let tables = vec![vec![vec![Some("123 kWh".to_string())]]];
        assert_eq!(any_kwh("no reading here", &tables), Some(dec("123")));
    }
}
