//! Invoice totals extraction: net, VAT amount, gross, VAT rate.
//!
//! Candidate (net, vat, gross) triples from multi-number rows must
//! reconcile within [`RECONCILE_TOLERANCE`]; rejected candidates keep the
//! search going. The E.ON settlement line is the one exception and is
//! accepted as printed.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::document::Table;

use super::numbers::{numeric_tokens, parse_amount};
use super::patterns::{AMOUNT_DUE, EON_SETTLEMENT};

/// Totals recovered from a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub net: Decimal,
    pub vat: Decimal,
    pub gross: Decimal,
    pub vat_percent: u32,
}

/// Maximum accepted deviation of `net + vat` from `gross`, in PLN.
pub const RECONCILE_TOLERANCE: Decimal = Decimal::ONE;

/// Row keywords that may introduce a totals line.
const TOTAL_ROW_KEYWORDS: [&str; 4] = ["razem", "suma", "do zapłaty", "należność"];

fn reconciles(net: Decimal, vat: Decimal, gross: Decimal) -> bool {
    (net + vat - gross).abs() <= RECONCILE_TOLERANCE
}

/// Derive a whole-percent VAT rate from a reconciled triple; only legal
/// Polish rates are accepted, anything else falls back to 23.
fn derive_rate(net: Decimal, vat: Decimal) -> u32 {
    if net > Decimal::ZERO {
        let rate = (vat / net * Decimal::ONE_HUNDRED).round();
        if let Some(rate) = rate.to_u32() {
            if matches!(rate, 0 | 5 | 8 | 23) {
                return rate;
            }
        }
    }
    23
}

fn triple(net: Decimal, vat: Decimal, gross: Decimal) -> Totals {
    Totals {
        net,
        vat,
        gross,
        vat_percent: derive_rate(net, vat),
    }
}

/// The E.ON settlement line carries all three amounts plus the VAT rate;
/// accepted unconditionally when present.
pub fn eon_settlement_line(text: &str) -> Option<Totals> {
    let caps = EON_SETTLEMENT.captures(text)?;
    let net = parse_amount(&caps[1])?;
    let rate: u32 = caps[2].parse().ok()?;
    let vat = parse_amount(&caps[3])?;
    let gross = parse_amount(&caps[4])?;

    Some(Totals {
        net,
        vat,
        gross,
        vat_percent: rate,
    })
}

/// PGE/Lumi: the VAT-rate breakdown row ("wg stawek VAT").
pub fn vat_rate_breakdown(tables: &[Table]) -> Option<Totals> {
    scan_rows(tables, |row_text| row_text.contains("wg stawek vat"))
}

/// Tauron: the settlement result row ("Wynik rozliczenia"), searched in
/// tables first, then in the flat text.
pub fn settlement_result(text: &str, tables: &[Table]) -> Option<Totals> {
    scan_rows(tables, |row_text| row_text.contains("wynik rozliczenia")).or_else(|| {
        text.lines()
            .filter(|line| line.to_lowercase().contains("wynik rozliczenia"))
            .find_map(candidate_from_line)
    })
}

/// Enea: amounts follow the "PODSUMOWANIE" marker, on the marker line or
/// within the next few lines/rows.
pub fn summary_block(text: &str, tables: &[Table]) -> Option<Totals> {
    let lines: Vec<&str> = text.lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        if !line.to_lowercase().contains("podsumowanie") {
            continue;
        }
        for candidate_line in &lines[idx..(idx + 4).min(lines.len())] {
            if let Some(totals) = candidate_from_line(candidate_line) {
                return Some(totals);
            }
        }
    }

    for table in tables {
        let Some(marker) = table
            .iter()
            .position(|row| row_text(row).contains("podsumowanie"))
        else {
            continue;
        };
        for row in &table[marker..(marker + 4).min(table.len())] {
            if let Some(totals) = candidate_from_row(row) {
                return Some(totals);
            }
        }
    }
    None
}

/// Energa: only the gross amount due is printed; net and VAT are
/// back-computed at the standard 23% rate.
pub fn amount_due(text: &str) -> Option<Totals> {
    let caps = AMOUNT_DUE.captures(text)?;
    let gross = parse_amount(&caps[1])?;
    if gross <= Decimal::ZERO {
        return None;
    }

    let net = (gross / Decimal::new(123, 2)).round_dp(2);
    let vat = gross - net;

    Some(Totals {
        net,
        vat,
        gross,
        vat_percent: 23,
    })
}

/// Generic fallback: any table row with a sum keyword and at least three
/// positive amounts; the last three are read as (net, vat, gross).
pub fn generic_sweep(tables: &[Table]) -> Option<Totals> {
    scan_rows(tables, |row_text| {
        TOTAL_ROW_KEYWORDS.iter().any(|k| row_text.contains(k))
    })
}

fn scan_rows(tables: &[Table], matches: impl Fn(&str) -> bool) -> Option<Totals> {
    for table in tables {
        for row in table {
            let joined = row_text(row);
            if !matches(&joined) {
                continue;
            }
            if let Some(totals) = candidate_from_line(&joined) {
                return Some(totals);
            }
            debug!(row = %joined, "totals candidate rejected, continuing");
        }
    }
    None
}

fn candidate_from_row(row: &[Option<String>]) -> Option<Totals> {
    candidate_from_line(&row_text(row))
}

fn candidate_from_line(line: &str) -> Option<Totals> {
    let numbers: Vec<Decimal> = numeric_tokens(line)
        .into_iter()
        .filter(|n| *n > Decimal::ZERO)
        .collect();
    if numbers.len() < 3 {
        return None;
    }

    let n = numbers.len();
    let (net, vat, gross) = (numbers[n - 3], numbers[n - 2], numbers[n - 1]);
    if !reconciles(net, vat, gross) {
        return None;
    }
    Some(triple(net, vat, gross))
}

fn row_text(row: &[Option<String>]) -> String {
    row.iter()
        .flatten()
        .map(|cell| cell.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(cells: &[&str]) -> Vec<Option<String>> {
        cells.iter().map(|c| Some(c.to_string())).collect()
    }

    #[test]
    fn test_eon_settlement_line() {
        let totals =
            eon_settlement_line("Należność za faktyczne zużycie 496,10 23 114,10 610,20").unwrap();
        assert_eq!(totals.net, dec("496.10"));
        assert_eq!(totals.vat, dec("114.10"));
        assert_eq!(totals.gross, dec("610.20"));
        assert_eq!(totals.vat_percent, 23);
    }

    #[test]
    fn test_generic_sweep_accepts_reconciled_triple() {
        let tables = vec![vec![row(&["Razem", "100,00", "23,00", "123,00"])]];
        let totals = generic_sweep(&tables).unwrap();
        assert_eq!(totals.net, dec("100.00"));
        assert_eq!(totals.vat, dec("23.00"));
        assert_eq!(totals.gross, dec("123.00"));
        assert_eq!(totals.vat_percent, 23);
    }

    #[test]
    fn test_generic_sweep_rejects_unreconciled_triple() {
        // deviation of 7.00 exceeds the 1.00 tolerance
        let tables = vec![vec![row(&["Razem", "100,00", "23,00", "130,00"])]];
        assert_eq!(generic_sweep(&tables), None);
    }

    #[test]
    fn test_rejected_candidate_does_not_stop_search() {
        let tables = vec![vec![
            row(&["Suma częściowa", "50,00", "20,00", "90,00"]),
            row(&["Do zapłaty", "200,00", "46,00", "246,00"]),
        ]];
        let totals = generic_sweep(&tables).unwrap();
        assert_eq!(totals.gross, dec("246.00"));
    }

    #[test]
    fn test_amount_due_backcompute() {
        let totals = amount_due("Kwota do zapłaty: 285,36 zł").unwrap();
        assert_eq!(totals.gross, dec("285.36"));
        assert_eq!(totals.net, dec("232.00"));
        assert_eq!(totals.vat, dec("53.36"));
        assert_eq!(totals.vat_percent, 23);
    }

    #[test]
    fn test_summary_block_reads_following_line() {
        let text = "PODSUMOWANIE\nRazem netto 203,00 VAT 46,69 Brutto 249,69";
        let totals = summary_block(text, &[]).unwrap();
        assert_eq!(totals.net, dec("203.00"));
        assert_eq!(totals.gross, dec("249.69"));
    }

    #[test]
    fn test_derived_rate_must_be_legal() {
        // 10% is not a Polish VAT rate, the default wins
        let tables = vec![vec![row(&["Razem", "100,00", "10,00", "110,00"])]];
        assert_eq!(generic_sweep(&tables).unwrap().vat_percent, 23);
    }
}
