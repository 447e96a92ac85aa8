//! Numeric token parsing for the Polish comma-decimal convention.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{COMMA_NUMBER, NUMBER_TOKEN, THOUSANDS_DOT};

/// Parse an amount written in Polish convention ("1 234,56", "123.45").
///
/// Spaces and currency markers are stripped; a comma is the decimal
/// separator and any dots next to it are grouping. Unparsable input yields
/// `None` (callers silently drop such values, they are not errors).
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };

    Decimal::from_str(&normalized).ok()
}

/// Parse a kWh reading where a dot may be a thousands separator:
/// "1.234" means 1234 kWh, while "123,5" keeps the comma-decimal reading.
pub fn parse_kwh_thousands_aware(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if THOUSANDS_DOT.is_match(trimmed) {
        return parse_amount(&trimmed.replace('.', ""));
    }
    parse_amount(trimmed)
}

/// All numeric tokens on a line, in order, parsed as amounts.
///
/// Dates on the line contribute tokens too; the positional line-item
/// heuristics account for that and the behavior is pinned by tests.
pub fn numeric_tokens(line: &str) -> Vec<Decimal> {
    NUMBER_TOKEN
        .find_iter(line)
        .filter_map(|m| parse_amount(m.as_str()))
        .collect()
}

/// Decimal-comma tokens on a line, as raw strings.
pub fn comma_token_strs(line: &str) -> Vec<&str> {
    COMMA_NUMBER.find_iter(line).map(|m| m.as_str()).collect()
}

/// Number of digits after the decimal comma in a raw token.
pub fn comma_fraction_digits(token: &str) -> usize {
    token.rsplit(',').next().map(str::len).unwrap_or(0)
}
