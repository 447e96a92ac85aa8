//! Invoice metadata extraction: number, issue date, billing period.
//!
//! Each field runs its own ordered pattern list - provider-specific variants
//! first, generic fallbacks second - and the fields are independent: a miss
//! on one never blocks the others.

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::models::invoice::ProviderId;

use super::patterns::{
    INVOICE_NO_LABELED, INVOICE_NO_PLAIN, INVOICE_NO_VAT, ISSUE_DATE_LABELED, ISSUE_DATE_Z_DNIA,
    LINE_TOKEN, PERIOD_DASH, PERIOD_OD_DO,
};

/// Metadata recovered from a document; fields stay `None` when not found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceMetadata {
    pub invoice_number: Option<String>,
    pub issue_date: Option<String>,
    pub billing_period: Option<String>,
}

/// Extract all metadata fields for the given provider.
pub fn extract(text: &str, provider: ProviderId) -> InvoiceMetadata {
    let mut meta = InvoiceMetadata::default();

    // Energa prints header labels and values on two separate, positionally
    // aligned lines; try that layout before the inline patterns.
    if provider == ProviderId::Energa {
        meta.invoice_number = positional_value(text, "numer faktury", is_number_token);
        meta.issue_date =
            positional_value(text, "data wystawienia", is_date_token).and_then(|d| parse_date(&d));
    }

    if meta.invoice_number.is_none() {
        meta.invoice_number = invoice_number(text);
    }
    if meta.issue_date.is_none() {
        meta.issue_date = issue_date(text);
    }
    meta.billing_period = billing_period(text);

    debug!(?meta, "metadata extracted");
    meta
}

fn invoice_number(text: &str) -> Option<String> {
    for pattern in [&*INVOICE_NO_VAT, &*INVOICE_NO_PLAIN, &*INVOICE_NO_LABELED] {
        if let Some(caps) = pattern.captures(text) {
            return Some(caps[1].trim().to_string());
        }
    }
    None
}

fn issue_date(text: &str) -> Option<String> {
    for pattern in [&*ISSUE_DATE_Z_DNIA, &*ISSUE_DATE_LABELED] {
        if let Some(caps) = pattern.captures(text) {
            if let Some(date) = parse_date(&caps[1]) {
                return Some(date);
            }
        }
    }
    None
}

fn billing_period(text: &str) -> Option<String> {
    for pattern in [&*PERIOD_OD_DO, &*PERIOD_DASH] {
        if let Some(caps) = pattern.captures(text) {
            // both boundary dates come from one match or not at all
            if let (Some(start), Some(end)) = (parse_date(&caps[1]), parse_date(&caps[2])) {
                return Some(format!("{} - {}", start, end));
            }
        }
    }
    None
}

/// Validate a dotted or slashed day/month/year date and normalize it
/// to the dotted form used in the canonical record.
pub fn parse_date(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.trim().split(['.', '/']).collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.format("%d.%m.%Y").to_string())
}

/// Find a label on one line and pick the whitespace token on the next
/// non-empty line whose column is closest to the label's column.
fn positional_value(
    text: &str,
    label: &str,
    accepts: impl Fn(&str) -> bool,
) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();

    for (idx, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        let Some(label_col) = lower.find(label) else {
            continue;
        };

        let value_line = lines[idx + 1..]
            .iter()
            .find(|l| !l.trim().is_empty())?;

        let mut best: Option<(usize, &str)> = None;
        for m in LINE_TOKEN.find_iter(value_line) {
            if !accepts(m.as_str()) {
                continue;
            }
            let distance = m.start().abs_diff(label_col);
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, m.as_str()));
            }
        }
        if let Some((_, token)) = best {
            return Some(token.to_string());
        }
    }
    None
}

fn is_number_token(token: &str) -> bool {
    token.len() >= 4 && token.chars().all(|c| c.is_ascii_digit() || c == '/' || c == '-')
}

lazy_static::lazy_static! {
    static ref DATE_TOKEN: Regex = Regex::new(r"^\d{2}[./]\d{2}[./]\d{4}$").unwrap();
}

fn is_date_token(token: &str) -> bool {
    DATE_TOKEN.is_match(token)
}
