//! Rule-based field extractors for electricity invoices.

pub mod consumption;
pub mod metadata;
pub mod numbers;
pub mod patterns;
pub mod totals;

pub use consumption::CONSUMPTION_RANGE_KWH;
pub use metadata::InvoiceMetadata;
pub use numbers::{numeric_tokens, parse_amount};
pub use totals::Totals;

/// Keywords marking a summary/total row; such rows never become line items.
pub const SUM_KEYWORDS: [&str; 6] = [
    "razem",
    "suma",
    "należność",
    "wartość prognozowana",
    "do zapłaty",
    "podsumowanie",
];

/// Check whether a label belongs to a summary/total row.
pub fn is_sum_row(label: &str) -> bool {
    let lower = label.to_lowercase();
    SUM_KEYWORDS.iter().any(|k| lower.contains(k))
}
