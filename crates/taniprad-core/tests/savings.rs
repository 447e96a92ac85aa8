//! End-to-end savings computation over parsed invoices.

use std::str::FromStr;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

use taniprad_core::{compute_savings, InvoiceRecord, ItemCategory, LineItem};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sample_record() -> InvoiceRecord {
    let mut record = InvoiceRecord::empty();
    record.invoice_number = "229250916302".to_string();
    record.issue_date = "01.12.2025".to_string();
    record.billing_period = "01.11.2025 - 30.11.2025".to_string();
    record.consumption_kwh = dec("300");
    record.items = vec![
        LineItem::new("Energia czynna", dec("400"), ItemCategory::Supply),
        LineItem::new("Opłata mocowa", dec("50"), ItemCategory::Distribution),
    ];
    record.net_total = dec("450");
    record.vat_amount = dec("103.5");
    record.gross_total = dec("553.5");
    record
}

#[test]
fn four_pillar_worked_example() {
    let result = compute_savings(&sample_record());

    assert_eq!(result.savings.fee_zeroing, dec("50"));
    assert_eq!(result.savings.distribution, Decimal::ZERO);
    assert_eq!(result.savings.certificates, dec("10.91"));
    assert_eq!(result.savings.vat, dec("70.04"));
    assert_eq!(result.savings.total, dec("144.95"));
    assert_eq!(result.savings.percent, dec("26.2"));

    assert_eq!(result.before.gross_total, dec("553.50"));
    assert_eq!(result.before.vat_percent, 23);
    assert_eq!(result.after.net_total, dec("389.09"));
    assert_eq!(result.after.vat_percent, 5);
    assert_eq!(result.after.gross_total, dec("408.55"));
}

#[test]
fn zeroed_fee_is_flagged_in_the_after_snapshot() {
    let result = compute_savings(&sample_record());

    let mocowa = result
        .after
        .items
        .iter()
        .find(|i| i.name == "Opłata mocowa")
        .unwrap();
    assert_eq!(mocowa.value, Decimal::ZERO);
    assert_eq!(mocowa.zeroed, Some(true));

    // before-side items carry no flag at all
    assert!(result.before.items.iter().all(|i| i.zeroed.is_none()));
}

#[test]
fn metadata_is_echoed() {
    let result = compute_savings(&sample_record());

    assert_eq!(result.metadata.invoice_number, "229250916302");
    assert_eq!(result.metadata.billing_period, "01.11.2025 - 30.11.2025");
    assert_eq!(result.metadata.consumption_kwh, dec("300"));
}

#[test]
fn empty_record_yields_all_zero_savings() {
    let result = compute_savings(&InvoiceRecord::empty());

    assert_eq!(result.savings.vat, Decimal::ZERO);
    assert_eq!(result.savings.certificates, Decimal::ZERO);
    assert_eq!(result.savings.distribution, Decimal::ZERO);
    assert_eq!(result.savings.fee_zeroing, Decimal::ZERO);
    assert_eq!(result.savings.total, Decimal::ZERO);
    assert_eq!(result.savings.percent, Decimal::ZERO);
    assert!(result.before.items.is_empty());
    assert!(result.after.items.is_empty());
}

#[test]
fn savings_result_round_trips_through_json() {
    let result = compute_savings(&sample_record());

    let json = serde_json::to_string(&result).unwrap();
    let back: taniprad_core::SavingsResult = serde_json::from_str(&json).unwrap();

    assert_eq!(back, result);
}
