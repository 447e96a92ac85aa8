//! The four-pillar "Tani prąd" savings recomputation.
//!
//! Pillars apply in a fixed order, each feeding the next: regulated-fee
//! zeroing, the 15% distribution tariff cut, the certificate-cost reform,
//! and finally the VAT cut from the invoiced rate down to 5%.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::invoice::{InvoiceRecord, ItemCategory};
use crate::models::savings::{
    SavingsBreakdown, SavingsMetadata, SavingsResult, Snapshot, SnapshotItem,
};

/// Name fragments of the regulated fees zeroed out by the reform.
const ZEROED_FEE_MARKERS: [&str; 4] = ["mocowa", "oze", "kogeneracyjna", "przejściowa"];

/// Distribution tariffs drop by 15%.
const DISTRIBUTION_CUT: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Reference household: 80 PLN saved per year at 2200 kWh consumed per year.
const REFERENCE_ANNUAL_SAVING: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
const REFERENCE_ANNUAL_KWH: Decimal = Decimal::from_parts(2200, 0, 0, false, 0);

/// Target VAT rate after the cut.
const NEW_VAT_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

struct WorkingItem {
    name: String,
    before: Decimal,
    after: Decimal,
    category: ItemCategory,
    zeroed: bool,
}

/// Recompute the invoice under the four-pillar relief and quantify savings.
///
/// Pure over the record: before/after snapshots are independent copies and
/// the input is never mutated.
pub fn compute_savings(record: &InvoiceRecord) -> SavingsResult {
    let old_vat_rate = Decimal::from(record.vat_percent) / Decimal::ONE_HUNDRED;

    let mut items: Vec<WorkingItem> = record
        .items
        .iter()
        .map(|item| WorkingItem {
            name: item.name.clone(),
            before: item.net_amount,
            after: item.net_amount,
            category: item.category,
            zeroed: false,
        })
        .collect();

    // Pillar: zero out the regulated fees.
    let mut fee_zeroing_saving = Decimal::ZERO;
    for item in &mut items {
        let lower = item.name.to_lowercase();
        if ZEROED_FEE_MARKERS.iter().any(|m| lower.contains(m)) {
            fee_zeroing_saving += item.after;
            item.after = Decimal::ZERO;
            item.zeroed = true;
        }
    }

    // Pillar: cut distribution tariffs by 15%, on the post-zeroing state.
    let distribution_subtotal: Decimal = items
        .iter()
        .filter(|i| i.category == ItemCategory::Distribution)
        .map(|i| i.after)
        .sum();
    let distribution_saving = distribution_subtotal * DISTRIBUTION_CUT;
    for item in &mut items {
        if item.category == ItemCategory::Distribution {
            item.after *= Decimal::ONE - DISTRIBUTION_CUT;
        }
    }

    // Pillar: certificate reform, scaled from the reference household.
    // The invoiced consumption is read as one month's worth.
    let certificate_saving = if record.consumption_kwh > Decimal::ZERO {
        let estimated_annual_kwh = record.consumption_kwh * MONTHS_PER_YEAR;
        estimated_annual_kwh / REFERENCE_ANNUAL_KWH * REFERENCE_ANNUAL_SAVING / MONTHS_PER_YEAR
    } else {
        Decimal::ZERO
    };
    if certificate_saving > Decimal::ZERO {
        if let Some(item) = items
            .iter_mut()
            .find(|i| i.name.to_lowercase().contains("energia czynna"))
        {
            item.after = (item.after - certificate_saving).max(Decimal::ZERO);
        } else {
            // recorded in the breakdown even when no item absorbs it
            debug!("no active-energy item, certificate saving not applied");
        }
    }

    // Pillar: VAT cut on the recomputed net subtotal.
    let net_after: Decimal = items.iter().map(|i| i.after).sum();
    let vat_amount_after = net_after * NEW_VAT_RATE;
    let gross_after = net_after + vat_amount_after;
    let vat_saving = (old_vat_rate - NEW_VAT_RATE) * net_after;

    let total_saving = record.gross_total - gross_after;
    let percent_saving = if record.gross_total > Decimal::ZERO {
        total_saving / record.gross_total * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    SavingsResult {
        before: Snapshot {
            items: items
                .iter()
                .map(|i| SnapshotItem {
                    name: i.name.clone(),
                    value: i.before.round_dp(2),
                    category: i.category,
                    zeroed: None,
                })
                .collect(),
            net_total: record.net_total.round_dp(2),
            vat_percent: record.vat_percent,
            vat_amount: record.vat_amount.round_dp(2),
            gross_total: record.gross_total.round_dp(2),
        },
        after: Snapshot {
            items: items
                .iter()
                .map(|i| SnapshotItem {
                    name: i.name.clone(),
                    value: i.after.round_dp(2),
                    category: i.category,
                    zeroed: Some(i.zeroed),
                })
                .collect(),
            net_total: net_after.round_dp(2),
            vat_percent: 5,
            vat_amount: vat_amount_after.round_dp(2),
            gross_total: gross_after.round_dp(2),
        },
        savings: SavingsBreakdown {
            vat: vat_saving.round_dp(2),
            certificates: certificate_saving.round_dp(2),
            distribution: distribution_saving.round_dp(2),
            fee_zeroing: fee_zeroing_saving.round_dp(2),
            total: total_saving.round_dp(2),
            percent: percent_saving.round_dp(1),
        },
        metadata: SavingsMetadata {
            invoice_number: record.invoice_number.clone(),
            issue_date: record.issue_date.clone(),
            billing_period: record.billing_period.clone(),
            consumption_kwh: record.consumption_kwh,
        },
    }
}
