//! Result models for the four-pillar savings calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::invoice::ItemCategory;

/// One item inside a before/after snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotItem {
    #[serde(rename = "nazwa")]
    pub name: String,

    #[serde(rename = "wartosc")]
    pub value: Decimal,

    #[serde(rename = "kategoria")]
    pub category: ItemCategory,

    /// Set on after-side items only; `true` when pillar zeroing applied.
    #[serde(rename = "zerowana", default, skip_serializing_if = "Option::is_none")]
    pub zeroed: Option<bool>,
}

/// Invoice state before or after the recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "pozycje")]
    pub items: Vec<SnapshotItem>,

    #[serde(rename = "suma_netto")]
    pub net_total: Decimal,

    #[serde(rename = "vat_procent")]
    pub vat_percent: u32,

    #[serde(rename = "vat_kwota")]
    pub vat_amount: Decimal,

    #[serde(rename = "suma_brutto")]
    pub gross_total: Decimal,
}

/// Per-pillar savings amounts, plus the combined result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsBreakdown {
    /// Pillar 1: VAT rate cut 23% -> 5%.
    #[serde(rename = "filar1_vat")]
    pub vat: Decimal,

    /// Pillar 2: certificate-cost reform, proportional to consumption.
    #[serde(rename = "filar2_certyfikaty")]
    pub certificates: Decimal,

    /// Pillar 3: distribution tariff cut of 15%.
    #[serde(rename = "filar3_dystrybucja")]
    pub distribution: Decimal,

    /// Pillar 4: regulated fees zeroed out.
    #[serde(rename = "filar4_oplaty")]
    pub fee_zeroing: Decimal,

    /// Gross difference between the before and after snapshots.
    pub total: Decimal,

    /// Total savings as a percentage of the original gross, 1 decimal place.
    pub percent: Decimal,
}

/// Invoice metadata echoed alongside the savings result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsMetadata {
    #[serde(rename = "numer_faktury")]
    pub invoice_number: String,

    #[serde(rename = "data_faktury")]
    pub issue_date: String,

    #[serde(rename = "okres_rozliczeniowy")]
    pub billing_period: String,

    #[serde(rename = "zuzycie_kwh")]
    pub consumption_kwh: Decimal,
}

/// Full before/after comparison produced by [`crate::compute_savings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsResult {
    pub before: Snapshot,
    pub after: Snapshot,
    pub savings: SavingsBreakdown,
    pub metadata: SavingsMetadata,
}
