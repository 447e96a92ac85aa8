//! Canonical invoice record produced by the normalization pipeline.
//!
//! Serialized field names follow the original Polish interchange contract
//! (`numer_faktury`, `pozycje`, ...) so downstream consumers keep working.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Electricity providers with dedicated extraction heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// E.ON Polska.
    Eon,
    /// PGE Obrót.
    Pge,
    /// Lumi (billed through PGE Obrót).
    LumiPge,
    /// Tauron Sprzedaż.
    Tauron,
    /// Enea.
    Enea,
    /// Energa Obrót.
    Energa,
    /// No signature matched; generic heuristics apply.
    Unknown,
}

impl ProviderId {
    /// Stable lowercase identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Eon => "eon",
            ProviderId::Pge => "pge",
            ProviderId::LumiPge => "lumi_pge",
            ProviderId::Tauron => "tauron",
            ProviderId::Enea => "enea",
            ProviderId::Energa => "energa",
            ProviderId::Unknown => "unknown",
        }
    }
}

impl Default for ProviderId {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Kind of billing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Settlement invoice with actual metered charges (faktura rozliczeniowa).
    SettlementInvoice,
    /// Forecast of future charges without a detailed breakdown (prognoza).
    Forecast,
    /// Could not be classified; callers proceed down the settlement path.
    Unknown,
}

impl Default for DocumentType {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Billing category of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Energy sale charges (energia czynna, opłata handlowa).
    #[serde(rename = "sprzedaz")]
    Supply,
    /// Network and regulated fees (opłaty dystrybucyjne).
    #[serde(rename = "dystrybucja")]
    Distribution,
}

/// One billed component of the invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Canonical item name.
    #[serde(rename = "nazwa")]
    pub name: String,

    /// Net amount in PLN.
    #[serde(rename = "wartosc_netto")]
    pub net_amount: Decimal,

    /// Billing category.
    #[serde(rename = "kategoria")]
    pub category: ItemCategory,

    /// Whether the savings calculation zeroed this item out.
    #[serde(rename = "zerowana", default, skip_serializing_if = "is_false")]
    pub zeroed: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl LineItem {
    pub fn new(name: impl Into<String>, net_amount: Decimal, category: ItemCategory) -> Self {
        Self {
            name: name.into(),
            net_amount,
            category,
            zeroed: false,
        }
    }
}

/// Normalized invoice record, built once per document.
///
/// `net_total` comes from the document's own totals section and is not forced
/// to reconcile with the sum of `items`; a discrepancy is tolerated and can be
/// inspected via [`InvoiceRecord::net_discrepancy`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Detected provider.
    #[serde(rename = "sprzedawca", default)]
    pub provider: ProviderId,

    /// Classified document type.
    #[serde(rename = "typ_dokumentu", default)]
    pub document_type: DocumentType,

    /// Invoice number, empty when not found.
    #[serde(rename = "numer_faktury")]
    pub invoice_number: String,

    /// Issue date in `dd.mm.yyyy` form, empty when not found.
    #[serde(rename = "data_faktury")]
    pub issue_date: String,

    /// Billing period as `"dd.mm.yyyy - dd.mm.yyyy"`, empty when not found.
    #[serde(rename = "okres_rozliczeniowy")]
    pub billing_period: String,

    /// Metered consumption in kWh; 0 means unknown.
    #[serde(rename = "zuzycie_kwh")]
    pub consumption_kwh: Decimal,

    /// Billed components.
    #[serde(rename = "pozycje")]
    pub items: Vec<LineItem>,

    /// Net total from the document totals section.
    #[serde(rename = "suma_netto")]
    pub net_total: Decimal,

    /// VAT rate as a whole percent.
    #[serde(rename = "vat_procent")]
    pub vat_percent: u32,

    /// VAT amount from the document totals section.
    #[serde(rename = "vat_kwota")]
    pub vat_amount: Decimal,

    /// Gross total from the document totals section.
    #[serde(rename = "suma_brutto")]
    pub gross_total: Decimal,
}

impl InvoiceRecord {
    /// An all-unknown record, the starting point of the pipeline.
    pub fn empty() -> Self {
        Self {
            provider: ProviderId::Unknown,
            document_type: DocumentType::Unknown,
            invoice_number: String::new(),
            issue_date: String::new(),
            billing_period: String::new(),
            consumption_kwh: Decimal::ZERO,
            items: Vec::new(),
            net_total: Decimal::ZERO,
            vat_percent: 23,
            vat_amount: Decimal::ZERO,
            gross_total: Decimal::ZERO,
        }
    }

    /// Sum of line-item net amounts.
    pub fn items_net_sum(&self) -> Decimal {
        self.items.iter().map(|i| i.net_amount).sum()
    }

    /// Absolute gap between the document net total and the item sum.
    pub fn net_discrepancy(&self) -> Decimal {
        (self.net_total - self.items_net_sum()).abs()
    }
}

impl Default for InvoiceRecord {
    fn default() -> Self {
        Self::empty()
    }
}
