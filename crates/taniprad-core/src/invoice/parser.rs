//! The normalization pipeline: repaired text and tables in, canonical
//! invoice record out.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::document::Table;
use crate::models::invoice::{InvoiceRecord, ProviderId};

use super::rules::totals;
use super::strategies::{self, ProviderStrategy};
use super::{dedup, doctype, provider};

/// Invoice parser with optional provider override.
pub struct InvoiceParser {
    /// Skip signature detection and force a provider's heuristics.
    forced_provider: Option<ProviderId>,
}

impl InvoiceParser {
    pub fn new() -> Self {
        Self {
            forced_provider: None,
        }
    }

    /// Force a provider instead of detecting one from the text.
    pub fn with_provider(mut self, provider: ProviderId) -> Self {
        self.forced_provider = Some(provider);
        self
    }

    /// Normalize an extracted document into an [`InvoiceRecord`].
    ///
    /// Total over its input: malformed documents come back with empty or
    /// zeroed fields, never an error.
    pub fn parse(&self, full_text: &str, tables: &[Table]) -> InvoiceRecord {
        let (text, tables) = dedup::repair_document(full_text, tables);

        let provider = self
            .forced_provider
            .unwrap_or_else(|| provider::detect(&text));
        let document_type = doctype::classify(&text, provider);
        info!(
            provider = provider.as_str(),
            ?document_type,
            "document classified"
        );

        let strategy = strategies::for_provider(provider);

        let metadata = strategy.extract_metadata(&text);

        let mut items = strategy.extract_items(&tables, &text);
        if items.is_empty() && provider != ProviderId::Unknown {
            debug!("provider strategy yielded no items, trying generic scan");
            items = strategies::GENERIC.extract_items(&tables, &text);
        }

        // Totals chain: the E.ON settlement line is accepted as printed,
        // then the provider scan, then the generic sweep.
        let totals = totals::eon_settlement_line(&text)
            .or_else(|| strategy.extract_totals(&text, &tables))
            .or_else(|| totals::generic_sweep(&tables));

        let consumption = strategy.extract_consumption(&text, &tables);

        let mut record = InvoiceRecord::empty();
        record.provider = provider;
        record.document_type = document_type;
        record.invoice_number = metadata.invoice_number.unwrap_or_default();
        record.issue_date = metadata.issue_date.unwrap_or_default();
        record.billing_period = metadata.billing_period.unwrap_or_default();
        record.consumption_kwh = consumption;
        record.items = items;

        if let Some(totals) = totals {
            record.net_total = totals.net;
            record.vat_amount = totals.vat;
            record.gross_total = totals.gross;
            record.vat_percent = totals.vat_percent;
        }

        // Document totals are kept as printed; the gap to the item sum is
        // surfaced, not reconciled.
        if !record.items.is_empty() && record.net_total > Decimal::ZERO {
            debug!(
                discrepancy = %record.net_discrepancy(),
                "net total vs item sum"
            );
        }

        info!(
            items = record.items.len(),
            net = %record.net_total,
            gross = %record.gross_total,
            kwh = %record.consumption_kwh,
            "invoice normalized"
        );
        record
    }
}

impl Default for InvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a document with the default parser.
pub fn parse(full_text: &str, tables: &[Table]) -> InvoiceRecord {
    InvoiceParser::new().parse(full_text, tables)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use crate::models::invoice::DocumentType;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_document_degrades_to_zeroed_record() {
        let record = parse("", &[]);

        assert_eq!(record.provider, ProviderId::Unknown);
        assert_eq!(record.document_type, DocumentType::Unknown);
        assert_eq!(record.invoice_number, "");
        assert!(record.items.is_empty());
        assert_eq!(record.net_total, Decimal::ZERO);
        assert_eq!(record.vat_percent, 23);
        assert_eq!(record.consumption_kwh, Decimal::ZERO);
    }

    #[test]
    fn test_provider_override() {
        let record = InvoiceParser::new()
            .with_provider(ProviderId::Enea)
            .parse("Faktura VAT nr 1", &[]);
        assert_eq!(record.provider, ProviderId::Enea);
    }

    #[test]
    fn test_totals_kept_as_printed_despite_item_gap() {
        let text = "E.ON\nRozliczenie\n\
                    Sprzedaż energii elektrycznej\n\
                    Energia czynna 300 0,4500 135,00 23 31,05 166,05\n\
                    Razem\n\
                    Należność za faktyczne zużycie 496,10 23 114,10 610,20";
        let record = parse(text, &[]);

        assert_eq!(record.items.len(), 1);
        // item sum is 135.00 but the printed totals win, unreconciled
        assert_eq!(record.net_total, dec("496.10"));
        assert_eq!(record.net_discrepancy(), dec("361.10"));
    }
}
