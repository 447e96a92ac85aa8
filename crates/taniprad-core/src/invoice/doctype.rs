//! Settlement-invoice vs forecast classification.

use tracing::debug;

use crate::models::invoice::{DocumentType, ProviderId};

/// Keywords typical of forecast documents (prognoza).
const FORECAST_INDICATORS: [&str; 6] = [
    "prognoza",
    "prognozowane zużycie",
    "opłata prognozowana",
    "blankiet",
    "przewidywane zużycie",
    "rata prognozy",
];

/// Keywords typical of detailed settlement invoices.
const INVOICE_INDICATORS: [&str; 6] = [
    "rozliczenie",
    "faktura rozliczeniowa",
    "odczyt",
    "należność za faktyczne zużycie",
    "zużycie rzeczywiste",
    "wskazania układu pomiarowego",
];

/// Phrase pair unique to the Tauron forecast layout.
const TAURON_FORECAST_PAIR: (&str, &str) = ("szacowane zużycie", "blankiety wpłat");

/// Classify the document using weighted keyword scoring.
///
/// A positive invoice score ties or beats the forecast score on purpose:
/// settlement invoices routinely mention their forecast component.
pub fn classify(text: &str, provider: ProviderId) -> DocumentType {
    let lower = text.to_lowercase();

    if provider == ProviderId::Tauron
        && lower.contains(TAURON_FORECAST_PAIR.0)
        && lower.contains(TAURON_FORECAST_PAIR.1)
    {
        return DocumentType::Forecast;
    }

    let forecast_score = score(&lower, &FORECAST_INDICATORS);
    let invoice_score = score(&lower, &INVOICE_INDICATORS);
    debug!(forecast_score, invoice_score, "document type scores");

    if forecast_score > invoice_score {
        DocumentType::Forecast
    } else if invoice_score > 0 {
        DocumentType::SettlementInvoice
    } else {
        DocumentType::Unknown
    }
}

fn score(lower: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| lower.contains(*k)).count()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_settlement_invoice() {
        let text = "Rozliczenie sprzedaży energii\nNależność za faktyczne zużycie 496,10";
        assert_eq!(
            classify(text, ProviderId::Eon),
            DocumentType::SettlementInvoice
        );
    }

    #[test]
    fn test_forecast_by_score() {
        let text = "Prognoza\nOpłata prognozowana za energię\nBlankiet wpłaty nr 1";
        assert_eq!(classify(text, ProviderId::Pge), DocumentType::Forecast);
    }

    #[test]
    fn test_invoice_wins_ties() {
        // one forecast keyword, one invoice keyword
        let text = "Rozliczenie za okres\nwartość prognoza na kolejny okres";
        assert_eq!(
            classify(text, ProviderId::Unknown),
            DocumentType::SettlementInvoice
        );
    }

    #[test]
    fn test_tauron_forecast_override() {
        let text = "Szacowane zużycie: 1.200 kWh\nZałączamy blankiety wpłat\nRozliczenie\nOdczyt licznika";
        // keyword scoring alone would pick the invoice path here
        assert_eq!(classify(text, ProviderId::Tauron), DocumentType::Forecast);
        assert_eq!(
            classify(text, ProviderId::Energa),
            DocumentType::SettlementInvoice
        );
    }

    #[test]
    fn test_unknown_without_keywords() {
        assert_eq!(
            classify("Faktura VAT nr 1/2024", ProviderId::Unknown),
            DocumentType::Unknown
        );
    }
}
