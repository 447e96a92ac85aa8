//! Provider detection by keyword signature.

use tracing::debug;

use crate::models::invoice::ProviderId;

/// Ordered signature list. Lumi invoices are billed through "PGE Obrót",
/// so the Lumi signature must be tested before the PGE one.
const SIGNATURES: &[(&str, ProviderId)] = &[
    ("lumi", ProviderId::LumiPge),
    ("e.on", ProviderId::Eon),
    ("eon polska", ProviderId::Eon),
    ("pge", ProviderId::Pge),
    ("tauron", ProviderId::Tauron),
    ("enea", ProviderId::Enea),
    ("energa", ProviderId::Energa),
];

/// Classify the document source by the first matching signature.
pub fn detect(text: &str) -> ProviderId {
    let lower = text.to_lowercase();
    for (signature, provider) in SIGNATURES {
        if lower.contains(signature) {
            debug!(provider = provider.as_str(), "provider signature matched");
            return *provider;
        }
    }
    ProviderId::Unknown
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_detects_each_provider() {
        assert_eq!(detect("E.ON Polska S.A. Faktura VAT"), ProviderId::Eon);
        assert_eq!(detect("PGE Obrót S.A. Oddział Skarżysko"), ProviderId::Pge);
        assert_eq!(detect("TAURON Sprzedaż sp. z o.o."), ProviderId::Tauron);
        assert_eq!(detect("Enea S.A. ul. Górecka"), ProviderId::Enea);
        assert_eq!(detect("ENERGA-OBRÓT S.A."), ProviderId::Energa);
    }

    #[test]
    fn test_lumi_wins_over_its_billing_agent() {
        // A Lumi invoice always mentions PGE Obrót as the billing agent.
        let text = "Lumi by PGE\nSprzedawca: PGE Obrót S.A.";
        assert_eq!(detect(text), ProviderId::LumiPge);
    }

    #[test]
    fn test_unknown_when_nothing_matches() {
        assert_eq!(detect("Faktura VAT nr 42/2024"), ProviderId::Unknown);
    }
}
