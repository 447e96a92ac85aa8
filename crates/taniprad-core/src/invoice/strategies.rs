//! Per-provider extraction strategies.
//!
//! Each provider registers one variant of the shared capability interface;
//! adding a provider means adding a variant here, not deepening conditional
//! chains in the pipeline.

use rust_decimal::Decimal;

use crate::models::document::Table;
use crate::models::invoice::{LineItem, ProviderId};

use super::items::{packed, priced, sections, zoned};
use super::rules::consumption;
use super::rules::metadata::{self, InvoiceMetadata};
use super::rules::totals::{self, Totals};

/// Capability interface implemented by every provider variant.
///
/// Defaults are the generic heuristics; variants override only what their
/// layout needs. Totals here cover step 2 of the totals chain - the E.ON
/// settlement line (step 1) and the generic sweep (step 3) live in the
/// pipeline.
pub trait ProviderStrategy: Sync {
    /// Provider this variant is registered for.
    fn provider(&self) -> ProviderId;

    fn extract_metadata(&self, text: &str) -> InvoiceMetadata {
        metadata::extract(text, self.provider())
    }

    fn extract_items(&self, tables: &[Table], text: &str) -> Vec<LineItem> {
        sections::extract(tables, text)
    }

    fn extract_totals(&self, _text: &str, _tables: &[Table]) -> Option<Totals> {
        None
    }

    fn extract_consumption(&self, text: &str, tables: &[Table]) -> Decimal {
        consumption::labeled(text)
            .or_else(|| consumption::any_kwh(text, tables))
            .unwrap_or_default()
    }
}

/// E.ON: generic section scan is the native layout.
pub struct EonStrategy;

impl ProviderStrategy for EonStrategy {
    fn provider(&self) -> ProviderId {
        ProviderId::Eon
    }
}

/// PGE and Lumi share the packed-cell table layout.
pub struct PackedTableStrategy {
    provider: ProviderId,
}

impl ProviderStrategy for PackedTableStrategy {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    fn extract_items(&self, tables: &[Table], _text: &str) -> Vec<LineItem> {
        packed::extract(tables)
    }

    fn extract_totals(&self, _text: &str, tables: &[Table]) -> Option<Totals> {
        totals::vat_rate_breakdown(tables)
    }

    fn extract_consumption(&self, text: &str, tables: &[Table]) -> Decimal {
        consumption::labeled(text)
            .or_else(|| consumption::active_energy_sum(tables))
            .or_else(|| consumption::any_kwh(text, tables))
            .unwrap_or_default()
    }
}

/// Tauron: zoned multi-line cells, dotted-thousands readings.
pub struct TauronStrategy;

impl ProviderStrategy for TauronStrategy {
    fn provider(&self) -> ProviderId {
        ProviderId::Tauron
    }

    fn extract_items(&self, tables: &[Table], text: &str) -> Vec<LineItem> {
        zoned::extract(tables, text)
    }

    fn extract_totals(&self, text: &str, tables: &[Table]) -> Option<Totals> {
        totals::settlement_result(text, tables)
    }

    fn extract_consumption(&self, text: &str, tables: &[Table]) -> Decimal {
        consumption::tauron_readings(text)
            .or_else(|| consumption::labeled(text))
            .or_else(|| consumption::any_kwh(text, tables))
            .unwrap_or_default()
    }
}

/// Enea: flat-text priced lines, PODSUMOWANIE totals block.
pub struct EneaStrategy;

impl ProviderStrategy for EneaStrategy {
    fn provider(&self) -> ProviderId {
        ProviderId::Enea
    }

    fn extract_items(&self, tables: &[Table], text: &str) -> Vec<LineItem> {
        priced::extract(tables, text)
    }

    fn extract_totals(&self, text: &str, tables: &[Table]) -> Option<Totals> {
        totals::summary_block(text, tables)
    }
}

/// Energa: generic items, two-line metadata header, gross-only totals.
pub struct EnergaStrategy;

impl ProviderStrategy for EnergaStrategy {
    fn provider(&self) -> ProviderId {
        ProviderId::Energa
    }

    fn extract_totals(&self, text: &str, _tables: &[Table]) -> Option<Totals> {
        totals::amount_due(text)
    }
}

/// Fallback for unrecognized providers: generic heuristics everywhere.
pub struct GenericStrategy;

impl ProviderStrategy for GenericStrategy {
    fn provider(&self) -> ProviderId {
        ProviderId::Unknown
    }
}

static EON: EonStrategy = EonStrategy;
static PGE: PackedTableStrategy = PackedTableStrategy {
    provider: ProviderId::Pge,
};
static LUMI: PackedTableStrategy = PackedTableStrategy {
    provider: ProviderId::LumiPge,
};
static TAURON: TauronStrategy = TauronStrategy;
static ENEA: EneaStrategy = EneaStrategy;
static ENERGA: EnergaStrategy = EnergaStrategy;

/// The universal fallback strategy.
pub static GENERIC: GenericStrategy = GenericStrategy;

/// Look up the registered variant for a provider.
pub fn for_provider(provider: ProviderId) -> &'static dyn ProviderStrategy {
    match provider {
        ProviderId::Eon => &EON,
        ProviderId::Pge => &PGE,
        ProviderId::LumiPge => &LUMI,
        ProviderId::Tauron => &TAURON,
        ProviderId::Enea => &ENEA,
        ProviderId::Energa => &ENERGA,
        ProviderId::Unknown => &GENERIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_provider() {
        for provider in [
            ProviderId::Eon,
            ProviderId::Pge,
            ProviderId::LumiPge,
            ProviderId::Tauron,
            ProviderId::Enea,
            ProviderId::Energa,
            ProviderId::Unknown,
        ] {
            assert_eq!(for_provider(provider).provider(), provider);
        }
    }
}
