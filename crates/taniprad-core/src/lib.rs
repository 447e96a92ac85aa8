//! Core library for electricity invoice analysis.
//!
//! This crate provides:
//! - Normalization of extracted invoice text/tables into a canonical record
//! - Provider detection and document-type classification for Polish utilities
//! - Per-provider line-item, totals and consumption extraction
//! - The four-pillar "Tani prąd" savings calculation

pub mod error;
pub mod invoice;
pub mod models;
pub mod savings;

pub use error::{Result, TanipradError};
pub use invoice::{parse, InvoiceParser};
pub use models::document::{ExtractedDocument, Table, TableCell};
pub use models::invoice::{DocumentType, InvoiceRecord, ItemCategory, LineItem, ProviderId};
pub use models::savings::{SavingsBreakdown, SavingsResult, Snapshot, SnapshotItem};
pub use savings::compute_savings;

/// Run the full pipeline on an extracted document: normalization plus savings.
pub fn analyze(document: &ExtractedDocument) -> (InvoiceRecord, SavingsResult) {
    let record = parse(&document.full_text, &document.tables);
    let savings = compute_savings(&record);
    (record, savings)
}
