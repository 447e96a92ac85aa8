//! Data models for documents, invoice records and savings results.

pub mod document;
pub mod invoice;
pub mod savings;
