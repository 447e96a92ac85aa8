//! Input document shape produced by the external text/table extraction layer.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single table cell. Extraction layers emit `null` for empty cells.
pub type TableCell = Option<String>;

/// One extracted table: a list of rows, each a list of cells.
pub type Table = Vec<Vec<TableCell>>;

/// A document after text/table extraction, before normalization.
///
/// This is the interchange format consumed by [`crate::parse`]: the full
/// plain text of the document plus every table recovered from it, in page
/// order. PDF/OCR processing happens upstream and is not part of this crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Concatenated text of all pages.
    pub full_text: String,

    /// All tables found in the document.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl ExtractedDocument {
    /// Decode a document from its JSON interchange form.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Wrap bare text (e.g. OCR output with no table structure).
    pub fn from_plain_text(text: impl Into<String>) -> Self {
        Self {
            full_text: text.into(),
            tables: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let doc = ExtractedDocument::from_json(
            r#"{"full_text": "Faktura VAT nr 1", "tables": [[["Razem", null, "1,23"]]]}"#,
        )
        .unwrap();

        assert_eq!(doc.full_text, "Faktura VAT nr 1");
        assert_eq!(doc.tables.len(), 1);
        assert_eq!(doc.tables[0][0][1], None);
    }

    #[test]
    fn test_from_json_missing_tables() {
        let doc = ExtractedDocument::from_json(r#"{"full_text": "abc"}"#).unwrap();
        assert!(doc.tables.is_empty());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(ExtractedDocument::from_json("{").is_err());
    }
}
