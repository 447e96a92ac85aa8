//! Repair for the doubled-character export artifact.
//!
//! Some Tauron PDF exports render every character twice ("FFaakkttuurraa").
//! Detection looks for a small set of doubled marker words; repair collapses
//! adjacent duplicates in a single scan. Re-running the repair on already
//! repaired text is a no-op apart from genuine doubled letters, which is a
//! known, accepted imprecision.

use tracing::debug;

use crate::models::document::Table;

/// Doubled renderings of words common to every invoice layout.
const DOUBLED_MARKERS: [&str; 5] = [
    "ffaakkttuurraa",
    "eenneerrggiiaa",
    "ddyyssttrryybbuu",
    "rraazzeemm",
    "kkwwhh",
];

/// Number of distinct markers required before the artifact is assumed.
const MIN_MARKER_HITS: usize = 2;

/// Check whether the text carries the doubled-character artifact.
pub fn is_doubled(text: &str) -> bool {
    let lower = text.to_lowercase();
    let hits = DOUBLED_MARKERS
        .iter()
        .filter(|marker| lower.contains(*marker))
        .count();
    hits >= MIN_MARKER_HITS
}

/// Collapse adjacent duplicate characters: "FFaakkttuurraa" -> "Faktura".
pub fn collapse(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() / 2 + 1);
    let mut i = 0;
    while i < chars.len() {
        out.push(chars[i]);
        if i + 1 < chars.len() && chars[i] == chars[i + 1] {
            i += 2;
        } else {
            i += 1;
        }
    }
    out
}

/// Repair the full text and every table cell when the artifact is detected.
pub fn repair_document(text: &str, tables: &[Table]) -> (String, Vec<Table>) {
    if !is_doubled(text) {
        return (text.to_string(), tables.to_vec());
    }

    debug!(
        tables = tables.len(),
        "doubled-character artifact detected, collapsing document"
    );

    let repaired_tables = tables
        .iter()
        .map(|table| {
            table
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| cell.as_deref().map(collapse))
                        .collect()
                })
                .collect()
        })
        .collect();

    (collapse(text), repaired_tables)
}
