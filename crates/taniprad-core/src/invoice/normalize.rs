//! Canonicalization of line-item names and category assignment.

use crate::models::invoice::ItemCategory;

/// Ordered canonical-name table: the first variant set that matches wins.
/// "sieciowa stała" must come before the bare "sieciowa" variant.
const CANONICAL_NAMES: &[(&str, &[&str])] = &[
    (
        "Energia czynna",
        &["energia czynna", "en. czynna", "energia elektryczna czynna"],
    ),
    ("Opłata handlowa", &["opłata handlowa", "opł. handlowa"]),
    (
        "Opłata sieciowa stała",
        &[
            "sieciowa stała",
            "dystrybucyjna stała",
            "składnik stały",
            "opłata stała za przesył",
        ],
    ),
    (
        "Opłata sieciowa zmienna",
        &[
            "sieciowa zmienna",
            "dystrybucyjna zmienna",
            "składnik zmienny",
            "sieciowa",
        ],
    ),
    ("Opłata jakościowa", &["jakościowa", "opł. jakościowa"]),
    ("Opłata mocowa", &["mocowa", "opł. mocowa"]),
    ("Opłata OZE", &["oze"]),
    (
        "Opłata kogeneracyjna",
        &["kogeneracyjna", "kogeneracja", "kogener."],
    ),
    ("Opłata przejściowa", &["przejściowa", "przejśc."]),
    ("Opłata abonamentowa", &["abonamentowa", "abonament"]),
];

/// Item-name keywords of the supply category; checked before distribution.
const SUPPLY_KEYWORDS: [&str; 4] = [
    "energia czynna",
    "sprzedaż energii",
    "opłata handlowa",
    "energia elektryczna",
];

/// Item-name keywords of the distribution category.
const DISTRIBUTION_KEYWORDS: [&str; 9] = [
    "dystrybuc",
    "sieciowa",
    "jakościowa",
    "mocowa",
    "oze",
    "kogenerac",
    "przejściowa",
    "abonament",
    "opłata stała",
];

/// Map a raw (often abbreviated) item label to its canonical name.
///
/// Names that match no variant pass through with only the first character
/// capitalized.
pub fn canonical_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();

    for (canonical, variants) in CANONICAL_NAMES {
        if variants.iter().any(|variant| lower.contains(variant)) {
            return (*canonical).to_string();
        }
    }

    capitalize_first(trimmed)
}

/// Assign a billing category; unmatched names fall into the larger
/// distribution fee family.
pub fn categorize(name: &str) -> ItemCategory {
    let lower = name.to_lowercase();

    if SUPPLY_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return ItemCategory::Supply;
    }
    if DISTRIBUTION_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return ItemCategory::Distribution;
    }

    ItemCategory::Distribution
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
