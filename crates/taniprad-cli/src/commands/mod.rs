//! CLI subcommands.

pub mod analyze;
pub mod parse;

use std::io::Read;

use anyhow::Context;
use serde::Serialize;

use taniprad_core::ExtractedDocument;

/// Read the input document from a file or stdin (`-`).
///
/// The payload is the `{full_text, tables}` interchange JSON unless
/// `as_text` marks it as bare invoice text.
pub fn read_document(input: &str, as_text: bool) -> anyhow::Result<ExtractedDocument> {
    let raw = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))?
    };

    if as_text {
        Ok(ExtractedDocument::from_plain_text(raw))
    } else {
        ExtractedDocument::from_json(&raw).context("failed to decode document JSON")
    }
}

/// Print a value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}
