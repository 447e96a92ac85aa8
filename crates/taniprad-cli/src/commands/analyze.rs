//! The `analyze` subcommand: document in, savings breakdown out.

use clap::Args;
use serde_json::json;

use super::{print_json, read_document};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input file with extracted-document JSON, or '-' for stdin
    pub input: String,

    /// Treat the input as bare invoice text instead of JSON
    #[arg(long)]
    pub text: bool,

    /// Pretty-print the output JSON
    #[arg(long)]
    pub pretty: bool,

    /// Include the normalized invoice record alongside the savings
    #[arg(long)]
    pub with_record: bool,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let document = read_document(&args.input, args.text)?;
    let (record, savings) = taniprad_core::analyze(&document);

    if args.with_record {
        print_json(&json!({ "faktura": record, "wynik": savings }), args.pretty)
    } else {
        print_json(&savings, args.pretty)
    }
}
