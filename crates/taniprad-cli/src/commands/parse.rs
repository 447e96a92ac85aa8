//! The `parse` subcommand: document in, canonical invoice record out.

use clap::Args;

use super::{print_json, read_document};

#[derive(Args)]
pub struct ParseArgs {
    /// Input file with extracted-document JSON, or '-' for stdin
    pub input: String,

    /// Treat the input as bare invoice text instead of JSON
    #[arg(long)]
    pub text: bool,

    /// Pretty-print the output JSON
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let document = read_document(&args.input, args.text)?;
    let record = taniprad_core::parse(&document.full_text, &document.tables);
    print_json(&record, args.pretty)
}
