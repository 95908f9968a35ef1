//! kotoba - rebuild JLPT vocabulary lessons from PDF text dumps
//!
//! # Usage
//!
//! ```bash
//! # Extract lessons from PDF fragments
//! kotoba extract -i "pdf/*.json" -o n3.json
//!
//! # Plain lines, markdown tables, 20 words per lesson
//! kotoba extract -i n3.txt -f markdown --lesson-size 20
//!
//! # Transliterate a reading
//! kotoba romaji ちゅうい
//! ```

use clap::Parser;
use kotoba_cli::commands::Commands;
use kotoba_cli::CliResult;

/// JLPT vocabulary extraction and romaji transliteration
#[derive(Parser)]
#[command(name = "kotoba", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
