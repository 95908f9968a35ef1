//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use kotoba_core::RuleKind;
use std::io::{self, Write};

pub mod extract;
pub mod generate_config;
pub mod romaji;
pub mod validate;

use crate::output::OutputFormat;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract vocabulary entries and group them into lessons
    Extract(extract::ExtractArgs),

    /// Transliterate hiragana to romaji
    Romaji(romaji::RomajiArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List built-in extraction rules in default priority order
    Rules,

    /// List available output formats
    Formats,
}

impl Commands {
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Extract(args) => args.execute(),
            Commands::Romaji(args) => args.execute(),
            Commands::List { subcommand } => subcommand.write_to(&mut io::stdout().lock()),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

impl ListCommands {
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        match self {
            ListCommands::Rules => {
                writeln!(writer, "Extraction rules (default priority):")?;
                for (position, kind) in RuleKind::STANDARD_ORDER.iter().enumerate() {
                    writeln!(
                        writer,
                        "  {}. {:<30} {}",
                        position + 1,
                        kind.as_str(),
                        kind.description()
                    )?;
                }
            }
            ListCommands::Formats => {
                writeln!(writer, "Output formats:")?;
                for format in OutputFormat::ALL {
                    writeln!(writer, "  {:<10} {}", format.name(), format.description())?;
                }
            }
        }
        Ok(())
    }
}
