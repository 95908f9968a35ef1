//! Validate command implementation

use crate::error::CliError;
use crate::input::FileReader;
use anyhow::Result;
use clap::Args;
use kotoba_core::Config;
use std::path::PathBuf;

const KNOWN_SECTIONS: [&str; 4] = ["layout", "extraction", "filter", "lessons"];

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let content = FileReader::read_text(&self.config)?;
        for section in unknown_sections(&content) {
            println!("  warning: unknown section [{section}] is ignored");
        }

        match Config::from_toml_str(&content) {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                let rules: Vec<_> = config.extraction.rules.iter().map(|r| r.as_str()).collect();
                println!("  Rules: {}", rules.join(", "));
                println!("  Lesson size: {}", config.lessons.size);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(CliError::config(e).into())
            }
        }
    }
}

/// Top-level tables the loader does not know about
fn unknown_sections(content: &str) -> Vec<String> {
    content
        .parse::<toml::Table>()
        .map(|table| {
            table
                .keys()
                .filter(|key| !KNOWN_SECTIONS.contains(&key.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}
