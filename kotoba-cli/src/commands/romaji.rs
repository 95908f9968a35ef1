//! Romaji command implementation

use anyhow::Result;
use clap::Args;
use kotoba_core::Transliterator;
use serde::Serialize;
use std::io::{self, Write};

/// Arguments for the romaji command
#[derive(Debug, Args)]
pub struct RomajiArgs {
    /// Hiragana text to transliterate
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,

    /// Print a JSON array of {input, romaji} pairs
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Reading<'a> {
    input: &'a str,
    romaji: String,
}

impl RomajiArgs {
    pub fn execute(&self) -> Result<()> {
        let mut stdout = io::stdout().lock();
        self.write_to(&mut stdout)
    }

    /// One transliteration per argument
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        let transliterator = Transliterator::new();
        let readings: Vec<Reading<'_>> = self
            .text
            .iter()
            .map(|text| Reading {
                input: text,
                romaji: transliterator.transliterate(text),
            })
            .collect();

        if self.json {
            serde_json::to_writer_pretty(&mut *writer, &readings)?;
            writeln!(writer)?;
        } else {
            for reading in &readings {
                writeln!(writer, "{}", reading.romaji)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}
