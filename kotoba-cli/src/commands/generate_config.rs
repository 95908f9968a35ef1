//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use kotoba_core::config::defaults;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        std::fs::write(&self.output, generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the file to tune rules, thresholds and lesson layout");
        println!("2. Validate your configuration:");
        println!("   kotoba validate -c {}", self.output.display());
        println!("3. Use it for extraction:");
        println!("   kotoba extract -i n3.json -c {}", self.output.display());

        Ok(())
    }
}

/// Commented template carrying every default value
pub fn generate_template() -> String {
    format!(
        r#"# kotoba extraction configuration
# Every section is optional; omitted keys keep their defaults.

[layout]
# Fragments whose y differs by less than this are read as one visual line
sort_tolerance = {sort_tolerance:.1}
# A fragment joins the open entry only within this vertical distance
join_tolerance = {join_tolerance:.1}

[extraction]
# Pattern rules in priority order; the first match wins.
# Lines no rule matches fall back to the longest kanji, hiragana and gloss runs.
rules = [
    "kanji-hiragana-meaning",
    "kanji-paren-hiragana-meaning",
    "kanji-meaning",
    "hiragana-meaning",
]
# Read a pure-hiragana line after "kanji meaning" as the missing reading
lookahead_reading = true

[filter]
# Meanings shorter than this many characters are rejected
min_meaning_chars = {min_meaning_chars}
# Meanings containing any of these tokens are rejected
denylist = ["PART", "まとめ", "□", "■"]

[lessons]
size = {size}
# Drop repeated (kanji, hiragana, meaning) entries, keeping the first
dedupe = false
# Put entries with kanji, reading and meaning first (stable)
sort_by_completeness = false
# Attach a templated example sentence to each entry
generate_examples = false
title = "{title}"
description = "{description}"
"#,
        sort_tolerance = defaults::SORT_TOLERANCE,
        join_tolerance = defaults::JOIN_TOLERANCE,
        min_meaning_chars = defaults::MIN_MEANING_CHARS,
        size = defaults::LESSON_SIZE,
        title = defaults::BUNDLE_TITLE,
        description = defaults::BUNDLE_DESCRIPTION,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kotoba_core::Config;
    use tempfile::TempDir;

    #[test]
    fn test_template_matches_defaults() {
        let config = Config::from_toml_str(&generate_template()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_execute_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("kotoba.toml");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
        };
        assert!(args.execute().is_ok());

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("[extraction]"));
        assert!(content.contains("size = 30"));
    }

    #[test]
    fn test_execute_unwritable_path() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("/nonexistent/dir/kotoba.toml"),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Failed to write to"));
    }
}
