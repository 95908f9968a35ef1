//! Pipeline configuration
//!
//! Every knob that the old one-off scripts hardcoded differently lives here,
//! so a "variant" of the pipeline is a different config rather than a copy
//! of the code. Configs load from TOML; every section is optional.

use crate::error::{Error, Result};
use crate::extract::rules::RuleKind;
use crate::filter::{ValidityFilter, DEFAULT_DENYLIST};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration constants
pub mod defaults {
    /// Vertical distance under which two fragments are read as one visual line
    pub const SORT_TOLERANCE: f32 = 2.0;

    /// Vertical distance under which a fragment may join the open cluster
    pub const JOIN_TOLERANCE: f32 = 5.0;

    /// Entries per lesson
    pub const LESSON_SIZE: usize = 30;

    /// Shortest meaning (in chars) accepted by the validity filter
    pub const MIN_MEANING_CHARS: usize = 2;

    pub const BUNDLE_TITLE: &str = "JLPT N3 Vocabulary";

    pub const BUNDLE_DESCRIPTION: &str =
        "JLPT N3 vocabulary reconstructed from source documents, grouped into lessons";
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub lessons: LessonConfig,
}

/// Positional clustering of PDF fragments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub sort_tolerance: f32,
    pub join_tolerance: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sort_tolerance: defaults::SORT_TOLERANCE,
            join_tolerance: defaults::JOIN_TOLERANCE,
        }
    }
}

/// Field extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Pattern rules in priority order
    pub rules: Vec<RuleKind>,

    /// Consume a following pure-hiragana line as the reading of a kanji + meaning line
    pub lookahead_reading: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            rules: RuleKind::STANDARD_ORDER.to_vec(),
            lookahead_reading: true,
        }
    }
}

/// Validity filter thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub min_meaning_chars: usize,
    pub denylist: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_meaning_chars: defaults::MIN_MEANING_CHARS,
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FilterConfig {
    pub fn to_filter(&self) -> ValidityFilter {
        ValidityFilter::new(self.min_meaning_chars, self.denylist.clone())
    }
}

/// Lesson batching and envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonConfig {
    pub size: usize,

    /// Drop repeated (kanji, hiragana, meaning) triples, keeping the first
    pub dedupe: bool,

    /// Stable-sort entries by completeness score before batching
    pub sort_by_completeness: bool,

    /// Attach a templated example sentence to each entry
    pub generate_examples: bool,

    pub title: String,
    pub description: String,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            size: defaults::LESSON_SIZE,
            dedupe: false,
            sort_by_completeness: false,
            generate_examples: false,
            title: defaults::BUNDLE_TITLE.to_string(),
            description: defaults::BUNDLE_DESCRIPTION.to_string(),
        }
    }
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Configuration(format!("Failed to serialize config: {e}")))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("sort_tolerance", self.layout.sort_tolerance),
            ("join_tolerance", self.layout.join_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Configuration(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }

        if self.extraction.rules.is_empty() {
            return Err(Error::Configuration(
                "at least one extraction rule is required".into(),
            ));
        }

        if self.filter.min_meaning_chars == 0 {
            return Err(Error::Configuration(
                "min_meaning_chars must be greater than 0".into(),
            ));
        }

        if self.lessons.size == 0 {
            return Err(Error::Configuration(
                "lesson size must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    base: Option<Config>,
    rules: Option<Vec<RuleKind>>,
    lookahead_reading: Option<bool>,
    lesson_size: Option<usize>,
    dedupe: Option<bool>,
    sort_by_completeness: Option<bool>,
    generate_examples: Option<bool>,
    join_tolerance: Option<f32>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration instead of the defaults
    pub fn base(mut self, config: Config) -> Self {
        self.base = Some(config);
        self
    }

    /// Replace the rule list (priority order)
    pub fn rules(mut self, rules: impl Into<Vec<RuleKind>>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    pub fn lookahead_reading(mut self, enabled: bool) -> Self {
        self.lookahead_reading = Some(enabled);
        self
    }

    pub fn lesson_size(mut self, size: usize) -> Self {
        self.lesson_size = Some(size);
        self
    }

    pub fn dedupe(mut self, enabled: bool) -> Self {
        self.dedupe = Some(enabled);
        self
    }

    pub fn sort_by_completeness(mut self, enabled: bool) -> Self {
        self.sort_by_completeness = Some(enabled);
        self
    }

    pub fn generate_examples(mut self, enabled: bool) -> Self {
        self.generate_examples = Some(enabled);
        self
    }

    pub fn join_tolerance(mut self, tolerance: f32) -> Self {
        self.join_tolerance = Some(tolerance);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let mut config = self.base.unwrap_or_default();

        if let Some(rules) = self.rules {
            config.extraction.rules = rules;
        }
        if let Some(enabled) = self.lookahead_reading {
            config.extraction.lookahead_reading = enabled;
        }
        if let Some(size) = self.lesson_size {
            config.lessons.size = size;
        }
        if let Some(enabled) = self.dedupe {
            config.lessons.dedupe = enabled;
        }
        if let Some(enabled) = self.sort_by_completeness {
            config.lessons.sort_by_completeness = enabled;
        }
        if let Some(enabled) = self.generate_examples {
            config.lessons.generate_examples = enabled;
        }
        if let Some(tolerance) = self.join_tolerance {
            config.layout.join_tolerance = tolerance;
        }

        config.validate()?;
        Ok(config)
    }
}
