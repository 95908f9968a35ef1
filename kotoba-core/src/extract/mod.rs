//! Vocabulary extraction pipeline
//!
//! Lines (pre-split, or reconstructed from positioned fragments) are
//! normalized, matched against an ordered [`RuleSet`], and the resulting
//! entries pass through the [`ValidityFilter`]. Individual lines never fail:
//! they are dropped and tallied in [`ExtractionStats`].

pub mod layout;
pub mod normalize;
pub mod rules;

use crate::config::Config;
use crate::entry::{PartialEntry, VocabularyEntry};
use crate::error::Result;
use crate::filter::ValidityFilter;
use crate::input::{Document, Input, InputFormat};
use crate::romaji::Transliterator;
use crate::script;
use layout::{LineClusterer, RawTextFragment};
use normalize::{is_noise, normalize_line};
use rules::{fallback_fields, MatchOutcome, PatternRule, RuleSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Counters describing what happened to every candidate line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    /// Lines seen, including noise and lines consumed as a reading
    pub candidate_lines: usize,
    /// Empty lines and headers
    pub noise_lines: usize,
    /// Lines from which no field at all could be recovered
    pub unparsable_lines: usize,
    /// Entries rejected by the validity filter
    pub invalid_entries: usize,
    pub valid_entries: usize,
    /// Reading lines merged into the entry above them
    pub lookahead_merges: usize,
    pub duplicates_removed: usize,
}

impl ExtractionStats {
    /// Entries that came out of field extraction, valid or not
    pub fn extracted_entries(&self) -> usize {
        self.valid_entries + self.invalid_entries
    }

    /// Valid entries as a percentage of the lines that could carry one
    pub fn success_rate(&self) -> f64 {
        let attempted = self
            .candidate_lines
            .saturating_sub(self.noise_lines)
            .saturating_sub(self.lookahead_merges);
        if attempted == 0 {
            return 0.0;
        }
        self.valid_entries as f64 / attempted as f64 * 100.0
    }

    /// Accumulate counters from another run
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.candidate_lines += other.candidate_lines;
        self.noise_lines += other.noise_lines;
        self.unparsable_lines += other.unparsable_lines;
        self.invalid_entries += other.invalid_entries;
        self.valid_entries += other.valid_entries;
        self.lookahead_merges += other.lookahead_merges;
        self.duplicates_removed += other.duplicates_removed;
    }
}

/// Valid entries in encounter order plus diagnostics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub entries: Vec<VocabularyEntry>,
    pub stats: ExtractionStats,
}

impl Extraction {
    /// Append another extraction after this one
    pub fn merge(&mut self, other: Extraction) {
        self.entries.extend(other.entries);
        self.stats.merge(&other.stats);
    }

    /// Drop later entries whose (kanji, hiragana, meaning) was already seen.
    ///
    /// Returns the number of entries removed.
    pub fn dedupe(&mut self) -> usize {
        let before = self.entries.len();
        let mut seen = HashSet::new();
        self.entries.retain(|entry| {
            let (kanji, hiragana, meaning) = entry.identity();
            seen.insert((kanji.to_string(), hiragana.to_string(), meaning.to_string()))
        });
        let removed = before - self.entries.len();
        self.stats.duplicates_removed += removed;
        self.stats.valid_entries -= removed.min(self.stats.valid_entries);
        removed
    }
}

/// Turns lines or fragments into validated vocabulary entries
#[derive(Debug)]
pub struct VocabularyExtractor {
    config: Config,
    rules: RuleSet,
    clusterer: LineClusterer,
    filter: ValidityFilter,
    transliterator: Transliterator,
}

impl VocabularyExtractor {
    /// Compile the configured rules
    pub fn new(config: Config) -> Result<Self> {
        let rules = RuleSet::from_kinds(&config.extraction.rules)?;
        Self::with_rules(config, rules)
    }

    /// Use a caller-assembled rule set instead of `config.extraction.rules`
    pub fn with_rules(config: Config, rules: RuleSet) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            clusterer: LineClusterer::new(&config.layout),
            filter: config.filter.to_filter(),
            transliterator: Transliterator::new(),
            rules,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Append a custom rule with the lowest priority
    pub fn push_rule(&mut self, rule: Box<dyn PatternRule>) {
        self.rules.push(rule);
    }

    /// Read and extract from any input source, auto-detecting its format
    pub fn extract(&self, input: Input) -> Result<Extraction> {
        self.extract_as(input, InputFormat::Auto)
    }

    /// Read and extract, interpreting the input as `format`
    pub fn extract_as(&self, input: Input, format: InputFormat) -> Result<Extraction> {
        let extraction = match input.into_document(format)? {
            Document::Lines(lines) => self.extract_lines(&lines),
            Document::Fragments(fragments) => self.extract_fragments(&fragments),
        };
        Ok(extraction)
    }

    /// Cluster positioned fragments into lines, then extract
    pub fn extract_fragments(&self, fragments: &[RawTextFragment]) -> Extraction {
        let lines: Vec<String> = self
            .clusterer
            .cluster(fragments)
            .iter()
            .map(|line| line.text())
            .collect();
        self.extract_lines(&lines)
    }

    /// Extract from pre-split lines
    pub fn extract_lines<S: AsRef<str>>(&self, lines: &[S]) -> Extraction {
        let normalized: Vec<String> = lines
            .iter()
            .map(|line| normalize_line(line.as_ref()))
            .collect();

        let mut stats = ExtractionStats {
            candidate_lines: normalized.len(),
            ..Default::default()
        };
        let mut entries = Vec::new();
        let mut cursor = 0;

        while cursor < normalized.len() {
            let line = normalized[cursor].as_str();
            cursor += 1;

            if is_noise(line) {
                stats.noise_lines += 1;
                continue;
            }

            let fields = match self.rules.evaluate(line) {
                MatchOutcome::Matched { rule, mut fields } => {
                    if self.config.extraction.lookahead_reading && fields.wants_reading() {
                        if let Some(reading) = normalized
                            .get(cursor)
                            .filter(|next| script::is_hiragana_run(next) && !is_noise(next))
                        {
                            tracing::trace!(line, reading = reading.as_str(), "lookahead reading");
                            fields.merge_from(&PartialEntry::new("", reading.as_str(), ""));
                            stats.lookahead_merges += 1;
                            cursor += 1;
                        }
                    }
                    tracing::trace!(line, rule = rule.as_str(), "matched");
                    fields
                }
                MatchOutcome::Unmatched => fallback_fields(line),
            };

            if fields.is_empty() {
                tracing::debug!(line, "dropping unparsable line");
                stats.unparsable_lines += 1;
                continue;
            }

            let entry = fields.finish(&self.transliterator);
            match self.filter.accepts(&entry) {
                Ok(()) => entries.push(entry),
                Err(rejection) => {
                    tracing::debug!(line, %rejection, "rejecting entry");
                    stats.invalid_entries += 1;
                }
            }
        }

        stats.valid_entries = entries.len();
        tracing::info!(
            candidates = stats.candidate_lines,
            valid = stats.valid_entries,
            invalid = stats.invalid_entries,
            unparsable = stats.unparsable_lines,
            "extraction finished"
        );

        Extraction { entries, stats }
    }

    /// Fill the empty fields of a stored record from its source text.
    ///
    /// Fields already present in `existing` are never overwritten.
    pub fn refine(&self, mut existing: PartialEntry, source_text: &str) -> PartialEntry {
        let line = normalize_line(source_text);
        if is_noise(&line) {
            return existing;
        }
        let fields = match self.rules.evaluate(&line) {
            MatchOutcome::Matched { fields, .. } => fields,
            MatchOutcome::Unmatched => fallback_fields(&line),
        };
        existing.merge_from(&fields);
        existing
    }
}
