//! Vocabulary reconstruction for JLPT study material
//!
//! This crate rebuilds dictionary-style vocabulary records out of noisy text
//! taken from PDF workbooks. Each record carries the kanji headword, its
//! hiragana reading, a romanized pronunciation and a target-language meaning.
//!
//! # Pipeline
//!
//! 1. **Layout**: positioned fragments are put into reading order and
//!    clustered into candidate lines ([`LineClusterer`]).
//! 2. **Rules**: each line is matched against an ordered [`RuleSet`], with a
//!    longest-run fallback when no rule applies.
//! 3. **Filter**: entries without Japanese content or a usable meaning are
//!    dropped ([`ValidityFilter`]).
//! 4. **Lessons**: valid entries are batched into a [`LessonBundle`].
//!
//! # Example
//!
//! ```rust
//! use kotoba_core::{Config, LessonBuilder, VocabularyExtractor};
//!
//! let extractor = VocabularyExtractor::new(Config::default()).unwrap();
//! let extraction = extractor.extract_lines(&["注意 ちゅうい chú ý", "決意 quyết tâm", "けつい"]);
//!
//! assert_eq!(extraction.entries.len(), 2);
//! assert_eq!(extraction.entries[0].pronunciation, "chuui");
//! assert_eq!(extraction.entries[1].hiragana, "けつい");
//!
//! let bundle = LessonBuilder::default().build(extraction);
//! assert_eq!(bundle.lessons[0].id, "lesson-001");
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod example;
pub mod extract;
pub mod filter;
pub mod input;
pub mod lessons;
pub mod romaji;
pub mod script;

pub use config::{Config, ConfigBuilder};
pub use entry::{PartialEntry, VocabularyEntry};
pub use error::{Error, Result};
pub use extract::layout::{CandidateLine, LineClusterer, RawTextFragment};
pub use extract::rules::{fallback_fields, MatchOutcome, PatternRule, RuleKind, RuleSet};
pub use extract::{Extraction, ExtractionStats, VocabularyExtractor};
pub use filter::{Rejection, ValidityFilter};
pub use input::{Document, Input, InputFormat};
pub use lessons::{BundleStatistics, Lesson, LessonBuilder, LessonBundle, VocabularyRecord};
pub use romaji::{transliterate, Transliterator};
