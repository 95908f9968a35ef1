//! Validity filter applied to every extracted entry

use crate::entry::VocabularyEntry;
use std::fmt;

/// Default junk tokens that disqualify a meaning
pub const DEFAULT_DENYLIST: [&str; 4] = ["PART", "まとめ", "□", "■"];

/// Why an entry was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Neither kanji nor hiragana present
    MissingJapanese,
    /// Meaning empty or shorter than the configured minimum
    MeaningTooShort,
    /// Meaning contains a denylisted token
    DenylistedMeaning(String),
    /// Meaning is made of digits and punctuation only
    NumericMeaning,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingJapanese => write!(f, "no kanji or hiragana"),
            Rejection::MeaningTooShort => write!(f, "meaning too short"),
            Rejection::DenylistedMeaning(token) => write!(f, "meaning contains '{token}'"),
            Rejection::NumericMeaning => write!(f, "meaning is numeric"),
        }
    }
}

/// Predicate deciding whether an entry is worth keeping.
///
/// Pure and order-independent, so applying it twice is the same as once.
#[derive(Debug, Clone)]
pub struct ValidityFilter {
    min_meaning_chars: usize,
    denylist: Vec<String>,
}

impl Default for ValidityFilter {
    fn default() -> Self {
        Self::new(2, DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect())
    }
}

impl ValidityFilter {
    pub fn new(min_meaning_chars: usize, denylist: Vec<String>) -> Self {
        Self {
            min_meaning_chars,
            denylist,
        }
    }

    /// Check a single entry
    pub fn accepts(&self, entry: &VocabularyEntry) -> Result<(), Rejection> {
        if !entry.has_japanese() {
            return Err(Rejection::MissingJapanese);
        }

        let meaning = entry.meaning.trim();
        if meaning.chars().count() < self.min_meaning_chars.max(1) {
            return Err(Rejection::MeaningTooShort);
        }
        if let Some(token) = self
            .denylist
            .iter()
            .find(|token| !token.is_empty() && meaning.contains(token.as_str()))
        {
            return Err(Rejection::DenylistedMeaning(token.clone()));
        }
        if meaning
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || c.is_ascii_punctuation())
        {
            return Err(Rejection::NumericMeaning);
        }

        Ok(())
    }

    /// Keep only the entries this filter accepts, in their original order
    pub fn retain_valid(&self, entries: Vec<VocabularyEntry>) -> Vec<VocabularyEntry> {
        entries
            .into_iter()
            .filter(|entry| self.accepts(entry).is_ok())
            .collect()
    }
}
