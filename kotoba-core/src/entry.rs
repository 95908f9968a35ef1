//! Vocabulary entry types

use crate::romaji::Transliterator;
use serde::{Deserialize, Serialize};

/// Fields recovered from a line before validation.
///
/// Empty strings mean "not found". Merging never overwrites a field that is
/// already populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialEntry {
    #[serde(default)]
    pub kanji: String,
    #[serde(default)]
    pub hiragana: String,
    #[serde(default)]
    pub meaning: String,
}

impl PartialEntry {
    pub fn new(
        kanji: impl Into<String>,
        hiragana: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            kanji: kanji.into(),
            hiragana: hiragana.into(),
            meaning: meaning.into(),
        }
    }

    /// No field populated
    pub fn is_empty(&self) -> bool {
        self.kanji.is_empty() && self.hiragana.is_empty() && self.meaning.is_empty()
    }

    /// A kanji + meaning pair still missing its reading
    pub fn wants_reading(&self) -> bool {
        !self.kanji.is_empty() && !self.meaning.is_empty() && self.hiragana.is_empty()
    }

    /// First-non-empty-wins merge: fills only the fields still empty in `self`
    pub fn merge_from(&mut self, other: &PartialEntry) {
        fill(&mut self.kanji, &other.kanji);
        fill(&mut self.hiragana, &other.hiragana);
        fill(&mut self.meaning, &other.meaning);
    }

    /// Derive the pronunciation and produce a finished entry
    pub fn finish(self, transliterator: &Transliterator) -> VocabularyEntry {
        let pronunciation = transliterator.transliterate(&self.hiragana);
        VocabularyEntry {
            kanji: self.kanji,
            hiragana: self.hiragana,
            pronunciation,
            meaning: self.meaning,
            example: None,
        }
    }
}

fn fill(slot: &mut String, candidate: &str) {
    if slot.is_empty() && !candidate.is_empty() {
        *slot = candidate.to_string();
    }
}

/// A parsed vocabulary record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub kanji: String,
    pub hiragana: String,
    /// Romanized reading of `hiragana`
    pub pronunciation: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl VocabularyEntry {
    /// Kanji or hiragana present
    pub fn has_japanese(&self) -> bool {
        !self.kanji.is_empty() || !self.hiragana.is_empty()
    }

    /// Headword shown to the learner: kanji when present, else the reading
    pub fn headword(&self) -> &str {
        if self.kanji.is_empty() {
            &self.hiragana
        } else {
            &self.kanji
        }
    }

    /// Data-richness score in `0..=3`, used by the optional completeness sort
    pub fn completeness_score(&self) -> u8 {
        let mut score = 0;
        if !self.kanji.is_empty() {
            score += 1;
        }
        if !self.hiragana.is_empty() {
            score += 1;
        }
        if self.meaning.chars().count() > 1 {
            score += 1;
        }
        score
    }

    /// Key used when deduplicating
    pub(crate) fn identity(&self) -> (&str, &str, &str) {
        (&self.kanji, &self.hiragana, &self.meaning)
    }
}
