//! Lesson batching and the JSON envelope read by the study UI

use crate::config::LessonConfig;
use crate::entry::VocabularyEntry;
use crate::example::example_sentence;
use crate::extract::{Extraction, ExtractionStats};
use serde::{Deserialize, Serialize};

/// One vocabulary record inside a lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    pub id: String,
    #[serde(flatten)]
    pub entry: VocabularyEntry,
}

/// A contiguous batch of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub vocabulary_count: usize,
    pub vocabulary: Vec<VocabularyRecord>,
}

/// Aggregate counters written alongside the lessons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleStatistics {
    pub extracted_entries: usize,
    pub valid_entries: usize,
    /// Percentage with two decimals, e.g. `"87.50%"`
    pub success_rate: String,
    pub entries_with_kanji: usize,
    pub entries_with_hiragana: usize,
    pub entries_with_meaning: usize,
    pub unparsable_lines: usize,
    pub invalid_entries: usize,
    pub noise_lines: usize,
    pub lookahead_merges: usize,
    pub duplicates_removed: usize,
}

impl BundleStatistics {
    fn collect(stats: &ExtractionStats, entries: &[VocabularyEntry]) -> Self {
        Self {
            extracted_entries: stats.extracted_entries(),
            valid_entries: entries.len(),
            success_rate: format!("{:.2}%", stats.success_rate()),
            entries_with_kanji: entries.iter().filter(|e| !e.kanji.is_empty()).count(),
            entries_with_hiragana: entries.iter().filter(|e| !e.hiragana.is_empty()).count(),
            entries_with_meaning: entries.iter().filter(|e| !e.meaning.is_empty()).count(),
            unparsable_lines: stats.unparsable_lines,
            invalid_entries: stats.invalid_entries,
            noise_lines: stats.noise_lines,
            lookahead_merges: stats.lookahead_merges,
            duplicates_removed: stats.duplicates_removed,
        }
    }
}

/// Top-level output document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonBundle {
    pub title: String,
    pub description: String,
    pub lessons: Vec<Lesson>,
    pub total_lessons: usize,
    pub total_vocabulary: usize,
    pub statistics: BundleStatistics,
}

impl LessonBundle {
    /// Entries in lesson order
    pub fn entries(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.lessons
            .iter()
            .flat_map(|lesson| lesson.vocabulary.iter().map(|record| &record.entry))
    }
}

/// Post-processes an [`Extraction`] and groups it into lessons
#[derive(Debug, Clone, Default)]
pub struct LessonBuilder {
    config: LessonConfig,
}

impl LessonBuilder {
    pub fn new(config: LessonConfig) -> Self {
        Self { config }
    }

    /// Split `items` into `ceil(N / size)` contiguous batches in order.
    ///
    /// A `size` of zero is treated as one.
    pub fn partition<T>(items: &[T], size: usize) -> Vec<&[T]> {
        items.chunks(size.max(1)).collect()
    }

    /// Dedupe, sort, attach examples, then batch, each step as configured
    pub fn build(&self, mut extraction: Extraction) -> LessonBundle {
        if self.config.dedupe {
            let removed = extraction.dedupe();
            tracing::debug!(removed, "removed duplicate entries");
        }

        let Extraction {
            mut entries,
            stats,
        } = extraction;

        if self.config.sort_by_completeness {
            // stable: equal scores keep encounter order
            entries.sort_by_key(|entry| std::cmp::Reverse(entry.completeness_score()));
        }

        if self.config.generate_examples {
            for entry in &mut entries {
                if entry.example.is_none() {
                    entry.example = example_sentence(entry);
                }
            }
        }

        let statistics = BundleStatistics::collect(&stats, &entries);
        let lessons = self.batch(entries);

        LessonBundle {
            title: self.config.title.clone(),
            description: self.config.description.clone(),
            total_lessons: lessons.len(),
            total_vocabulary: lessons.iter().map(|lesson| lesson.vocabulary_count).sum(),
            lessons,
            statistics,
        }
    }

    fn batch(&self, entries: Vec<VocabularyEntry>) -> Vec<Lesson> {
        let size = self.config.size.max(1);
        let mut lessons: Vec<Lesson> = Vec::with_capacity(entries.len().div_ceil(size));
        let mut next_id = 1;

        for (index, entry) in entries.into_iter().enumerate() {
            if index % size == 0 {
                lessons.push(Lesson {
                    id: format!("lesson-{:03}", lessons.len() + 1),
                    title: String::new(),
                    description: String::new(),
                    vocabulary_count: 0,
                    vocabulary: Vec::with_capacity(size),
                });
            }
            if let Some(lesson) = lessons.last_mut() {
                lesson.vocabulary.push(VocabularyRecord {
                    id: format!("vocab-{next_id:04}"),
                    entry,
                });
                next_id += 1;
            }
        }

        let mut first = 1;
        for (number, lesson) in lessons.iter_mut().enumerate() {
            let count = lesson.vocabulary.len();
            let last = first + count - 1;
            lesson.vocabulary_count = count;
            lesson.title = format!("Lesson {}: Vocabulary {first}-{last}", number + 1);
            lesson.description = format!("{count} JLPT N3 vocabulary words ({first} to {last})");
            first = last + 1;
        }
        lessons
    }
}
