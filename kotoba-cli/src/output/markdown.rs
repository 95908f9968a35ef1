//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use kotoba_core::LessonBundle;
use std::io::Write;

/// One table per lesson with a totals footer
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    vocabulary_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            vocabulary_count: 0,
        }
    }
}

/// Pipes would break the table
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_bundle(&mut self, bundle: &LessonBundle) -> Result<()> {
        writeln!(self.writer, "# {}", bundle.title)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", bundle.description)?;

        for lesson in &bundle.lessons {
            writeln!(self.writer)?;
            writeln!(self.writer, "## {}", lesson.title)?;
            writeln!(self.writer)?;
            writeln!(self.writer, "| Kanji | Hiragana | Romaji | Meaning |")?;
            writeln!(self.writer, "|---|---|---|---|")?;
            for record in &lesson.vocabulary {
                let entry = &record.entry;
                writeln!(
                    self.writer,
                    "| {} | {} | {} | {} |",
                    cell(&entry.kanji),
                    cell(&entry.hiragana),
                    cell(&entry.pronunciation),
                    cell(&entry.meaning)
                )?;
            }
            self.vocabulary_count += lesson.vocabulary_count;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total vocabulary: {}*", self.vocabulary_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
