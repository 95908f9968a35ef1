//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use kotoba_core::LessonBundle;
use std::io::Write;

/// One tab-separated entry per line: kanji, hiragana, pronunciation, meaning
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_bundle(&mut self, bundle: &LessonBundle) -> Result<()> {
        for lesson in &bundle.lessons {
            writeln!(self.writer, "# {}", lesson.title)?;
            for record in &lesson.vocabulary {
                let entry = &record.entry;
                writeln!(
                    self.writer,
                    "{}\t{}\t{}\t{}",
                    entry.kanji, entry.hiragana, entry.pronunciation, entry.meaning
                )?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
