//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use kotoba_core::LessonBundle;
use std::io::Write;

/// Writes the lesson bundle envelope as pretty-printed JSON
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_bundle(&mut self, bundle: &LessonBundle) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, bundle)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
