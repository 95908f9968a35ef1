//! Output formatting module

use anyhow::Result;
use kotoba_core::LessonBundle;
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format a lesson bundle
    fn format_bundle(&mut self, bundle: &LessonBundle) -> Result<()>;

    /// Flush and write any trailer
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Lesson bundle as JSON, the shape the study app reads
    Json,
    /// Tab-separated entries grouped by lesson
    Text,
    /// Markdown tables, one per lesson
    Markdown,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Json, OutputFormat::Text, OutputFormat::Markdown];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Json => "Lesson bundle envelope with statistics",
            OutputFormat::Text => "One tab-separated entry per line, grouped by lesson",
            OutputFormat::Markdown => "One table per lesson",
        }
    }

    /// Build a formatter writing to `writer`
    pub fn formatter<'a, W: Write + Send + Sync + 'a>(
        &self,
        writer: W,
    ) -> Box<dyn OutputFormatter + 'a> {
        match self {
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        }
    }
}
