//! Input sources for extraction

use crate::error::{Error, Result};
use crate::extract::layout::RawTextFragment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Where extraction input comes from
pub enum Input {
    /// Plain text, one candidate line per text line, or a JSON document
    Text(String),
    /// Pre-split lines
    Lines(Vec<String>),
    /// Positioned fragments from a PDF text layer
    Fragments(Vec<RawTextFragment>),
    /// File path input
    File(PathBuf),
    /// Raw bytes input, must be UTF-8
    Bytes(Vec<u8>),
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Text(text) => f
                .debug_struct("Input::Text")
                .field("length", &text.len())
                .finish(),
            Input::Lines(lines) => f
                .debug_struct("Input::Lines")
                .field("count", &lines.len())
                .finish(),
            Input::Fragments(fragments) => f
                .debug_struct("Input::Fragments")
                .field("count", &fragments.len())
                .finish(),
            Input::File(path) => f.debug_struct("Input::File").field("path", path).finish(),
            Input::Bytes(bytes) => f
                .debug_struct("Input::Bytes")
                .field("length", &bytes.len())
                .finish(),
        }
    }
}

/// How textual input should be interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// JSON array of strings or fragment objects, otherwise plain lines
    #[default]
    Auto,
    /// Plain text lines, or a JSON array of strings
    Lines,
    /// JSON array of `{text, x, y, page}` objects
    Fragments,
}

impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "lines" | "text" => Ok(InputFormat::Lines),
            "fragments" | "pdf" => Ok(InputFormat::Fragments),
            other => Err(Error::InvalidInput(format!("unknown input format '{other}'"))),
        }
    }
}

/// Input resolved into something the extractor can walk
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Lines(Vec<String>),
    Fragments(Vec<RawTextFragment>),
}

impl Document {
    pub fn len(&self) -> usize {
        match self {
            Document::Lines(lines) => lines.len(),
            Document::Fragments(fragments) => fragments.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Input {
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    pub fn from_lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Input::Lines(lines.into_iter().map(Into::into).collect())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Input::File(path.as_ref().to_path_buf())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Read the source and interpret it according to `format`.
    ///
    /// Unreadable files and invalid UTF-8 are [`Error::Source`]; a document
    /// that looks like JSON but does not parse is [`Error::InvalidInput`].
    pub fn into_document(self, format: InputFormat) -> Result<Document> {
        match self {
            Input::Lines(lines) => Ok(Document::Lines(lines)),
            Input::Fragments(fragments) => Ok(Document::Fragments(fragments)),
            Input::Text(text) => parse_document(&text, format),
            Input::Bytes(bytes) => parse_document(&decode(bytes)?, format),
            Input::File(path) => {
                let bytes = std::fs::read(&path).map_err(|e| {
                    Error::Source(format!("Failed to read file {}: {e}", path.display()))
                })?;
                let text = decode(bytes)
                    .map_err(|e| Error::Source(format!("{}: {e}", path.display())))?;
                parse_document(&text, format)
            }
        }
    }
}

fn decode(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| Error::Source(format!("Invalid UTF-8 encoding: {e}")))
}

fn looks_like_json_array(text: &str) -> bool {
    text.trim_start().trim_start_matches('\u{feff}').starts_with('[')
}

fn parse_document(text: &str, format: InputFormat) -> Result<Document> {
    let body = text.trim_start_matches('\u{feff}');
    match format {
        InputFormat::Lines if looks_like_json_array(body) => serde_json::from_str(body)
            .map(Document::Lines)
            .map_err(|e| Error::InvalidInput(format!("expected a JSON array of strings: {e}"))),
        InputFormat::Lines => Ok(Document::Lines(body.lines().map(str::to_string).collect())),
        InputFormat::Fragments => serde_json::from_str(body)
            .map(Document::Fragments)
            .map_err(|e| Error::InvalidInput(format!("expected a JSON array of fragments: {e}"))),
        InputFormat::Auto if looks_like_json_array(body) => detect_json(body),
        InputFormat::Auto => Ok(Document::Lines(body.lines().map(str::to_string).collect())),
    }
}

/// Strings become lines, objects become fragments; anything else is rejected
fn detect_json(body: &str) -> Result<Document> {
    let values: Vec<serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| Error::InvalidInput(format!("malformed JSON document: {e}")))?;

    if values.iter().all(serde_json::Value::is_string) {
        let lines = values
            .into_iter()
            .filter_map(|value| value.as_str().map(str::to_string))
            .collect();
        return Ok(Document::Lines(lines));
    }

    if values.iter().all(serde_json::Value::is_object) {
        let fragments = values
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<RawTextFragment>, _>>()
            .map_err(|e| Error::InvalidInput(format!("invalid fragment: {e}")))?;
        return Ok(Document::Fragments(fragments));
    }

    Err(Error::InvalidInput(
        "JSON input must be an array of strings or an array of fragment objects".into(),
    ))
}
