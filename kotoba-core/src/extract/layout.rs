//! Reconstruct candidate lines from positioned PDF text fragments

use super::normalize::{is_layout_noise, normalize_line};
use crate::config::LayoutConfig;
use crate::script::{self, CharacterClassifier};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// A piece of text as emitted by a PDF text layer.
///
/// Position fields are absent when the fragment did not come from a
/// positioned layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTextFragment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl RawTextFragment {
    /// Fragment with a position on an unspecified page
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x: Some(x),
            y: Some(y),
            page: None,
        }
    }

    /// Fragment without layout information
    pub fn unpositioned(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: None,
            y: None,
            page: None,
        }
    }

    pub fn on_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    fn page_key(&self) -> u32 {
        self.page.unwrap_or(0)
    }
}

/// Fragments judged to belong to one vocabulary entry
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateLine {
    pub fragments: SmallVec<[RawTextFragment; 4]>,
    pub page: Option<u32>,
}

impl CandidateLine {
    fn start(fragment: RawTextFragment) -> Self {
        let page = fragment.page;
        let mut fragments = SmallVec::new();
        fragments.push(fragment);
        Self { fragments, page }
    }

    /// Fragment texts joined by single spaces
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|fragment| fragment.text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Vertical position of the fragment that opened the line
    fn anchor_y(&self) -> Option<f32> {
        self.fragments.first().and_then(|fragment| fragment.y)
    }
}

/// Groups fragments into [`CandidateLine`]s using position and content.
#[derive(Debug, Clone)]
pub struct LineClusterer {
    sort_tolerance: f32,
    join_tolerance: f32,
}

impl Default for LineClusterer {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl LineClusterer {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            sort_tolerance: config.sort_tolerance,
            join_tolerance: config.join_tolerance,
        }
    }

    /// Cluster fragments in reading order.
    ///
    /// Noise fragments (headers, page numbers, box glyphs) are dropped before
    /// clustering. A page change always closes the open line.
    pub fn cluster(&self, fragments: &[RawTextFragment]) -> Vec<CandidateLine> {
        let ordered = self.reading_order(fragments);
        let mut lines = Vec::new();
        let mut current: Option<CandidateLine> = None;

        for fragment in ordered {
            if fragment.y.is_none() {
                lines.extend(current.take());
                lines.push(CandidateLine::start(fragment));
                continue;
            }

            current = match current.take() {
                Some(mut line) if self.joins(&line, &fragment) => {
                    line.fragments.push(fragment);
                    Some(line)
                }
                Some(line) => {
                    lines.push(line);
                    Some(CandidateLine::start(fragment))
                }
                None => Some(CandidateLine::start(fragment)),
            };
        }
        lines.extend(current);

        tracing::debug!(
            fragments = fragments.len(),
            lines = lines.len(),
            "clustered fragments"
        );
        lines
    }

    /// Page ascending, top to bottom, then left to right within a visual line.
    ///
    /// Fragments without a `y` keep their relative order at the end of their page.
    fn reading_order(&self, fragments: &[RawTextFragment]) -> Vec<RawTextFragment> {
        let mut ordered: Vec<RawTextFragment> = fragments
            .iter()
            .filter(|fragment| !is_layout_noise(&normalize_line(&fragment.text)))
            .cloned()
            .collect();

        ordered.sort_by(|a, b| {
            a.page_key()
                .cmp(&b.page_key())
                .then_with(|| match (a.y, b.y) {
                    (Some(ay), Some(by)) => by.total_cmp(&ay),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                })
        });

        let mut start = 0;
        while start < ordered.len() {
            let end = self.band_end(&ordered, start);
            ordered[start..end].sort_by(|a, b| {
                a.x.unwrap_or(0.0).total_cmp(&b.x.unwrap_or(0.0))
            });
            start = end;
        }
        ordered
    }

    /// Exclusive end of the visual line opened at `start`
    fn band_end(&self, ordered: &[RawTextFragment], start: usize) -> usize {
        let head = &ordered[start];
        let Some(head_y) = head.y else {
            return start + 1;
        };
        ordered[start + 1..]
            .iter()
            .position(|fragment| {
                fragment.page_key() != head.page_key()
                    || fragment
                        .y
                        .map_or(true, |y| (head_y - y).abs() >= self.sort_tolerance)
            })
            .map_or(ordered.len(), |offset| start + 1 + offset)
    }

    fn joins(&self, line: &CandidateLine, fragment: &RawTextFragment) -> bool {
        if line.page != fragment.page {
            return false;
        }
        let text = fragment.text.trim();
        if starts_new_entry(text) {
            return false;
        }
        let close = match (line.anchor_y(), fragment.y) {
            (Some(anchor), Some(y)) => (anchor - y).abs() < self.join_tolerance,
            _ => false,
        };
        close && looks_like_content(text)
    }
}

/// A bare kanji headword, or a leading enumerator such as `12.` or `③`
fn starts_new_entry(text: &str) -> bool {
    if script::is_kanji_run(text) {
        return true;
    }
    let numbered = text.strip_suffix('.').unwrap_or(text);
    if !numbered.is_empty() && numbered.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    text.chars()
        .next()
        .is_some_and(|c| script::CLASSIFIER.is_enumerator(c))
}

/// Reading or gloss text, never a bare number
fn looks_like_content(text: &str) -> bool {
    !script::is_digits(text) && (script::contains_hiragana(text) || script::contains_latin(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[CandidateLine]) -> Vec<String> {
        lines.iter().map(CandidateLine::text).collect()
    }

    #[test]
    fn test_single_row_forms_one_line() {
        let fragments = vec![
            RawTextFragment::new("chú ý", 120.0, 700.0),
            RawTextFragment::new("注意", 20.0, 700.0),
            RawTextFragment::new("ちゅうい", 60.0, 700.5),
        ];
        let lines = LineClusterer::default().cluster(&fragments);
        assert_eq!(texts(&lines), vec!["注意 ちゅうい chú ý"]);
    }

    #[test]
    fn test_rows_read_top_to_bottom() {
        let fragments = vec![
            RawTextFragment::new("家族", 20.0, 680.0),
            RawTextFragment::new("かぞく gia đình", 60.0, 680.0),
            RawTextFragment::new("注意", 20.0, 700.0),
            RawTextFragment::new("ちゅうい chú ý", 60.0, 700.0),
        ];
        let lines = LineClusterer::default().cluster(&fragments);
        assert_eq!(texts(&lines), vec!["注意 ちゅうい chú ý", "家族 かぞく gia đình"]);
    }

    #[test]
    fn test_kanji_fragment_opens_new_line() {
        // Same row, but a bare kanji run always starts a new entry
        let fragments = vec![
            RawTextFragment::new("注意", 20.0, 700.0),
            RawTextFragment::new("chú ý", 60.0, 700.0),
            RawTextFragment::new("決意", 200.0, 700.0),
            RawTextFragment::new("quyết tâm", 240.0, 700.0),
        ];
        let lines = LineClusterer::default().cluster(&fragments);
        assert_eq!(texts(&lines), vec!["注意 chú ý", "決意 quyết tâm"]);
    }

    #[test]
    fn test_distant_content_opens_new_line() {
        let fragments = vec![
            RawTextFragment::new("注意", 20.0, 700.0),
            RawTextFragment::new("chú ý", 60.0, 700.0),
            RawTextFragment::new("けつい", 20.0, 680.0),
        ];
        let lines = LineClusterer::default().cluster(&fragments);
        assert_eq!(texts(&lines), vec!["注意 chú ý", "けつい"]);
    }

    #[test]
    fn test_noise_fragments_skipped() {
        let fragments = vec![
            RawTextFragment::new("PART 1", 20.0, 750.0),
            RawTextFragment::new("□", 10.0, 700.0),
            RawTextFragment::new("注意", 20.0, 700.0),
            RawTextFragment::new("ちゅうい chú ý", 60.0, 700.0),
            RawTextFragment::new("12", 300.0, 40.0),
        ];
        let lines = LineClusterer::default().cluster(&fragments);
        assert_eq!(texts(&lines), vec!["注意 ちゅうい chú ý"]);
    }

    #[test]
    fn test_marker_word_fragment_kept_as_headword() {
        // 文法 is a header on its own row and a headword beside its reading
        let fragments = vec![
            RawTextFragment::new("文法", 20.0, 750.0),
            RawTextFragment::new("文法", 20.0, 700.0),
            RawTextFragment::new("ぶんぽう", 60.0, 700.0),
            RawTextFragment::new("ngữ pháp", 120.0, 700.0),
        ];
        let lines = LineClusterer::default().cluster(&fragments);
        assert_eq!(texts(&lines), vec!["文法", "文法 ぶんぽう ngữ pháp"]);
    }

    #[test]
    fn test_page_change_closes_line() {
        let fragments = vec![
            RawTextFragment::new("注意", 20.0, 100.0).on_page(1),
            RawTextFragment::new("chú ý", 60.0, 100.0).on_page(2),
        ];
        let lines = LineClusterer::default().cluster(&fragments);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].page, Some(1));
        assert_eq!(lines[1].page, Some(2));
    }

    #[test]
    fn test_pages_ordered_before_height() {
        let fragments = vec![
            RawTextFragment::new("家族 かぞく gia đình", 20.0, 700.0).on_page(2),
            RawTextFragment::new("注意 ちゅうい chú ý", 20.0, 100.0).on_page(1),
        ];
        let lines = LineClusterer::default().cluster(&fragments);
        assert_eq!(texts(&lines), vec!["注意 ちゅうい chú ý", "家族 かぞく gia đình"]);
    }

    #[test]
    fn test_unpositioned_fragment_is_own_line() {
        let fragments = vec![
            RawTextFragment::new("注意", 20.0, 700.0),
            RawTextFragment::unpositioned("ちゅうい"),
            RawTextFragment::new("chú ý", 60.0, 700.0),
        ];
        let lines = LineClusterer::default().cluster(&fragments);
        assert_eq!(texts(&lines), vec!["注意 chú ý", "ちゅうい"]);
    }

    #[test]
    fn test_numbered_marker_starts_entry() {
        assert!(starts_new_entry("12."));
        assert!(starts_new_entry("③ 注意"));
        assert!(starts_new_entry("決意"));
        assert!(!starts_new_entry("けつい"));
        assert!(!starts_new_entry("quyết tâm"));
    }

    #[test]
    fn test_fragment_json_shape() {
        let fragment: RawTextFragment =
            serde_json::from_str(r#"{"text": "注意", "x": 1.5, "y": 700}"#).unwrap();
        assert_eq!(fragment, RawTextFragment::new("注意", 1.5, 700.0));

        let bare: RawTextFragment = serde_json::from_str(r#"{"text": "けつい"}"#).unwrap();
        assert_eq!(bare, RawTextFragment::unpositioned("けつい"));
    }
}
