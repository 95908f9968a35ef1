//! Ordered pattern rules for splitting a line into kanji / hiragana / meaning
//!
//! Rules are tried in priority order and the first match wins. A line that
//! no rule matches can still be mined with [`fallback_fields`].

use crate::entry::PartialEntry;
use crate::error::Result;
use crate::script::{self, CharClass};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const KANJI: &str = "[一-龯々]";
const HIRAGANA: &str = "[ぁ-ゖー]";
/// Characters allowed in a bare gloss: Latin letters, marks, spaces, light punctuation
const GLOSS: &str = r"[\p{Latin}\p{M}\s,.;/\-]";

/// Strategy for extracting fields from a normalized line
pub trait PatternRule: Send + Sync {
    /// Stable identifier reported in match outcomes
    fn name(&self) -> &str;

    /// Extract fields, or `None` when the line does not fit this rule
    fn apply(&self, line: &str) -> Option<PartialEntry>;
}

/// Built-in rule shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// `注意 ちゅうい chú ý`
    KanjiHiraganaMeaning,
    /// `家族 (かぞく) gia đình`, full-width or ASCII parentheses
    KanjiParenHiraganaMeaning,
    /// `決意 quyết tâm`, gloss only
    KanjiMeaning,
    /// `ちゅうい chú ý`
    HiraganaMeaning,
}

impl RuleKind {
    pub const STANDARD_ORDER: [RuleKind; 4] = [
        RuleKind::KanjiHiraganaMeaning,
        RuleKind::KanjiParenHiraganaMeaning,
        RuleKind::KanjiMeaning,
        RuleKind::HiraganaMeaning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::KanjiHiraganaMeaning => "kanji-hiragana-meaning",
            RuleKind::KanjiParenHiraganaMeaning => "kanji-paren-hiragana-meaning",
            RuleKind::KanjiMeaning => "kanji-meaning",
            RuleKind::HiraganaMeaning => "hiragana-meaning",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RuleKind::KanjiHiraganaMeaning => "kanji, reading and meaning separated by spaces",
            RuleKind::KanjiParenHiraganaMeaning => "kanji followed by the reading in parentheses",
            RuleKind::KanjiMeaning => "kanji followed by a Latin-script meaning only",
            RuleKind::HiraganaMeaning => "reading followed by a Latin-script meaning only",
        }
    }

    fn pattern(&self) -> String {
        match self {
            RuleKind::KanjiHiraganaMeaning => format!(r"({KANJI}+)\s+({HIRAGANA}+)\s+(.+)"),
            RuleKind::KanjiParenHiraganaMeaning => {
                format!(r"({KANJI}+)\s*[（(]\s*({HIRAGANA}+)\s*[）)]\s*(.+)")
            }
            RuleKind::KanjiMeaning => format!(r"^({KANJI}+)\s+({GLOSS}+)$"),
            RuleKind::HiraganaMeaning => format!(r"^({HIRAGANA}+)\s+({GLOSS}+)$"),
        }
    }

    /// Compile this shape into a rule
    pub fn compile(self) -> Result<RegexRule> {
        Ok(RegexRule {
            kind: self,
            regex: Regex::new(&self.pattern())?,
        })
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A built-in rule backed by a compiled regex
#[derive(Debug, Clone)]
pub struct RegexRule {
    kind: RuleKind,
    regex: Regex,
}

impl PatternRule for RegexRule {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn apply(&self, line: &str) -> Option<PartialEntry> {
        let caps = self.regex.captures(line)?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str().trim());

        let fields = match self.kind {
            RuleKind::KanjiHiraganaMeaning | RuleKind::KanjiParenHiraganaMeaning => {
                PartialEntry::new(group(1), group(2), group(3))
            }
            RuleKind::KanjiMeaning => PartialEntry::new(group(1), "", group(2)),
            RuleKind::HiraganaMeaning => PartialEntry::new("", group(1), group(2)),
        };
        Some(fields)
    }
}

/// Result of running a rule set over one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched { rule: String, fields: PartialEntry },
    Unmatched,
}

/// Rules evaluated in priority order
pub struct RuleSet {
    rules: Vec<Box<dyn PatternRule>>,
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}

impl RuleSet {
    /// Empty rule set; every line is `Unmatched`
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Compile the given built-in shapes, keeping their order
    pub fn from_kinds(kinds: &[RuleKind]) -> Result<Self> {
        let rules = kinds
            .iter()
            .map(|kind| {
                kind.compile()
                    .map(|rule| Box::new(rule) as Box<dyn PatternRule>)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// The four built-in rules in their standard priority
    pub fn standard() -> Result<Self> {
        Self::from_kinds(&RuleKind::STANDARD_ORDER)
    }

    /// Append a rule with the lowest priority
    pub fn push(&mut self, rule: Box<dyn PatternRule>) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in priority order
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// First matching rule wins
    pub fn evaluate(&self, line: &str) -> MatchOutcome {
        self.rules
            .iter()
            .find_map(|rule| {
                rule.apply(line).map(|fields| MatchOutcome::Matched {
                    rule: rule.name().to_string(),
                    fields,
                })
            })
            .unwrap_or(MatchOutcome::Unmatched)
    }
}

/// Best-effort mining of a line no rule matched.
///
/// Picks the longest kanji run, the longest hiragana run and the longest
/// Latin-script gloss anywhere in the line. Fields may come back empty.
pub fn fallback_fields(line: &str) -> PartialEntry {
    PartialEntry::new(
        script::longest_run(line, CharClass::Kanji),
        script::longest_run(line, CharClass::Hiragana),
        longest_gloss(line),
    )
}

/// Longest span that starts with a Latin letter and continues over letters,
/// marks, spaces and `,.-`, trimmed
fn longest_gloss(line: &str) -> &str {
    let starts = |c: char| script::is_latin(c) && c.is_alphabetic();
    let continues = |c: char| script::is_latin(c) || matches!(c, ' ' | ',' | '.' | '-');

    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    for (idx, ch) in line.char_indices() {
        if let Some(begin) = start {
            if continues(ch) {
                continue;
            }
            spans.push(&line[begin..idx]);
            start = None;
        }
        if starts(ch) {
            start = Some(idx);
        }
    }
    if let Some(begin) = start {
        spans.push(&line[begin..]);
    }

    spans
        .into_iter()
        .map(|span| span.trim_end_matches([' ', ',', '.', '-']))
        .fold("", |best, span| {
            if span.chars().count() > best.chars().count() {
                span
            } else {
                best
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(outcome: MatchOutcome) -> (String, PartialEntry) {
        match outcome {
            MatchOutcome::Matched { rule, fields } => (rule, fields),
            MatchOutcome::Unmatched => panic!("expected a match"),
        }
    }

    #[test]
    fn test_kanji_hiragana_meaning() {
        let rules = RuleSet::standard().unwrap();
        let (rule, fields) = matched(rules.evaluate("注意 ちゅうい chú ý"));
        assert_eq!(rule, "kanji-hiragana-meaning");
        assert_eq!(fields, PartialEntry::new("注意", "ちゅうい", "chú ý"));
    }

    #[test]
    fn test_meaning_may_contain_digits() {
        let rules = RuleSet::standard().unwrap();
        let (_, fields) = matched(rules.evaluate("億 おく 100 triệu yên"));
        assert_eq!(fields, PartialEntry::new("億", "おく", "100 triệu yên"));
    }

    #[test]
    fn test_parenthesized_reading() {
        let rules = RuleSet::standard().unwrap();
        for line in ["家族 (かぞく) gia đình", "家族（かぞく）gia đình"] {
            let (rule, fields) = matched(rules.evaluate(line));
            assert_eq!(rule, "kanji-paren-hiragana-meaning");
            assert_eq!(fields, PartialEntry::new("家族", "かぞく", "gia đình"));
        }
    }

    #[test]
    fn test_kanji_meaning() {
        let rules = RuleSet::standard().unwrap();
        let (rule, fields) = matched(rules.evaluate("決意 quyết tâm"));
        assert_eq!(rule, "kanji-meaning");
        assert_eq!(fields, PartialEntry::new("決意", "", "quyết tâm"));
        assert!(fields.wants_reading());
    }

    #[test]
    fn test_kanji_meaning_rejects_mixed_gloss() {
        let rules = RuleSet::from_kinds(&[RuleKind::KanjiMeaning]).unwrap();
        assert_eq!(rules.evaluate("決意 quyết 心"), MatchOutcome::Unmatched);
    }

    #[test]
    fn test_hiragana_meaning() {
        let rules = RuleSet::standard().unwrap();
        let (rule, fields) = matched(rules.evaluate("ちゅうい chú ý"));
        assert_eq!(rule, "hiragana-meaning");
        assert_eq!(fields, PartialEntry::new("", "ちゅうい", "chú ý"));
    }

    #[test]
    fn test_priority_order_is_respected() {
        // With kanji-meaning first, a three-field line falls through it
        // because the gloss class forbids hiragana
        let rules =
            RuleSet::from_kinds(&[RuleKind::KanjiMeaning, RuleKind::KanjiHiraganaMeaning]).unwrap();
        let (rule, _) = matched(rules.evaluate("注意 ちゅうい chú ý"));
        assert_eq!(rule, "kanji-hiragana-meaning");

        let reversed =
            RuleSet::from_kinds(&[RuleKind::HiraganaMeaning, RuleKind::KanjiMeaning]).unwrap();
        assert_eq!(reversed.names(), vec!["hiragana-meaning", "kanji-meaning"]);
    }

    #[test]
    fn test_unmatched() {
        let rules = RuleSet::standard().unwrap();
        assert_eq!(rules.evaluate("just some words"), MatchOutcome::Unmatched);
        assert_eq!(RuleSet::empty().evaluate("注意 ちゅうい chú ý"), MatchOutcome::Unmatched);
    }

    struct KatakanaRule;

    impl PatternRule for KatakanaRule {
        fn name(&self) -> &str {
            "katakana"
        }

        fn apply(&self, line: &str) -> Option<PartialEntry> {
            let (word, meaning) = line.split_once(' ')?;
            word.chars()
                .all(|c| ('\u{30A1}'..='\u{30FA}').contains(&c))
                .then(|| PartialEntry::new("", "", meaning))
        }
    }

    #[test]
    fn test_custom_rule_appended() {
        let mut rules = RuleSet::standard().unwrap();
        rules.push(Box::new(KatakanaRule));
        assert_eq!(rules.len(), 5);
        let (rule, fields) = matched(rules.evaluate("テスト kiểm tra"));
        assert_eq!(rule, "katakana");
        assert_eq!(fields.meaning, "kiểm tra");
    }

    #[test]
    fn test_fallback_picks_longest_runs() {
        let fields = fallback_fields("① 注意する ちゅうい: chú ý, cẩn thận 1");
        assert_eq!(fields.kanji, "注意");
        assert_eq!(fields.hiragana, "ちゅうい");
        assert_eq!(fields.meaning, "chú ý, cẩn thận");
    }

    #[test]
    fn test_fallback_on_noise_is_empty() {
        assert!(fallback_fields("12 34 ・・・").is_empty());
    }

    #[test]
    fn test_rule_kind_serde_names() {
        let json = serde_json::to_string(&RuleKind::KanjiParenHiraganaMeaning).unwrap();
        assert_eq!(json, "\"kanji-paren-hiragana-meaning\"");
        for kind in RuleKind::STANDARD_ORDER {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
