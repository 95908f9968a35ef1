//! Hiragana to romaji transliteration
//!
//! Scans left to right, trying two-character digraphs (きゃ → kya) before
//! single syllables. Characters found in neither table are copied through
//! unchanged, so Latin text embedded in a reading survives intact.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Palatalized syllables. Must be consulted before [`SYLLABLES`].
pub const DIGRAPHS: [(&str, &str); 36] = [
    ("きゃ", "kya"),
    ("きゅ", "kyu"),
    ("きょ", "kyo"),
    ("しゃ", "sha"),
    ("しゅ", "shu"),
    ("しょ", "sho"),
    ("ちゃ", "cha"),
    ("ちゅ", "chu"),
    ("ちょ", "cho"),
    ("にゃ", "nya"),
    ("にゅ", "nyu"),
    ("にょ", "nyo"),
    ("ひゃ", "hya"),
    ("ひゅ", "hyu"),
    ("ひょ", "hyo"),
    ("みゃ", "mya"),
    ("みゅ", "myu"),
    ("みょ", "myo"),
    ("りゃ", "rya"),
    ("りゅ", "ryu"),
    ("りょ", "ryo"),
    ("ぎゃ", "gya"),
    ("ぎゅ", "gyu"),
    ("ぎょ", "gyo"),
    ("じゃ", "ja"),
    ("じゅ", "ju"),
    ("じょ", "jo"),
    ("ぢゃ", "ja"),
    ("ぢゅ", "ju"),
    ("ぢょ", "jo"),
    ("びゃ", "bya"),
    ("びゅ", "byu"),
    ("びょ", "byo"),
    ("ぴゃ", "pya"),
    ("ぴゅ", "pyu"),
    ("ぴょ", "pyo"),
];

/// Base syllabary, gemination and long-vowel marks, and stray small kana.
pub const SYLLABLES: [(char, &str); 87] = [
    ('あ', "a"),
    ('い', "i"),
    ('う', "u"),
    ('え', "e"),
    ('お', "o"),
    ('か', "ka"),
    ('き', "ki"),
    ('く', "ku"),
    ('け', "ke"),
    ('こ', "ko"),
    ('が', "ga"),
    ('ぎ', "gi"),
    ('ぐ', "gu"),
    ('げ', "ge"),
    ('ご', "go"),
    ('さ', "sa"),
    ('し', "shi"),
    ('す', "su"),
    ('せ', "se"),
    ('そ', "so"),
    ('ざ', "za"),
    ('じ', "ji"),
    ('ず', "zu"),
    ('ぜ', "ze"),
    ('ぞ', "zo"),
    ('た', "ta"),
    ('ち', "chi"),
    ('つ', "tsu"),
    ('て', "te"),
    ('と', "to"),
    ('だ', "da"),
    ('ぢ', "di"),
    ('づ', "du"),
    ('で', "de"),
    ('ど', "do"),
    ('な', "na"),
    ('に', "ni"),
    ('ぬ', "nu"),
    ('ね', "ne"),
    ('の', "no"),
    ('は', "ha"),
    ('ひ', "hi"),
    ('ふ', "fu"),
    ('へ', "he"),
    ('ほ', "ho"),
    ('ば', "ba"),
    ('び', "bi"),
    ('ぶ', "bu"),
    ('べ', "be"),
    ('ぼ', "bo"),
    ('ぱ', "pa"),
    ('ぴ', "pi"),
    ('ぷ', "pu"),
    ('ぺ', "pe"),
    ('ぽ', "po"),
    ('ま', "ma"),
    ('み', "mi"),
    ('む', "mu"),
    ('め', "me"),
    ('も', "mo"),
    ('や', "ya"),
    ('ゆ', "yu"),
    ('よ', "yo"),
    ('ら', "ra"),
    ('り', "ri"),
    ('る', "ru"),
    ('れ', "re"),
    ('ろ', "ro"),
    ('わ', "wa"),
    ('ゐ', "wi"),
    ('ゑ', "we"),
    ('を', "wo"),
    ('ん', "n"),
    ('ゔ', "vu"),
    ('っ', ""),
    ('ー', ""),
    ('ぁ', "a"),
    ('ぃ', "i"),
    ('ぅ', "u"),
    ('ぇ', "e"),
    ('ぉ', "o"),
    ('ゃ', "ya"),
    ('ゅ', "yu"),
    ('ょ', "yo"),
    ('ゎ', "wa"),
    ('ゕ', "ka"),
    ('ゖ', "ke"),
];

/// Lookup tables built once from [`DIGRAPHS`] and [`SYLLABLES`]
#[derive(Debug)]
pub struct RomajiTable {
    digraphs: HashMap<(char, char), &'static str>,
    syllables: HashMap<char, &'static str>,
}

static TABLE: OnceLock<RomajiTable> = OnceLock::new();

impl RomajiTable {
    fn build() -> Self {
        let digraphs = DIGRAPHS
            .iter()
            .filter_map(|(kana, romaji)| {
                let mut chars = kana.chars();
                match (chars.next(), chars.next()) {
                    (Some(first), Some(second)) => Some(((first, second), *romaji)),
                    _ => None,
                }
            })
            .collect();
        let syllables = SYLLABLES.iter().copied().collect();

        Self {
            digraphs,
            syllables,
        }
    }

    /// Shared table instance
    pub fn get() -> &'static RomajiTable {
        TABLE.get_or_init(Self::build)
    }

    /// Romaji for a two-character digraph
    #[inline]
    pub fn digraph(&self, first: char, second: char) -> Option<&'static str> {
        self.digraphs.get(&(first, second)).copied()
    }

    /// Romaji for a single kana
    #[inline]
    pub fn syllable(&self, ch: char) -> Option<&'static str> {
        self.syllables.get(&ch).copied()
    }
}

/// Stateless hiragana → romaji transliterator
#[derive(Debug, Clone, Copy, Default)]
pub struct Transliterator;

impl Transliterator {
    pub fn new() -> Self {
        Self
    }

    /// Romanize `text`. Total over any input.
    pub fn transliterate(&self, text: &str) -> String {
        let table = RomajiTable::get();
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            if let Some(&next) = chars.peek() {
                if let Some(romaji) = table.digraph(ch, next) {
                    out.push_str(romaji);
                    chars.next();
                    continue;
                }
            }
            match table.syllable(ch) {
                Some(romaji) => out.push_str(romaji),
                None => out.push(ch),
            }
        }

        out
    }
}

/// Romanize `text` with the shared table
pub fn transliterate(text: &str) -> String {
    Transliterator.transliterate(text)
}
