//! Templated example sentences
//!
//! The template for a word is picked from its code points, so the same entry
//! always gets the same sentence.

use crate::entry::VocabularyEntry;

struct Template {
    japanese: &'static str,
    reading: &'static str,
    translation: &'static str,
}

const TEMPLATES: [Template; 5] = [
    Template {
        japanese: "{word}は大切です。",
        reading: "({reading} wa taisetsu desu.)",
        translation: "{meaning} là quan trọng.",
    },
    Template {
        japanese: "私は{word}が好きです。",
        reading: "(Watashi wa {reading} ga suki desu.)",
        translation: "Tôi thích {meaning}.",
    },
    Template {
        japanese: "{word}について勉強します。",
        reading: "({reading} ni tsuite benkyou shimasu.)",
        translation: "Học về {meaning}.",
    },
    Template {
        japanese: "{word}は便利です。",
        reading: "({reading} wa benri desu.)",
        translation: "{meaning} rất tiện lợi.",
    },
    Template {
        japanese: "毎日{word}を使います。",
        reading: "(Mainichi {reading} wo tsukaimasu.)",
        translation: "Hàng ngày sử dụng {meaning}.",
    },
];

/// Index of the template used for `word`
pub fn template_index(word: &str) -> usize {
    let sum: u64 = word.chars().map(|c| u64::from(u32::from(c))).sum();
    (sum % TEMPLATES.len() as u64) as usize
}

/// Example sentence for an entry, or `None` when it has no headword
pub fn example_sentence(entry: &VocabularyEntry) -> Option<String> {
    let word = entry.headword();
    if word.is_empty() {
        return None;
    }
    let template = &TEMPLATES[template_index(word)];

    let mut sentence = template.japanese.replace("{word}", word);
    if !entry.hiragana.is_empty() {
        sentence.push_str(&template.reading.replace("{reading}", &entry.hiragana));
    }
    sentence.push_str(" - ");
    sentence.push_str(&template.translation.replace("{meaning}", &entry.meaning));
    Some(sentence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::PartialEntry;
    use crate::romaji::Transliterator;

    #[test]
    fn test_deterministic() {
        let entry = PartialEntry::new("注意", "ちゅうい", "chú ý").finish(&Transliterator);
        assert_eq!(example_sentence(&entry), example_sentence(&entry));
    }

    #[test]
    fn test_template_index_is_code_point_sum() {
        // 'a' + 'b' = 97 + 98 = 195, 195 % 5 = 0
        assert_eq!(template_index("ab"), 0);
        // 'a' = 97, 97 % 5 = 2
        assert_eq!(template_index("a"), 2);
    }

    #[test]
    fn test_rendering() {
        // 家 = U+5BB6 = 23478, 23478 % 5 = 3
        let entry = PartialEntry::new("家", "いえ", "nhà").finish(&Transliterator);
        assert_eq!(
            example_sentence(&entry).unwrap(),
            "家は便利です。(いえ wa benri desu.) - nhà rất tiện lợi."
        );

        let bare = PartialEntry::new("家", "", "nhà").finish(&Transliterator);
        assert_eq!(
            example_sentence(&bare).unwrap(),
            "家は便利です。 - nhà rất tiện lợi."
        );
    }

    #[test]
    fn test_no_headword() {
        let entry = PartialEntry::new("", "", "nhà").finish(&Transliterator);
        assert_eq!(example_sentence(&entry), None);
    }
}
