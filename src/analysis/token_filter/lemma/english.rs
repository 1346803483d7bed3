//! English lemmatizer implementation.
//!
//! A fixed, rule-based lemmatizer for English. It reduces inflected forms to
//! a base form in two layers:
//!
//! 1. A table of irregular forms (`ran` → `run`, `was` → `be`,
//!    `children` → `child`, ...), and a list of words that only look
//!    inflected (`morning`, `always`, `news`, ...), which are kept as they are.
//! 2. Inflectional suffix rules for regular forms: plurals and third person
//!    `-s`/`-es`/`-ies`, and verbal `-ed`/`-ing`, followed by the Porter
//!    step 1b stem repair (`hop` + `ing` → `hope`, `runn` → `run`).
//!
//! Rules are reapplied until the word no longer changes, so every lemma is a
//! fixed point. Words that are not plain lowercase ASCII letters are only
//! looked up in the irregular table.
//!
//! # Examples
//!
//! ```
//! use parley::analysis::token_filter::lemma::Lemmatizer;
//! use parley::analysis::token_filter::lemma::english::EnglishLemmatizer;
//!
//! let lemmatizer = EnglishLemmatizer::new();
//!
//! assert_eq!(lemmatizer.lemmatize("filing"), "file");
//! assert_eq!(lemmatizer.lemmatize("files"), "file");
//! assert_eq!(lemmatizer.lemmatize("ran"), "run");
//! ```

use std::collections::{HashMap, HashSet};

use crate::analysis::token_filter::lemma::Lemmatizer;

/// Irregular inflections and their lemmas. Every lemma here must itself be
/// left unchanged by the suffix rules.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("am", "be"),
    ("are", "be"),
    ("is", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("doing", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("ran", "run"),
    ("made", "make"),
    ("got", "get"),
    ("gotten", "get"),
    ("said", "say"),
    ("says", "say"),
    ("paid", "pay"),
    ("told", "tell"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("took", "take"),
    ("taken", "take"),
    ("came", "come"),
    ("saw", "see"),
    ("seen", "see"),
    ("gave", "give"),
    ("given", "give"),
    ("found", "find"),
    ("felt", "feel"),
    ("kept", "keep"),
    ("sent", "send"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("wrote", "write"),
    ("written", "write"),
    ("brought", "bring"),
    ("bought", "buy"),
    ("began", "begin"),
    ("begun", "begin"),
    ("abused", "abuse"),
    ("abusing", "abuse"),
    ("refused", "refuse"),
    ("refusing", "refuse"),
    ("excused", "excuse"),
    ("buses", "bus"),
    ("focuses", "focus"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
];

/// Words ending in `-s`, `-ed` or `-ing` that are already base forms.
const UNINFLECTED: &[&str] = &[
    "morning", "evening", "nothing", "something", "anything", "everything", "during",
    "ceiling", "wedding", "always", "sometimes", "perhaps", "towards", "afterwards", "news",
    "series", "species", "bus", "gas", "yes", "lens", "hundred", "sacred", "naked",
];

/// Rule-based English lemmatizer.
#[derive(Debug, Clone)]
pub struct EnglishLemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    uninflected: HashSet<&'static str>,
}

impl EnglishLemmatizer {
    /// Create a new English lemmatizer with the built-in word tables.
    pub fn new() -> Self {
        EnglishLemmatizer {
            irregular: IRREGULAR_FORMS.iter().copied().collect(),
            uninflected: UNINFLECTED.iter().copied().collect(),
        }
    }

    /// Check if the byte at `pos` acts as a vowel (`y` counts after a consonant).
    fn is_vowel(word: &[u8], pos: usize) -> bool {
        match word[pos] {
            b'a' | b'e' | b'i' | b'o' | b'u' => true,
            b'y' => pos > 0 && !Self::is_vowel(word, pos - 1),
            _ => false,
        }
    }

    fn contains_vowel(word: &[u8]) -> bool {
        (0..word.len()).any(|i| Self::is_vowel(word, i))
    }

    /// Number of vowel-consonant sequences, as in the Porter algorithm.
    fn measure(word: &[u8]) -> usize {
        let n = word.len();
        let mut m = 0;
        let mut i = 0;

        while i < n && !Self::is_vowel(word, i) {
            i += 1;
        }

        while i < n {
            while i < n && Self::is_vowel(word, i) {
                i += 1;
            }
            if i >= n {
                break;
            }
            m += 1;
            while i < n && !Self::is_vowel(word, i) {
                i += 1;
            }
        }

        m
    }

    fn ends_double_consonant(word: &[u8]) -> bool {
        let len = word.len();
        len >= 2 && word[len - 1] == word[len - 2] && !Self::is_vowel(word, len - 1)
    }

    fn ends_cvc(word: &[u8]) -> bool {
        let len = word.len();
        len >= 3
            && !Self::is_vowel(word, len - 3)
            && Self::is_vowel(word, len - 2)
            && !Self::is_vowel(word, len - 1)
            && !matches!(word[len - 1], b'w' | b'x' | b'y')
    }

    /// Strip plural / third person endings.
    fn strip_plural(word: &str) -> Option<String> {
        let len = word.len();
        if len <= 3 {
            return None;
        }

        if ["sses", "zzes", "xes", "ches", "shes"]
            .iter()
            .any(|suffix| word.ends_with(suffix))
        {
            return Some(word[..len - 2].to_string());
        }

        if word.ends_with("ies") {
            // "studies" -> "study", but "ties" -> "tie"
            return Some(if len > 4 {
                format!("{}y", &word[..len - 3])
            } else {
                word[..len - 1].to_string()
            });
        }

        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return None;
        }

        word.strip_suffix('s').map(str::to_string)
    }

    /// Strip `-ed` / `-ing` endings and repair the remaining stem.
    fn strip_verbal(word: &str) -> Option<String> {
        let len = word.len();

        if word.ends_with("eed") {
            return None;
        }

        if word.ends_with("ied") {
            return Some(if len > 4 {
                format!("{}y", &word[..len - 3])
            } else {
                word[..len - 1].to_string()
            });
        }

        let stem = word
            .strip_suffix("ed")
            .or_else(|| word.strip_suffix("ing"))?;

        if !Self::contains_vowel(stem.as_bytes()) {
            return None;
        }

        Some(Self::repair_stem(stem))
    }

    /// Porter step 1b cleanup, plus restoring the `e` of short `-se` verbs.
    fn repair_stem(stem: &str) -> String {
        let bytes = stem.as_bytes();
        let len = bytes.len();

        if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
            format!("{stem}e")
        } else if Self::ends_double_consonant(bytes)
            && !matches!(bytes[len - 1], b'l' | b's' | b'z')
        {
            stem[..len - 1].to_string()
        } else if len >= 2
            && bytes[len - 1] == b's'
            && Self::is_vowel(bytes, len - 2)
            && Self::measure(bytes) == 1
        {
            // "rais" -> "raise", "us" -> "use", but "focus" stays
            format!("{stem}e")
        } else if Self::measure(bytes) == 1 && Self::ends_cvc(bytes) {
            format!("{stem}e")
        } else {
            stem.to_string()
        }
    }

    /// One pass of the rule set.
    fn step(&self, word: &str) -> String {
        if let Some(lemma) = self.irregular.get(word) {
            return (*lemma).to_string();
        }

        if self.uninflected.contains(word) || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return word.to_string();
        }

        let word = Self::strip_plural(word).unwrap_or_else(|| word.to_string());
        if self.uninflected.contains(word.as_str()) {
            return word;
        }
        Self::strip_verbal(&word).unwrap_or(word)
    }
}

impl Default for EnglishLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for EnglishLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        let mut current = word.to_string();

        // The pass limit guarantees termination; lookups may lengthen a word.
        for _ in 0..=word.len() {
            let next = self.step(&current);
            if next == current {
                break;
            }
            current = next;
        }

        current
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_inflections() {
        let lemmatizer = EnglishLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("filing"), "file");
        assert_eq!(lemmatizer.lemmatize("files"), "file");
        assert_eq!(lemmatizer.lemmatize("filed"), "file");
        assert_eq!(lemmatizer.lemmatize("running"), "run");
        assert_eq!(lemmatizer.lemmatize("hoping"), "hope");
        assert_eq!(lemmatizer.lemmatize("stopped"), "stop");
        assert_eq!(lemmatizer.lemmatize("studies"), "study");
        assert_eq!(lemmatizer.lemmatize("married"), "marry");
        assert_eq!(lemmatizer.lemmatize("complaints"), "complaint");
        assert_eq!(lemmatizer.lemmatize("abused"), "abuse");
        assert_eq!(lemmatizer.lemmatize("related"), "relate");
        assert_eq!(lemmatizer.lemmatize("classes"), "class");
        assert_eq!(lemmatizer.lemmatize("watches"), "watch");
        assert_eq!(lemmatizer.lemmatize("reporting"), "report");
        assert_eq!(lemmatizer.lemmatize("raised"), "raise");
        assert_eq!(lemmatizer.lemmatize("using"), "use");
        assert_eq!(lemmatizer.lemmatize("closed"), "close");
        assert_eq!(lemmatizer.lemmatize("focused"), "focus");
        assert_eq!(lemmatizer.lemmatize("buses"), "bus");
        assert_eq!(lemmatizer.lemmatize("abusing"), "abuse");
        assert_eq!(lemmatizer.lemmatize("mornings"), "morning");
        assert_eq!(lemmatizer.lemmatize("mice"), "mouse");
    }

    #[test]
    fn test_irregular_forms() {
        let lemmatizer = EnglishLemmatizer::new();

        assert_eq!(lemmatizer.lemmatize("ran"), "run");
        assert_eq!(lemmatizer.lemmatize("was"), "be");
        assert_eq!(lemmatizer.lemmatize("children"), "child");
        assert_eq!(lemmatizer.lemmatize("does"), "do");
    }

    #[test]
    fn test_words_left_alone() {
        let lemmatizer = EnglishLemmatizer::new();

        for word in [
            "hello", "hi", "vawc", "where", "need", "sing", "bring", "status", "this", "morning",
            "evening", "nothing", "something", "anything", "everything", "during", "always",
            "news", "series", "bus", "focus", "abuse",
        ] {
            assert_eq!(lemmatizer.lemmatize(word), word, "{word} should be unchanged");
        }

        // Non-ASCII and contractions only go through the irregular table.
        assert_eq!(lemmatizer.lemmatize("don't"), "don't");
        assert_eq!(lemmatizer.lemmatize("cafés"), "cafés");
    }

    #[test]
    fn test_irregular_lemmas_are_fixed_points() {
        let lemmatizer = EnglishLemmatizer::new();

        for (_, lemma) in IRREGULAR_FORMS {
            assert_eq!(lemmatizer.lemmatize(lemma), *lemma);
        }
    }

    #[test]
    fn test_uninflected_words_are_fixed_points() {
        let lemmatizer = EnglishLemmatizer::new();

        for word in UNINFLECTED {
            assert_eq!(lemmatizer.lemmatize(word), *word);
        }
    }

    #[test]
    fn test_idempotent() {
        let lemmatizer = EnglishLemmatizer::new();

        for word in [
            "filing", "speeding", "embedded", "focused", "raised", "beings", "boxes", "using",
            "tied", "living", "agreed", "buses",
        ] {
            let once = lemmatizer.lemmatize(word);
            assert_eq!(lemmatizer.lemmatize(&once), once, "{word} -> {once}");
        }
    }

    #[test]
    fn test_measure() {
        assert_eq!(EnglishLemmatizer::measure(b"tree"), 0);
        assert_eq!(EnglishLemmatizer::measure(b"trees"), 1);
        assert_eq!(EnglishLemmatizer::measure(b"trouble"), 1);
        assert_eq!(EnglishLemmatizer::measure(b"troubles"), 2);
    }
}
