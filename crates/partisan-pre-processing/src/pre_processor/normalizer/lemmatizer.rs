use ahash::HashMap;

use super::pos::WordnetPos;

/// Reduce a word to its dictionary base form for a given part of speech.
///
/// The normalizer takes any implementation rather than constructing its own,
/// so callers can swap in a different lemmatizer (or a stub in tests).
pub trait Lemmatize: Send + Sync {
    fn lemmatize(&self, word: &str, pos: WordnetPos) -> String;
}

/// Rule-based English lemmatizer in the WordNet morphy style: irregular
/// forms are looked up in per-class exception tables, regular forms go
/// through ordered suffix-detachment rules.
#[derive(Debug, Clone)]
pub struct WordnetLemmatizer {
    noun_exceptions: HashMap<&'static str, &'static str>,
    verb_exceptions: HashMap<&'static str, &'static str>,
    adjective_exceptions: HashMap<&'static str, &'static str>,
}

impl WordnetLemmatizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            noun_exceptions: NOUN_EXCEPTIONS.iter().copied().collect(),
            verb_exceptions: VERB_EXCEPTIONS.iter().copied().collect(),
            adjective_exceptions: ADJECTIVE_EXCEPTIONS.iter().copied().collect(),
        }
    }

    fn lemmatize_noun(&self, word: &str) -> Option<String> {
        if let Some(&lemma) = self.noun_exceptions.get(word) {
            return Some(lemma.to_owned());
        }
        // "class", "status", "analysis" and friends are their own lemmas.
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return None;
        }
        const RULES: [(&str, &str); 9] = [
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ses", "s"),
            ("ves", "f"),
            ("xes", "x"),
            ("zes", "z"),
            ("ies", "y"),
            ("s", ""),
        ];
        detach(word, &RULES)
    }

    fn lemmatize_verb(&self, word: &str) -> Option<String> {
        if let Some(&lemma) = self.verb_exceptions.get(word) {
            return Some(lemma.to_owned());
        }
        if word.ends_with("ss") {
            return None;
        }
        if let Some(stem) = word.strip_suffix("ies") {
            return keep_if_long_enough(format!("{stem}y"));
        }
        for suffix in ["ing", "ed", "es", "s"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if let Some(lemma) = keep_if_long_enough(fix_stem(stem)) {
                    return Some(lemma);
                }
            }
        }
        None
    }

    fn lemmatize_adjective(&self, word: &str) -> Option<String> {
        if let Some(&lemma) = self.adjective_exceptions.get(word) {
            return Some(lemma.to_owned());
        }
        for suffix in ["est", "er"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if let Some(lemma) = keep_if_long_enough(fix_stem(stem)) {
                    return Some(lemma);
                }
            }
        }
        None
    }
}

impl Default for WordnetLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatize for WordnetLemmatizer {
    fn lemmatize(&self, word: &str, pos: WordnetPos) -> String {
        if word.len() < 3 {
            return word.to_owned();
        }
        let lemma = match pos {
            WordnetPos::Noun => self.lemmatize_noun(word),
            WordnetPos::Verb => self.lemmatize_verb(word),
            WordnetPos::Adjective => self.lemmatize_adjective(word),
            // Morphy has no detachment rules for adverbs.
            WordnetPos::Adverb => None,
        };
        lemma.unwrap_or_else(|| word.to_owned())
    }
}

/// Apply the first matching detachment rule, discarding degenerate stems.
fn detach(word: &str, rules: &[(&str, &str)]) -> Option<String> {
    for (suffix, replacement) in rules {
        if let Some(stem) = word.strip_suffix(suffix) {
            return keep_if_long_enough(format!("{stem}{replacement}"));
        }
    }
    None
}

fn keep_if_long_enough(candidate: String) -> Option<String> {
    (candidate.len() >= 2).then_some(candidate)
}

/// Patch up a stem left over after stripping an inflectional suffix:
/// collapse gemination ("runn" -> "run") and restore a dropped final "e"
/// on short consonant-vowel-consonant stems ("mak" -> "make").
fn fix_stem(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 3 && bytes[n - 1] == bytes[n - 2] && COLLAPSIBLE.contains(&bytes[n - 1]) {
        return stem[..n - 1].to_owned();
    }
    if n == 3 && !is_vowel(bytes[0]) && is_vowel(bytes[1]) && is_restorable_final(bytes[2]) {
        return format!("{stem}e");
    }
    stem.to_owned()
}

const COLLAPSIBLE: [u8; 10] = *b"bdgkmnprtz";

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn is_restorable_final(b: u8) -> bool {
    !is_vowel(b) && !matches!(b, b'w' | b'x' | b'y')
}

const NOUN_EXCEPTIONS: [(&str, &str); 14] = [
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("countries", "country"),
    ("parties", "party"),
    ("media", "media"),
    ("news", "news"),
];

const VERB_EXCEPTIONS: [(&str, &str); 30] = [
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("said", "say"),
    ("made", "make"),
    ("got", "get"),
    ("took", "take"),
    ("taken", "take"),
    ("came", "come"),
    ("saw", "see"),
    ("seen", "see"),
    ("ran", "run"),
    ("won", "win"),
    ("thought", "think"),
    ("told", "tell"),
    ("kept", "keep"),
    ("left", "leave"),
    ("held", "hold"),
];

const ADJECTIVE_EXCEPTIONS: [(&str, &str); 7] = [
    ("other", "other"),
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("bigger", "big"),
    ("biggest", "big"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmatizer() -> WordnetLemmatizer {
        WordnetLemmatizer::new()
    }

    #[test]
    fn regular_nouns() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("speeches", WordnetPos::Noun), "speech");
        assert_eq!(l.lemmatize("taxes", WordnetPos::Noun), "tax");
        assert_eq!(l.lemmatize("rallies", WordnetPos::Noun), "rally");
        assert_eq!(l.lemmatize("votes", WordnetPos::Noun), "vote");
        assert_eq!(l.lemmatize("classes", WordnetPos::Noun), "class");
    }

    #[test]
    fn nouns_that_are_their_own_lemma() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("class", WordnetPos::Noun), "class");
        assert_eq!(l.lemmatize("status", WordnetPos::Noun), "status");
        assert_eq!(l.lemmatize("news", WordnetPos::Noun), "news");
    }

    #[test]
    fn irregular_nouns() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("women", WordnetPos::Noun), "woman");
        assert_eq!(l.lemmatize("children", WordnetPos::Noun), "child");
        assert_eq!(l.lemmatize("congressmen", WordnetPos::Noun), "congressman");
    }

    #[test]
    fn regular_verbs() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("walked", WordnetPos::Verb), "walk");
        assert_eq!(l.lemmatize("running", WordnetPos::Verb), "run");
        assert_eq!(l.lemmatize("makes", WordnetPos::Verb), "make");
        assert_eq!(l.lemmatize("voting", WordnetPos::Verb), "vote");
        assert_eq!(l.lemmatize("tries", WordnetPos::Verb), "try");
        assert_eq!(l.lemmatize("says", WordnetPos::Verb), "say");
    }

    #[test]
    fn irregular_verbs() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("was", WordnetPos::Verb), "be");
        assert_eq!(l.lemmatize("went", WordnetPos::Verb), "go");
        assert_eq!(l.lemmatize("said", WordnetPos::Verb), "say");
        assert_eq!(l.lemmatize("won", WordnetPos::Verb), "win");
    }

    #[test]
    fn adjectives() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("greatest", WordnetPos::Adjective), "great");
        assert_eq!(l.lemmatize("bigger", WordnetPos::Adjective), "big");
        assert_eq!(l.lemmatize("worse", WordnetPos::Adjective), "bad");
        assert_eq!(l.lemmatize("huge", WordnetPos::Adjective), "huge");
        assert_eq!(l.lemmatize("other", WordnetPos::Adjective), "other");
    }

    #[test]
    fn adverbs_pass_through() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("quickly", WordnetPos::Adverb), "quickly");
        assert_eq!(l.lemmatize("never", WordnetPos::Adverb), "never");
    }

    #[test]
    fn short_words_pass_through() {
        let l = lemmatizer();
        assert_eq!(l.lemmatize("rt", WordnetPos::Noun), "rt");
        assert_eq!(l.lemmatize("us", WordnetPos::Noun), "us");
        assert_eq!(l.lemmatize("", WordnetPos::Verb), "");
    }
}
