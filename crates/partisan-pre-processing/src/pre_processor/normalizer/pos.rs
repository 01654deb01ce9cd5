/// WordNet part-of-speech classes understood by the lemmatizer.
///
/// Tagger output collapses onto these four classes; anything that does not
/// look like a verb, adjective, or adverb is treated as a noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordnetPos {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl WordnetPos {
    /// Map the first letter of a Penn Treebank tag onto a WordNet class.
    ///
    /// `N*` -> noun, `V*` -> verb, `J*` -> adjective, `R*` -> adverb,
    /// everything else defaults to noun.
    #[must_use]
    pub fn from_penn(first_letter: char) -> Self {
        match first_letter.to_ascii_uppercase() {
            'V' => Self::Verb,
            'J' => Self::Adjective,
            'R' => Self::Adverb,
            _ => Self::Noun,
        }
    }
}

/// Tag a single lowercase token with the first letter of a coarse Penn tag.
///
/// A lexicon of closed-class and high-frequency words is consulted first,
/// then suffix heuristics. Unknown shapes fall back to `N`.
#[must_use]
pub fn penn_tag(token: &str) -> char {
    if let Some(tag) = lexicon_tag(token) {
        return tag;
    }

    if token.len() > 3 && token.ends_with("ly") {
        return 'R';
    }
    if token.len() > 4 && (token.ends_with("ing") || token.ends_with("ed")) {
        return 'V';
    }
    if is_adjective_shaped(token) {
        return 'J';
    }
    'N'
}

/// Tag a token and collapse the result onto a WordNet class.
#[must_use]
pub fn tag(token: &str) -> WordnetPos {
    WordnetPos::from_penn(penn_tag(token))
}

fn lexicon_tag(token: &str) -> Option<char> {
    let tag = match token {
        // Copular / auxiliary / frequent verbs
        "be" | "am" | "is" | "are" | "was" | "were" | "been" | "being" | "have" | "has" | "had"
        | "do" | "does" | "did" | "go" | "goes" | "went" | "gone" | "get" | "got" | "make"
        | "made" | "say" | "says" | "said" | "see" | "saw" | "take" | "took" | "come" | "came"
        | "know" | "knew" | "think" | "thought" | "want" | "win" | "won" | "vote" | "voted"
        | "will" | "would" | "can" | "could" | "shall" | "should" | "may" | "might" | "must"
        | "need" | "let" | "keep" | "kept" | "give" | "gave" | "put" | "tell" | "told" => 'V',
        // Frequent adjectives whose shape gives nothing away
        "good" | "bad" | "big" | "small" | "great" | "huge" | "new" | "old" | "high" | "low"
        | "many" | "few" | "same" | "other" | "last" | "next" | "real" | "fake" | "strong"
        | "weak" | "right" | "wrong" => 'J',
        // Frequent adverbs without the -ly suffix
        "very" | "never" | "always" | "not" | "too" | "so" | "just" | "now" | "here" | "there"
        | "again" | "soon" | "often" | "ever" | "also" | "well" | "back" | "then" | "today"
        | "tonight" | "yesterday" | "tomorrow" => 'R',
        _ => return None,
    };
    Some(tag)
}

fn is_adjective_shaped(token: &str) -> bool {
    const ADJ_SUFFIXES: [&str; 8] = ["ful", "ous", "ive", "able", "ible", "ish", "less", "ic"];
    token.len() > 4 && ADJ_SUFFIXES.iter().any(|suffix| token.ends_with(suffix))
}
