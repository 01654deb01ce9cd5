use ahash::HashSet;
use tracing::debug;

use super::normalizer;

/// A set of stop words matched against normalized tokens.
///
/// Whatever supplies the list must normalize it the same way tweet text is
/// normalized, otherwise entries like `doesn't` would never match the
/// lemmatized tokens they are meant to filter. `english()` takes care of
/// that; `from_words` trusts the caller.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The bundled English list, run through the tweet normalizer.
    #[must_use]
    pub fn english() -> Self {
        let raw = stop_words::get(stop_words::LANGUAGE::English);
        let words: HashSet<String> = raw
            .iter()
            .flat_map(|word| normalizer::process(word))
            .collect();
        debug!(
            raw_words = raw.len(),
            normalized_words = words.len(),
            "Built English stop-word set"
        );
        Self { words }
    }

    /// Build from an already-normalized word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty set (no filtering).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_set_matches_normalized_tokens() {
        let stop = StopwordSet::english();
        assert!(!stop.is_empty());
        assert!(stop.contains("the"));
        assert!(stop.contains("and"));
        // Contractions survive normalization without their apostrophe
        assert!(!stop.contains("doesn't"));
    }

    #[test]
    fn custom_list() {
        let stop = StopwordSet::from_words(["rt", "amp"]);
        assert_eq!(stop.len(), 2);
        assert!(stop.contains("rt"));
        assert!(!stop.contains("the"));
    }

    #[test]
    fn empty_set_filters_nothing() {
        let stop = StopwordSet::empty();
        assert!(!stop.contains("the"));
    }
}
