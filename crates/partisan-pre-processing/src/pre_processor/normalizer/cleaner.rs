use std::sync::LazyLock;

use regex::Regex;

static POSSESSIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)'s").expect("possessive pattern is valid"));

// The $-_ range (0x24..0x5f) covers the path/query punctuation, so a URL
// is consumed through `?query=...` but stops at a `#` fragment.
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*(),]|%[0-9a-fA-F]{2})+")
        .expect("url pattern is valid")
});

/// Everything that is not a word character, whitespace, or the ellipsis glyph.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s…]").expect("non-word pattern is valid"));

/// Normalize raw tweet text down to a plain lowercase string.
///
/// Order matters: possessive markers are stripped before the remaining
/// apostrophes, and URLs are removed before punctuation is blanked out
/// (otherwise the `://` would already have been destroyed).
pub fn clean(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_possessive = POSSESSIVE.replace_all(&lowered, "${1}");
    let no_apostrophe = no_possessive.replace('\'', "");
    let no_urls = URL.replace_all(&no_apostrophe, "");
    NON_WORD.replace_all(&no_urls, " ").into_owned()
}

/// Split cleaned text into tokens on whitespace.
pub fn tokenize(cleaned: &str) -> impl Iterator<Item = &str> {
    cleaned.split_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_possessive() {
        assert_eq!(clean("Trump's rally"), "trump rally");
    }

    #[test]
    fn drops_remaining_apostrophes() {
        assert_eq!(clean("don't"), "dont");
    }

    #[test]
    fn strips_urls() {
        let cleaned = clean("great http://t.co/xyzABC123 speech");
        assert!(!cleaned.contains("http"));
        assert!(!cleaned.contains("t.co"));
        assert!(cleaned.contains("great"));
        assert!(cleaned.contains("speech"));
    }

    #[test]
    fn strips_https_urls_with_escapes() {
        let cleaned = clean("see https://example.com/a%2Fb?x=1 now");
        assert!(!cleaned.contains("example"));
        assert!(cleaned.contains("see"));
        assert!(cleaned.contains("now"));
    }

    #[test]
    fn url_match_stops_at_a_fragment() {
        let cleaned = clean("read https://example.com/page?x=1#anchor now");
        assert!(!cleaned.contains("example"));
        assert!(!cleaned.contains("x=1"));
        // Fragments fall outside the URL pattern and survive as a token
        assert!(cleaned.contains("anchor"));
    }

    #[test]
    fn blanks_punctuation_but_keeps_ellipsis() {
        assert_eq!(clean("wow! such, win…"), "wow  such  win…");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(tokenize("").count(), 0);
    }
}
