//! Tweet text normalization.
//!
//! `process` turns one raw tweet into an ordered sequence of lowercase
//! lemmas: case folding, possessive/apostrophe stripping, URL removal,
//! punctuation blanking, whitespace tokenization, POS tagging, and
//! POS-conditioned lemmatization, in that order.

mod cleaner;
mod lemmatizer;
mod pos;

use std::{borrow::Cow, sync::LazyLock};

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator, ProgressStyle};
use rayon::prelude::*;
use tracing::debug;

pub use lemmatizer::{Lemmatize, WordnetLemmatizer};
pub use pos::WordnetPos;

/// Minimum number of texts to consider parallelization
const MIN_TEXTS_FOR_PARALLEL: usize = 100;

/// Minimum total character count to consider parallelization
const MIN_CHARS_FOR_PARALLEL: usize = 10_000;

/// Process-wide default lemmatizer, constructed once.
static DEFAULT_LEMMATIZER: LazyLock<WordnetLemmatizer> = LazyLock::new(WordnetLemmatizer::new);

/// Normalize a single raw text with the default lemmatizer.
#[must_use]
pub fn process(text: &str) -> Vec<String> {
    process_with(text, &*DEFAULT_LEMMATIZER)
}

/// Normalize a single raw text with a caller-supplied lemmatizer.
///
/// Empty or all-punctuation input yields an empty sequence; this never fails.
#[must_use]
pub fn process_with<L: Lemmatize + ?Sized>(text: &str, lemmatizer: &L) -> Vec<String> {
    let cleaned = cleaner::clean(text);
    cleaner::tokenize(&cleaned)
        .map(|token| lemmatizer.lemmatize(token, pos::tag(token)))
        .collect()
}

/// Normalize every text in a batch with the default lemmatizer.
///
/// Each row is processed independently; output order matches input order.
#[must_use]
pub fn process_all<T: AsRef<str> + Sync>(texts: &[T]) -> Vec<Vec<String>> {
    process_all_with(texts, &*DEFAULT_LEMMATIZER)
}

/// Normalize every text in a batch with a caller-supplied lemmatizer.
#[must_use]
pub fn process_all_with<T, L>(texts: &[T], lemmatizer: &L) -> Vec<Vec<String>>
where
    T: AsRef<str> + Sync,
    L: Lemmatize + ?Sized,
{
    if should_use_parallel(texts) {
        process_texts_par(texts, lemmatizer)
    } else {
        process_texts(texts, lemmatizer)
    }
}

fn progress_bar_setup(len: usize, message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("progress template is valid")
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb
}

fn process_texts_par<T, L>(texts: &[T], lemmatizer: &L) -> Vec<Vec<String>>
where
    T: AsRef<str> + Sync,
    L: Lemmatize + ?Sized,
{
    debug!(num_texts = texts.len(), "Using parallel normalization");
    let pb = progress_bar_setup(texts.len(), "Normalizing texts in parallel");
    let result = texts
        .par_iter()
        .progress_with(pb.clone())
        .map(|text| process_with(text.as_ref(), lemmatizer))
        .collect();
    pb.finish_with_message("Parallel normalization complete");
    result
}

fn process_texts<T, L>(texts: &[T], lemmatizer: &L) -> Vec<Vec<String>>
where
    T: AsRef<str>,
    L: Lemmatize + ?Sized,
{
    debug!(num_texts = texts.len(), "Using sequential normalization");
    let pb = progress_bar_setup(texts.len(), "Normalizing texts");
    let result = texts
        .iter()
        .progress_with(pb.clone())
        .map(|text| process_with(text.as_ref(), lemmatizer))
        .collect();
    pb.finish_with_message("Normalization complete");
    result
}

/// Determine if parallel processing should be used based on workload
/// characteristics: many texts, or a large total character count.
#[inline]
fn should_use_parallel<T: AsRef<str>>(texts: &[T]) -> bool {
    let num_texts = texts.len();

    if num_texts >= MIN_TEXTS_FOR_PARALLEL {
        return true;
    }

    // For fewer texts, estimate total workload from a small sample
    let total_chars: usize = if num_texts > 20 {
        let sample_chars: usize = texts.iter().take(20).map(|s| s.as_ref().len()).sum();
        (sample_chars * num_texts) / 20
    } else {
        texts.iter().map(|s| s.as_ref().len()).sum()
    };

    total_chars >= MIN_CHARS_FOR_PARALLEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_lowercase_without_apostrophes_or_urls() {
        let tokens = process("RT @GOP: Great speech! http://t.co/xyz It's huge.");
        assert!(!tokens.is_empty());
        for token in &tokens {
            assert_eq!(*token, token.to_lowercase());
            assert!(!token.contains('\''));
            assert!(!token.contains("http"));
            assert!(!token.contains("t.co"));
        }
    }

    #[test]
    fn strips_possessive_and_lemmatizes() {
        let tokens = process("Obama's speeches were great");
        assert!(tokens.contains(&"obama".to_owned()));
        assert!(tokens.contains(&"speech".to_owned()));
        assert!(tokens.contains(&"be".to_owned()));
        assert!(tokens.contains(&"great".to_owned()));
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert!(process("").is_empty());
        assert!(process("!!! ???").is_empty());
    }

    #[test]
    fn normalization_is_idempotent_per_input() {
        let text = "Crooked media won't report the FACTS… Sad!";
        assert_eq!(process(text), process(text));
    }

    #[test]
    fn batch_matches_single_in_order() {
        let texts = ["Make America Great Again", "Healthcare for ALL families!"];
        let batch = process_all(&texts);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], process(texts[0]));
        assert_eq!(batch[1], process(texts[1]));
    }

    #[test]
    fn custom_lemmatizer_is_used() {
        struct Upper;
        impl Lemmatize for Upper {
            fn lemmatize(&self, word: &str, _pos: WordnetPos) -> String {
                word.to_uppercase()
            }
        }
        assert_eq!(process_with("so sad", &Upper), vec!["SO", "SAD"]);
    }
}
