use anyhow::{Context, Result};
use partisan_model::{accuracy, Kernel, Svc, SvcParams};
use partisan_pre_processing::pre_processor::{
    self, StopwordSet, TfidfVectorizer, VectorizerParams,
};
use sprs::CsMat;
use tracing::info;

use crate::{
    dataset::{ProcessedTweet, TweetRecord},
    labels::{self, Affiliation},
};

/// Normalize every tweet's text column into its token sequence.
///
/// Pure per-row map; the screen name carries over untouched and row order
/// is preserved.
#[must_use]
pub fn process_all(tweets: &[TweetRecord]) -> Vec<ProcessedTweet> {
    let texts: Vec<&str> = tweets.iter().map(|tweet| tweet.text.as_str()).collect();
    pre_processor::process_all(&texts)
        .into_iter()
        .zip(tweets)
        .map(|(tokens, tweet)| ProcessedTweet {
            tokens,
            screen_name: tweet.screen_name.clone(),
        })
        .collect()
}

/// Build the TF-IDF feature matrix from processed tweets.
///
/// Returns the fitted vectorizer alongside the matrix; the vectorizer must
/// be kept to transform validation or unlabeled tweets with the identical
/// vocabulary and weighting.
#[must_use]
pub fn create_features(
    processed: &[ProcessedTweet],
    stop_words: StopwordSet,
) -> (TfidfVectorizer, CsMat<f64>) {
    let docs: Vec<&[String]> = processed.iter().map(|tweet| tweet.tokens.as_slice()).collect();
    let params = VectorizerParams::new(2, stop_words);
    TfidfVectorizer::fit_transform(&docs, params)
}

/// Fit a kernel SVM on the feature matrix and labels.
pub fn learn_classifier(
    x_train: &CsMat<f64>,
    y_train: &[Affiliation],
    kernel: Kernel,
) -> Result<Svc<Affiliation>> {
    Svc::fit(x_train, y_train, &SvcParams::default().with_kernel(kernel))
        .with_context(|| format!("Failed to fit SVC with {kernel} kernel"))
}

/// Accuracy of a trained classifier on labeled validation data.
pub fn evaluate_classifier(
    classifier: &Svc<Affiliation>,
    x_validation: &CsMat<f64>,
    y_validation: &[Affiliation],
) -> Result<f64> {
    let predictions = classifier
        .predict(x_validation)
        .context("Failed to predict on validation data")?;
    accuracy(y_validation, &predictions).context("Failed to score predictions")
}

/// Predict class labels for raw, unlabeled tweet text.
///
/// The vectorizer is applied as fitted, never refit, so the feature columns
/// line up with what the classifier was trained on.
pub fn classify_tweets(
    vectorizer: &TfidfVectorizer,
    classifier: &Svc<Affiliation>,
    unlabeled: &[TweetRecord],
) -> Result<Vec<Affiliation>> {
    let processed = process_all(unlabeled);
    let docs: Vec<&[String]> = processed.iter().map(|tweet| tweet.tokens.as_slice()).collect();
    let features = vectorizer.transform(&docs);
    classifier
        .predict(&features)
        .context("Failed to predict labels for unlabeled tweets")
}

/// A fitted vectorizer plus trained classifier, ready for inference.
pub struct FittedPipeline {
    vectorizer: TfidfVectorizer,
    classifier: Svc<Affiliation>,
}

impl FittedPipeline {
    /// Train on labeled tweets with default vectorizer settings (English
    /// stop words, minimum document frequency 2).
    pub fn train(tweets: &[TweetRecord], kernel: Kernel) -> Result<Self> {
        Self::train_with(tweets, kernel, StopwordSet::english())
    }

    /// Train with a caller-supplied stop-word set.
    pub fn train_with(
        tweets: &[TweetRecord],
        kernel: Kernel,
        stop_words: StopwordSet,
    ) -> Result<Self> {
        info!(num_tweets = tweets.len(), %kernel, "Training pipeline");
        let processed = process_all(tweets);
        let (vectorizer, features) = create_features(&processed, stop_words);
        let labels = labels::create_labels(&processed);
        let classifier = learn_classifier(&features, &labels, kernel)?;
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Classify a single raw text.
    pub fn classify<T: AsRef<str> + Sync>(&self, text: T) -> Result<Affiliation> {
        let predictions = self.classify_batch(&[text])?;
        Ok(predictions[0])
    }

    /// Classify multiple raw texts; one label per input, same order.
    pub fn classify_batch<T: AsRef<str> + Sync>(&self, texts: &[T]) -> Result<Vec<Affiliation>> {
        let docs = pre_processor::process_all(texts);
        let features = self.vectorizer.transform(&docs);
        self.classifier
            .predict(&features)
            .context("Failed to predict labels for the given texts")
    }

    /// Accuracy against labeled tweets (screen names provide the truth).
    pub fn evaluate(&self, tweets: &[TweetRecord]) -> Result<f64> {
        let processed = process_all(tweets);
        let docs: Vec<&[String]> =
            processed.iter().map(|tweet| tweet.tokens.as_slice()).collect();
        let features = self.vectorizer.transform(&docs);
        let labels = labels::create_labels(&processed);
        evaluate_classifier(&self.classifier, &features, &labels)
    }

    #[must_use]
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    #[must_use]
    pub fn classifier(&self) -> &Svc<Affiliation> {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(screen_name: &str, text: &str) -> TweetRecord {
        TweetRecord {
            text: text.to_owned(),
            screen_name: screen_name.to_owned(),
        }
    }

    /// Small but repetitive corpus so every informative term clears min_df.
    fn training_set() -> Vec<TweetRecord> {
        let mut tweets = Vec::new();
        for _ in 0..4 {
            tweets.push(record("GOP", "Lower taxes and strong borders! #MAGA"));
            tweets.push(record("realDonaldTrump", "Taxes are too high. Build strong borders!"));
            tweets.push(record("mike_pence", "Strong borders keep America safe. Lower taxes now."));
            tweets.push(record("TheDemocrats", "Healthcare and climate action for families."));
            tweets.push(record("HillaryClinton", "Families deserve healthcare and climate justice."));
            tweets.push(record("timkaine", "Climate action now. Healthcare for every family."));
        }
        tweets
    }

    #[test]
    fn process_all_replaces_text_with_tokens() {
        let tweets = vec![record("GOP", "Great speeches! http://t.co/abc")];
        let processed = process_all(&tweets);
        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].screen_name, "GOP");
        assert!(processed[0].tokens.contains(&"speech".to_owned()));
        assert!(processed[0]
            .tokens
            .iter()
            .all(|token| !token.contains("http")));
    }

    #[test]
    fn vectorizer_is_reused_not_refit() {
        let processed = process_all(&training_set());
        let (vectorizer, train_matrix) = create_features(&processed, StopwordSet::empty());

        let validation = process_all(&[record("GOP", "strong borders and lower taxes")]);
        let docs: Vec<&[String]> =
            validation.iter().map(|tweet| tweet.tokens.as_slice()).collect();
        let validation_matrix = vectorizer.transform(&docs);

        assert_eq!(train_matrix.cols(), validation_matrix.cols());
    }

    #[test]
    fn end_to_end_train_evaluate_classify() {
        let tweets = training_set();
        let pipeline = FittedPipeline::train_with(
            &tweets,
            Kernel::Linear,
            StopwordSet::empty(),
        )
        .unwrap();

        // Training data is cleanly separable, so the fit must recover it
        let train_accuracy = pipeline.evaluate(&tweets).unwrap();
        assert!(train_accuracy > 0.9, "train accuracy was {train_accuracy}");

        let labels = pipeline
            .classify_batch(&[
                "Lower taxes, strong borders",
                "Healthcare and climate action for families",
            ])
            .unwrap();
        assert_eq!(labels[0], Affiliation::Republican);
        assert_eq!(labels[1], Affiliation::Democratic);
    }

    #[test]
    fn classify_single_text() {
        let pipeline =
            FittedPipeline::train_with(&training_set(), Kernel::Linear, StopwordSet::empty())
                .unwrap();
        let label = pipeline.classify("Strong borders and lower taxes now").unwrap();
        assert_eq!(label, Affiliation::Republican);
        let label = pipeline.classify(String::from("Climate action and healthcare")).unwrap();
        assert_eq!(label, Affiliation::Democratic);
    }

    #[test]
    fn evaluate_on_empty_dataset_fails() {
        let pipeline =
            FittedPipeline::train_with(&training_set(), Kernel::Linear, StopwordSet::empty())
                .unwrap();
        // A header-only CSV loads as an empty vector; scoring it is an
        // error, not a panic
        assert!(pipeline.evaluate(&[]).is_err());
    }

    #[test]
    fn single_class_training_set_fails() {
        let tweets: Vec<TweetRecord> = (0..8)
            .map(|_| record("GOP", "Lower taxes and strong borders now"))
            .collect();
        let result = FittedPipeline::train_with(&tweets, Kernel::Linear, StopwordSet::empty());
        assert!(result.is_err());
    }
}
