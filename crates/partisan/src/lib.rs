//! # partisan
//!
//! Classify short social-media posts by political affiliation using
//! TF-IDF bag-of-words features and a kernel support-vector classifier.
//!
//! The pipeline is a linear sequence of data transformations: normalize and
//! lemmatize raw text, vectorize it, train a classifier, evaluate accuracy,
//! and apply it to unlabeled text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use partisan::{FittedPipeline, Kernel};
//!
//! let tweets = partisan::load_tweets_csv("tweets_train.csv")?;
//! let pipeline = FittedPipeline::train(&tweets, Kernel::Linear)?;
//!
//! let label = pipeline.classify("Lower taxes and strong borders!")?;
//! println!("Affiliation: {label}");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Step by step
//!
//! The individual stages are exposed for callers that want to hold on to
//! intermediate results (for example to score a validation split):
//!
//! ```rust,no_run
//! use partisan::{
//!     create_features, create_labels, evaluate_classifier, learn_classifier, process_all,
//!     Kernel, StopwordSet,
//! };
//!
//! let train = partisan::load_tweets_csv("tweets_train.csv")?;
//! let processed = process_all(&train);
//! let (vectorizer, features) = create_features(&processed, StopwordSet::english());
//! let labels = create_labels(&processed);
//!
//! let classifier = learn_classifier(&features, &labels, Kernel::Rbf)?;
//! let accuracy = evaluate_classifier(&classifier, &features, &labels)?;
//! println!("train accuracy: {accuracy:.3}");
//! # Ok::<(), anyhow::Error>(())
//! ```

mod dataset;
mod labels;
mod pipeline;

pub use dataset::{load_tweets_csv, load_tweets_json, ProcessedTweet, TweetRecord};
pub use labels::{create_labels, Affiliation, REPUBLICAN_HANDLES};
pub use partisan_model::{accuracy, Kernel, MajorityClassifier, ModelError, Svc, SvcParams};
pub use partisan_pre_processing::pre_processor::{StopwordSet, TfidfVectorizer, VectorizerParams};
pub use pipeline::{
    classify_tweets, create_features, evaluate_classifier, learn_classifier, process_all,
    FittedPipeline,
};
