//! Tweet dataset loading and the processed-row type.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One raw tweet as read from disk. Extra CSV columns are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetRecord {
    pub text: String,
    pub screen_name: String,
}

/// A tweet whose text column has been replaced by its normalized token
/// sequence. Other fields carry over unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedTweet {
    pub tokens: Vec<String>,
    pub screen_name: String,
}

/// Load tweets from a CSV file with `text` and `screen_name` columns.
pub fn load_tweets_csv<P: AsRef<Path>>(path: P) -> Result<Vec<TweetRecord>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

    let mut reader = csv::Reader::from_reader(file);
    let mut tweets = Vec::new();

    for result in reader.deserialize() {
        let tweet: TweetRecord = result.context("Failed to parse tweet row")?;
        tweets.push(tweet);
    }

    Ok(tweets)
}

/// Load tweets from a JSON array file.
pub fn load_tweets_json<P: AsRef<Path>>(path: P) -> Result<Vec<TweetRecord>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

    let tweets: Vec<TweetRecord> = serde_json::from_reader(file)?;
    Ok(tweets)
}
