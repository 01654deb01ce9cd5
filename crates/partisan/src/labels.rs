use core::fmt;

use crate::dataset::ProcessedTweet;

/// The Twitter handles labeled Republican; every other handle is Democratic.
pub const REPUBLICAN_HANDLES: [&str; 3] = ["realDonaldTrump", "mike_pence", "GOP"];

/// Binary class label derived from a tweet's screen name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Affiliation {
    Republican,
    Democratic,
}

impl Affiliation {
    /// Pure function of the identifier field; nothing is learned here.
    #[must_use]
    pub fn from_screen_name(screen_name: &str) -> Self {
        if REPUBLICAN_HANDLES.contains(&screen_name) {
            Self::Republican
        } else {
            Self::Democratic
        }
    }

    /// Returns true if this label is Republican
    #[must_use]
    pub fn is_republican(&self) -> bool {
        matches!(self, Self::Republican)
    }

    /// Returns true if this label is Democratic
    #[must_use]
    pub fn is_democratic(&self) -> bool {
        matches!(self, Self::Democratic)
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Republican => write!(f, "Republican"),
            Self::Democratic => write!(f, "Democratic"),
        }
    }
}

impl From<Affiliation> for i64 {
    fn from(label: Affiliation) -> Self {
        match label {
            Affiliation::Republican => 0,
            Affiliation::Democratic => 1,
        }
    }
}

/// Map every row's screen name to its class label.
#[must_use]
pub fn create_labels(tweets: &[ProcessedTweet]) -> Vec<Affiliation> {
    tweets
        .iter()
        .map(|tweet| Affiliation::from_screen_name(&tweet.screen_name))
        .collect()
}
