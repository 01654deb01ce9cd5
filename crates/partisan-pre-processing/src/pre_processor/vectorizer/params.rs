use crate::pre_processor::StopwordSet;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct VectorizerParams {
    /// Minimum document frequency (absolute count) for a term to enter the
    /// vocabulary.
    min_df: usize,
    /// Terms in this set never enter the vocabulary.
    stop_words: StopwordSet,
}

impl VectorizerParams {
    pub fn new(min_df: usize, stop_words: StopwordSet) -> Self {
        assert!(min_df >= 1, "min_df must be at least 1");
        Self { min_df, stop_words }
    }

    #[must_use]
    pub fn min_df(&self) -> usize {
        self.min_df
    }

    #[must_use]
    pub fn stop_words(&self) -> &StopwordSet {
        &self.stop_words
    }
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self {
            min_df: 2,
            stop_words: StopwordSet::english(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_min_df_is_two() {
        assert_eq!(VectorizerParams::default().min_df(), 2);
    }

    #[test]
    #[should_panic(expected = "min_df must be at least 1")]
    fn zero_min_df_is_rejected() {
        let _ = VectorizerParams::new(0, StopwordSet::empty());
    }
}
