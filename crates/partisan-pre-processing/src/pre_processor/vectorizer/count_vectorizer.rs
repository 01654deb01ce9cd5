use ahash::{HashMap, HashMapExt};
use dashmap::DashMap;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use sprs::CsMat;
use tracing::debug;

use super::params::VectorizerParams;

/// Term-count vectorizer over pre-tokenized documents.
///
/// Input documents are literal token sequences from the normalizer; there is
/// no re-tokenization and no case folding here. Stop words and terms below
/// `min_df` never enter the vocabulary.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CountVectorizer {
    params: VectorizerParams,
    /// Vocabulary mapping term to feature index, in sorted term order so
    /// column layout is deterministic across fits.
    vocab: HashMap<String, usize>,
}

impl CountVectorizer {
    pub fn fit<D: AsRef<[String]> + Sync>(docs: &[D], params: VectorizerParams) -> Self {
        debug!(num_docs = docs.len(), "Fitting CountVectorizer");

        let vocab_df: DashMap<String, usize, ahash::RandomState> =
            DashMap::with_hasher(ahash::RandomState::default());

        docs.par_iter().progress().for_each(|tokens| {
            let distinct: ahash::HashSet<&str> = tokens
                .as_ref()
                .iter()
                .map(String::as_str)
                .filter(|token| !params.stop_words().contains(token))
                .collect();
            for token in distinct {
                vocab_df
                    .entry(token.to_owned())
                    .and_modify(|df| *df += 1)
                    .or_insert(1usize);
            }
        });

        let vocab_size = vocab_df.len();

        debug!(min_df = params.min_df(), "Applying min_df filtering");
        let mut sorted_terms = vocab_df
            .into_iter()
            .filter(|(_, df)| *df >= params.min_df())
            .map(|(term, _)| term)
            .collect::<Vec<_>>();
        debug!(
            original_size = vocab_size,
            filtered_size = sorted_terms.len(),
            "Vocabulary filtered by min_df"
        );

        sorted_terms.sort();
        let vocab = sorted_terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect::<HashMap<String, usize>>();

        debug!(vocab_size = vocab.len(), "CountVectorizer fitting complete");

        Self { params, vocab }
    }

    pub fn transform<D: AsRef<[String]>>(&self, docs: &[D]) -> CsMat<f64> {
        debug!(
            num_docs = docs.len(),
            "Transforming documents using CountVectorizer"
        );

        // Build CSR format directly
        let mut indptr = Vec::with_capacity(docs.len() + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();

        indptr.push(0);

        for tokens in docs {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for token in tokens.as_ref() {
                *counts.entry(token.as_str()).or_insert(0) += 1;
            }

            // Out-of-vocabulary terms (stop words included) simply drop out
            let mut row_entries = counts
                .iter()
                .filter_map(|(term, &count)| {
                    self.vocab.get(*term).map(|&col_idx| (col_idx, count as f64))
                })
                .collect::<Vec<_>>();

            row_entries.sort_by_key(|(col_idx, _)| *col_idx);
            for (col_idx, count) in row_entries {
                indices.push(col_idx);
                data.push(count);
            }
            indptr.push(indices.len());
        }

        debug!(
            non_zero_entries = data.len(),
            "Document transformation complete"
        );
        CsMat::new((docs.len(), self.num_features()), indptr, indices, data)
    }

    pub fn fit_transform<D: AsRef<[String]> + Sync>(
        docs: &[D],
        params: VectorizerParams,
    ) -> (Self, CsMat<f64>) {
        let vectorizer = Self::fit(docs, params);
        let transformed = vectorizer.transform(docs);
        (vectorizer, transformed)
    }

    pub fn num_features(&self) -> usize {
        self.vocab.len()
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocab
    }

    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }
}
