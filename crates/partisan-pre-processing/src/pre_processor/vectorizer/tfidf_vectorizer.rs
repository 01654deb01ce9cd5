use ahash::HashMap;
use sprs::CsMat;
use tracing::debug;

use super::{count_vectorizer::CountVectorizer, params::VectorizerParams};

/// TF-IDF vectorizer over pre-tokenized documents.
///
/// Must be fit exactly once on training documents and then reused for any
/// later corpus; transforming with the same instance guarantees an identical
/// column layout and weighting.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TfidfVectorizer {
    count_vectorizer: CountVectorizer,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit<D: AsRef<[String]> + Sync>(docs: &[D], params: VectorizerParams) -> Self {
        debug!(num_docs = docs.len(), "Fitting TfidfVectorizer");
        let (count_vectorizer, tf_matrix) = CountVectorizer::fit_transform(docs, params);
        debug!("Calculating IDF values");

        // Smoothed IDF: log((n_docs + 1) / (df + 1)) + 1
        let n_docs = docs.len() as f64;
        let num_features = count_vectorizer.num_features();

        // Count document frequency for each term
        let mut df = vec![0usize; num_features];

        for row_vec in tf_matrix.outer_iterator() {
            for (col_idx, _val) in row_vec.iter() {
                df[col_idx] += 1;
            }
        }
        let idf = df
            .iter()
            .map(|&doc_freq| ((n_docs + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0)
            .collect();
        debug!("IDF calculation complete");

        Self {
            count_vectorizer,
            idf,
        }
    }

    pub fn transform<D: AsRef<[String]>>(&self, docs: &[D]) -> CsMat<f64> {
        debug!(
            num_docs = docs.len(),
            "Transforming documents using TfidfVectorizer"
        );
        let mut tf_matrix = self.count_vectorizer.transform(docs);

        for mut row_vec in tf_matrix.outer_iterator_mut() {
            // Apply IDF
            for (col_idx, val) in row_vec.iter_mut() {
                *val *= self.idf[col_idx];
            }
            // Normalize row vector (L2 norm)
            let norm = row_vec.iter().map(|(_, &v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, val) in row_vec.iter_mut() {
                    *val /= norm;
                }
            }
        }
        tf_matrix
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
        self.count_vectorizer.num_features()
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        self.count_vectorizer.vocabulary()
    }

    pub fn params(&self) -> &VectorizerParams {
        self.count_vectorizer.params()
    }
}
