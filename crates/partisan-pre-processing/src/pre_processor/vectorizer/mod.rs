mod count_vectorizer;
mod params;
mod tfidf_vectorizer;

pub use params::VectorizerParams;
pub use tfidf_vectorizer::TfidfVectorizer;
