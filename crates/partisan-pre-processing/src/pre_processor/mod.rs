#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod normalizer;
mod stopwords;
mod vectorizer;

pub use normalizer::{
    process, process_all, process_all_with, process_with, Lemmatize, WordnetLemmatizer, WordnetPos,
};
pub use stopwords::StopwordSet;
pub use vectorizer::{TfidfVectorizer, VectorizerParams};
