pub mod features;
pub mod similarity;
pub mod tfidf;
pub mod word2vec;

pub use tfidf::TfidfVectorizer;
pub use word2vec::{Word2Vec, Word2VecConfig};
