//! TF-IDF vectorization for the lexical strategy.
//!
//! Refit per request over the whole catalog snapshot: tokenization is
//! lowercase alphanumeric runs of length >= 2 with a fixed English
//! stop-word list, IDF is the smoothed `ln((1 + n) / (1 + df)) + 1`, and
//! rows are L2-normalized so cosine similarity reduces to a dot product.

use ndarray::Array2;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Fixed English stop-word list used by the tokenizer.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "cannot", "could", "couldn", "did", "didn", "do", "does", "doesn",
    "doing", "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn",
    "has", "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just",
    "me", "more", "most", "mustn", "my", "myself", "no", "nor", "not", "now", "of", "off", "on",
    "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "same", "shan", "she", "should", "shouldn", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn", "we", "were", "weren",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "won",
    "would", "wouldn", "you", "your", "yours", "yourself", "yourselves",
];

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Split into lowercase alphanumeric tokens, dropping single characters
/// and stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2 && !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Default)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the vocabulary from the documents and return one L2-normalized
    /// TF-IDF row per document.
    ///
    /// Vocabulary order is first-seen, so the matrix layout is deterministic
    /// for a fixed document sequence. An all-stop-word corpus yields an
    /// `n x 0` matrix; every similarity against it is zero.
    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        documents: &[S],
    ) -> Result<Array2<f32>, ndarray::ShapeError> {
        let tokenized: Vec<Vec<String>> =
            documents.iter().map(|d| tokenize(d.as_ref())).collect();

        self.vocabulary.clear();
        let mut doc_freq: Vec<usize> = Vec::new();
        for tokens in &tokenized {
            let mut seen_in_doc = HashSet::new();
            for token in tokens {
                let next = self.vocabulary.len();
                let idx = *self.vocabulary.entry(token.clone()).or_insert(next);
                if idx == doc_freq.len() {
                    doc_freq.push(0);
                }
                if seen_in_doc.insert(idx) {
                    doc_freq[idx] += 1;
                }
            }
        }

        let n_docs = documents.len();
        self.idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs as f32) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let vocab_size = self.vocabulary.len();
        let mut data = vec![0.0f32; n_docs * vocab_size];
        for (row, tokens) in tokenized.iter().enumerate() {
            let slice = &mut data[row * vocab_size..(row + 1) * vocab_size];
            for token in tokens {
                if let Some(&idx) = self.vocabulary.get(token) {
                    slice[idx] += 1.0;
                }
            }
            for (value, idf) in slice.iter_mut().zip(&self.idf) {
                *value *= idf;
            }
            let norm = slice.iter().map(|v| v * v).sum::<f32>().sqrt();
            if norm > 0.0 {
                for value in slice.iter_mut() {
                    *value /= norm;
                }
            }
        }

        Array2::from_shape_vec((n_docs, vocab_size), data)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}
