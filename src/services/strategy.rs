//! The two interchangeable similarity strategies.
//!
//! Both fit from scratch inside `song_vectors`: the catalog can change
//! between requests, and refitting is the price of never serving stale
//! similarity scores.

use crate::config::StrategyKind;
use crate::error::Result;
use crate::ml::{features, similarity, TfidfVectorizer, Word2Vec, Word2VecConfig};
use crate::models::Song;
use ndarray::{Array1, Array2};
use tracing::debug;

pub trait SimilarityStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fit over the catalog snapshot and return one dense row per song.
    fn song_vectors(&self, catalog: &[Song]) -> Result<Array2<f32>>;

    /// Score every song against the liked rows. Scores are never NaN.
    fn score(&self, vectors: &Array2<f32>, liked_rows: &[usize]) -> Vec<f32>;
}

pub fn for_kind(kind: StrategyKind) -> Box<dyn SimilarityStrategy> {
    match kind {
        StrategyKind::Lexical => Box::new(LexicalStrategy),
        StrategyKind::Embedding => Box::new(EmbeddingStrategy::default()),
    }
}

/// TF-IDF over per-song documents; a candidate's score is the mean cosine
/// across the liked-song rows. Mean (not max) is a fixed design choice so
/// rankings stay deterministic and comparable across catalogs.
pub struct LexicalStrategy;

impl SimilarityStrategy for LexicalStrategy {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn song_vectors(&self, catalog: &[Song]) -> Result<Array2<f32>> {
        let documents: Vec<String> = catalog.iter().map(features::document).collect();
        let mut vectorizer = TfidfVectorizer::new();
        let matrix = vectorizer.fit_transform(&documents)?;
        debug!(
            "Fitted TF-IDF over {} documents, vocabulary size {}",
            documents.len(),
            vectorizer.vocabulary_size()
        );
        Ok(matrix)
    }

    fn score(&self, vectors: &Array2<f32>, liked_rows: &[usize]) -> Vec<f32> {
        if liked_rows.is_empty() {
            return vec![0.0; vectors.nrows()];
        }
        (0..vectors.nrows())
            .map(|row| {
                let sum: f32 = liked_rows
                    .iter()
                    .map(|&liked| similarity::cosine(vectors.row(row), vectors.row(liked)))
                    .sum();
                sum / liked_rows.len() as f32
            })
            .collect()
    }
}

/// Word2vec over tag/playlist tokens; the user is the mean of their liked
/// songs' vectors and candidates are scored by cosine against it.
pub struct EmbeddingStrategy {
    config: Word2VecConfig,
}

impl Default for EmbeddingStrategy {
    fn default() -> Self {
        Self {
            config: Word2VecConfig::default(),
        }
    }
}

impl EmbeddingStrategy {
    pub fn with_config(config: Word2VecConfig) -> Self {
        Self { config }
    }
}

impl SimilarityStrategy for EmbeddingStrategy {
    fn name(&self) -> &'static str {
        "embedding"
    }

    fn song_vectors(&self, catalog: &[Song]) -> Result<Array2<f32>> {
        let sentences: Vec<Vec<String>> = catalog.iter().map(features::tokens).collect();
        let model = Word2Vec::train(&sentences, &self.config);
        if model.is_none() {
            debug!("No usable tokens in the catalog; all song vectors are zero");
        }

        // A song is the mean of its known token vectors; no tokens means a
        // zero vector of the configured dimensionality, not a missing row.
        let dim = self.config.vector_size;
        let mut data = vec![0.0f32; catalog.len() * dim];
        if let Some(model) = &model {
            for (row, tokens) in sentences.iter().enumerate() {
                let slice = &mut data[row * dim..(row + 1) * dim];
                let mut known = 0usize;
                for token in tokens {
                    if let Some(vector) = model.vector(token) {
                        for (acc, value) in slice.iter_mut().zip(vector.iter()) {
                            *acc += *value;
                        }
                        known += 1;
                    }
                }
                if known > 0 {
                    for value in slice.iter_mut() {
                        *value /= known as f32;
                    }
                }
            }
        }
        Ok(Array2::from_shape_vec((catalog.len(), dim), data)?)
    }

    fn score(&self, vectors: &Array2<f32>, liked_rows: &[usize]) -> Vec<f32> {
        if liked_rows.is_empty() {
            return vec![0.0; vectors.nrows()];
        }
        let mut user = Array1::<f32>::zeros(vectors.ncols());
        for &liked in liked_rows {
            user += &vectors.row(liked);
        }
        user /= liked_rows.len() as f32;

        (0..vectors.nrows())
            .map(|row| similarity::cosine(user.view(), vectors.row(row)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str, tags: &[&str]) -> Song {
        Song {
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Song::default()
        }
    }

    #[test]
    fn lexical_vectors_have_one_row_per_song() {
        let catalog = vec![song("Song A", &["rock"]), song("Song B", &["jazz"])];
        let vectors = LexicalStrategy.song_vectors(&catalog).unwrap();
        assert_eq!(vectors.nrows(), 2);
    }

    #[test]
    fn lexical_scores_shared_tags_higher() {
        let catalog = vec![
            song("Song A", &["rock"]),
            song("Song B", &["rock"]),
            song("Song C", &["jazz"]),
        ];
        let vectors = LexicalStrategy.song_vectors(&catalog).unwrap();
        let scores = LexicalStrategy.score(&vectors, &[0]);
        assert!(scores[1] > scores[2]);
        // Self-similarity is the maximum attainable score in the row.
        assert!(scores[0] >= scores[1]);
    }

    #[test]
    fn embedding_songs_without_tokens_get_zero_vectors() {
        let strategy = EmbeddingStrategy::with_config(Word2VecConfig {
            vector_size: 8,
            ..Word2VecConfig::default()
        });
        let catalog = vec![song("Song A", &["rock"]), song("Song B", &[])];
        let vectors = strategy.song_vectors(&catalog).unwrap();
        assert_eq!(vectors.dim(), (2, 8));
        assert!(vectors.row(1).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn embedding_scores_shared_tokens_higher() {
        let strategy = EmbeddingStrategy::with_config(Word2VecConfig {
            vector_size: 8,
            ..Word2VecConfig::default()
        });
        let catalog = vec![
            song("Song A", &["rock"]),
            song("Song B", &["rock"]),
            song("Song C", &["jazz"]),
        ];
        let vectors = strategy.song_vectors(&catalog).unwrap();
        let scores = strategy.score(&vectors, &[0]);
        // A and B share their only token, so their vectors are identical.
        assert!(scores[1] > scores[2]);
    }

    #[test]
    fn tokenless_catalog_scores_all_zero() {
        let strategy = EmbeddingStrategy::with_config(Word2VecConfig {
            vector_size: 8,
            ..Word2VecConfig::default()
        });
        let catalog = vec![song("Song A", &[]), song("Song B", &[])];
        let vectors = strategy.song_vectors(&catalog).unwrap();
        let scores = strategy.score(&vectors, &[0]);
        assert_eq!(scores, vec![0.0, 0.0]);
    }
}
