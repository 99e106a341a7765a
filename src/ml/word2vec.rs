//! Minimal word2vec (skip-gram with negative sampling) trained per request
//! over the catalog's tag/playlist token lists.
//!
//! The RNG is seeded, training is sequential, and the vocabulary is indexed
//! in first-seen order, so two trainings over the same sentences produce
//! identical vectors. With `min_count = 1` no catalog token is ever
//! out-of-vocabulary.

use ndarray::{Array2, ArrayView1};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Word2VecConfig {
    pub vector_size: usize,
    pub window: usize,
    pub min_count: usize,
    pub epochs: usize,
    pub negative: usize,
    pub learning_rate: f32,
    pub seed: u64,
}

impl Default for Word2VecConfig {
    fn default() -> Self {
        Self {
            vector_size: 100,
            window: 5,
            min_count: 1,
            epochs: 5,
            negative: 5,
            learning_rate: 0.025,
            seed: 42,
        }
    }
}

pub struct Word2Vec {
    vocab: HashMap<String, usize>,
    vectors: Array2<f32>,
    vector_size: usize,
}

impl Word2Vec {
    /// Train over the sentences. Returns `None` when the corpus has no
    /// token meeting `min_count`.
    pub fn train(sentences: &[Vec<String>], config: &Word2VecConfig) -> Option<Self> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for sentence in sentences {
            for token in sentence {
                *counts.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        // First-seen index order keeps training deterministic.
        let mut vocab: HashMap<String, usize> = HashMap::new();
        let mut freq: Vec<usize> = Vec::new();
        for sentence in sentences {
            for token in sentence {
                if counts[token.as_str()] < config.min_count {
                    continue;
                }
                if !vocab.contains_key(token.as_str()) {
                    vocab.insert(token.clone(), freq.len());
                    freq.push(counts[token.as_str()]);
                }
            }
        }
        if vocab.is_empty() {
            return None;
        }

        let vocab_size = vocab.len();
        let dim = config.vector_size;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let bound = 0.5 / dim as f32;
        let mut input = Array2::from_shape_fn((vocab_size, dim), |_| rng.gen_range(-bound..bound));
        let mut output = Array2::<f32>::zeros((vocab_size, dim));

        // Unigram^0.75 cumulative table for negative sampling.
        let mut cumulative: Vec<f64> = Vec::with_capacity(vocab_size);
        let mut running = 0.0f64;
        for &count in &freq {
            running += (count as f64).powf(0.75);
            cumulative.push(running);
        }
        let total_weight = running;

        let encoded: Vec<Vec<usize>> = sentences
            .iter()
            .map(|sentence| {
                sentence
                    .iter()
                    .filter_map(|token| vocab.get(token.as_str()).copied())
                    .collect()
            })
            .collect();
        let corpus_words: usize = encoded.iter().map(Vec::len).sum();
        let total_words = (corpus_words * config.epochs).max(1);
        debug!(
            "Training word2vec: {} tokens, {} sentences, dim {}",
            vocab_size,
            encoded.len(),
            dim
        );

        let mut processed = 0usize;
        for _ in 0..config.epochs {
            for sentence in &encoded {
                for (pos, &center) in sentence.iter().enumerate() {
                    let progress = processed as f32 / total_words as f32;
                    let lr = (config.learning_rate * (1.0 - progress))
                        .max(config.learning_rate * 1e-2);
                    processed += 1;

                    let start = pos.saturating_sub(config.window);
                    let end = (pos + config.window + 1).min(sentence.len());
                    for context_pos in start..end {
                        if context_pos == pos {
                            continue;
                        }
                        train_pair(
                            center,
                            sentence[context_pos],
                            &mut input,
                            &mut output,
                            lr,
                            config.negative,
                            &cumulative,
                            total_weight,
                            &mut rng,
                        );
                    }
                }
            }
        }

        Some(Self {
            vocab,
            vectors: input,
            vector_size: dim,
        })
    }

    pub fn vector(&self, token: &str) -> Option<ArrayView1<'_, f32>> {
        self.vocab.get(token).map(|&idx| self.vectors.row(idx))
    }

    pub fn vector_size(&self) -> usize {
        self.vector_size
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocab.len()
    }
}

/// One SGNS update: the observed context plus `negative` sampled words.
#[allow(clippy::too_many_arguments)]
fn train_pair(
    center: usize,
    context: usize,
    input: &mut Array2<f32>,
    output: &mut Array2<f32>,
    lr: f32,
    negative: usize,
    cumulative: &[f64],
    total_weight: f64,
    rng: &mut StdRng,
) {
    let dim = input.ncols();
    let center_vec = input.row(center).to_owned();
    let mut center_grad = vec![0.0f32; dim];

    for sample in 0..=negative {
        let (word, label) = if sample == 0 {
            (context, 1.0f32)
        } else {
            let drawn = sample_negative(cumulative, total_weight, rng);
            if drawn == context {
                continue;
            }
            (drawn, 0.0f32)
        };

        let mut out_row = output.row_mut(word);
        let dot: f32 = center_vec
            .iter()
            .zip(out_row.iter())
            .map(|(a, b)| a * b)
            .sum();
        let gradient = (label - sigmoid(dot)) * lr;
        for ((grad, out), center_val) in
            center_grad.iter_mut().zip(out_row.iter_mut()).zip(center_vec.iter())
        {
            *grad += gradient * *out;
            *out += gradient * *center_val;
        }
    }

    let mut center_row = input.row_mut(center);
    for (value, grad) in center_row.iter_mut().zip(center_grad.iter()) {
        *value += *grad;
    }
}

fn sample_negative(cumulative: &[f64], total_weight: f64, rng: &mut StdRng) -> usize {
    let target = rng.gen::<f64>() * total_weight;
    cumulative.partition_point(|&weight| weight < target).min(cumulative.len() - 1)
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x.clamp(-6.0, 6.0)).exp())
}
