use crate::error::{ApiError, Result};
use std::env;

/// Ranking strategy selected at startup via `RECOMMENDER_STRATEGY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// TF-IDF over song documents, mean cosine against liked songs.
    Lexical,
    /// Word2vec over tag/playlist tokens, cosine against the user vector.
    Embedding,
}

impl StrategyKind {
    fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "lexical" => Ok(StrategyKind::Lexical),
            "embedding" => Ok(StrategyKind::Embedding),
            other => Err(ApiError::InvalidInput(format!(
                "Unknown RECOMMENDER_STRATEGY '{}' (expected 'lexical' or 'embedding')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub users_api_url: String,
    pub songs_api_url: String,
    pub strategy: StrategyKind,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            users_api_url: env::var("USERS_API_URL")
                .unwrap_or_else(|_| "https://starting-music.onrender.com/user".to_string()),
            songs_api_url: env::var("SONGS_API_URL")
                .unwrap_or_else(|_| "https://starting-music.onrender.com/music".to_string()),
            strategy: StrategyKind::parse(
                &env::var("RECOMMENDER_STRATEGY").unwrap_or_else(|_| "lexical".to_string()),
            )?,
        })
    }
}
