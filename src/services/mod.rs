pub mod catalog;
pub mod recommendation;
pub mod strategy;

// Re-export public types
pub use catalog::CatalogClient;
pub use recommendation::RecommendationService;
pub use strategy::{EmbeddingStrategy, LexicalStrategy, SimilarityStrategy};
