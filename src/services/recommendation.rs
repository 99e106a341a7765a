use crate::config::StrategyKind;
use crate::error::Result;
use crate::models::{Outcome, RecommendationResponse, RecommendedSong, Song, User};
use crate::services::strategy::{self, SimilarityStrategy};
use std::collections::HashSet;
use tracing::{debug, info};

/// Upper bound on the songs returned by any outcome.
const MAX_RECOMMENDATIONS: usize = 10;

/// Ranks a catalog against a user's liked songs and applies the
/// selection/fallback policy shared by both strategies.
pub struct RecommendationService {
    strategy: Box<dyn SimilarityStrategy>,
}

impl RecommendationService {
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            strategy: strategy::for_kind(kind),
        }
    }

    pub fn with_strategy(strategy: Box<dyn SimilarityStrategy>) -> Self {
        Self { strategy }
    }

    /// Produce at most ten recommendations for the user.
    ///
    /// Pure with respect to its inputs: the same catalog and user always
    /// yield the same ordered result (ties break by catalog order).
    pub fn recommend(&self, user: &User, catalog: &[Song]) -> Result<RecommendationResponse> {
        if user.liked_titles.is_empty() {
            info!("User {:?} has no liked songs; returning catalog sample", user.id);
            return Ok(catalog_sample(catalog));
        }

        let liked: HashSet<&str> = user.liked_titles.iter().map(String::as_str).collect();
        let liked_rows: Vec<usize> = catalog
            .iter()
            .enumerate()
            .filter(|(_, song)| liked.contains(song.title.as_str()))
            .map(|(row, _)| row)
            .collect();

        if liked_rows.is_empty() {
            // Likes that never intersect the catalog carry no signal.
            info!("No liked title found in the catalog; returning catalog sample");
            return Ok(catalog_sample(catalog));
        }

        let vectors = self.strategy.song_vectors(catalog)?;
        let scores = self.strategy.score(&vectors, &liked_rows);
        debug!(
            "Scored {} songs with the {} strategy against {} liked rows",
            scores.len(),
            self.strategy.name(),
            liked_rows.len()
        );

        let mut candidates: Vec<usize> = (0..catalog.len())
            .filter(|&row| !liked.contains(catalog[row].title.as_str()))
            .collect();
        if candidates.is_empty() {
            return Ok(RecommendationResponse {
                outcome: Outcome::EmptyCatalogAfterExclusion,
                songs: Vec::new(),
            });
        }

        // Stable sort keeps catalog order on ties, so the ranking is
        // deterministic for a fixed snapshot.
        candidates.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let songs = candidates
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|row| RecommendedSong::from(&catalog[row]))
            .collect();

        Ok(RecommendationResponse {
            outcome: Outcome::Ranked,
            songs,
        })
    }
}

fn catalog_sample(catalog: &[Song]) -> RecommendationResponse {
    RecommendationResponse {
        outcome: Outcome::FallbackSample,
        songs: catalog
            .iter()
            .take(MAX_RECOMMENDATIONS)
            .map(RecommendedSong::from)
            .collect(),
    }
}
