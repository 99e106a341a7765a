use serde::Serialize;

use super::Song;

/// How the recommendation list was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Ranked by similarity to the user's liked songs.
    Ranked,
    /// Not enough signal to rank; first songs in catalog order.
    FallbackSample,
    /// Excluding the liked songs left no candidates.
    EmptyCatalogAfterExclusion,
}

/// Tag reference in the external response shape. The upstream ids are
/// discarded during normalization, so `id` is always empty here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagRef {
    pub id: String,
    pub name: String,
}

/// External-facing song shape. Every scalar is a string for transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedSong {
    pub name: String,
    pub artist: String,
    pub url: String,
    pub duration: String,
    pub release_date: String,
    pub image_url: String,
    pub tags: Vec<TagRef>,
    pub playlist: Vec<String>,
    pub user_liked: Vec<String>,
}

impl From<&Song> for RecommendedSong {
    fn from(song: &Song) -> Self {
        Self {
            name: song.title.clone(),
            artist: song.contributor.clone(),
            url: song.url.clone(),
            duration: song.duration.clone(),
            release_date: song.release_date.clone(),
            image_url: song.image_url.clone(),
            tags: song
                .tags
                .iter()
                .map(|name| TagRef {
                    id: String::new(),
                    name: name.clone(),
                })
                .collect(),
            playlist: song.playlist.clone(),
            user_liked: song.liked_by.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub outcome: Outcome,
    pub songs: Vec<RecommendedSong>,
}
