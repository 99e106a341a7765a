//! Per-song feature extraction for the two ranking strategies.

use crate::models::Song;

/// Bag-of-words document for the lexical strategy.
///
/// The concatenation order (title, contributor, tags, playlist) is fixed:
/// duplicate terms feed the TF weighting, and rankings must be reproducible
/// byte-for-byte for a given catalog.
pub fn document(song: &Song) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(2 + song.tags.len() + song.playlist.len());
    parts.push(&song.title);
    parts.push(&song.contributor);
    parts.extend(song.tags.iter().map(String::as_str));
    parts.extend(song.playlist.iter().map(String::as_str));
    parts.join(" ")
}

/// Token list for the embedding strategy: tags then playlist membership.
/// Title and contributor are excluded; the trained vocabulary is drawn
/// from tag/playlist tokens only.
pub fn tokens(song: &Song) -> Vec<String> {
    song.tags
        .iter()
        .chain(song.playlist.iter())
        .cloned()
        .collect()
}
