use serde::Deserialize;

use super::raw;

/// Canonical song record.
///
/// `title` and `contributor` are never absent (empty string if unknown);
/// `tags` and `playlist` are always present as possibly-empty ordered
/// sequences. The presentation fields (`url`, `duration`, ...) are carried
/// through for the response formatter and coerced to strings on the way in.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Song {
    #[serde(default, deserialize_with = "raw::lossy_string")]
    pub id: String,
    #[serde(default, alias = "nome", alias = "name", deserialize_with = "raw::lossy_string")]
    pub title: String,
    #[serde(default, alias = "artista", alias = "artist", deserialize_with = "raw::lossy_string")]
    pub contributor: String,
    #[serde(default, deserialize_with = "raw::name_refs")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "raw::name_refs")]
    pub playlist: Vec<String>,
    #[serde(default, alias = "userLiked", deserialize_with = "raw::name_refs")]
    pub liked_by: Vec<String>,
    #[serde(default, deserialize_with = "raw::lossy_string")]
    pub url: String,
    #[serde(default, alias = "duracao", deserialize_with = "raw::lossy_string")]
    pub duration: String,
    #[serde(default, alias = "data_lanc", alias = "releaseDate", deserialize_with = "raw::lossy_string")]
    pub release_date: String,
    #[serde(default, alias = "image_url", alias = "imageUrl", deserialize_with = "raw::lossy_string")]
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_full_upstream_record() {
        let song: Song = serde_json::from_value(json!({
            "id": 7,
            "nome": "Bohemian Rhapsody",
            "artista": "Queen",
            "tags": [{"id": 1, "nome": "rock"}, {"id": 2, "nome": "classic"}],
            "playlist": [{"id": 9, "nome": "70s hits"}],
            "userLiked": [{"id": 3, "nome": "alice"}],
            "url": "https://cdn.example/bohemian.mp3",
            "duracao": 355,
            "data_lanc": "1975-10-31",
            "image_url": "https://cdn.example/bohemian.jpg"
        }))
        .unwrap();

        assert_eq!(song.id, "7");
        assert_eq!(song.title, "Bohemian Rhapsody");
        assert_eq!(song.contributor, "Queen");
        assert_eq!(song.tags, vec!["rock", "classic"]);
        assert_eq!(song.playlist, vec!["70s hits"]);
        assert_eq!(song.liked_by, vec!["alice"]);
        assert_eq!(song.duration, "355");
        assert_eq!(song.release_date, "1975-10-31");
    }

    #[test]
    fn missing_fields_become_defaults_not_errors() {
        let song: Song = serde_json::from_value(json!({})).unwrap();
        assert_eq!(song, Song::default());
    }

    #[test]
    fn accepts_english_field_variants() {
        let song: Song = serde_json::from_value(json!({
            "name": "Song A",
            "artist": "Someone",
            "tags": "rock"
        }))
        .unwrap();
        assert_eq!(song.title, "Song A");
        assert_eq!(song.contributor, "Someone");
        assert_eq!(song.tags, vec!["rock"]);
    }

    #[test]
    fn wrong_typed_fields_are_recovered() {
        let song: Song = serde_json::from_value(json!({
            "nome": 123,
            "tags": {"nope": true},
            "playlist": [{"id": 4}]
        }))
        .unwrap();
        assert_eq!(song.title, "123");
        assert!(song.tags.is_empty());
        assert_eq!(song.playlist, vec![""]);
    }
}
