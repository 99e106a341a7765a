use serde::Deserialize;

use super::raw;

/// Canonical user record.
///
/// Likes are keyed by song *title*, not id. That is how the upstream
/// exposes them, and the lossy join is preserved as-is.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "raw::lossy_id")]
    pub id: Option<i64>,
    #[serde(default, alias = "gostei", alias = "likes", deserialize_with = "raw::name_refs")]
    pub liked_titles: Vec<String>,
}
