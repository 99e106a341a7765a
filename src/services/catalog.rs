use crate::error::Result;
use crate::models::{Song, User};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Read-only client for the upstream catalog API.
///
/// Each request fetches a fresh snapshot; nothing is cached across
/// requests, so a changing upstream catalog can never serve stale
/// similarity results.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    users_url: String,
    songs_url: String,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    #[serde(default, alias = "users")]
    user: Vec<Value>,
}

#[derive(Deserialize)]
struct SongsEnvelope {
    #[serde(default)]
    songs: Vec<Value>,
}

impl CatalogClient {
    pub fn new(users_url: &str, songs_url: &str) -> Self {
        Self {
            client: Client::new(),
            users_url: users_url.to_string(),
            songs_url: songs_url.to_string(),
        }
    }

    /// Fetch the current user snapshot.
    ///
    /// Individual malformed records are logged and skipped; only a
    /// transport or envelope-level decode failure is an error.
    pub async fn fetch_users(&self) -> Result<Vec<User>> {
        let envelope: UsersEnvelope = self
            .client
            .get(&self.users_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(collect_records(envelope.user, "user"))
    }

    /// Fetch the current song snapshot.
    pub async fn fetch_songs(&self) -> Result<Vec<Song>> {
        let envelope: SongsEnvelope = self
            .client
            .get(&self.songs_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(collect_records(envelope.songs, "song"))
    }
}

fn collect_records<T: serde::de::DeserializeOwned>(raw: Vec<Value>, kind: &str) -> Vec<T> {
    let total = raw.len();
    let records: Vec<T> = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Skipping malformed {} record: {}", kind, err);
                None
            }
        })
        .collect();
    debug!("Collected {}/{} {} records", records.len(), total, kind);
    records
}
