// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! PostgREST (Supabase) backed song repository.

use std::time::Duration;

use serde::Deserialize;

use super::{FetchError, SongRepository};
use crate::config::BackendConfig;
use crate::model::Song;

const REST_PATH: &str = "rest/v1";

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

/// Reads the song table through the REST interface of the data service
pub struct RestSongRepository {
    http_client: reqwest::Client,
    table_url: String,
    api_key: String,
}

impl RestSongRepository {
    /// Create a repository for the configured backend
    pub fn new(config: &BackendConfig) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            table_url: table_url(&config.url, &config.table),
            api_key: config.api_key.clone(),
        })
    }

    /// Full URL of the read-all query
    pub fn table_url(&self) -> &str {
        &self.table_url
    }
}

impl SongRepository for RestSongRepository {
    async fn try_fetch_all_songs(&self) -> Result<Vec<Song>, FetchError> {
        tracing::debug!(url = %self.table_url, "Querying song table");

        let response = self
            .http_client
            .get(&self.table_url)
            .query(&[("select", "*")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), body));
        }

        parse_songs(&body)
    }
}

fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), REST_PATH, table)
}

fn status_error(status: u16, body: String) -> FetchError {
    match serde_json::from_str::<BackendErrorBody>(&body) {
        Ok(error) => FetchError::Backend {
            status,
            code: error.code.unwrap_or_default(),
            message: error.message,
        },
        Err(_) => FetchError::Status { status, body },
    }
}

/// Decode a successful response body
pub(crate) fn parse_songs(body: &str) -> Result<Vec<Song>, FetchError> {
    // PostgREST answers `null` for some empty selections.
    let songs: Option<Vec<Song>> = serde_json::from_str(body)?;
    Ok(songs.unwrap_or_default())
}
