// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song repository access.
//!
//! The quiz reads its complete song collection once, at startup. Any
//! failure is logged and turned into an empty collection so the UI can
//! show its no-data state instead of failing.

mod rest;

pub use rest::RestSongRepository;

use std::future::Future;

use thiserror::Error;

use crate::model::Song;

/// Errors that can occur while reading the song table
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be sent or the response could not be read
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status without a recognizable error body
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend reported an error
    #[error("Backend error {status} ({code}): {message}")]
    Backend {
        status: u16,
        code: String,
        message: String,
    },

    /// Response body was not a list of songs
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read access to the song collection
pub trait SongRepository: Send + Sync + 'static {
    /// Read every song, reporting failures
    fn try_fetch_all_songs(&self) -> impl Future<Output = Result<Vec<Song>, FetchError>> + Send;

    /// Read every song; failures are logged and yield an empty list
    fn fetch_all_songs(&self) -> impl Future<Output = Vec<Song>> + Send {
        async move {
            match self.try_fetch_all_songs().await {
                Ok(songs) => {
                    tracing::info!(count = songs.len(), "Fetched songs");
                    songs
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error fetching songs");
                    Vec::new()
                }
            }
        }
    }
}
