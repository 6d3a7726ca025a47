// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song records as stored in the backend table.

use serde::{Deserialize, Serialize};

/// Primary key of a song row
pub type SongId = i64;

/// A song that can be quizzed on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Song {
    /// Unique row id
    pub id: SongId,
    /// Song title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Link to the clip on YouTube
    pub youtube_url: String,
}

impl Song {
    /// Create a new song
    pub fn new(
        id: SongId,
        title: impl Into<String>,
        artist: impl Into<String>,
        youtube_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            youtube_url: youtube_url.into(),
        }
    }

    /// "Title - Artist", as shown in lists
    pub fn label(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}
