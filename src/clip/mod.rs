// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! YouTube clip reference resolution.
//!
//! Song rows carry whatever link the curator pasted: short links, embed
//! links or watch pages with extra query parameters. The embedded player
//! only understands the bare 11-character video id.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of a YouTube video id
pub const CLIP_ID_LEN: usize = 11;

const EMBED_BASE_URL: &str = "https://www.youtube.com/embed/";

static CLIP_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("clip URL pattern is valid")
});

/// A resolved YouTube video id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipId(String);

impl ClipId {
    /// The raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL for the embedded player
    pub fn embed_url(&self, autoplay: bool) -> String {
        if autoplay {
            format!("{}{}?autoplay=1", EMBED_BASE_URL, self.0)
        } else {
            format!("{}{}", EMBED_BASE_URL, self.0)
        }
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video id from a clip URL.
///
/// Returns `None` when no known URL shape matches or the matched segment
/// is not exactly [`CLIP_ID_LEN`] characters long.
pub fn resolve_playable_id(url: &str) -> Option<ClipId> {
    let captures = CLIP_URL_PATTERN.captures(url)?;
    let id = captures.get(2)?.as_str();

    if id.chars().count() == CLIP_ID_LEN {
        Some(ClipId(id.to_string()))
    } else {
        None
    }
}
