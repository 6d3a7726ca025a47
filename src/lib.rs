// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song quiz: guess which song is playing.
//!
//! Songs are read once from a hosted table, a random round of candidates is
//! drawn, the target's YouTube clip is handed to the player and the user
//! picks an answer in the terminal.

pub mod clip;
pub mod config;
pub mod loader;
pub mod model;
pub mod player;
pub mod quiz;
pub mod repository;
pub mod ui;

pub use clip::{resolve_playable_id, ClipId};
pub use model::{Song, SongId};
pub use quiz::{Feedback, Message, Phase, Quiz, Round, RowMark};
