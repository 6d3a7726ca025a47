// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the quiz.
//!
//! Settings are read from a TOML or YAML file (chosen by extension) and can
//! be overridden from the command line. Every section has defaults so an
//! empty file, or no file at all, is valid apart from the backend URL.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quiz::DEFAULT_ROUND_SIZE;

/// Largest round that can be answered with the digit keys
pub const MAX_ROUND_SIZE: usize = 9;

/// A setting that cannot be used
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("backend.url is not set")]
    MissingBackendUrl,

    #[error("backend.table is empty")]
    EmptyTable,

    #[error("backend.timeout_secs must be at least 1")]
    ZeroTimeout,

    #[error("quiz.round_size must be at least 2, got {0}")]
    RoundSizeTooSmall(usize),

    #[error("quiz.round_size must be at most {MAX_ROUND_SIZE}, got {0}")]
    RoundSizeTooLarge(usize),

    #[error("ui.frame_rate must be between 1 and 120, got {0}")]
    InvalidFrameRate(u32),
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QuizConfig {
    /// Data service settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Round settings
    #[serde(default)]
    pub quiz: RoundConfig,
    /// Embedded player settings
    #[serde(default)]
    pub player: PlayerConfig,
    /// Terminal UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

impl QuizConfig {
    /// Load configuration from a `.toml`, `.yaml` or `.yml` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            _ => Self::from_toml(&contents),
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self> {
        toml::from_str(toml).context("Failed to parse TOML configuration")
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Check that the settings can be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.url.trim().is_empty() {
            return Err(ConfigError::MissingBackendUrl);
        }
        if self.backend.table.trim().is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.quiz.round_size < 2 {
            return Err(ConfigError::RoundSizeTooSmall(self.quiz.round_size));
        }
        if self.quiz.round_size > MAX_ROUND_SIZE {
            return Err(ConfigError::RoundSizeTooLarge(self.quiz.round_size));
        }
        if !(1..=120).contains(&self.ui.frame_rate) {
            return Err(ConfigError::InvalidFrameRate(self.ui.frame_rate));
        }
        Ok(())
    }
}

/// Data service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub url: String,
    /// Public (anon) API key
    #[serde(default)]
    pub api_key: String,
    /// Table holding the songs
    #[serde(default = "default_table")]
    pub table: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_table() -> String {
    "songs".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Round settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundConfig {
    /// Candidates offered per round
    #[serde(default = "default_round_size")]
    pub round_size: usize,
}

fn default_round_size() -> usize {
    DEFAULT_ROUND_SIZE
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            round_size: default_round_size(),
        }
    }
}

/// Embedded player settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Player height
    #[serde(default = "default_player_height")]
    pub height: u16,
    /// Start the clip as soon as a round begins
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
    /// Command used to open the clip, e.g. `xdg-open`
    #[serde(default)]
    pub open_command: Option<String>,
}

fn default_player_height() -> u16 {
    240
}
fn default_autoplay() -> bool {
    true
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            height: default_player_height(),
            autoplay: default_autoplay(),
            open_command: None,
        }
    }
}

/// Terminal UI settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Redraws per second
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

fn default_frame_rate() -> u32 {
    30
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[backend]
url = "https://abc.supabase.co"
api_key = "anon"

[quiz]
round_size = 6

[player]
autoplay = false
open_command = "xdg-open"
"#;

        let config = QuizConfig::from_toml(toml).unwrap();
        assert_eq!(config.backend.url, "https://abc.supabase.co");
        assert_eq!(config.backend.api_key, "anon");
        assert_eq!(config.backend.table, "songs");
        assert_eq!(config.quiz.round_size, 6);
        assert!(!config.player.autoplay);
        assert_eq!(config.player.height, 240);
        assert_eq!(config.player.open_command.as_deref(), Some("xdg-open"));
        assert_eq!(config.ui.frame_rate, 30);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
backend:
  url: "http://localhost:54321"
  table: quiz_songs
ui:
  frame_rate: 60
"#;

        let config = QuizConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.backend.url, "http://localhost:54321");
        assert_eq!(config.backend.table, "quiz_songs");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.ui.frame_rate, 60);
        assert_eq!(config.quiz.round_size, 4);
    }

    #[test]
    fn test_default_values() {
        let config = QuizConfig::from_toml("").unwrap();
        assert_eq!(config, QuizConfig::default());
        assert_eq!(config.quiz.round_size, 4);
        assert_eq!(config.player.height, 240);
        assert!(config.player.autoplay);
    }

    #[test]
    fn test_validate() {
        let mut config = QuizConfig::default();
        assert_eq!(config.validate(), Err(ConfigError::MissingBackendUrl));

        config.backend.url = "https://abc.supabase.co".to_string();
        assert_eq!(config.validate(), Ok(()));

        config.quiz.round_size = 1;
        assert_eq!(config.validate(), Err(ConfigError::RoundSizeTooSmall(1)));

        config.quiz.round_size = 10;
        assert_eq!(config.validate(), Err(ConfigError::RoundSizeTooLarge(10)));

        config.quiz.round_size = MAX_ROUND_SIZE;
        assert_eq!(config.validate(), Ok(()));

        config.quiz.round_size = 4;
        config.backend.timeout_secs = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        config.backend.timeout_secs = 10;
        config.ui.frame_rate = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFrameRate(0)));

        config.ui.frame_rate = 30;
        config.backend.table = " ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyTable));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempdir().unwrap();

        let toml_path = dir.path().join("quiz.toml");
        fs::write(&toml_path, "[backend]\nurl = \"https://a.b\"\n").unwrap();
        assert_eq!(QuizConfig::load(&toml_path).unwrap().backend.url, "https://a.b");

        let yaml_path = dir.path().join("quiz.yml");
        fs::write(&yaml_path, "backend:\n  url: https://c.d\n").unwrap();
        assert_eq!(QuizConfig::load(&yaml_path).unwrap().backend.url, "https://c.d");
    }

    #[test]
    fn test_load_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "this is not [valid").unwrap();
        assert!(QuizConfig::load(&path).is_err());

        assert!(QuizConfig::load(dir.path().join("missing.toml")).is_err());
    }
}
