// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Clip playback.
//!
//! The quiz never plays audio itself. It hands the external YouTube player
//! an embed URL for the current target, and optionally launches that URL
//! with a configured command when a round starts.

use std::process::{Child, Command, Stdio};
use std::thread;

use thiserror::Error;

use crate::clip::{resolve_playable_id, ClipId};
use crate::config::PlayerConfig;
use crate::quiz::Quiz;

/// Errors raised when launching the external player
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The configured command was empty
    #[error("Player command is empty")]
    EmptyCommand,

    /// The command could not be started
    #[error("Failed to start player command {command:?}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// What the embedded player should show for the current round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    /// Resolved clip
    pub clip: ClipId,
    /// Player height
    pub height: u16,
    /// Player spans the full width
    pub full_width: bool,
    /// Start playing immediately
    pub autoplay: bool,
}

impl Playback {
    /// URL handed to the embedded player
    pub fn embed_url(&self) -> String {
        self.clip.embed_url(self.autoplay)
    }
}

/// Playback for the quiz's current target.
///
/// `None` while no round is on screen or when the target's clip URL
/// cannot be resolved.
pub fn playback(quiz: &Quiz, config: &PlayerConfig) -> Option<Playback> {
    let round = quiz.round()?;
    let clip = resolve_playable_id(&round.target().youtube_url)?;

    Some(Playback {
        clip,
        height: config.height,
        full_width: true,
        autoplay: config.autoplay,
    })
}

/// Opens clips outside the terminal
pub trait ClipLauncher {
    /// Start playback of `playback`
    fn launch(&mut self, playback: &Playback) -> Result<(), LaunchError>;
}

/// Launches the embed URL with an external command such as `xdg-open`
#[derive(Debug, Clone)]
pub struct CommandLauncher {
    program: String,
    args: Vec<String>,
}

impl CommandLauncher {
    /// Parse a command line like `"firefox --new-tab"`
    pub fn new(command_line: &str) -> Result<Self, LaunchError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(LaunchError::EmptyCommand)?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Program to run
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed before the URL
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl ClipLauncher for CommandLauncher {
    fn launch(&mut self, playback: &Playback) -> Result<(), LaunchError> {
        let url = playback.embed_url();
        tracing::info!(program = %self.program, url = %url, "Launching clip");

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(&url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        reap(child, self.program.clone());
        Ok(())
    }
}

/// Wait for `child` in the background so it never lingers as a zombie
fn reap(mut child: Child, program: String) {
    thread::spawn(move || match child.wait() {
        Ok(status) => tracing::debug!(%program, %status, "Player command exited"),
        Err(e) => tracing::warn!(%program, error = %e, "Failed to wait for player command"),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Song;
    use crate::quiz::Round;

    fn quiz_with_target_url(url: &str) -> Quiz {
        let songs = vec![
            Song::new(1, "A", "X", url),
            Song::new(2, "B", "Y", "https://youtu.be/bbbbbbbbbbb"),
        ];
        let round = Round::from_candidates(songs.clone()).unwrap();
        Quiz::with_round(songs, round)
    }

    #[test]
    fn test_playback_for_target() {
        let quiz = quiz_with_target_url("https://www.youtube.com/watch?v=aaaaaaaaaaa&t=3");
        let playback = playback(&quiz, &PlayerConfig::default()).unwrap();

        assert_eq!(playback.clip.as_str(), "aaaaaaaaaaa");
        assert_eq!(playback.height, 240);
        assert!(playback.full_width);
        assert!(playback.autoplay);
        assert_eq!(
            playback.embed_url(),
            "https://www.youtube.com/embed/aaaaaaaaaaa?autoplay=1"
        );
    }

    #[test]
    fn test_unresolvable_clip_has_no_playback() {
        let quiz = quiz_with_target_url("https://example.com/nothing");
        assert!(playback(&quiz, &PlayerConfig::default()).is_none());
    }

    #[test]
    fn test_no_playback_while_loading() {
        assert!(playback(&Quiz::default(), &PlayerConfig::default()).is_none());
    }

    #[test]
    fn test_command_launcher_parse() {
        let launcher = CommandLauncher::new("firefox --new-tab").unwrap();
        assert_eq!(launcher.program(), "firefox");
        assert_eq!(launcher.args(), ["--new-tab".to_string()]);

        assert!(matches!(CommandLauncher::new("   "), Err(LaunchError::EmptyCommand)));
    }

    #[test]
    fn test_missing_program_reports_error() {
        let quiz = quiz_with_target_url("https://youtu.be/aaaaaaaaaaa");
        let playback = playback(&quiz, &PlayerConfig::default()).unwrap();

        let mut launcher = CommandLauncher::new("song-quiz-no-such-player-binary").unwrap();
        assert!(matches!(launcher.launch(&playback), Err(LaunchError::Spawn { .. })));
    }

    /// Exited children of this process that have not been waited on
    #[cfg(target_os = "linux")]
    fn zombie_children() -> usize {
        let parent = std::process::id().to_string();

        std::fs::read_dir("/proc")
            .unwrap()
            .filter_map(|entry| std::fs::read_to_string(entry.ok()?.path().join("stat")).ok())
            .filter(|stat| {
                // Fields after the command name: state, ppid, ...
                let rest = stat.rsplit_once(')').map_or("", |(_, rest)| rest);
                let mut fields = rest.split_whitespace();
                fields.next() == Some("Z") && fields.next() == Some(parent.as_str())
            })
            .count()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_exited_players_are_reaped() {
        let quiz = quiz_with_target_url("https://youtu.be/aaaaaaaaaaa");
        let playback = playback(&quiz, &PlayerConfig::default()).unwrap();

        let mut launcher = CommandLauncher::new("true").unwrap();
        for _ in 0..5 {
            launcher.launch(&playback).unwrap();
        }

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while zombie_children() > 0 && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(50));
        }
        assert_eq!(zombie_children(), 0);
    }
}
