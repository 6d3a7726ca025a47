// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Quiz session: the state behind the terminal.
//!
//! Everything the UI does to the quiz goes through [`Session::dispatch`],
//! which turns a [`KeyAction`] into a quiz [`Message`] and applies it.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{KeyAction, ViewState};
use crate::config::PlayerConfig;
use crate::loader::LoadTask;
use crate::player::{self, ClipLauncher, Playback};
use crate::quiz::{Message, Phase, Quiz};

/// A running quiz with its view state and collaborators
pub struct Session {
    quiz: Quiz,
    view: ViewState,
    rng: StdRng,
    player_config: PlayerConfig,
    playback: Option<Playback>,
    loader: Option<LoadTask>,
    launcher: Option<Box<dyn ClipLauncher>>,
    running: bool,
}

impl Session {
    /// Create a session for a quiz that is still loading
    pub fn new(round_size: usize, player_config: PlayerConfig) -> Self {
        Self::with_quiz(Quiz::new(round_size), player_config)
    }

    /// Create a session around an existing quiz state
    pub fn with_quiz(quiz: Quiz, player_config: PlayerConfig) -> Self {
        let playback = player::playback(&quiz, &player_config);
        Self {
            quiz,
            view: ViewState::default(),
            rng: StdRng::from_entropy(),
            player_config,
            playback,
            loader: None,
            launcher: None,
            running: true,
        }
    }

    /// Use a fixed random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Attach the song loader
    pub fn with_loader(mut self, loader: LoadTask) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Attach an external clip launcher
    pub fn with_launcher(mut self, launcher: Box<dyn ClipLauncher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// Current quiz state
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Current view state
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Mutable view state
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Playback for the round on screen
    pub fn playback(&self) -> Option<&Playback> {
        self.playback.as_ref()
    }

    /// Whether songs are still being fetched
    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    /// Whether the session should keep running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Deliver the loader's result if it has arrived
    pub fn poll_loader(&mut self) {
        let message = match self.loader.as_mut() {
            Some(loader) => loader.poll_message(),
            None => return,
        };

        if let Some(message) = message {
            self.apply(message);
        }

        if self.loader.as_ref().is_some_and(LoadTask::is_finished) {
            self.loader = None;
        }
    }

    /// Handle a UI action
    pub fn dispatch(&mut self, action: KeyAction) {
        // Overlays cover the candidate rows; close them before acting on the quiz.
        if self.has_overlay() && matches!(action, KeyAction::Guess(_) | KeyAction::PlayAgain) {
            self.view.show_help = false;
            self.view.show_song_list = false;
            return;
        }

        match action {
            KeyAction::None => {}
            KeyAction::Quit => self.running = false,
            KeyAction::Guess(index) => {
                let id = self
                    .quiz
                    .round()
                    .and_then(|round| round.candidates().get(index))
                    .map(|song| song.id);
                if let Some(id) = id {
                    self.apply(Message::Guess(id));
                }
            }
            KeyAction::PlayAgain => self.apply(Message::NewRound),
            KeyAction::ToggleSongList => self.view.show_song_list = !self.view.show_song_list,
            KeyAction::ToggleHelp => self.view.show_help = !self.view.show_help,
        }
    }

    fn has_overlay(&self) -> bool {
        self.view.show_help || self.view.show_song_list
    }

    /// Apply a quiz message
    pub fn apply(&mut self, message: Message) {
        let was_ready = matches!(self.quiz.phase(), Phase::Ready { .. });

        let quiz = std::mem::take(&mut self.quiz);
        self.quiz = quiz.update(message, &mut self.rng);

        let is_ready = matches!(self.quiz.phase(), Phase::Ready { .. });
        if is_ready && !was_ready {
            self.on_round_started();
        }
    }

    fn on_round_started(&mut self) {
        self.playback = player::playback(&self.quiz, &self.player_config);

        let Some(playback) = self.playback.as_ref() else {
            tracing::warn!("Clip URL of the current song could not be resolved");
            self.view.set_status("Klippet för den här låten kan inte spelas upp");
            return;
        };

        if !self.player_config.autoplay {
            return;
        }

        if let Some(launcher) = self.launcher.as_mut() {
            if let Err(e) = launcher.launch(playback) {
                tracing::error!(error = %e, "Failed to launch clip");
                self.view.set_status("Kunde inte öppna klippet");
            }
        }
    }
}
