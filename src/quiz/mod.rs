// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Quiz state machine.
//!
//! The whole quiz is one value, [`Quiz`], moved through its phases by
//! [`Quiz::update`]. Rendering only ever reads it through the projection
//! helpers at the bottom of this module.

mod round;

pub use round::{Round, DEFAULT_ROUND_SIZE};

use std::sync::Arc;

use rand::Rng;

use crate::model::{Song, SongId};

/// Where the quiz currently is
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Waiting for the song collection
    Loading,
    /// The collection came back empty
    NoSongs,
    /// A round is on screen, no guess yet
    Ready { round: Round },
    /// The guess for this round has been made and the answer is shown
    Revealed {
        round: Round,
        guess: SongId,
        correct: bool,
    },
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The initial fetch finished
    SongsLoaded(Vec<Song>),
    /// The user picked a candidate
    Guess(SongId),
    /// The user asked for another round
    NewRound,
}

/// Visual treatment of a candidate row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMark {
    /// Default, or not involved in the answer
    Neutral,
    /// The correct answer, once revealed
    Correct,
    /// The user's wrong guess, once revealed
    Incorrect,
}

/// Feedback shown after a guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// The guess was right
    Correct,
    /// The guess was wrong; carries the right answer
    Incorrect { title: String, artist: String },
}

impl Feedback {
    /// Line shown under the candidates
    pub fn text(&self) -> String {
        match self {
            Feedback::Correct => "🎉 Rätt svar!".to_string(),
            Feedback::Incorrect { title, artist } => {
                format!("Fel! Rätt svar var: {} - {}", title, artist)
            }
        }
    }
}

/// Complete quiz state
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    songs: Arc<[Song]>,
    round_size: usize,
    phase: Phase,
    score: u32,
    rounds_played: u32,
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new(DEFAULT_ROUND_SIZE)
    }
}

impl Quiz {
    /// A quiz waiting for its songs
    pub fn new(round_size: usize) -> Self {
        Self {
            songs: Arc::from(Vec::new()),
            round_size,
            phase: Phase::Loading,
            score: 0,
            rounds_played: 0,
        }
    }

    /// A quiz showing a given round, for scripted sessions
    pub fn with_round(songs: Vec<Song>, round: Round) -> Self {
        Self {
            round_size: round.candidates().len(),
            songs: Arc::from(songs),
            phase: Phase::Ready { round },
            score: 0,
            rounds_played: 0,
        }
    }

    /// Apply a message and return the next state
    pub fn update<R: Rng + ?Sized>(self, message: Message, rng: &mut R) -> Self {
        match message {
            Message::SongsLoaded(songs) => self.on_songs_loaded(songs, rng),
            Message::Guess(id) => self.on_guess(id),
            Message::NewRound => self.on_new_round(rng),
        }
    }

    fn on_songs_loaded<R: Rng + ?Sized>(self, songs: Vec<Song>, rng: &mut R) -> Self {
        if self.phase != Phase::Loading {
            tracing::warn!("Songs delivered after loading finished, ignoring");
            return self;
        }

        let songs: Arc<[Song]> = Arc::from(songs);
        let phase = match Round::draw(&songs, self.round_size, rng) {
            Some(round) => Phase::Ready { round },
            None => {
                tracing::warn!("No songs available");
                Phase::NoSongs
            }
        };

        Self { songs, phase, ..self }
    }

    fn on_guess(self, id: SongId) -> Self {
        let Some(round) = self.open_round_for(id) else {
            return self;
        };

        let correct = id == round.target_id();
        tracing::info!(guess = id, target_id = round.target_id(), correct, "Guess made");

        Self {
            score: if correct { self.score + 1 } else { self.score },
            rounds_played: self.rounds_played + 1,
            phase: Phase::Revealed {
                round,
                guess: id,
                correct,
            },
            ..self
        }
    }

    /// The unrevealed round, if `id` is one of its candidates
    fn open_round_for(&self, id: SongId) -> Option<Round> {
        match &self.phase {
            Phase::Ready { round } if round.contains(id) => Some(round.clone()),
            Phase::Ready { .. } => {
                tracing::debug!(guess = id, "Guess is not a candidate, ignoring");
                None
            }
            _ => None,
        }
    }

    fn on_new_round<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        if !matches!(self.phase, Phase::Revealed { .. }) {
            return self;
        }

        match Round::draw(&self.songs, self.round_size, rng) {
            Some(round) => Self {
                phase: Phase::Ready { round },
                ..self
            },
            None => self,
        }
    }

    /// Current phase
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Correct guesses so far
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Rounds guessed so far
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Every fetched song
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Round on screen, if any
    pub fn round(&self) -> Option<&Round> {
        match &self.phase {
            Phase::Ready { round } | Phase::Revealed { round, .. } => Some(round),
            Phase::Loading | Phase::NoSongs => None,
        }
    }

    /// Whether the answer for the current round is shown
    pub fn is_revealed(&self) -> bool {
        matches!(self.phase, Phase::Revealed { .. })
    }

    /// Visual treatment of `candidate`'s row
    pub fn row_mark(&self, candidate: &Song) -> RowMark {
        match &self.phase {
            Phase::Revealed { round, guess, .. } => {
                if candidate.id == round.target_id() {
                    RowMark::Correct
                } else if candidate.id == *guess {
                    RowMark::Incorrect
                } else {
                    RowMark::Neutral
                }
            }
            _ => RowMark::Neutral,
        }
    }

    /// Feedback for the revealed round
    pub fn feedback(&self) -> Option<Feedback> {
        match &self.phase {
            Phase::Revealed { correct: true, .. } => Some(Feedback::Correct),
            Phase::Revealed { round, .. } => {
                let target = round.target();
                Some(Feedback::Incorrect {
                    title: target.title.clone(),
                    artist: target.artist.clone(),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scenario_songs() -> Vec<Song> {
        vec![
            Song::new(1, "A", "X", "https://youtu.be/aaaaaaaaaaa"),
            Song::new(2, "B", "Y", "https://youtu.be/bbbbbbbbbbb"),
            Song::new(3, "C", "Z", "https://youtu.be/ccccccccccc"),
            Song::new(4, "D", "W", "https://youtu.be/ddddddddddd"),
        ]
    }

    fn scenario() -> Quiz {
        let songs = scenario_songs();
        let round = Round::from_candidates(songs.clone()).unwrap();
        Quiz::with_round(songs, round)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    #[test]
    fn test_initial_state() {
        let quiz = Quiz::default();
        assert_eq!(quiz.phase(), &Phase::Loading);
        assert_eq!(quiz.score(), 0);
        assert!(quiz.round().is_none());
    }

    #[test]
    fn test_load_draws_round() {
        let quiz = Quiz::default().update(Message::SongsLoaded(scenario_songs()), &mut rng());
        let round = quiz.round().unwrap();
        assert_eq!(round.candidates().len(), 4);
        assert!(round.contains(round.target_id()));
        assert!(!quiz.is_revealed());
    }

    #[test]
    fn test_load_empty() {
        let quiz = Quiz::default().update(Message::SongsLoaded(Vec::new()), &mut rng());
        assert_eq!(quiz.phase(), &Phase::NoSongs);

        let quiz = quiz.update(Message::NewRound, &mut rng());
        assert_eq!(quiz.phase(), &Phase::NoSongs);
    }

    #[test]
    fn test_second_load_ignored() {
        let mut rng = rng();
        let quiz = Quiz::default().update(Message::SongsLoaded(scenario_songs()), &mut rng);
        let before = quiz.clone();
        let quiz = quiz.update(Message::SongsLoaded(Vec::new()), &mut rng);
        assert_eq!(quiz, before);
    }

    #[test]
    fn test_wrong_guess() {
        let quiz = scenario().update(Message::Guess(2), &mut rng());

        assert!(matches!(
            quiz.phase(),
            Phase::Revealed { guess: 2, correct: false, .. }
        ));
        assert_eq!(quiz.score(), 0);

        let text = quiz.feedback().unwrap().text();
        assert!(text.contains("A - X"));

        let songs = scenario_songs();
        assert_eq!(quiz.row_mark(&songs[0]), RowMark::Correct);
        assert_eq!(quiz.row_mark(&songs[1]), RowMark::Incorrect);
        assert_eq!(quiz.row_mark(&songs[2]), RowMark::Neutral);
        assert_eq!(quiz.row_mark(&songs[3]), RowMark::Neutral);
    }

    #[test]
    fn test_correct_guess() {
        let quiz = scenario().update(Message::Guess(1), &mut rng());

        assert!(matches!(
            quiz.phase(),
            Phase::Revealed { guess: 1, correct: true, .. }
        ));
        assert_eq!(quiz.score(), 1);
        assert_eq!(quiz.feedback(), Some(Feedback::Correct));

        let marks: Vec<_> = scenario_songs().iter().map(|s| quiz.row_mark(s)).collect();
        assert_eq!(
            marks,
            vec![RowMark::Correct, RowMark::Neutral, RowMark::Neutral, RowMark::Neutral]
        );
    }

    #[test]
    fn test_marks_neutral_before_reveal() {
        let quiz = scenario();
        for song in scenario_songs() {
            assert_eq!(quiz.row_mark(&song), RowMark::Neutral);
        }
        assert!(quiz.feedback().is_none());
    }

    #[test]
    fn test_guess_only_once_per_round() {
        let mut rng = rng();
        let quiz = scenario().update(Message::Guess(2), &mut rng);
        let revealed = quiz.clone();

        let quiz = quiz
            .update(Message::Guess(1), &mut rng)
            .update(Message::Guess(3), &mut rng);

        assert_eq!(quiz, revealed);
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn test_unknown_guess_ignored() {
        let quiz = scenario();
        let after = quiz.clone().update(Message::Guess(42), &mut rng());
        assert_eq!(after, quiz);
    }

    #[test]
    fn test_guess_while_loading_ignored() {
        let quiz = Quiz::default().update(Message::Guess(1), &mut rng());
        assert_eq!(quiz.phase(), &Phase::Loading);
    }

    #[test]
    fn test_new_round_requires_reveal() {
        let quiz = scenario();
        let after = quiz.clone().update(Message::NewRound, &mut rng());
        assert_eq!(after, quiz);
    }

    #[test]
    fn test_new_round_resets_guess_keeps_score() {
        let mut rng = rng();
        let quiz = scenario()
            .update(Message::Guess(1), &mut rng)
            .update(Message::NewRound, &mut rng);

        assert!(matches!(quiz.phase(), Phase::Ready { .. }));
        assert_eq!(quiz.score(), 1);
        assert_eq!(quiz.rounds_played(), 1);
        assert!(quiz.feedback().is_none());
    }

    #[test]
    fn test_score_is_monotonic() {
        let mut rng = rng();
        let mut quiz = Quiz::default().update(Message::SongsLoaded(scenario_songs()), &mut rng);
        let mut expected = 0;

        for i in 0..50 {
            let round = quiz.round().unwrap().clone();
            let guess = if i % 2 == 0 {
                round.target_id()
            } else {
                round
                    .candidates()
                    .iter()
                    .map(|s| s.id)
                    .find(|id| *id != round.target_id())
                    .unwrap()
            };

            let before = quiz.score();
            quiz = quiz.update(Message::Guess(guess), &mut rng);
            if guess == round.target_id() {
                expected += 1;
                assert_eq!(quiz.score(), before + 1);
            } else {
                assert_eq!(quiz.score(), before);
            }
            quiz = quiz.update(Message::NewRound, &mut rng);
        }

        assert_eq!(quiz.score(), expected);
        assert_eq!(quiz.rounds_played(), 50);
    }
}
