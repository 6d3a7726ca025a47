// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Round selection.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Song, SongId};

/// Default number of candidates offered per round
pub const DEFAULT_ROUND_SIZE: usize = 4;

/// One round of the quiz: the candidates on screen and the song being played
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    candidates: Vec<Song>,
    target: SongId,
}

impl Round {
    /// Draw a round from the full collection.
    ///
    /// The collection is shuffled, the first `size` songs become the
    /// candidates and the first of those is the target. Candidates are then
    /// shuffled again for display. Returns `None` for an empty collection.
    pub fn draw<R: Rng + ?Sized>(songs: &[Song], size: usize, rng: &mut R) -> Option<Self> {
        let mut deck: Vec<&Song> = songs.iter().collect();
        deck.shuffle(rng);

        let mut candidates: Vec<Song> = deck.into_iter().take(size.max(1)).cloned().collect();
        let target = candidates.first()?.id;
        candidates.shuffle(rng);

        tracing::debug!(
            target_id = target,
            candidates = ?candidates.iter().map(|s| s.id).collect::<Vec<_>>(),
            "Drew round"
        );

        Some(Self { candidates, target })
    }

    /// Build a round from explicit candidates, the first being the target
    pub fn from_candidates(candidates: Vec<Song>) -> Option<Self> {
        let target = candidates.first()?.id;
        Some(Self { candidates, target })
    }

    /// Candidates in display order
    pub fn candidates(&self) -> &[Song] {
        &self.candidates
    }

    /// Id of the song being played
    pub fn target_id(&self) -> SongId {
        self.target
    }

    /// The song being played
    pub fn target(&self) -> &Song {
        self.candidate(self.target).unwrap_or(&self.candidates[0])
    }

    /// Look up a candidate by id
    pub fn candidate(&self, id: SongId) -> Option<&Song> {
        self.candidates.iter().find(|song| song.id == id)
    }

    /// Whether `id` is one of this round's candidates
    pub fn contains(&self, id: SongId) -> bool {
        self.candidate(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn songs(n: i64) -> Vec<Song> {
        (1..=n)
            .map(|i| Song::new(i, format!("T{i}"), format!("A{i}"), ""))
            .collect()
    }

    #[test]
    fn test_draw_size_and_membership() {
        let all = songs(10);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let round = Round::draw(&all, DEFAULT_ROUND_SIZE, &mut rng).unwrap();
            assert_eq!(round.candidates().len(), 4);
            assert!(round.contains(round.target_id()));
            assert_eq!(round.target().id, round.target_id());

            let ids: HashSet<_> = round.candidates().iter().map(|s| s.id).collect();
            assert_eq!(ids.len(), 4, "candidates are drawn without replacement");
        }
    }

    #[test]
    fn test_draw_small_collection() {
        let all = songs(2);
        let mut rng = StdRng::seed_from_u64(1);
        let round = Round::draw(&all, DEFAULT_ROUND_SIZE, &mut rng).unwrap();
        assert_eq!(round.candidates().len(), 2);
        assert!(round.contains(round.target_id()));
    }

    #[test]
    fn test_draw_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Round::draw(&[], DEFAULT_ROUND_SIZE, &mut rng).is_none());
    }

    #[test]
    fn test_every_song_can_be_target() {
        let all = songs(6);
        let mut rng = StdRng::seed_from_u64(42);
        let mut targets = HashSet::new();

        for _ in 0..500 {
            targets.insert(Round::draw(&all, DEFAULT_ROUND_SIZE, &mut rng).unwrap().target_id());
        }

        assert_eq!(targets.len(), 6);
    }

    #[test]
    fn test_target_row_varies() {
        let all = songs(8);
        let mut rng = StdRng::seed_from_u64(3);
        let mut positions = HashSet::new();

        for _ in 0..200 {
            let round = Round::draw(&all, DEFAULT_ROUND_SIZE, &mut rng).unwrap();
            let pos = round
                .candidates()
                .iter()
                .position(|s| s.id == round.target_id())
                .unwrap();
            positions.insert(pos);
        }

        assert_eq!(positions.len(), 4);
    }

    #[test]
    fn test_from_candidates() {
        let round = Round::from_candidates(songs(4)).unwrap();
        assert_eq!(round.target_id(), 1);
        assert_eq!(round.candidates()[0].id, 1);
        assert!(Round::from_candidates(Vec::new()).is_none());
    }
}
