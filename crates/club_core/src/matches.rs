//! A single pairing and its result

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ClubError, ClubResult};
use crate::player::PlayerId;

/// Cosmetic side label. Has no effect on scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "white", alias = "⚪")]
    White,
    #[serde(rename = "black", alias = "⚫")]
    Black,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

/// Validate a raw per-player score: 0, 0.5 or 1.
pub fn check_score(score: f64) -> ClubResult<f64> {
    if score == 0.0 || score == 0.5 || score == 1.0 {
        Ok(score)
    } else {
        Err(ClubError::validation(format!(
            "score {score} is not one of 0, 0.5, 1"
        )))
    }
}

/// One participant of a match
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub player: PlayerId,
    pub score: f64,
    pub side: Side,
}

/// Two players facing each other in a round.
///
/// Both scores start at 0. Once set they always sum to exactly 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    slot_a: Slot,
    slot_b: Slot,
}

impl Match {
    /// Pair two players, giving white to one of them at random.
    pub fn new<R: Rng + ?Sized>(a: PlayerId, b: PlayerId, rng: &mut R) -> Self {
        let side_a = if rng.gen_bool(0.5) {
            Side::White
        } else {
            Side::Black
        };
        Self::with_sides(a, side_a, b, side_a.opposite())
    }

    /// Rebuild a match with known sides and no result yet.
    pub fn with_sides(a: PlayerId, side_a: Side, b: PlayerId, side_b: Side) -> Self {
        Self {
            slot_a: Slot {
                player: a,
                score: 0.0,
                side: side_a,
            },
            slot_b: Slot {
                player: b,
                score: 0.0,
                side: side_b,
            },
        }
    }

    pub fn slot_a(&self) -> &Slot {
        &self.slot_a
    }

    pub fn slot_b(&self) -> &Slot {
        &self.slot_b
    }

    pub fn players(&self) -> (&PlayerId, &PlayerId) {
        (&self.slot_a.player, &self.slot_b.player)
    }

    pub fn involves(&self, player: &PlayerId) -> bool {
        &self.slot_a.player == player || &self.slot_b.player == player
    }

    /// Slot held by `player`, if they play in this match
    pub fn slot_of(&self, player: &PlayerId) -> Option<&Slot> {
        if &self.slot_a.player == player {
            Some(&self.slot_a)
        } else if &self.slot_b.player == player {
            Some(&self.slot_b)
        } else {
            None
        }
    }

    /// A match is scored once its two scores add up to one point.
    pub fn is_scored(&self) -> bool {
        self.slot_a.score + self.slot_b.score == 1.0
    }

    /// Record `player`'s score and derive the opponent's by complement.
    ///
    /// A draw gives both players 0.5. The player is matched by identifier
    /// against both slots; slot order is never assumed.
    pub fn set_scores(&mut self, player: &PlayerId, score: f64) -> ClubResult<()> {
        let score = check_score(score)?;
        let opponent_score = 1.0 - score;

        if &self.slot_a.player == player {
            self.slot_a.score = score;
            self.slot_b.score = opponent_score;
        } else if &self.slot_b.player == player {
            self.slot_b.score = score;
            self.slot_a.score = opponent_score;
        } else {
            return Err(ClubError::player_not_found(format!(
                "{player} in match {} vs {}",
                self.slot_a.player, self.slot_b.player
            )));
        }
        Ok(())
    }

    /// Relabel sides. Scores are untouched.
    pub fn set_sides(&mut self, side_a: Side, side_b: Side) -> ClubResult<()> {
        if side_a == side_b {
            return Err(ClubError::validation(format!(
                "both players of {} vs {} cannot play {side_a:?}",
                self.slot_a.player, self.slot_b.player
            )));
        }
        self.slot_a.side = side_a;
        self.slot_b.side = side_b;
        Ok(())
    }

    /// Load both scores from storage, checking they form a legal result.
    pub(crate) fn restore_scores(&mut self, score_a: f64, score_b: f64) -> ClubResult<()> {
        check_score(score_a)?;
        check_score(score_b)?;
        let total = score_a + score_b;
        if total != 0.0 && total != 1.0 {
            return Err(ClubError::validation(format!(
                "scores {score_a} and {score_b} of {} vs {} do not sum to 1",
                self.slot_a.player, self.slot_b.player
            )));
        }
        self.slot_a.score = score_a;
        self.slot_b.score = score_b;
        Ok(())
    }
}

#[cfg(test)]
#[path = "matches_tests.rs"]
mod matches_tests;
