//! Score aggregation and standings

use std::collections::HashMap;

use crate::player::{Player, PlayerId};
use crate::round::Round;
use crate::tournament::Tournament;

/// Cumulative points per player
pub type Scores = HashMap<PlayerId, f64>;

/// Points per player plus the player records they refer to
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSheet {
    pub scores: Scores,
    pub players: HashMap<PlayerId, Player>,
}

impl ScoreSheet {
    pub fn score_of(&self, id: &PlayerId) -> f64 {
        self.scores.get(id).copied().unwrap_or(0.0)
    }
}

/// One line of a standings table
#[derive(Debug, Clone, PartialEq)]
pub struct Standing<'a> {
    /// 1-based; players on equal points share a rank
    pub rank: usize,
    pub player: &'a Player,
    pub score: f64,
}

/// Sum every match score of every round.
///
/// Every roster player starts at 0 so players without results still appear.
pub fn compute_scores(tournament: &Tournament) -> ScoreSheet {
    sum_rounds(tournament, |_| true)
}

/// Like [`compute_scores`], but the round in progress does not count.
pub fn compute_finished_scores(tournament: &Tournament) -> ScoreSheet {
    sum_rounds(tournament, Round::is_finished)
}

fn sum_rounds(tournament: &Tournament, counts: impl Fn(&Round) -> bool) -> ScoreSheet {
    let players: HashMap<PlayerId, Player> = tournament
        .roster()
        .iter()
        .map(|p| (p.identifier.clone(), p.clone()))
        .collect();
    let mut scores: Scores = players.keys().map(|id| (id.clone(), 0.0)).collect();

    for round in tournament.rounds().iter().filter(|r| counts(r)) {
        for m in round.matches() {
            for slot in [m.slot_a(), m.slot_b()] {
                *scores.entry(slot.player.clone()).or_insert(0.0) += slot.score;
            }
        }
    }

    ScoreSheet { scores, players }
}

fn rank_by<'a>(tournament: &'a Tournament, sheet: &ScoreSheet) -> Vec<&'a Player> {
    let mut ranked: Vec<&Player> = tournament.roster().iter().collect();
    ranked.sort_by(|a, b| {
        sheet
            .score_of(&b.identifier)
            .partial_cmp(&sheet.score_of(&a.identifier))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Roster ordered by score, highest first.
///
/// The sort is stable: players on equal points keep their roster order,
/// which is the previous round's seed order.
pub fn rank(tournament: &Tournament) -> Vec<&Player> {
    rank_by(tournament, &compute_scores(tournament))
}

/// Ranked players with their points and shared ranks for ties.
///
/// Only finished rounds count; results entered in the round being played
/// show up once it is closed.
pub fn standings(tournament: &Tournament) -> Vec<Standing<'_>> {
    let sheet = compute_finished_scores(tournament);
    let mut rows: Vec<Standing<'_>> = Vec::with_capacity(tournament.roster().len());

    for (position, player) in rank_by(tournament, &sheet).into_iter().enumerate() {
        let score = sheet.score_of(&player.identifier);
        let rank = match rows.last() {
            Some(previous) if previous.score == score => previous.rank,
            _ => position + 1,
        };
        rows.push(Standing {
            rank,
            player,
            score,
        });
    }
    rows
}

#[cfg(test)]
#[path = "scoring_tests.rs"]
mod scoring_tests;
