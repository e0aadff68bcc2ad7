//! Round pairing
//!
//! Round 1 pairs a shuffled roster consecutively. Later rounds walk the
//! score-ranked seed order greedily: the first unpaired player is the anchor,
//! and a [`PairingStrategy`] picks the anchor's opponent among the players it
//! has not met yet. When the anchor has already met everyone left, it is
//! paired with the next player anyway and the pairing is flagged as a rematch.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::player::PlayerId;
use crate::round::Round;
use crate::scoring::Scores;

// =============================================================================
// Rematch history
// =============================================================================

/// Unordered pairs of players who have already met in a tournament
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingHistory {
    pairs: HashSet<(PlayerId, PlayerId)>,
}

fn unordered(a: &PlayerId, b: &PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

impl PairingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History of every match stored in `rounds`, finished or not
    pub fn from_rounds(rounds: &[Round]) -> Self {
        let mut history = Self::new();
        for round in rounds {
            for m in round.matches() {
                let (a, b) = m.players();
                history.record(a, b);
            }
        }
        history
    }

    pub fn record(&mut self, a: &PlayerId, b: &PlayerId) {
        self.pairs.insert(unordered(a, b));
    }

    pub fn contains(&self, a: &PlayerId, b: &PlayerId) -> bool {
        self.pairs.contains(&unordered(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

// =============================================================================
// Opponent selection
// =============================================================================

/// Chooses an anchor's opponent among players it has not met yet.
pub trait PairingStrategy: fmt::Debug {
    /// Short name used in logs and configuration
    fn name(&self) -> &'static str;

    /// Index into `candidates` (remaining players, in seed order) of the
    /// chosen opponent, or `None` when every candidate is a rematch.
    fn choose(
        &self,
        anchor: &PlayerId,
        candidates: &[PlayerId],
        history: &PairingHistory,
        scores: &Scores,
    ) -> Option<usize>;
}

/// First candidate in seed order that the anchor has not met.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOrder;

impl PairingStrategy for SeedOrder {
    fn name(&self) -> &'static str {
        "seed-order"
    }

    fn choose(
        &self,
        anchor: &PlayerId,
        candidates: &[PlayerId],
        history: &PairingHistory,
        _scores: &Scores,
    ) -> Option<usize> {
        candidates.iter().position(|c| !history.contains(anchor, c))
    }
}

/// Candidate closest in score to the anchor; seed order breaks ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreProximity;

impl PairingStrategy for ScoreProximity {
    fn name(&self) -> &'static str {
        "score-proximity"
    }

    fn choose(
        &self,
        anchor: &PlayerId,
        candidates: &[PlayerId],
        history: &PairingHistory,
        scores: &Scores,
    ) -> Option<usize> {
        let score_of = |id: &PlayerId| scores.get(id).copied().unwrap_or(0.0);
        let anchor_score = score_of(anchor);

        // min_by keeps the first of equal elements, i.e. the best seed
        candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| !history.contains(anchor, c))
            .map(|(i, c)| (i, (score_of(c) - anchor_score).abs()))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
    }
}

/// Configurable choice between the built-in strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairingPolicy {
    #[default]
    SeedOrder,
    ScoreProximity,
}

impl PairingPolicy {
    pub fn strategy(self) -> &'static dyn PairingStrategy {
        match self {
            PairingPolicy::SeedOrder => &SeedOrder,
            PairingPolicy::ScoreProximity => &ScoreProximity,
        }
    }
}

// =============================================================================
// Pairing
// =============================================================================

/// Two players to be matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub first: PlayerId,
    pub second: PlayerId,
    /// True when the anchor had met every remaining player
    pub rematch: bool,
}

/// Result of pairing a seed order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingOutcome {
    pub pairings: Vec<Pairing>,
    /// Trailing player of an odd seed order. Callers must not allow this.
    pub unpaired: Option<PlayerId>,
}

/// Pair 1st with 2nd, 3rd with 4th, and so on.
pub fn pair_consecutively(ordered: &[PlayerId]) -> PairingOutcome {
    let mut chunks = ordered.chunks_exact(2);
    let pairings = chunks
        .by_ref()
        .map(|pair| Pairing {
            first: pair[0].clone(),
            second: pair[1].clone(),
            rematch: false,
        })
        .collect();
    let unpaired = chunks.remainder().first().cloned();
    PairingOutcome { pairings, unpaired }
}

/// Greedy rematch-avoiding pairing of `ordered`.
pub fn create_pairings(
    ordered: &[PlayerId],
    history: &PairingHistory,
    scores: &Scores,
    strategy: &dyn PairingStrategy,
) -> PairingOutcome {
    let mut remaining: Vec<PlayerId> = ordered.to_vec();
    let mut outcome = PairingOutcome::default();

    while !remaining.is_empty() {
        let anchor = remaining.remove(0);
        if remaining.is_empty() {
            outcome.unpaired = Some(anchor);
            break;
        }

        let (second, rematch) = match strategy.choose(&anchor, &remaining, history, scores) {
            Some(index) => (remaining.remove(index), false),
            None => {
                let second = remaining.remove(0);
                tracing::warn!(
                    anchor = %anchor,
                    opponent = %second,
                    left = remaining.len(),
                    "no unmet opponent left, pairing a rematch"
                );
                (second, true)
            }
        };

        tracing::debug!(
            strategy = strategy.name(),
            "paired {} with {}",
            anchor,
            second
        );
        outcome.pairings.push(Pairing {
            first: anchor,
            second,
            rematch,
        });
    }

    outcome
}

#[cfg(test)]
#[path = "pairing_tests.rs"]
mod pairing_tests;
