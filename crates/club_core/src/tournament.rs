//! Tournament lifecycle
//!
//! A tournament moves through
//! `Setup → RoundInProgress(1) → RoundFinished(1) → RoundInProgress(2) → … → Completed`.
//! Results arrive from outside; this module checks preconditions and keeps
//! counters and timestamps right.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{ClubError, ClubResult, Entity};
use crate::matches::Match;
use crate::pairing::{self, PairingHistory, PairingOutcome, PairingPolicy};
use crate::player::{Player, PlayerId, Roster, DATE_FORMAT};
use crate::round::Round;
use crate::scoring;

/// Number of rounds when none is given
pub const DEFAULT_ROUNDS: u32 = 4;

/// Where a tournament stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// No round created yet
    Setup,
    /// Round k is being played
    RoundInProgress(u32),
    /// Round k is finished, the next one is not created yet
    RoundFinished(u32),
    /// Final round finished
    Completed,
}

/// Everything needed to open a tournament
#[derive(Debug, Clone)]
pub struct TournamentSetup {
    pub name: String,
    pub place: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub rounds_number: u32,
}

impl TournamentSetup {
    pub fn new(name: &str, place: &str) -> Self {
        Self {
            name: name.to_string(),
            place: place.to_string(),
            start_date: None,
            end_date: None,
            description: String::new(),
            rounds_number: DEFAULT_ROUNDS,
        }
    }

    pub fn rounds(mut self, rounds_number: u32) -> Self {
        self.rounds_number = rounds_number;
        self
    }

    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// Parse a `dd/mm/yyyy` date
pub fn parse_date(raw: &str) -> ClubResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ClubError::validation(format!("date {raw:?} is not dd/mm/yyyy")))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tournament {
    pub name: String,
    pub place: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: String,
    rounds_number: u32,
    current_round: u32,
    rounds: Vec<Round>,
    roster: Roster,
    pairing: PairingPolicy,
}

impl Tournament {
    pub fn new(setup: TournamentSetup) -> ClubResult<Self> {
        let name = setup.name.trim();
        if name.is_empty() {
            return Err(ClubError::validation("tournament name is empty"));
        }
        if setup.rounds_number == 0 {
            return Err(ClubError::validation(format!(
                "tournament {name} needs at least one round"
            )));
        }
        if let (Some(start), Some(end)) = (setup.start_date, setup.end_date) {
            if end < start {
                return Err(ClubError::validation(format!(
                    "tournament {name} ends before it starts"
                )));
            }
        }

        Ok(Self {
            name: name.to_string(),
            place: setup.place.trim().to_string(),
            start_date: setup.start_date,
            end_date: setup.end_date,
            description: setup.description,
            rounds_number: setup.rounds_number,
            current_round: 1,
            rounds: Vec::new(),
            roster: Roster::new(),
            pairing: PairingPolicy::default(),
        })
    }

    /// Rebuild a tournament read from storage. Counters are checked by the caller.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        name: String,
        place: String,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        description: String,
        rounds_number: u32,
        current_round: u32,
        rounds: Vec<Round>,
        roster: Roster,
    ) -> Self {
        Self {
            name,
            place,
            start_date,
            end_date,
            description,
            rounds_number,
            current_round,
            rounds,
            roster,
            pairing: PairingPolicy::default(),
        }
    }

    /// Select how later rounds pick opponents
    pub fn with_pairing(mut self, policy: PairingPolicy) -> Self {
        self.pairing = policy;
        self
    }

    pub fn set_pairing(&mut self, policy: PairingPolicy) {
        self.pairing = policy;
    }

    pub fn pairing(&self) -> PairingPolicy {
        self.pairing
    }

    pub fn rounds_number(&self) -> u32 {
        self.rounds_number
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Round by 1-based number
    pub fn round(&self, number: u32) -> ClubResult<&Round> {
        number
            .checked_sub(1)
            .and_then(|index| self.rounds.get(index as usize))
            .ok_or_else(|| ClubError::NotFound {
                kind: Entity::Round,
                id: format!("{} of {}", Round::name_for(number), self.name),
            })
    }

    /// Append players to the roster. Only allowed before round 1.
    pub fn add_players(&mut self, players: impl IntoIterator<Item = Player>) -> ClubResult<()> {
        if !self.rounds.is_empty() {
            return Err(ClubError::state(format!(
                "cannot add players to {} once rounds have started",
                self.name
            )));
        }
        for player in players {
            self.roster.add(player);
        }
        Ok(())
    }

    /// Players already matched against each other in this tournament
    pub fn history(&self) -> PairingHistory {
        PairingHistory::from_rounds(&self.rounds)
    }

    pub fn stage(&self) -> Stage {
        match self.rounds.last() {
            None => Stage::Setup,
            Some(_) if self.is_completed() => Stage::Completed,
            Some(round) if round.is_in_progress() => Stage::RoundInProgress(self.rounds.len() as u32),
            Some(_) => Stage::RoundFinished(self.rounds.len() as u32),
        }
    }

    /// Pair and start round `round_number`.
    ///
    /// Round 1 is seeded by shuffling the roster; later rounds by ranking.
    /// The roster is reordered to the seed order. `current_round` is not
    /// advanced here.
    pub fn create_round<R: Rng + ?Sized>(&mut self, round_number: u32, rng: &mut R) -> ClubResult<&Round> {
        self.check_can_create(round_number)?;

        let history = self.history();
        let seed: Vec<PlayerId> = if round_number == 1 {
            let mut ids = self.roster.identifiers();
            ids.shuffle(&mut *rng);
            ids
        } else {
            scoring::rank(self)
                .into_iter()
                .map(|p| p.identifier.clone())
                .collect()
        };

        let outcome: PairingOutcome = if round_number == 1 {
            pairing::pair_consecutively(&seed)
        } else {
            let scores = scoring::compute_scores(self).scores;
            pairing::create_pairings(&seed, &history, &scores, self.pairing.strategy())
        };
        if let Some(leftover) = outcome.unpaired {
            // Unreachable with the roster checks above
            return Err(ClubError::validation(format!(
                "{leftover} could not be paired in {}",
                self.name
            )));
        }

        let matches: Vec<Match> = outcome
            .pairings
            .into_iter()
            .map(|p| Match::new(p.first, p.second, &mut *rng))
            .collect();

        let mut round = Round::create(Round::name_for(round_number));
        round.populate(matches)?;
        round.start();

        self.roster.reorder(&seed)?;
        self.rounds.push(round);
        tracing::info!(
            tournament = %self.name,
            round = round_number,
            matches = self.rounds[self.rounds.len() - 1].matches().len(),
            "round created"
        );
        Ok(&self.rounds[self.rounds.len() - 1])
    }

    fn check_can_create(&self, round_number: u32) -> ClubResult<()> {
        if round_number != self.current_round {
            return Err(ClubError::state(format!(
                "{} is at round {}, cannot create round {round_number}",
                self.name, self.current_round
            )));
        }
        if round_number > self.rounds_number {
            return Err(ClubError::state(format!(
                "{} only has {} rounds",
                self.name, self.rounds_number
            )));
        }
        if self.rounds.len() as u32 != round_number - 1 {
            return Err(ClubError::state(format!(
                "{} already exists in {}",
                Round::name_for(round_number),
                self.name
            )));
        }
        if self.rounds.last().is_some_and(Round::is_in_progress) {
            return Err(ClubError::state(format!(
                "previous round of {} is not finished",
                self.name
            )));
        }
        if self.roster.len() % 2 != 0 {
            return Err(ClubError::validation(format!(
                "{} has an odd roster of {} players",
                self.name,
                self.roster.len()
            )));
        }
        if let Some(duplicate) = self.roster.first_duplicate() {
            return Err(ClubError::validation(format!(
                "{duplicate} appears twice in the roster of {}",
                self.name
            )));
        }
        Ok(())
    }

    /// The round matching `current_round`, if it was created
    fn current(&mut self) -> ClubResult<&mut Round> {
        let index = self.current_round as usize - 1;
        let name = self.name.clone();
        self.rounds
            .get_mut(index)
            .ok_or_else(|| ClubError::state(format!("{name} has no round in progress")))
    }

    /// Record `player`'s result in the current round; the opponent gets the complement.
    pub fn record_score(&mut self, player: &PlayerId, score: f64) -> ClubResult<()> {
        let round = self.current()?;
        if round.is_finished() {
            return Err(ClubError::state(format!("{} is already finished", round.name)));
        }
        let round_name = round.name.clone();
        let m = round
            .matches_mut()
            .iter_mut()
            .find(|m| m.involves(player))
            .ok_or_else(|| ClubError::player_not_found(format!("{player} in {round_name}")))?;
        m.set_scores(player, score)
    }

    /// Close the current round. Every match must be scored.
    pub fn finish_round(&mut self) -> ClubResult<()> {
        let round = self.current()?;
        round.finish()?;
        tracing::info!(round = %round.name, "round finished");
        Ok(())
    }

    /// Move the counter to the next round once the current one is finished.
    pub fn advance_round(&mut self) -> ClubResult<()> {
        let round = self.current()?;
        if round.is_in_progress() {
            return Err(ClubError::state(format!(
                "{} must be finished before advancing",
                round.name
            )));
        }
        if self.current_round >= self.rounds_number {
            return Err(ClubError::state(format!(
                "{} is already at its last round",
                self.name
            )));
        }
        self.current_round += 1;
        tracing::info!(tournament = %self.name, round = self.current_round, "advanced");
        Ok(())
    }

    /// True once the final round exists and is finished
    pub fn is_completed(&self) -> bool {
        self.current_round == self.rounds_number
            && self
                .rounds
                .get(self.rounds_number as usize - 1)
                .is_some_and(Round::is_finished)
    }

    /// Every player tied at the top score. Ties are not broken.
    pub fn winners(&self) -> Vec<&Player> {
        let sheet = scoring::compute_scores(self);
        let Some(best) = self
            .roster
            .iter()
            .map(|p| sheet.score_of(&p.identifier))
            .reduce(f64::max)
        else {
            return Vec::new();
        };
        self.roster
            .iter()
            .filter(|p| sheet.score_of(&p.identifier) == best)
            .collect()
    }
}

#[cfg(test)]
#[path = "tournament_tests.rs"]
mod tournament_tests;
