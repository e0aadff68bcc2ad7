//! Club registry: the club roster and every tournament it ran
//!
//! Registration rules the engine leaves to its caller live here: unique
//! identifiers and tournament names, and a tournament roster that is even,
//! has at least four players and only names registered members.

use club_core::{
    check_score, ClubError, ClubResult, PairingPolicy, Player, PlayerId, Roster, Tournament,
    TournamentSetup,
};
use rand::Rng;
use std::collections::HashSet;

use crate::store::{ClubStore, StoreError};

/// Smallest roster a tournament can start with
pub const MIN_PLAYERS: usize = 4;

/// What happened after a round was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The next round was paired and started
    Next(u32),
    /// The final round is finished
    Completed,
}

#[derive(Debug, Clone, Default)]
pub struct Club {
    players: Roster,
    tournaments: Vec<Tournament>,
    pairing: PairingPolicy,
}

impl Club {
    pub fn new(players: Roster, tournaments: Vec<Tournament>) -> Self {
        Self {
            players,
            tournaments,
            pairing: PairingPolicy::default(),
        }
    }

    /// Load both documents from `store`
    pub fn load(store: &ClubStore) -> Result<Self, StoreError> {
        Ok(Self::new(store.load_players()?, store.load_tournaments()?))
    }

    /// Save both documents to `store`
    pub fn save(&self, store: &ClubStore) -> Result<(), StoreError> {
        store.save_players(&self.players)?;
        store.save_tournaments(&self.tournaments)
    }

    /// Pairing policy for every tournament of the club
    pub fn with_pairing(mut self, policy: PairingPolicy) -> Self {
        self.pairing = policy;
        for tournament in &mut self.tournaments {
            tournament.set_pairing(policy);
        }
        self
    }

    pub fn players(&self) -> &Roster {
        &self.players
    }

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    pub fn register_player(&mut self, player: Player) -> ClubResult<&Player> {
        if self.players.exists(&player.identifier) {
            return Err(ClubError::validation(format!(
                "player {} is already registered",
                player.identifier
            )));
        }
        let id = player.identifier.clone();
        self.players.add(player);
        tracing::info!(player = %id, "player registered");
        self.players.get(&id)
    }

    /// Open a tournament for registered players and pair its first round.
    pub fn create_tournament<R: Rng + ?Sized>(
        &mut self,
        setup: TournamentSetup,
        identifiers: &[PlayerId],
        rng: &mut R,
    ) -> ClubResult<&Tournament> {
        let mut tournament = Tournament::new(setup)?.with_pairing(self.pairing);
        if self.find(&tournament.name).is_some() {
            return Err(ClubError::validation(format!(
                "a tournament named {} already exists",
                tournament.name
            )));
        }

        let mut seen = HashSet::new();
        let mut entrants = Vec::with_capacity(identifiers.len());
        for id in identifiers {
            if !seen.insert(id) {
                return Err(ClubError::validation(format!(
                    "{id} is entered twice in {}",
                    tournament.name
                )));
            }
            entrants.push(self.players.get(id)?.clone());
        }
        if entrants.len() < MIN_PLAYERS || entrants.len() % 2 != 0 {
            return Err(ClubError::validation(format!(
                "{} needs an even number of players, at least {MIN_PLAYERS}, got {}",
                tournament.name,
                entrants.len()
            )));
        }

        tournament.add_players(entrants)?;
        tournament.create_round(1, rng)?;
        tracing::info!(
            tournament = %tournament.name,
            players = tournament.roster().len(),
            rounds = tournament.rounds_number(),
            "tournament created"
        );
        self.tournaments.push(tournament);
        Ok(&self.tournaments[self.tournaments.len() - 1])
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.tournaments.iter().position(|t| t.name == name)
    }

    pub fn tournament(&self, name: &str) -> ClubResult<&Tournament> {
        self.find(name)
            .map(|index| &self.tournaments[index])
            .ok_or_else(|| ClubError::tournament_not_found(name))
    }

    pub fn tournament_mut(&mut self, name: &str) -> ClubResult<&mut Tournament> {
        match self.find(name) {
            Some(index) => Ok(&mut self.tournaments[index]),
            None => Err(ClubError::tournament_not_found(name)),
        }
    }

    /// Finish the current round of `name`, then either pair the next
    /// round or report that the tournament is over.
    pub fn close_round<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        rng: &mut R,
    ) -> ClubResult<RoundOutcome> {
        let tournament = self.tournament_mut(name)?;
        tournament.finish_round()?;
        if tournament.is_completed() {
            tracing::info!(tournament = %tournament.name, "tournament completed");
            return Ok(RoundOutcome::Completed);
        }
        tournament.advance_round()?;
        let next = tournament.current_round();
        tournament.create_round(next, rng)?;
        Ok(RoundOutcome::Next(next))
    }

    /// Record one result per match of the current round, then close it.
    ///
    /// Each entry is a player and that player's score; the opponent gets the
    /// complement. The whole batch is checked before any score is recorded:
    /// scores must be legal, every player must sit in the current round and
    /// no match may be named twice.
    pub fn play_round<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        results: &[(PlayerId, f64)],
        rng: &mut R,
    ) -> ClubResult<RoundOutcome> {
        for (_, score) in results {
            check_score(*score)?;
        }
        let tournament = self.tournament(name)?;
        let round = tournament.round(tournament.current_round())?;
        if round.is_finished() {
            return Err(ClubError::state(format!("{} is already finished", round.name)));
        }
        let mut claimed = HashSet::new();
        for (player, _) in results {
            let index = round
                .matches()
                .iter()
                .position(|m| m.involves(player))
                .ok_or_else(|| ClubError::player_not_found(format!("{player} in {}", round.name)))?;
            if !claimed.insert(index) {
                return Err(ClubError::validation(format!(
                    "{player}'s match in {} has two results",
                    round.name
                )));
            }
        }

        let tournament = self.tournament_mut(name)?;
        for (player, score) in results {
            tournament.record_score(player, *score)?;
        }
        self.close_round(name, rng)
    }
}

#[cfg(test)]
#[path = "club_tests.rs"]
mod club_tests;
