//! Chess club tournament engine
//!
//! This crate provides:
//! - Players, matches and rounds
//! - Round pairing that avoids rematches (see [`pairing`])
//! - Score aggregation, ranking and winners
//! - The tournament round lifecycle
//! - The persisted JSON document shapes
//!
//! # Usage
//!
//! ```
//! use club_core::{Player, PlayerId, Tournament, TournamentSetup};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let mut tournament = Tournament::new(TournamentSetup::new("Spring Open", "Paris").rounds(2))?;
//! tournament.add_players([
//!     Player::new("AB12345", "Doe", "John", "01/01/1990")?,
//!     Player::new("CD54321", "Smith", "Anna", "05/05/1992")?,
//!     Player::new("EF11111", "Brown", "Charlie", "03/03/1992")?,
//!     Player::new("GH22222", "Taylor", "Emma", "04/04/1993")?,
//! ])?;
//! tournament.create_round(1, &mut rng)?;
//!
//! for id in ["AB12345", "EF11111"] {
//!     tournament.record_score(&PlayerId::parse(id)?, 0.5)?;
//! }
//! # Ok::<(), club_core::ClubError>(())
//! ```

pub mod error;
pub mod matches;
pub mod pairing;
pub mod player;
pub mod records;
pub mod round;
pub mod scoring;
pub mod tournament;

pub use error::{ClubError, ClubResult, Entity};
pub use matches::{check_score, Match, Side, Slot};
pub use pairing::{
    create_pairings, pair_consecutively, Pairing, PairingHistory, PairingOutcome, PairingPolicy,
    PairingStrategy, ScoreProximity, SeedOrder,
};
pub use player::{Player, PlayerId, Roster, DATE_FORMAT};
pub use records::{
    tournaments_from_document, tournaments_to_document, Keyed, MatchRecord, PlayerRecord,
    PlayersDocument, RoundRecord, SlotRecord, TournamentRecord, TournamentsDocument,
};
pub use round::Round;
pub use scoring::{
    compute_finished_scores, compute_scores, rank, standings, ScoreSheet, Scores, Standing,
};
pub use tournament::{parse_date, Stage, Tournament, TournamentSetup, DEFAULT_ROUNDS};
