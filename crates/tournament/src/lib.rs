//! Chess club tournament manager
//!
//! This crate provides:
//! - JSON storage of the club roster and its tournaments
//! - The club registry: player registration and tournament creation
//! - `club.toml` configuration
//! - Plain-text reports (players, tournaments, standings, winners)
//!
//! Pairing, scoring and the round lifecycle live in [`club_core`].
//!
//! # Usage
//!
//! ```bash
//! # Register players, then open a tournament with four of them
//! cargo run -p tournament -- player add AB12345 Doe John 01/01/1990
//! cargo run -p tournament -- create "Spring Open" --place Paris \
//!     --player AB12345 --player CD54321 --player EF11111 --player GH22222
//!
//! # Enter a result, close the round, check the table
//! cargo run -p tournament -- score "Spring Open" AB12345 1
//! cargo run -p tournament -- close "Spring Open"
//! cargo run -p tournament -- standings "Spring Open"
//! ```

pub mod club;
pub mod config;
pub mod logging;
pub mod report;
pub mod store;

pub use club::{Club, RoundOutcome, MIN_PLAYERS};
pub use config::{ClubConfig, ConfigError};
pub use report::*;
pub use store::{ClubStore, StoreError, PLAYERS_FILE, TOURNAMENTS_FILE};
