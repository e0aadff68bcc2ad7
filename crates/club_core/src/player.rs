//! Club players and ordered rosters

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ClubError, ClubResult};

/// Format used for birth dates and tournament dates
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// National chess identifier: two letters followed by five digits (`AB12345`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    /// Parse and normalize an identifier. Letters are upper-cased.
    pub fn parse(raw: &str) -> ClubResult<Self> {
        let raw = raw.trim();
        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[..2].iter().all(u8::is_ascii_alphabetic)
            && bytes[2..].iter().all(u8::is_ascii_digit);

        if !well_formed {
            return Err(ClubError::validation(format!(
                "malformed identifier {raw:?}: expected two letters and five digits"
            )));
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerId {
    type Error = ClubError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered club member
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub identifier: PlayerId,
    pub name: String,
    pub first_name: String,
    /// Birth date as entered, `dd/mm/yyyy`
    pub birth_date: String,
}

impl Player {
    /// Build a player, validating the identifier and birth date.
    pub fn new(identifier: &str, name: &str, first_name: &str, birth_date: &str) -> ClubResult<Self> {
        let identifier = PlayerId::parse(identifier)?;
        let name = name.trim();
        let first_name = first_name.trim();
        if name.is_empty() || first_name.is_empty() {
            return Err(ClubError::validation(format!(
                "player {identifier} needs both a name and a first name"
            )));
        }

        let birth_date = birth_date.trim();
        NaiveDate::parse_from_str(birth_date, DATE_FORMAT).map_err(|_| {
            ClubError::validation(format!(
                "birth date {birth_date:?} of {identifier} is not dd/mm/yyyy"
            ))
        })?;

        Ok(Self {
            identifier,
            name: name.to_string(),
            first_name: first_name.to_string(),
            birth_date: birth_date.to_string(),
        })
    }

    /// "First LAST" as printed on score sheets
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.name.to_uppercase())
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} (born {})",
            self.identifier,
            self.display_name(),
            self.birth_date
        )
    }
}

/// Ordered collection of players.
///
/// Order is meaningful: inside a tournament it is the latest seed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn exists(&self, id: &PlayerId) -> bool {
        self.players.iter().any(|p| &p.identifier == id)
    }

    pub fn find_by_identifier(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.identifier == id)
    }

    /// Lookup that turns a miss into [`ClubError::NotFound`]
    pub fn get(&self, id: &PlayerId) -> ClubResult<&Player> {
        self.find_by_identifier(id)
            .ok_or_else(|| ClubError::player_not_found(id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.players.iter()
    }

    pub fn identifiers(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.identifier.clone()).collect()
    }

    /// First identifier that appears more than once, if any
    pub fn first_duplicate(&self) -> Option<&PlayerId> {
        let mut seen = std::collections::HashSet::new();
        self.players
            .iter()
            .map(|p| &p.identifier)
            .find(|id| !seen.insert(*id))
    }

    /// Reorder the roster to follow `order`.
    ///
    /// `order` must be a permutation of the roster's identifiers.
    pub(crate) fn reorder(&mut self, order: &[PlayerId]) -> ClubResult<()> {
        if order.len() != self.players.len() {
            return Err(ClubError::consistency(format!(
                "seed order has {} players, roster has {}",
                order.len(),
                self.players.len()
            )));
        }
        let mut reordered = Vec::with_capacity(order.len());
        for id in order {
            reordered.push(self.get(id)?.clone());
        }
        self.players = reordered;
        Ok(())
    }
}

impl FromIterator<Player> for Roster {
    fn from_iter<T: IntoIterator<Item = Player>>(iter: T) -> Self {
        Self {
            players: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}

#[cfg(test)]
#[path = "player_tests.rs"]
mod player_tests;
