//! Persisted document shapes and conversions
//!
//! The tournaments document is a JSON object keyed by tournament name; the
//! club roster document is keyed by player identifier. Object order is kept
//! on both read and write so a roster's seed order survives a reload.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

use crate::error::{ClubError, ClubResult};
use crate::matches::{Match, Side, Slot};
use crate::player::{Player, PlayerId, Roster, DATE_FORMAT};
use crate::round::Round;
use crate::tournament::{parse_date, Tournament, DEFAULT_ROUNDS};

const TIME_FORMAT: &str = "%H:%M:%S";

// =============================================================================
// Ordered JSON object
// =============================================================================

/// A JSON object whose entries keep their document order
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed<T>(pub Vec<(String, T)>);

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Keyed<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        self.0.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<T> FromIterator<(String, T)> for Keyed<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Serialize> Serialize for Keyed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct KeyedVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for KeyedVisitor<T> {
    type Value = Keyed<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, T>()? {
            entries.push((key, value));
        }
        Ok(Keyed(entries))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Keyed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(KeyedVisitor(PhantomData))
    }
}

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub first_name: String,
    pub birth_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub identifier: String,
    pub score: f64,
    pub color: Side,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player1: SlotRecord,
    pub player2: SlotRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_name: Option<String>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub matches: Keyed<MatchRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub place: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "first_round")]
    pub current_round: u32,
    #[serde(default = "default_rounds")]
    pub rounds_number: u32,
    #[serde(default)]
    pub players: Keyed<PlayerRecord>,
    #[serde(default)]
    pub rounds: Keyed<RoundRecord>,
}

fn first_round() -> u32 {
    1
}

fn default_rounds() -> u32 {
    DEFAULT_ROUNDS
}

/// `players.json`: the whole club keyed by identifier
pub type PlayersDocument = Keyed<PlayerRecord>;

/// `tournaments.json`: every tournament keyed by name
pub type TournamentsDocument = Keyed<TournamentRecord>;

// =============================================================================
// Players
// =============================================================================

impl Player {
    pub fn to_record(&self) -> PlayerRecord {
        PlayerRecord {
            name: self.name.clone(),
            first_name: self.first_name.clone(),
            birth_date: self.birth_date.clone(),
        }
    }

    pub fn from_record(identifier: &str, record: &PlayerRecord) -> ClubResult<Self> {
        Player::new(
            identifier,
            &record.name,
            &record.first_name,
            &record.birth_date,
        )
    }
}

impl Roster {
    pub fn to_record(&self) -> PlayersDocument {
        self.iter()
            .map(|p| (p.identifier.to_string(), p.to_record()))
            .collect()
    }

    /// Rebuild a roster, rejecting duplicate identifiers
    pub fn from_record(document: &PlayersDocument) -> ClubResult<Self> {
        let roster: Roster = document
            .iter()
            .map(|(id, record)| Player::from_record(id, record))
            .collect::<ClubResult<_>>()?;
        if let Some(duplicate) = roster.first_duplicate() {
            return Err(ClubError::validation(format!(
                "player {duplicate} is listed twice"
            )));
        }
        Ok(roster)
    }
}

// =============================================================================
// Matches and rounds
// =============================================================================

impl Match {
    pub fn to_record(&self) -> MatchRecord {
        let slot = |s: &Slot| SlotRecord {
            identifier: s.player.to_string(),
            score: s.score,
            color: s.side,
        };
        MatchRecord {
            player1: slot(self.slot_a()),
            player2: slot(self.slot_b()),
        }
    }

    /// Rebuild a match; both players must belong to `roster`.
    pub fn from_record(record: &MatchRecord, roster: &Roster) -> ClubResult<Self> {
        let resolve = |slot: &SlotRecord| -> ClubResult<PlayerId> {
            let id = PlayerId::parse(&slot.identifier)?;
            if !roster.exists(&id) {
                return Err(ClubError::consistency(format!(
                    "match references unknown player {id}"
                )));
            }
            Ok(id)
        };
        let a = resolve(&record.player1)?;
        let b = resolve(&record.player2)?;
        if a == b {
            return Err(ClubError::consistency(format!("{a} is paired with themselves")));
        }

        if record.player1.color == record.player2.color {
            return Err(ClubError::validation(format!(
                "{a} and {b} cannot both play {:?}",
                record.player1.color
            )));
        }
        let mut m = Match::with_sides(a, record.player1.color, b, record.player2.color);
        m.restore_scores(record.player1.score, record.player2.score)?;
        Ok(m)
    }
}

fn split_timestamp(stamp: Option<NaiveDateTime>) -> (Option<String>, Option<String>) {
    match stamp {
        Some(at) => (
            Some(at.format(DATE_FORMAT).to_string()),
            Some(at.format(TIME_FORMAT).to_string()),
        ),
        None => (None, None),
    }
}

fn join_timestamp(date: Option<&str>, time: Option<&str>) -> ClubResult<Option<NaiveDateTime>> {
    match (date, time) {
        (None, None) => Ok(None),
        (Some(date), Some(time)) => {
            let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
                .map_err(|_| ClubError::validation(format!("bad round date {date:?}")))?;
            let time = NaiveTime::parse_from_str(time, TIME_FORMAT)
                .map_err(|_| ClubError::validation(format!("bad round time {time:?}")))?;
            Ok(Some(date.and_time(time)))
        }
        _ => Err(ClubError::validation(
            "round timestamp has a date without a time or a time without a date",
        )),
    }
}

impl Round {
    pub fn to_record(&self) -> RoundRecord {
        let (start_date, start_time) = split_timestamp(self.started_at());
        let (end_date, end_time) = split_timestamp(self.ended_at());
        RoundRecord {
            round_name: Some(self.name.clone()),
            start_date,
            start_time,
            end_date,
            end_time,
            matches: self
                .matches()
                .iter()
                .enumerate()
                .map(|(i, m)| (format!("match_{}", i + 1), m.to_record()))
                .collect(),
        }
    }

    pub fn from_record(name: &str, record: &RoundRecord, roster: &Roster) -> ClubResult<Self> {
        let matches = record
            .matches
            .iter()
            .map(|(_, m)| Match::from_record(m, roster))
            .collect::<ClubResult<Vec<_>>>()
            .map_err(|e| match e {
                ClubError::Consistency(msg) => ClubError::consistency(format!("{name}: {msg}")),
                other => other,
            })?;

        let start = join_timestamp(record.start_date.as_deref(), record.start_time.as_deref())?;
        let end = join_timestamp(record.end_date.as_deref(), record.end_time.as_deref())?;
        if end.is_some() {
            if let Some(m) = matches.iter().find(|m| !m.is_scored()) {
                let (a, b) = m.players();
                return Err(ClubError::consistency(format!(
                    "{name} is finished but {a} vs {b} has no result"
                )));
            }
        }
        Ok(Round::restore(name.to_string(), matches, start, end))
    }
}

// =============================================================================
// Tournaments
// =============================================================================

fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

impl Tournament {
    pub fn to_record(&self) -> TournamentRecord {
        TournamentRecord {
            place: self.place.clone(),
            start_date: format_date(self.start_date),
            end_date: format_date(self.end_date),
            description: self.description.clone(),
            current_round: self.current_round(),
            rounds_number: self.rounds_number(),
            players: self.roster().to_record(),
            rounds: self
                .rounds()
                .iter()
                .map(|r| (r.name.clone(), r.to_record()))
                .collect(),
        }
    }

    /// Rebuild a tournament and its whole match history.
    ///
    /// A match naming a player missing from the tournament roster fails the
    /// load with [`ClubError::Consistency`] instead of being skipped.
    pub fn from_record(name: &str, record: &TournamentRecord) -> ClubResult<Self> {
        let roster = Roster::from_record(&record.players)?;
        let rounds = record
            .rounds
            .iter()
            .map(|(round_name, r)| Round::from_record(round_name, r, &roster))
            .collect::<ClubResult<Vec<_>>>()
            .map_err(|e| match e {
                ClubError::Consistency(msg) => ClubError::consistency(format!("{name}: {msg}")),
                other => other,
            })?;

        let (rounds_number, current_round) = (record.rounds_number, record.current_round);
        if rounds_number == 0 || current_round == 0 || current_round > rounds_number {
            return Err(ClubError::consistency(format!(
                "{name}: round counter {current_round} of {rounds_number} is out of range"
            )));
        }
        let created = rounds.len() as u32;
        if created != current_round && created + 1 != current_round {
            return Err(ClubError::consistency(format!(
                "{name}: at round {current_round} but {created} round(s) stored"
            )));
        }
        if created + 1 == current_round && rounds.last().is_some_and(|r| r.is_in_progress()) {
            return Err(ClubError::consistency(format!(
                "{name}: at round {current_round} but round {created} is unfinished"
            )));
        }
        if let Some(unfinished) = rounds[..rounds.len().saturating_sub(1)]
            .iter()
            .find(|r| r.is_in_progress())
        {
            return Err(ClubError::consistency(format!(
                "{name}: {} is unfinished but later rounds exist",
                unfinished.name
            )));
        }

        let start_date = record.start_date.as_deref().map(parse_date).transpose()?;
        let end_date = record.end_date.as_deref().map(parse_date).transpose()?;

        Ok(Tournament::restore(
            name.to_string(),
            record.place.clone(),
            start_date,
            end_date,
            record.description.clone(),
            rounds_number,
            current_round,
            rounds,
            roster,
        ))
    }
}

/// Serialize a whole collection of tournaments
pub fn tournaments_to_document(tournaments: &[Tournament]) -> TournamentsDocument {
    tournaments
        .iter()
        .map(|t| (t.name.clone(), t.to_record()))
        .collect()
}

/// Load every tournament of a document. The first bad tournament fails the load.
pub fn tournaments_from_document(document: &TournamentsDocument) -> ClubResult<Vec<Tournament>> {
    let mut tournaments: Vec<Tournament> = Vec::with_capacity(document.len());
    for (name, record) in document.iter() {
        if tournaments.iter().any(|t| t.name == name) {
            return Err(ClubError::validation(format!(
                "tournament {name} is listed twice"
            )));
        }
        tournaments.push(Tournament::from_record(name, record)?);
    }
    Ok(tournaments)
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod records_tests;
