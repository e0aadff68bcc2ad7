//! Tournament rounds

use chrono::{Local, NaiveDateTime, Timelike};

use crate::error::{ClubError, ClubResult};
use crate::matches::Match;

/// A batch of matches played together.
///
/// A round is in progress until it has an end timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub name: String,
    matches: Vec<Match>,
    populated: bool,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

/// Current local time, truncated to the second (the stored resolution)
fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

impl Round {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matches: Vec::new(),
            populated: false,
            start: None,
            end: None,
        }
    }

    /// Standard name for the `number`th round
    pub fn name_for(number: u32) -> String {
        format!("Round {number}")
    }

    /// Set the match list. Matches are never added after this.
    pub fn populate(&mut self, matches: Vec<Match>) -> ClubResult<()> {
        if self.populated {
            return Err(ClubError::state(format!(
                "{} already has its matches",
                self.name
            )));
        }
        self.matches = matches;
        self.populated = true;
        Ok(())
    }

    pub fn start(&mut self) {
        self.start = Some(now());
    }

    /// Close the round. Every match must have a result.
    pub fn finish(&mut self) -> ClubResult<()> {
        if self.end.is_some() {
            return Err(ClubError::state(format!("{} is already finished", self.name)));
        }
        let unscored = self.matches.iter().filter(|m| !m.is_scored()).count();
        if unscored > 0 {
            return Err(ClubError::state(format!(
                "{} still has {unscored} unscored match(es)",
                self.name
            )));
        }
        self.end = Some(now());
        Ok(())
    }

    pub fn is_in_progress(&self) -> bool {
        self.end.is_none()
    }

    pub fn is_finished(&self) -> bool {
        self.end.is_some()
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub(crate) fn matches_mut(&mut self) -> &mut [Match] {
        &mut self.matches
    }

    pub fn started_at(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn ended_at(&self) -> Option<NaiveDateTime> {
        self.end
    }

    /// Restore a round read from storage, timestamps included.
    pub(crate) fn restore(
        name: String,
        matches: Vec<Match>,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            name,
            matches,
            populated: true,
            start,
            end,
        }
    }
}

#[cfg(test)]
#[path = "round_tests.rs"]
mod round_tests;
