//! Error kinds raised by the tournament engine.

use thiserror::Error;

/// What a [`ClubError::NotFound`] was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Player,
    Tournament,
    Round,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Entity::Player => "player",
            Entity::Tournament => "tournament",
            Entity::Round => "round",
        };
        f.write_str(name)
    }
}

/// Errors raised by the engine.
///
/// Validation errors are always raised before any state is touched, so a
/// caller receiving one can keep using the value it called into.
#[derive(Debug, Error, PartialEq)]
pub enum ClubError {
    /// Malformed input: bad identifier, odd or duplicate roster, bad score.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced player, tournament or round does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: Entity, id: String },

    /// The operation is not allowed at the current lifecycle stage.
    #[error("state error: {0}")]
    State(String),

    /// Persisted data contradicts itself (e.g. a match names an unknown player).
    #[error("consistency error: {0}")]
    Consistency(String),
}

impl ClubError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ClubError::Validation(msg.into())
    }

    pub fn state(msg: impl Into<String>) -> Self {
        ClubError::State(msg.into())
    }

    pub fn consistency(msg: impl Into<String>) -> Self {
        ClubError::Consistency(msg.into())
    }

    pub fn player_not_found(id: impl Into<String>) -> Self {
        ClubError::NotFound {
            kind: Entity::Player,
            id: id.into(),
        }
    }

    pub fn tournament_not_found(name: impl Into<String>) -> Self {
        ClubError::NotFound {
            kind: Entity::Tournament,
            id: name.into(),
        }
    }
}

pub type ClubResult<T> = Result<T, ClubError>;
