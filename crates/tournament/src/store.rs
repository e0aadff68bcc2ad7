//! Tournament and roster documents on disk

use club_core::{
    tournaments_from_document, tournaments_to_document, ClubError, PlayersDocument, Roster,
    Tournament, TournamentsDocument,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TOURNAMENTS_FILE: &str = "tournaments.json";
pub const PLAYERS_FILE: &str = "players.json";

/// Failure to read, parse or write a document
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid document: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {source}", .path.display())]
    Club {
        path: PathBuf,
        #[source]
        source: ClubError,
    },
}

impl StoreError {
    /// The engine error behind a failed load, if any
    pub fn club_error(&self) -> Option<&ClubError> {
        match self {
            StoreError::Club { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Data directory holding `tournaments.json` and `players.json`
#[derive(Debug, Clone)]
pub struct ClubStore {
    dir: PathBuf,
}

impl ClubStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn players_path(&self) -> PathBuf {
        self.dir.join(PLAYERS_FILE)
    }

    pub fn tournaments_path(&self) -> PathBuf {
        self.dir.join(TOURNAMENTS_FILE)
    }

    /// Load the club roster. A missing file is created empty.
    pub fn load_players(&self) -> Result<Roster, StoreError> {
        let path = self.players_path();
        let document: PlayersDocument = read_document(&path)?;
        Roster::from_record(&document).map_err(|source| StoreError::Club { path, source })
    }

    /// Load every tournament. A missing file is created empty; any bad
    /// tournament fails the whole load.
    pub fn load_tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        let path = self.tournaments_path();
        let document: TournamentsDocument = read_document(&path)?;
        let tournaments = tournaments_from_document(&document)
            .map_err(|source| StoreError::Club { path, source })?;
        tracing::debug!(count = tournaments.len(), "tournaments loaded");
        Ok(tournaments)
    }

    pub fn save_players(&self, roster: &Roster) -> Result<(), StoreError> {
        write_document(&self.players_path(), &roster.to_record())
    }

    pub fn save_tournaments(&self, tournaments: &[Tournament]) -> Result<(), StoreError> {
        write_document(
            &self.tournaments_path(),
            &tournaments_to_document(tournaments),
        )
    }
}

fn read_document<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "document missing, creating an empty one");
        write_atomic(path, "{}")?;
        return Ok(T::default());
    }
    let contents = fs::read_to_string(path).map_err(io_error(path))?;
    serde_json::from_str(&contents).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(document).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, &json)?;
    tracing::debug!(path = %path.display(), "document saved");
    Ok(())
}

/// Write to a sibling temporary file, then rename it over `path`
fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(io_error(&tmp))?;
    fs::rename(&tmp, path).map_err(io_error(path))
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
