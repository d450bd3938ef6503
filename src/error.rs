//! Error types for the simulation engine.
//!
//! Every variant here is a contract violation: it signals a caller bug in
//! engine usage, not a normal runtime condition. Expected empty results
//! (no occupant at a cell, no food at a cell) are plain `Option`/`bool`
//! returns and never appear in this enum.

use crate::critter::CritterId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("cell ({x}, {y}) is already occupied")]
    InvalidPlacement { x: usize, y: usize },

    #[error("no food at ({x}, {y})")]
    NoFoodHere { x: usize, y: usize },

    #[error("no open cells remain")]
    WorldFull,

    #[error("critter {0} is not tracked by this world")]
    UnknownCritter(CritterId),

    #[error("critter {0} is already mating")]
    AlreadyMating(CritterId),
}
