//! Error types for board generation, sessions and score persistence.

use std::path::PathBuf;

use crate::types::{Position, TileId};

/// Errors that can occur when building a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board side {side}: must be even and at least 2")]
    InvalidConfiguration { side: usize },

    #[error("board of side {side} needs {expected} tiles, got {actual}")]
    LengthMismatch {
        side: usize,
        expected: usize,
        actual: usize,
    },

    #[error("tile {tile:?} appears {count} time(s), expected exactly 2")]
    UnpairedTile { tile: TileId, count: usize },
}

/// Errors reported by a game session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("position {pos:?} is outside a {side}x{side} board")]
    OutOfBounds { pos: Position, side: usize },

    #[error("board side {actual} does not match the difficulty side {expected}")]
    BoardSizeMismatch { expected: usize, actual: usize },

    #[error("session has been torn down")]
    TornDown,
}

/// Player name validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("a player name is required")]
    Empty,

    #[error("player name is longer than {max} characters")]
    TooLong { max: usize },

    #[error("player name contains an unsupported character {0:?}")]
    InvalidCharacter(char),
}

/// Failures decoding a single leaderboard record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),

    #[error("empty player name")]
    EmptyName,

    #[error("unknown difficulty {0:?}")]
    Difficulty(String),

    #[error("invalid move count {0:?}")]
    Moves(String),

    #[error("invalid timestamp {0:?}")]
    Timestamp(String),
}

/// Errors that can occur while persisting the leaderboard.
#[derive(Debug, thiserror::Error)]
pub enum ScoreStoreError {
    #[error("failed to read leaderboard {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write leaderboard {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
