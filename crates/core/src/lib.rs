//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, session state and score persistence.
//! It has **no dependencies** on the terminal, input handling or the asset
//! runtime, making it:
//!
//! - **Deterministic**: Same seed produces the same board layout
//! - **Testable**: Time comes from a [`Clock`], deferred work from a [`Scheduler`]
//! - **Portable**: Any renderer can implement [`BoardRenderer`]
//!
//! # Module Structure
//!
//! - [`board`]: Square board of paired tiles, shuffled from a seed
//! - [`session`]: Selection/match state machine, move counting and timing
//! - [`schedule`]: Deferred one-shot tasks (mismatch lock, clock tick)
//! - [`score`] / [`record`] / [`store`]: Leaderboard model, line codec, file persistence
//! - [`name`]: Player name validation
//! - [`view`]: The rendering collaborator trait
//!
//! # Game Rules
//!
//! - Every tile id appears exactly twice on the board
//! - Each turn flips two tiles; every two-tile attempt costs one move
//! - A matched pair stays face up; a mismatch flips back after a 500ms lock
//! - Clicking the selected tile again puts it back without costing a move
//! - The game ends when every pair is found
//!
//! # Example
//!
//! ```
//! use tui_pairs_core::{Board, GameSession, PlayerName, SessionId, SessionSetup, SimpleRng, SystemClock};
//! use tui_pairs_core::types::{Difficulty, Position};
//!
//! let board = Board::for_difficulty(Difficulty::Easy, &mut SimpleRng::new(12345));
//! let setup = SessionSetup::new(Difficulty::Easy, PlayerName::parse("Ana").unwrap());
//! let mut session = GameSession::new(SessionId(1), setup, board, SystemClock).unwrap();
//!
//! session.select_card(Position::new(0, 0)).unwrap();
//! assert!(session.is_running());
//! assert_eq!(session.moves(), 0);
//! ```

pub mod board;
pub mod clock;
pub mod error;
pub mod name;
pub mod record;
pub mod rng;
pub mod schedule;
pub mod score;
pub mod session;
pub mod store;
pub mod view;

pub use tui_pairs_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{BoardError, NameError, RecordError, ScoreStoreError, SessionError};
pub use name::PlayerName;
pub use record::{decode_record, encode_record, TIMESTAMP_FORMAT};
pub use rng::SimpleRng;
pub use schedule::{DueTask, Scheduler, Task, TaskId};
pub use score::{Leaderboard, ScoreEntry};
pub use session::{
    GameResult, GameSession, Phase, RejectReason, SelectOutcome, SessionEvent, SessionId,
    SessionSetup, SessionStats,
};
pub use store::ScoreStore;
pub use view::BoardRenderer;
