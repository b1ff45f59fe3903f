//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (session logic, score persistence, terminal rendering).
//!
//! # Board Dimensions
//!
//! Boards are square and always have an even number of tiles:
//!
//! | Difficulty | Side | Tiles | Pairs |
//! |------------|------|-------|-------|
//! | Easy       | 4    | 16    | 8     |
//! | Medium     | 6    | 36    | 18    |
//! | Hard       | 8    | 64    | 32    |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Event loop tick interval (~60 FPS) |
//! | `MISMATCH_DELAY_MS` | 500 | Lock window before a mismatched pair flips back |
//! | `CLOCK_TICK_MS` | 1000 | Interval of the elapsed-time display refresh |
//! | `LOADING_POLL_MS` | 100 | Interval between asset readiness checks |
//!
//! # Examples
//!
//! ```
//! use tui_pairs_types::{Difficulty, Position, UiAction};
//!
//! // Parse a difficulty (case-insensitive, legacy spellings accepted)
//! let difficulty = Difficulty::from_str("Medium").unwrap();
//! assert_eq!(difficulty.side_len(), 6);
//! assert_eq!(Difficulty::from_str("difícil"), Some(Difficulty::Hard));
//!
//! // Row-major positions
//! let pos = Position::new(1, 2);
//! assert_eq!(pos.to_index(4), 6);
//! assert_eq!(Position::from_index(6, 4), pos);
//!
//! // Parse a UI action
//! assert_eq!(UiAction::from_str("confirm"), Some(UiAction::Confirm));
//! ```

/// Event loop tick interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Lock window after a mismatched pair before both tiles flip back (500ms)
pub const MISMATCH_DELAY_MS: u32 = 500;

/// Interval between elapsed-time refreshes while a session runs (1000ms)
pub const CLOCK_TICK_MS: u32 = 1000;

/// Interval between asset readiness checks on the loading screen (100ms)
pub const LOADING_POLL_MS: u32 = 100;

/// Entries kept per difficulty on the leaderboard
pub const LEADERBOARD_CAPACITY: usize = 3;

/// Maximum player name length in characters
pub const MAX_PLAYER_NAME_LEN: usize = 24;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(MISMATCH_DELAY_MS, 500);
        assert_eq!(CLOCK_TICK_MS, 1000);
        assert_eq!(LOADING_POLL_MS, 100);
        assert_eq!(LEADERBOARD_CAPACITY, 3);
    }

    #[test]
    fn difficulty_sides_are_even() {
        for d in Difficulty::ALL {
            assert_eq!(d.side_len() % 2, 0);
            assert_eq!(d.pair_count() * 2, d.side_len() * d.side_len());
        }
    }

    #[test]
    fn difficulty_parse_accepts_aliases() {
        assert_eq!(Difficulty::from_str(" EASY "), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("fácil"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("facil"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("medio"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("Difícil"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("3"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str(""), None);
        assert_eq!(Difficulty::from_str("extreme"), None);
    }

    #[test]
    fn difficulty_round_trips_through_as_str() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
    }

    #[test]
    fn position_index_conversion() {
        for side in [4usize, 6, 8] {
            for index in 0..side * side {
                let pos = Position::from_index(index, side);
                assert!(pos.row < side && pos.col < side);
                assert_eq!(pos.to_index(side), index);
            }
        }
    }
}

/// Game difficulty levels
///
/// Each level maps to a square board side length:
/// - **Easy**: 4x4 (8 pairs)
/// - **Medium**: 6x6 (18 pairs)
/// - **Hard**: 8x8 (32 pairs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties in ascending order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse difficulty from string (case-insensitive, surrounding whitespace ignored)
    ///
    /// Accepts the canonical names, the legacy spellings `fácil`/`facil`,
    /// `medio`, `difícil`/`dificil`, single letters and `1`..`3`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_pairs_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("M"), Some(Difficulty::Medium));
    /// assert_eq!(Difficulty::from_str("dificil"), Some(Difficulty::Hard));
    /// assert_eq!(Difficulty::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" | "1" | "fácil" | "facil" => Some(Difficulty::Easy),
            "medium" | "m" | "2" | "medio" => Some(Difficulty::Medium),
            "hard" | "h" | "3" | "difícil" | "dificil" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Canonical lowercase form, used in the leaderboard file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Capitalized display label.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Board side length (always even).
    pub fn side_len(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 6,
            Difficulty::Hard => 8,
        }
    }

    /// Number of distinct pairs on a board of this difficulty.
    pub fn pair_count(&self) -> usize {
        let side = self.side_len();
        side * side / 2
    }

    /// Stable index (0..3), in `ALL` order.
    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

/// A board coordinate, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index on a board with the given side length.
    pub fn to_index(&self, side: usize) -> usize {
        self.row * side + self.col
    }

    pub fn from_index(index: usize, side: usize) -> Self {
        Self {
            row: index / side,
            col: index % side,
        }
    }
}

/// Identifier of a tile face. Each id appears exactly twice on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl TileId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Visual state of a single tile, as shown by a renderer.
///
/// - **Hidden**: face down
/// - **Revealed**: face up while selected
/// - **Matched**: face up permanently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileVisual {
    #[default]
    Hidden,
    Revealed(TileId),
    Matched(TileId),
}

impl TileVisual {
    pub fn is_face_up(&self) -> bool {
        !matches!(self, TileVisual::Hidden)
    }
}

/// User interface actions produced by the input layer.
///
/// The same action set drives every screen: menus use `Up`/`Down`, the board
/// uses all four directions, and `Confirm` / `Back` select or leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Move the cursor one row up
    Up,
    /// Move the cursor one row down
    Down,
    /// Move the cursor one column left
    Left,
    /// Move the cursor one column right
    Right,
    /// Select the item or flip the tile under the cursor
    Confirm,
    /// Leave the current screen
    Back,
}

impl UiAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_pairs_types::UiAction;
    ///
    /// assert_eq!(UiAction::from_str("left"), Some(UiAction::Left));
    /// assert_eq!(UiAction::from_str("BACK"), Some(UiAction::Back));
    /// assert_eq!(UiAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(UiAction::Up),
            "down" => Some(UiAction::Down),
            "left" => Some(UiAction::Left),
            "right" => Some(UiAction::Right),
            "confirm" => Some(UiAction::Confirm),
            "back" => Some(UiAction::Back),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UiAction::Up => "up",
            UiAction::Down => "down",
            UiAction::Left => "left",
            UiAction::Right => "right",
            UiAction::Confirm => "confirm",
            UiAction::Back => "back",
        }
    }
}
