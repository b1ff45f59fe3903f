//! BoardScreen: retained visual state of the board being played.
//!
//! Implements the rendering collaborator interface by recording what it is
//! told; [`BoardView`](crate::board_view::BoardView) draws it every frame.

use crate::assets::{FaceSet, TileFace};
use crate::core::BoardRenderer;
use crate::types::{Difficulty, Position, TileVisual};

/// Text of the victory dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionDialog {
    pub player_name: String,
    pub moves: u32,
    pub seconds: u64,
}

impl CompletionDialog {
    pub fn message(&self) -> String {
        format!(
            "Congratulations {}! {} moves in {} seconds.",
            self.player_name, self.moves, self.seconds
        )
    }
}

#[derive(Debug, Clone)]
pub struct BoardScreen {
    faces: FaceSet,
    player_name: String,
    difficulty: Difficulty,
    side: usize,
    tiles: Vec<TileVisual>,
    moves: u32,
    seconds: u64,
    completion: Option<CompletionDialog>,
    active: bool,
}

impl BoardScreen {
    pub fn new(faces: FaceSet, player_name: &str, difficulty: Difficulty) -> Self {
        Self {
            faces,
            player_name: player_name.to_string(),
            difficulty,
            side: 0,
            tiles: Vec::new(),
            moves: 0,
            seconds: 0,
            completion: None,
            active: false,
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Created and not yet destroyed.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn tile(&self, pos: Position) -> TileVisual {
        if pos.row >= self.side || pos.col >= self.side {
            return TileVisual::Hidden;
        }
        self.tiles
            .get(pos.to_index(self.side))
            .copied()
            .unwrap_or_default()
    }

    pub fn face(&self, visual: TileVisual) -> Option<TileFace> {
        match visual {
            TileVisual::Hidden => None,
            TileVisual::Revealed(tile) | TileVisual::Matched(tile) => Some(self.faces.face(tile)),
        }
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn matched_pairs(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| matches!(t, TileVisual::Matched(_)))
            .count()
            / 2
    }

    pub fn completion(&self) -> Option<&CompletionDialog> {
        self.completion.as_ref()
    }

    fn set(&mut self, pos: Position, visual: TileVisual) {
        if !self.active || pos.row >= self.side || pos.col >= self.side {
            return;
        }
        let i = pos.to_index(self.side);
        if let Some(slot) = self.tiles.get_mut(i) {
            *slot = visual;
        }
    }
}

impl BoardRenderer for BoardScreen {
    fn create_board(&mut self, side: usize) {
        self.side = side;
        self.tiles = vec![TileVisual::Hidden; side * side];
        self.moves = 0;
        self.seconds = 0;
        self.completion = None;
        self.active = true;
    }

    fn update_tile(&mut self, pos: Position, visual: TileVisual) {
        self.set(pos, visual);
    }

    fn reset_tiles(&mut self, first: Position, second: Position) {
        self.set(first, TileVisual::Hidden);
        self.set(second, TileVisual::Hidden);
    }

    fn update_move_count(&mut self, moves: u32) {
        if self.active {
            self.moves = moves;
        }
    }

    fn update_time(&mut self, seconds: u64) {
        if self.active {
            self.seconds = seconds;
        }
    }

    fn show_completion_dialog(&mut self, player_name: &str, moves: u32, seconds: u64) {
        if self.active {
            self.completion = Some(CompletionDialog {
                player_name: player_name.to_string(),
                moves,
                seconds,
            });
        }
    }

    fn destroy_board(&mut self) {
        self.active = false;
        self.tiles.clear();
        self.side = 0;
        self.completion = None;
    }
}
