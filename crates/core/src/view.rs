//! Rendering collaborator interface.
//!
//! Whatever draws the board implements [`BoardRenderer`]; the session
//! controller forwards session notifications to it. Implementations own all
//! visual state; the session never reads anything back.

use crate::types::{Position, TileVisual};

pub trait BoardRenderer {
    /// Lay out a fresh `side` x `side` board with every tile hidden.
    fn create_board(&mut self, side: usize);

    fn update_tile(&mut self, pos: Position, visual: TileVisual);

    /// Flip two face-up tiles back after a mismatch.
    fn reset_tiles(&mut self, first: Position, second: Position);

    fn update_move_count(&mut self, moves: u32);

    fn update_time(&mut self, seconds: u64);

    fn show_completion_dialog(&mut self, player_name: &str, moves: u32, seconds: u64);

    /// Tear the board down. Later calls must be harmless.
    fn destroy_board(&mut self);
}
