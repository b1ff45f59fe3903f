//! Board module - square grid of paired tiles
//!
//! The board is stored as a flat row-major array of [`TileId`]s. Every id in
//! `0..pair_count` appears exactly twice; the layout never changes after
//! construction, only the session's view of which tiles are matched does.

use crate::error::BoardError;
use crate::rng::SimpleRng;
use crate::types::{Difficulty, Position, TileId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    side: usize,
    tiles: Vec<TileId>,
}

impl Board {
    /// Generate a shuffled board with the given side length.
    ///
    /// The side must be even and at least 2.
    pub fn generate(side: usize, rng: &mut SimpleRng) -> Result<Self, BoardError> {
        validate_side(side)?;
        Ok(Self::shuffled(side, rng))
    }

    /// Generate a shuffled board sized for a difficulty.
    pub fn for_difficulty(difficulty: Difficulty, rng: &mut SimpleRng) -> Self {
        Self::shuffled(difficulty.side_len(), rng)
    }

    fn shuffled(side: usize, rng: &mut SimpleRng) -> Self {
        let pairs = side * side / 2;
        let mut tiles: Vec<TileId> = (0..pairs)
            .flat_map(|id| {
                let id = TileId(id as u32);
                [id, id]
            })
            .collect();
        rng.shuffle(&mut tiles);
        Self { side, tiles }
    }

    /// Build a board from an explicit row-major layout.
    pub fn from_tiles(side: usize, tiles: Vec<TileId>) -> Result<Self, BoardError> {
        validate_side(side)?;
        if tiles.len() != side * side {
            return Err(BoardError::LengthMismatch {
                side,
                expected: side * side,
                actual: tiles.len(),
            });
        }

        let mut counts = vec![0usize; tiles.len() / 2];
        for tile in &tiles {
            match counts.get_mut(tile.index()) {
                Some(count) => *count += 1,
                None => return Err(BoardError::UnpairedTile { tile: *tile, count: 1 }),
            }
        }
        for tile in &tiles {
            let count = counts[tile.index()];
            if count != 2 {
                return Err(BoardError::UnpairedTile { tile: *tile, count });
            }
        }

        Ok(Self { side, tiles })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.side && pos.col < self.side
    }

    pub fn get(&self, pos: Position) -> Option<TileId> {
        if !self.contains(pos) {
            return None;
        }
        self.tiles.get(pos.to_index(self.side)).copied()
    }

    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileId]> {
        self.tiles.chunks(self.side)
    }

    /// The other position holding the same id as `pos`.
    pub fn partner_of(&self, pos: Position) -> Option<Position> {
        let tile = self.get(pos)?;
        let own = pos.to_index(self.side);
        self.tiles
            .iter()
            .enumerate()
            .find(|&(i, t)| i != own && *t == tile)
            .map(|(i, _)| Position::from_index(i, self.side))
    }
}

fn validate_side(side: usize) -> Result<(), BoardError> {
    if side < 2 || side % 2 != 0 {
        return Err(BoardError::InvalidConfiguration { side });
    }
    Ok(())
}
