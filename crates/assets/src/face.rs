//! Tile faces: what a tile shows once it is turned over.

use serde::{Deserialize, Serialize};

use crate::types::TileId;

/// Glyph and color of one tile face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileFace {
    pub glyph: char,
    pub color: [u8; 3],
}

impl TileFace {
    pub const fn new(glyph: char, color: [u8; 3]) -> Self {
        Self { glyph, color }
    }
}

/// Shown for any tile whose face could not be acquired.
pub const PLACEHOLDER_FACE: TileFace = TileFace::new('?', [150, 150, 150]);

/// Built-in faces, enough for the largest board (32 pairs).
pub const BUILTIN_FACES: [TileFace; 32] = [
    TileFace::new('A', [230, 80, 80]),
    TileFace::new('B', [80, 200, 120]),
    TileFace::new('C', [90, 140, 240]),
    TileFace::new('D', [240, 210, 80]),
    TileFace::new('E', [200, 110, 220]),
    TileFace::new('F', [80, 210, 210]),
    TileFace::new('G', [255, 160, 60]),
    TileFace::new('H', [170, 230, 90]),
    TileFace::new('J', [240, 120, 170]),
    TileFace::new('K', [120, 120, 250]),
    TileFace::new('L', [210, 170, 120]),
    TileFace::new('M', [110, 230, 170]),
    TileFace::new('N', [250, 100, 120]),
    TileFace::new('P', [150, 200, 250]),
    TileFace::new('R', [230, 230, 130]),
    TileFace::new('S', [180, 130, 250]),
    TileFace::new('T', [250, 140, 100]),
    TileFace::new('U', [100, 180, 140]),
    TileFace::new('V', [220, 90, 200]),
    TileFace::new('W', [130, 220, 240]),
    TileFace::new('X', [250, 200, 150]),
    TileFace::new('Y', [160, 250, 120]),
    TileFace::new('Z', [200, 200, 250]),
    TileFace::new('2', [250, 120, 80]),
    TileFace::new('3', [120, 250, 200]),
    TileFace::new('4', [250, 230, 100]),
    TileFace::new('5', [170, 150, 230]),
    TileFace::new('6', [240, 170, 210]),
    TileFace::new('7', [140, 210, 100]),
    TileFace::new('8', [100, 160, 230]),
    TileFace::new('9', [230, 140, 140]),
    TileFace::new('&', [210, 210, 210]),
];

/// Faces indexed by [`TileId`]; missing entries show [`PLACEHOLDER_FACE`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FaceSet {
    faces: Vec<Option<TileFace>>,
}

impl FaceSet {
    pub fn from_faces(faces: Vec<Option<TileFace>>) -> Self {
        Self { faces }
    }

    /// The first `count` built-in faces.
    pub fn builtin(count: usize) -> Self {
        Self {
            faces: (0..count).map(|i| BUILTIN_FACES.get(i).copied()).collect(),
        }
    }

    pub fn placeholders(count: usize) -> Self {
        Self {
            faces: vec![None; count],
        }
    }

    pub fn face(&self, tile: TileId) -> TileFace {
        self.faces
            .get(tile.index())
            .copied()
            .flatten()
            .unwrap_or(PLACEHOLDER_FACE)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Holds an entry (acquired or placeholder) for ids `0..count`.
    pub fn covers(&self, count: usize) -> bool {
        self.faces.len() >= count
    }

    /// Number of ids that fell back to the placeholder.
    pub fn missing(&self) -> usize {
        self.faces.iter().filter(|f| f.is_none()).count()
    }
}
