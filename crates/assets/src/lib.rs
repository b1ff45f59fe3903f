//! Tile face assets.
//!
//! Faces are acquired on a private tokio runtime so the game loop never waits
//! on file I/O. The loop polls an [`AssetLoader`] for progress and readiness;
//! anything that cannot be acquired degrades to a placeholder face instead of
//! stopping the game.

pub mod error;
pub mod face;
pub mod loader;

pub use tui_pairs_types as types;

pub use error::AssetError;
pub use face::{FaceSet, TileFace, BUILTIN_FACES, PLACEHOLDER_FACE};
pub use loader::{acquire_face, acquire_faces, read_pack, AssetLoader, FaceSource, LoadStatus};
