//! Asset acquisition errors.

use std::path::PathBuf;

use crate::types::TileId;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to start asset runtime: {0}")]
    Runtime(std::io::Error),

    #[error("failed to read face pack {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse face pack {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("no face available for {0:?}")]
    MissingFace(TileId),
}
