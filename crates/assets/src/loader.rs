//! Background face acquisition.
//!
//! Bridges the sync game loop with an async acquisition task. The task reports
//! progress after each face and hands over the finished [`FaceSet`] exactly
//! once; the loop checks both without blocking.

use std::path::{Path, PathBuf};

use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::AssetError;
use crate::face::{FaceSet, TileFace, BUILTIN_FACES};
use crate::types::TileId;

/// Where faces come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaceSource {
    Builtin,
    /// JSON array of `{"glyph": "A", "color": [r, g, b]}`.
    PackFile(PathBuf),
}

impl FaceSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => FaceSource::PackFile(path),
            None => FaceSource::Builtin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Pending { loaded: usize, total: usize },
    Ready(FaceSet),
    /// The acquisition task ended without delivering a face set.
    Failed,
}

/// Running acquisition.
pub struct AssetLoader {
    _rt: Runtime,
    progress_rx: mpsc::UnboundedReceiver<usize>,
    ready_rx: Option<oneshot::Receiver<FaceSet>>,
    loaded: usize,
    total: usize,
}

impl AssetLoader {
    /// Start acquiring faces for ids `0..count`.
    pub fn start(source: FaceSource, count: usize) -> Result<Self, AssetError> {
        let rt = Runtime::new().map_err(AssetError::Runtime)?;
        let (progress_tx, progress_rx) = mpsc::unbounded_channel::<usize>();
        let (ready_tx, ready_rx) = oneshot::channel::<FaceSet>();

        info!(count, source = ?source, "acquiring tile faces");
        rt.spawn(async move {
            let faces = acquire_faces(&source, count, progress_tx).await;
            let _ = ready_tx.send(faces);
        });

        Ok(Self {
            _rt: rt,
            progress_rx,
            ready_rx: Some(ready_rx),
            loaded: 0,
            total: count,
        })
    }

    /// Check readiness without blocking.
    ///
    /// Returns `Ready` once; afterwards the loader reports `Failed`.
    pub fn poll(&mut self) -> LoadStatus {
        while let Ok(loaded) = self.progress_rx.try_recv() {
            self.loaded = loaded;
        }

        let Some(rx) = self.ready_rx.as_mut() else {
            return LoadStatus::Failed;
        };
        match rx.try_recv() {
            Ok(faces) => {
                self.ready_rx = None;
                self.loaded = self.total;
                LoadStatus::Ready(faces)
            }
            Err(oneshot::error::TryRecvError::Empty) => LoadStatus::Pending {
                loaded: self.loaded,
                total: self.total,
            },
            Err(oneshot::error::TryRecvError::Closed) => {
                self.ready_rx = None;
                warn!("face acquisition ended without a result");
                LoadStatus::Failed
            }
        }
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// Acquire every face, degrading individual failures to placeholders.
pub async fn acquire_faces(
    source: &FaceSource,
    count: usize,
    progress: mpsc::UnboundedSender<usize>,
) -> FaceSet {
    let pack = match source {
        FaceSource::Builtin => Vec::new(),
        FaceSource::PackFile(path) => match read_pack(path).await {
            Ok(pack) => pack,
            Err(e) => {
                warn!(error = %e, "face pack unusable, using built-in faces");
                Vec::new()
            }
        },
    };

    let mut faces = Vec::with_capacity(count);
    for i in 0..count {
        let tile = TileId(i as u32);
        match acquire_face(&pack, tile).await {
            Ok(face) => faces.push(Some(face)),
            Err(e) => {
                warn!(error = %e, "using placeholder face");
                faces.push(None);
            }
        }
        let _ = progress.send(i + 1);
    }

    let set = FaceSet::from_faces(faces);
    debug!(count, missing = set.missing(), "tile faces acquired");
    set
}

/// Acquire one face: the pack entry if present, else the built-in one.
pub async fn acquire_face(pack: &[TileFace], tile: TileId) -> Result<TileFace, AssetError> {
    tokio::task::yield_now().await;
    pack.get(tile.index())
        .or_else(|| BUILTIN_FACES.get(tile.index()))
        .copied()
        .ok_or(AssetError::MissingFace(tile))
}

pub async fn read_pack(path: &Path) -> Result<Vec<TileFace>, AssetError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&text).map_err(|source| AssetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
