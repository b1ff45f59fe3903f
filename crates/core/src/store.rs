//! File-backed leaderboard persistence.
//!
//! Reads tolerate damage (missing file, unreadable file, malformed lines);
//! writes replace the whole file atomically through a sibling `.tmp` file so a
//! failed save never leaves a half-written leaderboard behind.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ScoreStoreError;
use crate::record::{decode_record, encode_record};
use crate::score::{Leaderboard, ScoreEntry};
use crate::types::LEADERBOARD_CAPACITY;

#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
    capacity: usize,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            capacity: LEADERBOARD_CAPACITY,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the leaderboard, never failing.
    ///
    /// A missing file is an empty leaderboard. Any other read failure is
    /// logged and also yields an empty leaderboard.
    pub fn load(&self) -> Leaderboard {
        match self.read() {
            Ok(board) => board,
            Err(e) => {
                warn!(error = %e, "leaderboard unavailable, starting empty");
                Leaderboard::new(self.capacity)
            }
        }
    }

    /// Record a finished game and persist the updated leaderboard.
    ///
    /// Returns the leaderboard as written. An unreadable existing file aborts
    /// the save so its content is not replaced.
    pub fn save(&self, entry: ScoreEntry) -> Result<Leaderboard, ScoreStoreError> {
        let mut board = self.read()?;
        let player = entry.player_name.clone();
        let difficulty = entry.difficulty;
        let moves = entry.moves;
        let rank = board.insert(entry);

        self.persist(&board)?;
        info!(
            player = %player,
            difficulty = difficulty.as_str(),
            moves,
            rank = ?rank,
            "leaderboard saved"
        );
        Ok(board)
    }

    fn read(&self) -> Result<Leaderboard, ScoreStoreError> {
        let mut board = Leaderboard::new(self.capacity);
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no leaderboard file yet");
                return Ok(board);
            }
            Err(source) => {
                return Err(ScoreStoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match decode_record(line) {
                Ok(entry) => {
                    board.insert(entry);
                }
                Err(e) => warn!(line = i + 1, error = %e, "skipping malformed leaderboard record"),
            }
        }
        Ok(board)
    }

    fn persist(&self, board: &Leaderboard) -> Result<(), ScoreStoreError> {
        let tmp = self.tmp_path();
        let result = self.write_tmp(&tmp, board).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(source) = result {
            let _ = fs::remove_file(&tmp);
            return Err(ScoreStoreError::Write {
                path: self.path.clone(),
                source,
            });
        }
        Ok(())
    }

    fn write_tmp(&self, tmp: &Path, board: &Leaderboard) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(tmp)?;
        let mut out = BufWriter::new(file);
        for (_, entries) in board.iter() {
            for entry in entries {
                writeln!(out, "{}", encode_record(entry))?;
            }
        }
        let file = out.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
