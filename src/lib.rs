//! TUI Pairs (workspace facade crate).
//!
//! Re-exports the workspace crates under `tui_pairs::{assets,core,engine,input,term,types}`
//! and hosts the [`app`] state machine that ties them together for the binary.

pub mod app;

pub use tui_pairs_assets as assets;
pub use tui_pairs_core as core;
pub use tui_pairs_engine as engine;
pub use tui_pairs_input as input;
pub use tui_pairs_term as term;
pub use tui_pairs_types as types;
