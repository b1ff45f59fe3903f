//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is flushed to the terminal as a diff.
//!
//! - [`BoardScreen`] is the retained state the session controller drives.
//! - [`BoardView`] and the [`menu_view`] functions draw frames from it.
//! - [`TerminalRenderer`] owns raw mode and the alternate screen.

pub mod board_screen;
pub mod board_view;
pub mod fb;
pub mod menu_view;
pub mod renderer;

pub use tui_pairs_assets as assets;
pub use tui_pairs_core as core;
pub use tui_pairs_types as types;

pub use board_screen::{BoardScreen, CompletionDialog};
pub use board_view::{AnchorY, BoardLayout, BoardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use menu_view::{render_loading, render_menu, render_prompt, render_stats};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
