//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::UiAction`] and provides a
//! small line editor for the text prompts.

pub mod map;
pub mod prompt;

pub use tui_pairs_types as types;

pub use map::{is_interrupt, map_key, should_quit};
pub use prompt::{LineInput, PromptEvent};
