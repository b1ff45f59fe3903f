//! Session orchestration (engine-facing).
//!
//! Sits between the event loop and the core: [`SessionController`] turns
//! clicks and due scheduler tasks into session calls and forwards session
//! notifications to a [`BoardRenderer`](crate::core::BoardRenderer) and the
//! leaderboard. [`AppConfig`] carries the start-up settings.

pub mod config;
pub mod controller;

pub use tui_pairs_core as core;
pub use tui_pairs_types as types;

pub use config::{AppConfig, DEFAULT_LOG_FILTER, DEFAULT_SCORES_PATH};
pub use controller::{ControllerTimings, SessionController};
