//! Tick-driven snake engine.
//!
//! [`game::GameState`] owns the board, the body, the apple and the score and
//! changes only through `apply_direction` and `tick`. Every body segment
//! carries an [`snake::Orientation`] tag derived from its neighbors, which the
//! terminal front end maps to glyphs.

pub mod app;
pub mod apple;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
