//! Falling-block puzzle: a deterministic reducer over immutable game state,
//! plus the terminal event loop and renderer that drive it.

pub mod board;
pub mod config;
pub mod driver;
pub mod error;
pub mod game;
pub mod input;
pub mod journal;
pub mod piece;
pub mod rng;
pub mod ui;
