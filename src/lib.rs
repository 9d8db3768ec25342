//! Tetris Duel (workspace facade crate).
//!
//! Re-exports the engine crates under one name so consumers can write
//! `tetris_duel::{core,versus,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use tetris_duel_core as core;
pub use tetris_duel_types as types;
pub use tetris_duel_versus as versus;
