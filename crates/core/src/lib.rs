//! Core game logic - one falling-block board, deterministic and headless
//!
//! Everything here is plain data plus pure functions over it. There is no
//! clock, terminal or thread in this crate; callers drive a [`Board`] by
//! feeding it input verbs and gravity ticks at whatever cadence they like.
//!
//! # Module Structure
//!
//! - [`matrix`]: the grid value type, merging, and full-row compaction
//! - [`pieces`]: static rotation tables for the seven kinds
//! - [`collision`]: overlap and movement tests against the grid
//! - [`rotator`]: current rotation state and the next candidate
//! - [`ghost`]: landing-row projection
//! - [`hold`]: the hold slot and its once-per-spawn lock
//! - [`rng`]: seeded generator with a one-piece preview
//! - [`scoring`]: level, combo and score tracking plus listeners
//! - [`config`]: difficulty presets and TOML-backed settings
//! - [`board`]: the spawn / fall / lock / clear state machine
//! - [`snapshot`]: read-only views for renderers
//!
//! # Game Rules
//!
//! - **Board**: 10 columns by 25 rows; the top two rows are a hidden buffer
//! - **Spawn**: every piece enters at column 4, row 10, rotation 0
//! - **Rotation**: in-place shape swap, rejected on collision (no kicks)
//! - **Hold**: once per spawn; the swapped-in piece restarts at the spawn point
//! - **Clears**: `50 * n^2` per lock, times level and difficulty
//! - **Combo**: consecutive clearing locks add 50 per step past the first
//! - **Level**: `lines / 10 + 1`; each level takes 50ms off gravity, floor 100ms
//!
//! # Example
//!
//! ```
//! use tetris_duel_core::{Board, EngineConfig};
//! use tetris_duel_types::GameAction;
//!
//! let mut board = Board::new(EngineConfig::default().with_seed(12345));
//! board.new_game();
//!
//! board.apply(GameAction::MoveRight).unwrap();
//! board.apply(GameAction::Rotate).unwrap();
//! let outcome = board.apply(GameAction::HardDrop).unwrap();
//!
//! assert!(outcome.lock.is_some());
//! assert!(!board.is_game_over());
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod error;
pub mod ghost;
pub mod hold;
pub mod matrix;
pub mod pieces;
pub mod rng;
pub mod rotator;
pub mod scoring;
pub mod snapshot;

pub use tetris_duel_types as types;

// Re-export commonly used types for convenience
pub use board::{ActionOutcome, Board, ClearReport, DropSource, LockReport, Phase};
pub use collision::Position;
pub use config::{ConfigError, Difficulty, EngineConfig, SpawnPoint, VersusConfig};
pub use error::EngineError;
pub use hold::{HoldManager, HoldOutcome};
pub use matrix::{ClearResult, Matrix};
pub use pieces::get_shape;
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{ComboTracker, LevelTracker, Score, ScoreListener};
pub use snapshot::{GameSnapshot, PieceView};
