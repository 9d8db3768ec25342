//! Two-player HP versus mode
//!
//! Two independent [`Board`](tetris_duel_core::Board)s plus a health pool
//! per player. Clearing rows deals damage to the opponent; a player loses
//! when their HP reaches zero or their board tops out.
//!
//! # Damage
//!
//! | Lines | Name | Base damage |
//! |-------|------|-------------|
//! | 1 | Single | 1 |
//! | 2 | Double | 3 |
//! | 3 | Triple | 5 |
//! | 4 | TETRIS! | 8 |
//!
//! Each combo step past the first clear adds half the base again, rounded up.
//!
//! # Example
//!
//! ```
//! use tetris_duel_core::{EngineConfig, VersusConfig};
//! use tetris_duel_types::{GameAction, PlayerId};
//! use tetris_duel_versus::{Arbiter, MatchStatus};
//!
//! let mut arbiter = Arbiter::new(VersusConfig {
//!     engine: EngineConfig::default().with_seed(7),
//!     ..VersusConfig::default()
//! });
//! arbiter.start_new_match();
//!
//! let report = arbiter.apply(PlayerId::One, GameAction::HardDrop).unwrap();
//! assert!(report.is_some());
//! assert_eq!(arbiter.status(), MatchStatus::InProgress);
//! ```

pub mod arbiter;
pub mod attack;
pub mod health;

pub use arbiter::{Arbiter, AttackReport, MatchStatus};
pub use attack::{attack_name, calculate_damage};
pub use health::Health;
