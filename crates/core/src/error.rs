//! Engine fault types
//!
//! These only surface when the orchestration layer sequences calls wrongly.
//! Illegal moves are ordinary `false` returns and never show up here.

use thiserror::Error;

use crate::board::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no active piece has been set")]
    NoActivePiece,
    #[error("rotation index {index} out of range for {count} rotation states")]
    RotationOutOfRange { index: usize, count: usize },
    #[error("operation requires phase {expected:?}, board is in {actual:?}")]
    InvalidPhase { expected: Phase, actual: Phase },
}
