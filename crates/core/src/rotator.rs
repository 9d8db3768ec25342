//! Rotation tracking for the active piece
//!
//! The tracker proposes the next rotation state but never commits it on its
//! own; the board checks the candidate for collision first and then calls
//! [`RotationTracker::commit_rotation`].

use tetris_duel_types::PieceKind;

use crate::error::EngineError;
use crate::matrix::Matrix;
use crate::pieces::{get_shape, rotation_count};

/// A not-yet-committed rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationCandidate {
    pub shape: Matrix,
    pub index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RotationTracker {
    piece: Option<PieceKind>,
    index: usize,
}

impl RotationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `kind` the active piece in its spawn orientation
    pub fn set_piece(&mut self, kind: PieceKind) {
        self.piece = Some(kind);
        self.index = 0;
    }

    /// Drop the active piece (after it has been merged)
    pub fn clear(&mut self) {
        self.piece = None;
        self.index = 0;
    }

    pub fn piece(&self) -> Result<PieceKind, EngineError> {
        self.piece.ok_or(EngineError::NoActivePiece)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Shape of the committed rotation state
    pub fn current_shape(&self) -> Result<Matrix, EngineError> {
        get_shape(self.piece()?, self.index)
    }

    /// The state after this one, wrapping to 0
    pub fn next_shape_candidate(&self) -> Result<RotationCandidate, EngineError> {
        let kind = self.piece()?;
        let index = (self.index + 1) % rotation_count(kind);
        Ok(RotationCandidate {
            shape: get_shape(kind, index)?,
            index,
        })
    }

    pub fn commit_rotation(&mut self, index: usize) -> Result<(), EngineError> {
        let count = rotation_count(self.piece()?);
        if index >= count {
            return Err(EngineError::RotationOutOfRange { index, count });
        }
        self.index = index;
        Ok(())
    }
}
