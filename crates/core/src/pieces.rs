//! Pieces module - the tetromino catalog
//!
//! Each kind owns a fixed, ordered list of 4x4 rotation states. O has one
//! state; I, S and Z cycle through two; J, L and T through four. Filled cells
//! carry the kind's color code so a merged piece paints its own color.
//!
//! Rotation states live in static tables. Accessors hand out owned
//! [`Matrix`] copies, so callers can never corrupt the canonical shapes.

use tetris_duel_types::PieceKind;

use crate::error::EngineError;
use crate::matrix::Matrix;

/// One rotation state: 4 rows of 4 cells
pub type ShapeRows = [[u8; 4]; 4];

const I_STATES: [ShapeRows; 2] = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
];

const J_STATES: [ShapeRows; 4] = [
    [[0, 0, 0, 0], [2, 2, 2, 0], [0, 0, 2, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 2, 2, 0], [0, 2, 0, 0], [0, 2, 0, 0]],
    [[0, 0, 0, 0], [0, 2, 0, 0], [0, 2, 2, 2], [0, 0, 0, 0]],
    [[0, 0, 2, 0], [0, 0, 2, 0], [0, 2, 2, 0], [0, 0, 0, 0]],
];

const L_STATES: [ShapeRows; 4] = [
    [[0, 0, 0, 0], [0, 3, 3, 3], [0, 3, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 3, 3, 0], [0, 0, 3, 0], [0, 0, 3, 0]],
    [[0, 0, 0, 0], [0, 0, 3, 0], [3, 3, 3, 0], [0, 0, 0, 0]],
    [[0, 3, 0, 0], [0, 3, 0, 0], [0, 3, 3, 0], [0, 0, 0, 0]],
];

const O_STATES: [ShapeRows; 1] = [[[0, 0, 0, 0], [0, 4, 4, 0], [0, 4, 4, 0], [0, 0, 0, 0]]];

const S_STATES: [ShapeRows; 2] = [
    [[0, 0, 0, 0], [0, 5, 5, 0], [5, 5, 0, 0], [0, 0, 0, 0]],
    [[5, 0, 0, 0], [5, 5, 0, 0], [0, 5, 0, 0], [0, 0, 0, 0]],
];

const T_STATES: [ShapeRows; 4] = [
    [[0, 0, 0, 0], [6, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [0, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [6, 6, 0, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
];

const Z_STATES: [ShapeRows; 2] = [
    [[0, 0, 0, 0], [7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0]],
    [[0, 7, 0, 0], [7, 7, 0, 0], [7, 0, 0, 0], [0, 0, 0, 0]],
];

/// Canonical rotation states for a kind
pub fn rotation_states(kind: PieceKind) -> &'static [ShapeRows] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::Z => &Z_STATES,
    }
}

/// Number of distinct rotation states
pub fn rotation_count(kind: PieceKind) -> usize {
    rotation_states(kind).len()
}

/// Owned copy of rotation state `index`
pub fn get_shape(kind: PieceKind, index: usize) -> Result<Matrix, EngineError> {
    let states = rotation_states(kind);
    states
        .get(index)
        .map(|rows| Matrix::from_rows(&rows[..]))
        .ok_or(EngineError::RotationOutOfRange {
            index,
            count: states.len(),
        })
}

/// Spawn orientation (state 0), used for previews
pub fn spawn_shape(kind: PieceKind) -> Matrix {
    Matrix::from_rows(&rotation_states(kind)[0][..])
}
