use serde::Serialize;

use crate::matrix::Matrix;

/// What a renderer needs to draw the falling piece
///
/// Coordinates are board coordinates of the piece box's top-left cell,
/// buffer rows included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PieceView {
    pub shape: Matrix,
    pub col: i32,
    pub row: i32,
    pub next_shape: Matrix,
    pub ghost_row: i32,
}

/// Read-only copy of everything observable on one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub matrix: Matrix,
    pub piece: Option<PieceView>,
    pub held: Option<Matrix>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: i32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && self.piece.is_some()
    }

    /// Visible rows only (buffer rows skipped), as nested rows
    pub fn visible_rows(&self, buffer_rows: usize) -> Vec<Vec<u8>> {
        self.matrix
            .iter_rows()
            .skip(buffer_rows)
            .map(<[u8]>::to_vec)
            .collect()
    }
}
