//! Ghost projection: where the active piece would land if dropped now

use crate::collision::{can_move_down, Position};
use crate::matrix::Matrix;

/// Last collision-free row reachable by straight descent from `pos`
///
/// Pure simulation; neither the board nor the piece is touched.
///
/// A piece with no filled cells never collides, so it stays at `pos`.
pub fn project_landing_row(board: &Matrix, piece: &Matrix, pos: Position) -> i32 {
    if piece.filled().next().is_none() {
        return pos.row;
    }
    let mut landing = pos;
    while can_move_down(board, piece, landing) {
        landing = landing.translate(0, 1);
    }
    landing.row
}
