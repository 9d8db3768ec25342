//! Collision detection - the single authority on piece placement legality
//!
//! A placement collides when any filled piece cell lands outside the grid or
//! on a filled grid cell. Empty piece cells never matter, so a 4x4 box may
//! hang past the walls. The directional helpers only shift the offset before
//! asking [`collides`].

use serde::Serialize;

use crate::matrix::Matrix;

/// Piece offset on the board: `col` grows right, `row` grows down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Shifted copy
    pub fn translate(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }
}

/// Does `piece` at `(col, row)` overlap a wall, the floor or a block?
pub fn collides(board: &Matrix, piece: &Matrix, col: i32, row: i32) -> bool {
    piece.filled().any(|(r, c, _)| {
        let board_row = row + r as i32;
        let board_col = col + c as i32;
        board.is_out_of_bounds(board_row, board_col) || board.is_occupied(board_row, board_col)
    })
}

pub fn can_move_to(board: &Matrix, piece: &Matrix, pos: Position) -> bool {
    !collides(board, piece, pos.col, pos.row)
}

pub fn can_move_left(board: &Matrix, piece: &Matrix, pos: Position) -> bool {
    can_move_to(board, piece, pos.translate(-1, 0))
}

pub fn can_move_right(board: &Matrix, piece: &Matrix, pos: Position) -> bool {
    can_move_to(board, piece, pos.translate(1, 0))
}

pub fn can_move_down(board: &Matrix, piece: &Matrix, pos: Position) -> bool {
    can_move_to(board, piece, pos.translate(0, 1))
}

/// Rotation is an in-place shape swap, no kicks
pub fn can_rotate(board: &Matrix, rotated: &Matrix, pos: Position) -> bool {
    can_move_to(board, rotated, pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Matrix {
        Matrix::from_rows(&[[1, 1], [1, 1]])
    }

    #[test]
    fn empty_board_accepts_piece_inside_bounds() {
        let board = Matrix::new(20, 10);
        assert!(!collides(&board, &square(), 0, 0));
        assert!(!collides(&board, &square(), 8, 18));
    }

    #[test]
    fn walls_and_floor_collide() {
        let board = Matrix::new(20, 10);
        assert!(collides(&board, &square(), -1, 0));
        assert!(collides(&board, &square(), 9, 0));
        assert!(collides(&board, &square(), 0, 19));
        assert!(collides(&board, &square(), 0, -1));
    }

    #[test]
    fn filled_cell_collides() {
        let mut board = Matrix::new(20, 10);
        board.set(5, 5, 3);
        assert!(collides(&board, &square(), 4, 4));
        assert!(!collides(&board, &square(), 6, 6));
    }

    #[test]
    fn empty_piece_cells_may_hang_outside() {
        let board = Matrix::new(20, 10);
        let padded = Matrix::from_rows(&[[0, 0, 0], [0, 1, 0], [0, 0, 0]]);
        assert!(!collides(&board, &padded, -1, -1));
        assert!(!collides(&board, &padded, 8, 18));
    }

    #[test]
    fn directional_helpers_translate_offset() {
        let board = Matrix::new(4, 4);
        let piece = square();
        assert!(!can_move_left(&board, &piece, Position::new(0, 0)));
        assert!(can_move_right(&board, &piece, Position::new(0, 0)));
        assert!(!can_move_right(&board, &piece, Position::new(2, 0)));
        assert!(can_move_down(&board, &piece, Position::new(0, 1)));
        assert!(!can_move_down(&board, &piece, Position::new(0, 2)));
        assert!(can_rotate(&board, &piece, Position::new(1, 1)));
    }
}
