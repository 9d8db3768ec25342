//! Property tests for collision and row compaction

use proptest::prelude::*;

use tetris_duel::core::collision::collides;
use tetris_duel::core::matrix::{detect_and_compact, merge};
use tetris_duel::core::Matrix;

const ROWS: usize = 12;
const COLS: usize = 6;

fn grid(rows: usize, cols: usize, density: u32) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(0u32..100, rows * cols).prop_map(move |rolls| {
        let cells: Vec<Vec<u8>> = rolls
            .chunks(cols)
            .map(|row| {
                row.iter()
                    .map(|&roll| if roll < density { (roll % 7 + 1) as u8 } else { 0 })
                    .collect()
            })
            .collect();
        Matrix::from_rows(&cells[..])
    })
}

/// Reference definition: some filled piece cell is off the board or on a block
fn collides_by_definition(board: &Matrix, piece: &Matrix, col: i32, row: i32) -> bool {
    piece.filled().any(|(r, c, _)| {
        let br = row + r as i32;
        let bc = col + c as i32;
        match board.get(br, bc) {
            None => true,
            Some(v) => v != 0,
        }
    })
}

proptest! {
    #[test]
    fn collision_matches_definition(
        board in grid(ROWS, COLS, 30),
        piece in grid(4, 4, 40),
        col in -4i32..8,
        row in -4i32..14,
    ) {
        prop_assert_eq!(
            collides(&board, &piece, col, row),
            collides_by_definition(&board, &piece, col, row)
        );
    }

    #[test]
    fn empty_piece_never_collides(
        board in grid(ROWS, COLS, 60),
        col in -20i32..20,
        row in -20i32..20,
    ) {
        let piece = Matrix::new(4, 4);
        prop_assert!(!collides(&board, &piece, col, row));
    }

    #[test]
    fn compaction_keeps_surviving_rows_in_order(board in grid(ROWS, COLS, 85)) {
        let result = detect_and_compact(&board);
        let survivors: Vec<Vec<u8>> = board
            .to_rows()
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !board.is_row_full(*i))
            .map(|(_, row)| row)
            .collect();

        let rows = result.matrix.to_rows();
        prop_assert_eq!(result.lines_removed, ROWS - survivors.len());
        prop_assert_eq!(result.score_bonus, 50 * (result.lines_removed as u32).pow(2));
        prop_assert!(rows[..result.lines_removed].iter().all(|r| r.iter().all(|&v| v == 0)));
        prop_assert_eq!(&rows[result.lines_removed..], &survivors[..]);
        prop_assert!((0..ROWS).all(|i| !result.matrix.is_row_full(i)));
    }

    #[test]
    fn merge_only_adds_piece_cells(
        board in grid(ROWS, COLS, 10),
        piece in grid(4, 4, 25),
        col in 0i32..3,
        row in 0i32..9,
    ) {
        prop_assume!(!collides(&board, &piece, col, row));
        let merged = merge(&board, &piece, col, row);
        prop_assert_eq!(
            merged.filled().count(),
            board.filled().count() + piece.filled().count()
        );
        for (r, c, v) in board.filled() {
            prop_assert_eq!(merged.get(r as i32, c as i32), Some(v));
        }
    }
}
