//! Matrix module - the cell grid and the operations applied to it
//!
//! A [`Matrix`] is a `rows x cols` grid of cell values stored flat in
//! row-major order. Value 0 is empty; 1..=7 is a block colored by the kind
//! of piece that left it. The same type carries piece rotation states, so
//! collision and merge work on two matrices of the same shape.
//!
//! Coordinates are `(row, col)` with row 0 at the top. Offsets are signed:
//! a piece box may hang off the grid as long as its filled cells do not.

use serde::Serialize;

use tetris_duel_types::ROW_CLEAR_BASE;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    /// Row-major cell values (row * cols + col)
    cells: Vec<u8>,
}

impl Matrix {
    /// Create an all-empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Build a grid from row slices
    ///
    /// The width is taken from the longest row; shorter rows are padded with
    /// empty cells.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let cols = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            cells.extend_from_slice(row);
            cells.extend(std::iter::repeat(0).take(cols - row.len()));
        }
        Self {
            rows: rows.len(),
            cols,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// Whether `(row, col)` lies outside the grid
    pub fn is_out_of_bounds(&self, row: i32, col: i32) -> bool {
        self.index(row, col).is_none()
    }

    /// Cell value at `(row, col)`, `None` when out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<u8> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set the cell at `(row, col)`; returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, value: u8) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Within bounds and holding a block
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(v) if v != 0)
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Iterate rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.cols.max(1))
    }

    /// Iterate non-empty cells as `(row, col, value)`
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(i, &v)| (i / cols, i % cols, v))
    }

    /// A row is full iff it has no empty cell
    pub fn is_row_full(&self, row: usize) -> bool {
        match self.row(row) {
            Some(cells) => self.cols > 0 && cells.iter().all(|&v| v != 0),
            None => false,
        }
    }

    /// True when every cell is empty
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|&v| v == 0)
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Flat row-major cells
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.iter_rows().map(<[u8]>::to_vec).collect()
    }
}

/// Outcome of scanning a grid for full rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearResult {
    pub lines_removed: usize,
    /// Indices (pre-compaction, top to bottom) of the removed rows
    pub cleared_rows: Vec<usize>,
    /// The grid after compaction
    pub matrix: Matrix,
    /// `50 x lines_removed^2`
    pub score_bonus: u32,
}

/// Deep copy of a grid
///
/// Views handed to external code go through this so they never alias engine
/// state.
pub fn copy(matrix: &Matrix) -> Matrix {
    matrix.clone()
}

/// Write the filled cells of `piece` into a copy of `board`
///
/// `(col, row)` is the board position of the piece's top-left cell. Filled
/// piece cells that land out of bounds are dropped.
pub fn merge(board: &Matrix, piece: &Matrix, col: i32, row: i32) -> Matrix {
    let mut merged = copy(board);
    for (r, c, value) in piece.filled() {
        merged.set(row + r as i32, col + c as i32, value);
    }
    merged
}

/// Superlinear bonus for clearing `count` rows at once
pub fn row_clear_bonus(count: usize) -> u32 {
    let count = count as u32;
    ROW_CLEAR_BASE.saturating_mul(count.saturating_mul(count))
}

/// Remove every full row, shift the rest down and refill the top with zeros
///
/// Two-pointer pass from the bottom up: surviving rows are copied down to a
/// write cursor, so relative order is kept without extra buffers.
pub fn detect_and_compact(board: &Matrix) -> ClearResult {
    let mut matrix = copy(board);
    let width = matrix.cols;
    let mut cleared_rows = Vec::new();
    let mut write_row = matrix.rows;

    for read_row in (0..matrix.rows).rev() {
        if matrix.is_row_full(read_row) {
            cleared_rows.push(read_row);
        } else {
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * width;
                matrix
                    .cells
                    .copy_within(src..src + width, write_row * width);
            }
        }
    }

    matrix.cells[..write_row * width].fill(0);

    cleared_rows.reverse();
    let lines_removed = cleared_rows.len();
    ClearResult {
        lines_removed,
        cleared_rows,
        matrix,
        score_bonus: row_clear_bonus(lines_removed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_calculation() {
        let m = Matrix::new(24, 10);
        assert_eq!(m.index(0, 0), Some(0));
        assert_eq!(m.index(0, 9), Some(9));
        assert_eq!(m.index(1, 0), Some(10));
        assert_eq!(m.index(23, 9), Some(239));
        assert_eq!(m.index(-1, 0), None);
        assert_eq!(m.index(0, 10), None);
        assert_eq!(m.index(24, 0), None);
    }

    #[test]
    fn from_rows_pads_short_rows() {
        let m = Matrix::from_rows(&[vec![1, 2, 3], vec![4]]);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.to_rows(), vec![vec![1, 2, 3], vec![4, 0, 0]]);
    }

    #[test]
    fn copy_is_independent() {
        let original = Matrix::from_rows(&[[1, 0], [0, 2]]);
        let mut copied = copy(&original);
        copied.set(0, 1, 5);
        assert_eq!(original.get(0, 1), Some(0));
        assert_eq!(copied.get(0, 1), Some(5));
    }

    #[test]
    fn merge_ignores_out_of_bounds_cells() {
        let board = Matrix::new(4, 4);
        let piece = Matrix::from_rows(&[[3, 3], [3, 0]]);
        let merged = merge(&board, &piece, 3, 3);
        assert_eq!(merged.get(3, 3), Some(3));
        assert_eq!(merged.filled().count(), 1);
        assert!(board.is_clear());
    }

    #[test]
    fn compaction_keeps_relative_order() {
        let board = Matrix::from_rows(&[[0, 1], [2, 2], [3, 0], [4, 4], [0, 5]]);
        let result = detect_and_compact(&board);
        assert_eq!(result.lines_removed, 2);
        assert_eq!(result.cleared_rows, vec![1, 3]);
        assert_eq!(
            result.matrix.to_rows(),
            vec![vec![0, 0], vec![0, 0], vec![0, 1], vec![3, 0], vec![0, 5]]
        );
        assert_eq!(result.score_bonus, 200);
    }

    #[test]
    fn row_clear_bonus_is_quadratic() {
        assert_eq!(row_clear_bonus(0), 0);
        assert_eq!(row_clear_bonus(1), 50);
        assert_eq!(row_clear_bonus(2), 200);
        assert_eq!(row_clear_bonus(3), 450);
        assert_eq!(row_clear_bonus(4), 800);
    }
}
