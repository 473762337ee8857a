//! Connectivity rules - which two cells may be paired, regardless of value
//!
//! Two cells are connected when any of the following holds:
//!
//! - they are orthogonal neighbours on the grid;
//! - they share a row and every cell between them is empty;
//! - they share a column and every cell between them is empty;
//! - one is the last cell of a row and the other the first cell of the next row.
//!
//! Nothing else connects: no diagonals, no wrap across non-consecutive rows.

use crate::board::{index_of, position, Board};
use crate::types::ROW_WIDTH;

/// Check whether cells `a` and `b` are connected on `board`
///
/// Identical or out-of-range indices are never connected. The result only
/// depends on which cells are occupied, never on their values.
pub fn are_connected(board: &Board, a: usize, b: usize) -> bool {
    if a == b || a >= board.len() || b >= board.len() {
        return false;
    }

    let (row_a, col_a) = position(a);
    let (row_b, col_b) = position(b);

    if row_a.abs_diff(row_b) + col_a.abs_diff(col_b) == 1 {
        return true;
    }

    if row_a == row_b {
        let (lo, hi) = (col_a.min(col_b), col_a.max(col_b));
        return (lo + 1..hi).all(|col| board.is_vacant(index_of(row_a, col)));
    }

    if col_a == col_b {
        let (lo, hi) = (row_a.min(row_b), row_a.max(row_b));
        return (lo + 1..hi).all(|row| board.is_vacant(index_of(row, col_a)));
    }

    is_row_wrap(a, b) || is_row_wrap(b, a)
}

/// `tail` ends a row and `head` starts the next one
#[inline]
fn is_row_wrap(tail: usize, head: usize) -> bool {
    let (row_t, col_t) = position(tail);
    let (row_h, col_h) = position(head);
    col_t == ROW_WIDTH - 1 && col_h == 0 && row_h == row_t + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;

    fn full_board(len: usize) -> Board {
        let tiles: Vec<Tile> = (0..len).map(|i| (i % 9) as Tile + 1).collect();
        Board::from_tiles(&tiles)
    }

    #[test]
    fn test_horizontal_neighbours() {
        let board = full_board(27);
        assert!(are_connected(&board, 0, 1));
        assert!(are_connected(&board, 13, 12));
    }

    #[test]
    fn test_vertical_neighbours() {
        let board = full_board(27);
        assert!(are_connected(&board, 4, 13));
        assert!(are_connected(&board, 22, 13));
    }

    #[test]
    fn test_same_row_blocked() {
        let board = full_board(27);
        assert!(!are_connected(&board, 0, 8));
        assert!(!are_connected(&board, 0, 2));
    }

    #[test]
    fn test_same_row_clear_path() {
        let mut board = full_board(27);
        for i in 1..8 {
            board.clear(i);
        }
        assert!(are_connected(&board, 0, 8));
        assert!(are_connected(&board, 8, 0));
    }

    #[test]
    fn test_same_column_clear_path() {
        let mut board = full_board(36);
        assert!(!are_connected(&board, 2, 29));
        board.clear(11);
        assert!(!are_connected(&board, 2, 29));
        board.clear(20);
        assert!(are_connected(&board, 2, 29));
    }

    #[test]
    fn test_row_wrap() {
        let board = full_board(27);
        assert!(are_connected(&board, 8, 9));
        assert!(are_connected(&board, 9, 8));
        assert!(are_connected(&board, 17, 18));
    }

    #[test]
    fn test_row_wrap_only_to_next_row() {
        let board = full_board(36);
        assert!(!are_connected(&board, 8, 18));
        assert!(!are_connected(&board, 0, 17));
    }

    #[test]
    fn test_diagonal_rejected() {
        let board = full_board(27);
        assert!(!are_connected(&board, 0, 10));
        assert!(!are_connected(&board, 10, 0));
        assert!(!are_connected(&board, 1, 9));
    }

    #[test]
    fn test_self_and_out_of_range() {
        let board = full_board(9);
        assert!(!are_connected(&board, 3, 3));
        assert!(!are_connected(&board, 3, 9));
        assert!(!are_connected(&board, 40, 41));
    }

    #[test]
    fn test_partial_last_row_column_path() {
        // 19 cells: index 18 sits under index 9 and 0.
        let mut board = full_board(19);
        assert!(are_connected(&board, 9, 18));
        assert!(!are_connected(&board, 0, 18));
        board.clear(9);
        assert!(are_connected(&board, 0, 18));
    }
}
