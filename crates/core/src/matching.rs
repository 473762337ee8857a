//! Match evaluation - value compatibility, connectivity and pair scoring
//!
//! A pair is valid when both cells hold tiles, the values are equal or sum to
//! ten, and the cells are connected (see [`crate::connectivity`]).
//!
//! Scoring:
//!
//! | Pair | Points |
//! |------|--------|
//! | 5 + 5 | 3 |
//! | equal values | 1 |
//! | values summing to 10 | 2 |

use crate::board::Board;
use crate::connectivity::are_connected;
use crate::types::{Tile, PAIR_SUM};

/// Points for a pair of twin fives
pub const FIVES_SCORE: u32 = 3;

/// Points for any other pair of equal values
pub const EQUAL_SCORE: u32 = 1;

/// Points for a pair summing to ten
pub const SUM_SCORE: u32 = 2;

/// Check if two values may form a pair (equal, or summing to ten)
#[inline]
pub fn values_compatible(a: Tile, b: Tile) -> bool {
    a == b || a.checked_add(b) == Some(PAIR_SUM)
}

/// Points awarded for pairing `a` with `b`
///
/// Returns 0 when the values are not compatible.
pub fn score_for(a: Tile, b: Tile) -> u32 {
    if a == b {
        if a == 5 {
            FIVES_SCORE
        } else {
            EQUAL_SCORE
        }
    } else if a.checked_add(b) == Some(PAIR_SUM) {
        SUM_SCORE
    } else {
        0
    }
}

/// Check if the cells at `a` and `b` form a valid pair on `board`
pub fn is_valid_pair(board: &Board, a: usize, b: usize) -> bool {
    match (board.value(a), board.value(b)) {
        (Some(va), Some(vb)) => values_compatible(va, vb) && are_connected(board, a, b),
        _ => false,
    }
}

/// Iterate every valid unordered pair `(a, b)` with `a < b`
pub fn valid_pairs(board: &Board) -> impl Iterator<Item = (usize, usize)> + '_ {
    board.occupied().flat_map(move |(a, va)| {
        board
            .occupied()
            .skip_while(move |&(b, _)| b <= a)
            .filter(move |&(b, vb)| values_compatible(va, vb) && are_connected(board, a, b))
            .map(move |(b, _)| (a, b))
    })
}

/// Number of valid unordered pairs on the board
pub fn count_valid_moves(board: &Board) -> usize {
    valid_pairs(board).count()
}

/// The first valid pair in index order, if any
pub fn first_valid_pair(board: &Board) -> Option<(usize, usize)> {
    valid_pairs(board).next()
}
