//! Board generation - starting tiles and "add numbers" growth per mode
//!
//! Growth always appends as many tiles as are currently left on the board, so
//! the board roughly doubles its live tiles each time. Growth is refused on a
//! cleared board and whenever the result would reach the row cap.

use tracing::debug;

use crate::board::{rows_for, Board};
use crate::error::GrowthRejected;
use crate::rng::TileRng;
use crate::types::{GameMode, Tile, CHAOTIC_INITIAL_TILES, CHAOTIC_MAX, ROW_CAP, TILE_SET_MAX};

/// The ordered starting set 1..=19
fn tile_set() -> Vec<Tile> {
    (1..=TILE_SET_MAX).collect()
}

/// Tiles for a fresh board in `mode`
pub fn initial_tiles<R: TileRng>(mode: GameMode, rng: &mut R) -> Vec<Tile> {
    match mode {
        GameMode::Classic => tile_set(),
        GameMode::Random => {
            let mut tiles = tile_set();
            rng.shuffle(&mut tiles);
            tiles
        }
        GameMode::Chaotic => (0..CHAOTIC_INITIAL_TILES)
            .map(|_| rng.next_tile(CHAOTIC_MAX))
            .collect(),
    }
}

/// Build a fresh board for `mode`
pub fn initial_board<R: TileRng>(mode: GameMode, rng: &mut R) -> Board {
    Board::from_tiles(&initial_tiles(mode, rng))
}

/// Number of tiles the next growth would append
///
/// Fails without touching anything when the board is cleared or the grown
/// board would reach [`ROW_CAP`] rows.
pub fn plan_growth(board: &Board) -> Result<usize, GrowthRejected> {
    if board.is_cleared() {
        return Err(GrowthRejected::EmptyBoard);
    }
    let count = board.occupied_count();
    let rows = rows_for(board.len() + count);
    if rows >= ROW_CAP {
        return Err(GrowthRejected::CapExceeded { rows });
    }
    Ok(count)
}

/// Tiles to append for a growth of `count` in `mode`
pub fn growth_tiles<R: TileRng>(
    mode: GameMode,
    board: &Board,
    count: usize,
    rng: &mut R,
) -> Vec<Tile> {
    match mode {
        GameMode::Classic => {
            let start = board.max_value().map_or(1, |max| max.saturating_add(1));
            (0..count as Tile).map(|i| start.saturating_add(i)).collect()
        }
        GameMode::Random => {
            let mut pool: Vec<Tile> = (1..=TILE_SET_MAX).filter(|&v| !board.contains(v)).collect();
            if pool.is_empty() {
                pool = tile_set();
            }
            rng.shuffle(&mut pool);
            pool.iter().copied().cycle().take(count).collect()
        }
        GameMode::Chaotic => (0..count).map(|_| rng.next_tile(CHAOTIC_MAX)).collect(),
    }
}

/// Grow `board` in place, returning the number of tiles appended
pub fn grow<R: TileRng>(
    mode: GameMode,
    board: &mut Board,
    rng: &mut R,
) -> Result<usize, GrowthRejected> {
    let count = plan_growth(board)?;
    let tiles = growth_tiles(mode, board, count, rng);
    board.append(&tiles);
    debug!(
        mode = mode.as_str(),
        appended = tiles.len(),
        rows = board.row_count(),
        "board grown"
    );
    Ok(tiles.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    #[test]
    fn test_classic_initial() {
        let mut rng = SimpleRng::new(1);
        let tiles = initial_tiles(GameMode::Classic, &mut rng);
        assert_eq!(tiles, (1..=19).collect::<Vec<_>>());
    }

    #[test]
    fn test_random_initial_is_permutation() {
        let mut rng = SimpleRng::new(3);
        let mut tiles = initial_tiles(GameMode::Random, &mut rng);
        assert_eq!(tiles.len(), 19);
        tiles.sort_unstable();
        assert_eq!(tiles, (1..=19).collect::<Vec<_>>());
    }

    #[test]
    fn test_chaotic_initial() {
        let mut rng = SimpleRng::new(3);
        let tiles = initial_tiles(GameMode::Chaotic, &mut rng);
        assert_eq!(tiles.len(), 27);
        assert!(tiles.iter().all(|t| (1..=9).contains(t)));
    }

    #[test]
    fn test_classic_growth_continues_past_max() {
        let mut rng = SimpleRng::new(1);
        let mut board = initial_board(GameMode::Classic, &mut rng);
        let appended = grow(GameMode::Classic, &mut board, &mut rng).unwrap();
        assert_eq!(appended, 19);
        assert_eq!(board.len(), 38);
        assert_eq!(board.value(19), Some(20));
        assert_eq!(board.value(37), Some(38));
    }

    #[test]
    fn test_classic_growth_uses_current_max() {
        let mut board = Board::from_tiles(&[3, 12, 7]);
        board.clear(1);
        let tiles = growth_tiles(GameMode::Classic, &board, 2, &mut SimpleRng::new(1));
        assert_eq!(tiles, vec![8, 9]);
    }

    #[test]
    fn test_classic_growth_saturates_at_tile_max() {
        let board = Board::from_tiles(&[u32::MAX, 2]);
        let tiles = growth_tiles(GameMode::Classic, &board, 2, &mut SimpleRng::new(1));
        assert_eq!(tiles, vec![u32::MAX, u32::MAX]);
    }

    #[test]
    fn test_classic_growth_restarts_on_cleared_board() {
        let board = Board::from_cells(vec![None, None]);
        let tiles = growth_tiles(GameMode::Classic, &board, 3, &mut SimpleRng::new(1));
        assert_eq!(tiles, vec![1, 2, 3]);
    }

    #[test]
    fn test_random_growth_only_missing_values() {
        let mut rng = SimpleRng::new(11);
        let board = Board::from_tiles(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
        let tiles = growth_tiles(GameMode::Random, &board, 15, &mut rng);
        assert_eq!(tiles.len(), 15);
        assert!(tiles.iter().all(|t| (16..=19).contains(t)));
    }

    #[test]
    fn test_random_growth_full_set_present() {
        let mut rng = SimpleRng::new(11);
        let tiles: Vec<Tile> = (1..=19).collect();
        let board = Board::from_tiles(&tiles);
        let grown = growth_tiles(GameMode::Random, &board, 19, &mut rng);
        let mut sorted = grown.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, tiles);
    }

    #[test]
    fn test_chaotic_growth_matches_count() {
        let mut rng = SimpleRng::new(5);
        let board = Board::from_tiles(&[1, 2, 3]);
        let tiles = growth_tiles(GameMode::Chaotic, &board, 3, &mut rng);
        assert_eq!(tiles.len(), 3);
        assert!(tiles.iter().all(|t| (1..=9).contains(t)));
    }

    #[test]
    fn test_growth_rejected_on_cleared_board() {
        assert_eq!(plan_growth(&Board::new()), Err(GrowthRejected::EmptyBoard));

        let mut board = Board::from_cells(vec![None; 9]);
        let before = board.clone();
        let result = grow(GameMode::Classic, &mut board, &mut SimpleRng::new(1));
        assert_eq!(result, Err(GrowthRejected::EmptyBoard));
        assert_eq!(board, before);
    }

    #[test]
    fn test_growth_rejected_at_cap() {
        // 45 rows, one tile left: 405 + 1 cells would need 46 rows (allowed),
        // but 40 tiles left would need 50 rows.
        let mut cells = vec![None; 45 * 9];
        cells[0] = Some(1);
        let board = Board::from_cells(cells.clone());
        assert_eq!(plan_growth(&board), Ok(1));

        for cell in cells.iter_mut().take(40) {
            *cell = Some(2);
        }
        let board = Board::from_cells(cells);
        assert_eq!(
            plan_growth(&board),
            Err(GrowthRejected::CapExceeded { rows: 50 })
        );
    }
}
