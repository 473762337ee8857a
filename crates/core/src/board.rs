//! Board module - manages the tile grid
//!
//! The board is a flat, row-major sequence of cells wrapped onto a 9-column grid.
//! Each cell holds a tile value or is empty (tile removed). The sequence never
//! shrinks: removals empty a cell in place, growth appends to the end.
//!
//! Coordinates: index `i` lives at row `i / 9`, column `i % 9`.

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Tile, ROW_WIDTH};

/// Convert a flat index into `(row, column)`
#[inline(always)]
pub const fn position(index: usize) -> (usize, usize) {
    (index / ROW_WIDTH, index % ROW_WIDTH)
}

/// Convert `(row, column)` into a flat index
#[inline(always)]
pub const fn index_of(row: usize, col: usize) -> usize {
    row * ROW_WIDTH + col
}

/// Number of rows needed to hold `len` cells
#[inline(always)]
pub const fn rows_for(len: usize) -> usize {
    len.div_ceil(ROW_WIDTH)
}

/// The game board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board (no cells)
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Build a board from tile values, all occupied
    pub fn from_tiles(tiles: &[Tile]) -> Self {
        Self {
            cells: tiles.iter().copied().map(Some).collect(),
        }
    }

    /// Build a board from raw cells
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Total number of cells, empty or not
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of rows (last row may be partial)
    pub fn row_count(&self) -> usize {
        rows_for(self.cells.len())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get cell at `index`
    /// Returns None if out of bounds
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Tile value at `index`, if the cell exists and is occupied
    pub fn value(&self, index: usize) -> Option<Tile> {
        self.cells.get(index).copied().flatten()
    }

    /// Set cell at `index`
    /// Returns false if out of bounds
    pub fn set(&mut self, index: usize, cell: Cell) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Empty the cell at `index`, returning the removed value
    pub fn clear(&mut self, index: usize) -> Option<Tile> {
        self.cells.get_mut(index).and_then(Option::take)
    }

    /// Check if position is within bounds and holds a tile
    pub fn is_occupied(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(Some(_)))
    }

    /// Check if position is within bounds and empty
    pub fn is_vacant(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(None))
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Check if every cell is empty (or there are no cells)
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Iterate `(index, value)` over occupied cells
    pub fn occupied(&self) -> impl Iterator<Item = (usize, Tile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|v| (i, v)))
    }

    /// Largest value present
    pub fn max_value(&self) -> Option<Tile> {
        self.cells.iter().flatten().copied().max()
    }

    /// Check if any occupied cell holds `value`
    pub fn contains(&self, value: Tile) -> bool {
        self.cells.iter().any(|c| *c == Some(value))
    }

    /// Append tiles at the end of the sequence
    pub fn append(&mut self, tiles: &[Tile]) {
        self.cells.extend(tiles.iter().copied().map(Some));
    }

    /// Cells of a single row (last row may be shorter than the width)
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = (row * ROW_WIDTH).min(self.cells.len());
        let end = (start + ROW_WIDTH).min(self.cells.len());
        &self.cells[start..end]
    }
}
