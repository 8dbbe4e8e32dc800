/*
grid.rs

Copyright 2025 Hervé Quatremain

This file is part of Bubblegen.

Bubblegen is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Bubblegen is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Bubblegen. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Hexagonal bubble grid.
//!
//! The grid uses offset packing: odd rows are shifted by half a cell and have one cell less
//! than even rows.
//!
//! ```text
//!  R R B G G B R R
//!   R B Y G Y B R
//!  . B B G G B B .
//! ```
//!
//! Each row is a left-right mirror of itself. The cell at column `c` mirrors the cell at column
//! `len - 1 - c`. In rows with an odd number of cells, the center cell mirrors itself.

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};

use crate::bubble::Bubble;

/// Content of a cell: a bubble or nothing.
pub type Cell = Option<Bubble>;

/// Neighbor offsets `(row, column)` for the cells in even rows.
const EVEN_ROW_NEIGHBORS: [(isize, isize); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];

/// Neighbor offsets `(row, column)` for the cells in odd rows.
const ODD_ROW_NEIGHBORS: [(isize, isize); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

/// Return the number of cells in the given row for a grid of the given width.
pub fn row_length(width: usize, row: usize) -> usize {
    if row % 2 == 0 {
        width
    } else {
        width.saturating_sub(1)
    }
}

/// Return the number of cells in the left half of a row, center cell included.
pub fn half_length(row_len: usize) -> usize {
    row_len.div_ceil(2)
}

/// Return the neighbor offsets for the cells of the given row.
pub fn neighbor_offsets(row: usize) -> &'static [(isize, isize); 6] {
    if row % 2 == 0 {
        &EVEN_ROW_NEIGHBORS
    } else {
        &ODD_ROW_NEIGHBORS
    }
}

/// Bubble grid.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Grid {
    /// Rows of cells. Row 0 is the top of the board.
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a [`Grid`] object from its rows.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Create a grid of empty cells with the offset packing for the given dimensions.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            rows: (0..height).map(|r| vec![None; row_length(width, r)]).collect(),
        }
    }

    /// Return the rows.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Consume the grid and return its rows.
    pub fn into_rows(self) -> Vec<Vec<Cell>> {
        self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in the given row, or 0 if the row does not exist.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.len())
    }

    /// Return the bubble in the given cell, or None if the cell is empty or does not exist.
    pub fn get(&self, row: usize, col: usize) -> Option<&Bubble> {
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// Whether the given cell holds a normal bubble.
    pub fn is_normal(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(|b| b.is_normal())
    }

    /// Set the content of a cell. Cells outside the grid are ignored.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(c) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *c = cell;
        }
    }

    /// Return the column that mirrors the given column, or None if the column is not in the row.
    pub fn mirror_col(&self, row: usize, col: usize) -> Option<usize> {
        let len: usize = self.row_len(row);
        if col < len { Some(len - 1 - col) } else { None }
    }

    /// Return the coordinates of the existing neighbors of the given cell.
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        neighbor_offsets(row)
            .iter()
            .filter_map(|(dr, dc)| {
                let r: usize = row.checked_add_signed(*dr)?;
                let c: usize = col.checked_add_signed(*dc)?;
                if c < self.row_len(r) { Some((r, c)) } else { None }
            })
            .collect()
    }

    /// Iterate over all the cells with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| (r, c, cell)))
    }

    /// Whether each row is a left-right mirror of itself.
    pub fn is_mirrored(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().eq(row.iter().rev()))
    }

    /// Whether the row lengths follow the offset packing for the given width.
    pub fn has_offset_packing(&self, width: usize) -> bool {
        self.rows
            .iter()
            .enumerate()
            .all(|(r, row)| row.len() == row_length(width, r))
    }

    /// Render the grid as text: one line per row, cells separated by spaces.
    ///
    /// Empty cells are rendered as `.`. See [`Bubble::glyph`] for the other cells.
    pub fn render(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', |b| b.glyph()).to_string())
                    .collect::<Vec<String>>()
                    .join(" ")
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Print the grid in the debug log, odd rows shifted by one character.
    pub fn debug(&self, title: &str) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        debug!("{title} ({} rows)", self.height());
        for (r, line) in self.render().lines().enumerate() {
            if r % 2 == 0 {
                debug!("{line}");
            } else {
                debug!(" {line}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::Color;

    fn red() -> Cell {
        Some(Bubble::normal(Color::Red))
    }

    #[test]
    fn offset_packing() {
        let grid: Grid = Grid::empty(5, 4);
        assert_eq!(grid.row_len(0), 5);
        assert_eq!(grid.row_len(1), 4);
        assert_eq!(grid.row_len(2), 5);
        assert_eq!(grid.row_len(7), 0);
        assert!(grid.has_offset_packing(5));
        assert_eq!(half_length(5), 3);
        assert_eq!(half_length(4), 2);
    }

    #[test]
    fn mirror_columns() {
        let grid: Grid = Grid::empty(5, 2);
        assert_eq!(grid.mirror_col(0, 0), Some(4));
        assert_eq!(grid.mirror_col(0, 2), Some(2));
        assert_eq!(grid.mirror_col(1, 1), Some(2));
        assert_eq!(grid.mirror_col(1, 4), None);
    }

    #[test]
    fn neighbors_by_parity() {
        let grid: Grid = Grid::empty(4, 3);

        // Even row: the neighbors above and below are on the left
        let mut n: Vec<(usize, usize)> = grid.neighbors(2, 1);
        n.sort_unstable();
        assert_eq!(n, vec![(1, 0), (1, 1), (2, 0), (2, 2)]);

        // Odd row: the neighbors above and below are on the right
        let mut n: Vec<(usize, usize)> = grid.neighbors(1, 0);
        n.sort_unstable();
        assert_eq!(n, vec![(0, 0), (0, 1), (1, 1), (2, 0), (2, 1)]);

        let mut n: Vec<(usize, usize)> = grid.neighbors(0, 0);
        n.sort_unstable();
        assert_eq!(n, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn mirrored_rows() {
        let mut grid: Grid = Grid::empty(4, 2);
        assert!(grid.is_mirrored());
        grid.set(0, 0, red());
        assert!(!grid.is_mirrored());
        grid.set(0, 3, red());
        assert!(grid.is_mirrored());
        grid.set(1, 1, red());
        assert!(grid.is_mirrored());
    }

    #[test]
    fn render_text() {
        let mut grid: Grid = Grid::empty(3, 2);
        grid.set(0, 0, red());
        grid.set(0, 1, Some(Bubble::Stone));
        grid.set(0, 2, red());
        grid.set(1, 0, Some(Bubble::bird(Color::Blue)));
        assert_eq!(grid.render(), "R S R\nB .");
    }

    #[test]
    fn set_outside_is_ignored() {
        let mut grid: Grid = Grid::empty(2, 1);
        grid.set(3, 3, red());
        grid.set(0, 2, red());
        assert_eq!(grid, Grid::empty(2, 1));
    }
}
