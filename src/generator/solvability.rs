/*
solvability.rs

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

//! Make sure that the player has a first move.
//!
//! A cluster is a group of at least [`MIN_CLUSTER_SIZE`] adjacent bubbles of the same color.
//! Bubbles are adjacent when they touch on the hexagonal grid (see
//! [`crate::grid::neighbor_offsets`]).
//! If the grid has no cluster at all, then rows of three bubbles of the same color are written
//! into the grid. Grids too narrow for such rows get groups that span two rows instead.
//!
//! This does not verify that the whole board can be cleared.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::bubble::{Bubble, Color};
use crate::grid::Grid;

/// Minimum number of same-colored adjacent bubbles that the player can pop.
pub const MIN_CLUSTER_SIZE: usize = 3;

/// Number of consecutive cells written for each injected cluster.
const INJECTED_LENGTH: usize = 3;

/// Maximum start column of an injected cluster.
const INJECTED_MAX_START: usize = 3;

/// Group of adjacent bubbles of the same color.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Color of the bubbles.
    pub color: Color,

    /// Coordinates `(row, column)` of the bubbles.
    pub cells: Vec<(usize, usize)>,
}

impl Cluster {
    /// Number of bubbles in the group.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the group has no bubbles.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Return all the groups of adjacent bubbles of the same color, whatever their size.
///
/// Colorless bubbles do not belong to any group.
pub fn color_groups(grid: &Grid) -> Vec<Cluster> {
    let mut visited: Vec<Vec<bool>> = grid.rows().iter().map(|r| vec![false; r.len()]).collect();
    let mut groups: Vec<Cluster> = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for (row, col, cell) in grid.cells() {
        let Some(color) = cell.and_then(|b| b.color()) else {
            continue;
        };
        if visited[row][col] {
            continue;
        }

        let mut cells: Vec<(usize, usize)> = Vec::new();
        visited[row][col] = true;
        stack.push((row, col));

        while let Some((r, c)) = stack.pop() {
            cells.push((r, c));
            for (nr, nc) in grid.neighbors(r, c) {
                if !visited[nr][nc] && grid.get(nr, nc).and_then(|b| b.color()) == Some(color) {
                    visited[nr][nc] = true;
                    stack.push((nr, nc));
                }
            }
        }
        groups.push(Cluster { color, cells });
    }
    groups
}

/// Return the groups that the player can pop.
pub fn clusters(grid: &Grid) -> Vec<Cluster> {
    color_groups(grid)
        .into_iter()
        .filter(|g| g.len() >= MIN_CLUSTER_SIZE)
        .collect()
}

/// Return the number of groups that the player can pop.
pub fn count_clusters(grid: &Grid) -> usize {
    clusters(grid).len()
}

/// Return the rows where a row of bubbles can be injected.
///
/// The last row is excluded, unless the grid has only one row. Rows shorter than
/// [`INJECTED_LENGTH`] cannot hold a cluster and are excluded too.
fn injection_rows(grid: &Grid) -> Vec<usize> {
    let last: usize = grid.height().saturating_sub(1).max(1).min(grid.height());
    (0..last)
        .filter(|r| grid.row_len(*r) >= INJECTED_LENGTH)
        .collect()
}

/// Return the rows where a wedge can be injected: non-empty rows followed by a non-empty row.
fn wedge_rows(grid: &Grid) -> Vec<usize> {
    (0..grid.height().saturating_sub(1))
        .filter(|r| grid.row_len(*r) > 0 && grid.row_len(r + 1) > 0)
        .collect()
}

/// Set a normal bubble of the given color at a cell and at its mirror.
fn set_mirrored(grid: &mut Grid, row: usize, col: usize, color: Color) {
    grid.set(row, col, Some(Bubble::normal(color)));
    if let Some(mirror) = grid.mirror_col(row, col)
        && mirror != col
    {
        grid.set(row, mirror, Some(Bubble::normal(color)));
    }
}

/// Write a row of bubbles of the same color, and their mirrors, at a random place.
fn inject_cluster<R: Rng + ?Sized>(grid: &mut Grid, rows: &[usize], color: Color, rng: &mut R) {
    let Some(row) = rows.choose(rng).copied() else {
        return;
    };
    let len: usize = grid.row_len(row);
    let max_start: usize = INJECTED_MAX_START.min(len / 2).max(1);
    let start: usize = rng.random_range(0..max_start);

    for col in (start..start + INJECTED_LENGTH).filter(|c| *c < len) {
        set_mirrored(grid, row, col, color);
    }
    debug!("Injected a {color} cluster in row {row} from column {start}");
}

/// Write bubbles of the same color across two rows of a narrow grid.
///
/// The first cell of the row, its mirror, and their neighbors in the next row form the group.
///
/// ```text
///  R R        R
///   R   or   R R
/// ```
fn inject_wedge<R: Rng + ?Sized>(grid: &mut Grid, rows: &[usize], color: Color, rng: &mut R) {
    let Some(row) = rows.choose(rng).copied() else {
        return;
    };
    set_mirrored(grid, row, 0, color);
    let below: Vec<(usize, usize)> = grid
        .neighbors(row, 0)
        .into_iter()
        .filter(|(r, _)| *r == row + 1)
        .collect();
    for (r, c) in below {
        set_mirrored(grid, r, c, color);
    }
    debug!("Injected a {color} wedge in rows {row} and {}", row + 1);
}

/// Make sure that the grid has at least one cluster.
///
/// If it has none, then `max(2, rows / 3)` clusters are injected with colors from the palette.
/// Return the number of injected clusters.
pub fn ensure_solvable<R: Rng + ?Sized>(grid: &mut Grid, palette: &[Color], rng: &mut R) -> usize {
    let existing: usize = count_clusters(grid);
    debug!("Clusters found: {existing}");
    if existing > 0 || grid.height() == 0 {
        return 0;
    }

    let rows: Vec<usize> = injection_rows(grid);
    let wedges: Vec<usize> = if rows.is_empty() {
        wedge_rows(grid)
    } else {
        Vec::new()
    };
    if rows.is_empty() && wedges.is_empty() {
        debug!("The grid is too small for a cluster");
        return 0;
    }

    let count: usize = (grid.height() / 3).max(2);
    let mut injected: usize = 0;
    for _ in 0..count {
        let Some(color) = palette.choose(rng).copied() else {
            break;
        };
        if rows.is_empty() {
            inject_wedge(grid, &wedges, color, rng);
        } else {
            inject_cluster(grid, &rows, color, rng);
        }
        injected += 1;
    }
    injected
}
