/*
birds.rs

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

//! Place the birds.
//!
//! Birds are the targets of the level. The generator tries to place exactly the requested number
//! of birds, preferably in the lower rows, by converting normal bubbles.
//! Birds are placed by mirrored pairs. A single bird is only placed in the center cell of a row
//! with an odd number of cells, so that the grid stays symmetric.
//!
//! Placement is a best effort: after [`MAX_ATTEMPTS`] random probes, the generator gives up and
//! the level gets fewer birds.

use log::debug;
use rand::Rng;

use crate::bubble::{Bubble, Color};
use crate::grid::Grid;

/// Number of random cells to probe before giving up.
pub const MAX_ATTEMPTS: usize = 200;

/// Return the rows where birds can be placed.
///
/// The first and the last rows are excluded. Grids with less than three rows have no such
/// inner rows, and all their rows are eligible.
fn eligible_rows(height: usize) -> std::ops::Range<usize> {
    if height >= 3 { 1..height - 1 } else { 0..height }
}

/// Select a row at random, with a bias toward the bottom of the grid.
///
/// The weight grows linearly from 1.0 for the first eligible row to 2.0 for the last one.
/// Return None if the grid has no rows.
pub fn select_weighted_row<R: Rng + ?Sized>(height: usize, rng: &mut R) -> Option<usize> {
    let rows: std::ops::Range<usize> = eligible_rows(height);
    let count: usize = rows.len();
    if count == 0 {
        return None;
    }
    if count == 1 {
        return Some(rows.start);
    }

    let weights: Vec<f64> = (0..count)
        .map(|i| 1.0 + i as f64 / (count - 1) as f64)
        .collect();
    let total: f64 = weights.iter().sum();
    let target: f64 = rng.random::<f64>() * total;

    let mut cumulative: f64 = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        if target <= cumulative {
            return Some(rows.start + i);
        }
    }
    Some(rows.end - 1)
}

/// Convert normal bubbles into birds and return the number of birds placed.
pub fn place_birds<R: Rng + ?Sized>(grid: &mut Grid, bird_count: usize, rng: &mut R) -> usize {
    let mut placed: usize = 0;
    let mut attempt: usize = 0;

    while attempt < MAX_ATTEMPTS && placed < bird_count {
        attempt += 1;

        let Some(row) = select_weighted_row(grid.height(), rng) else {
            break;
        };
        let len: usize = grid.row_len(row);
        if len == 0 {
            continue;
        }
        let mut col: usize = rng.random_range(0..len);
        let remaining: usize = bird_count - placed;

        // Only one bird left: it must go in the center cell to keep the row symmetric
        if remaining == 1 && len - 1 - col != col {
            if len % 2 == 0 {
                continue;
            }
            col = len / 2;
        }

        let color: Color = match grid.get(row, col) {
            Some(Bubble::Normal { color }) => *color,
            _ => continue,
        };
        let mirror: usize = len - 1 - col;

        if mirror != col {
            if remaining >= 2 && grid.is_normal(row, mirror) {
                grid.set(row, col, Some(Bubble::bird(color)));
                grid.set(row, mirror, Some(Bubble::bird(color)));
                placed += 2;
                debug!("Birds placed at ({row}, {col}) and ({row}, {mirror})");
            }
        } else {
            grid.set(row, col, Some(Bubble::bird(color)));
            placed += 1;
            debug!("Bird placed at ({row}, {col})");
        }
    }

    if placed < bird_count {
        debug!("Only {placed} of {bird_count} birds placed after {attempt} attempts");
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::BubbleKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn full_grid(width: usize, height: usize) -> Grid {
        let mut grid: Grid = Grid::empty(width, height);
        for r in 0..height {
            for c in 0..grid.row_len(r) {
                grid.set(r, c, Some(Bubble::normal(Color::Green)));
            }
        }
        grid
    }

    fn birds(grid: &Grid) -> Vec<(usize, usize)> {
        grid.cells()
            .filter(|(_, _, c)| c.is_some_and(|b| b.kind() == BubbleKind::Bird))
            .map(|(r, c, _)| (r, c))
            .collect()
    }

    #[test]
    fn weighted_rows_skip_first_and_last() {
        let mut rng: StdRng = StdRng::seed_from_u64(5);
        let mut hits: [usize; 6] = [0; 6];
        for _ in 0..3000 {
            let r: usize = select_weighted_row(6, &mut rng).unwrap();
            hits[r] += 1;
        }
        assert_eq!(hits[0], 0);
        assert_eq!(hits[5], 0);
        // Bottom eligible row weighs twice the top one
        assert!(hits[4] > hits[1]);
    }

    #[test]
    fn single_eligible_row() {
        let mut rng: StdRng = StdRng::seed_from_u64(5);
        for _ in 0..10 {
            assert_eq!(select_weighted_row(3, &mut rng), Some(1));
        }
        assert_eq!(select_weighted_row(0, &mut rng), None);
        assert!(select_weighted_row(2, &mut rng).unwrap() < 2);
    }

    #[test]
    fn exact_even_count() {
        for seed in 0..10 {
            let mut grid: Grid = full_grid(12, 8);
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            assert_eq!(place_birds(&mut grid, 4, &mut rng), 4);
            let b: Vec<(usize, usize)> = birds(&grid);
            assert_eq!(b.len(), 4);
            assert!(b.iter().all(|(r, _)| *r > 0 && *r < 7));
            assert!(grid.is_mirrored());
        }
    }

    #[test]
    fn odd_count_uses_center_cell() {
        for seed in 0..10 {
            let mut grid: Grid = full_grid(12, 8);
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            assert_eq!(place_birds(&mut grid, 3, &mut rng), 3);
            assert!(grid.is_mirrored());
            assert!(
                birds(&grid)
                    .iter()
                    .any(|(r, c)| grid.mirror_col(*r, *c) == Some(*c))
            );
        }
    }

    #[test]
    fn birds_keep_their_color() {
        let mut grid: Grid = full_grid(8, 5);
        let mut rng: StdRng = StdRng::seed_from_u64(11);
        place_birds(&mut grid, 2, &mut rng);
        for (r, c) in birds(&grid) {
            assert_eq!(grid.get(r, c), Some(&Bubble::bird(Color::Green)));
        }
    }

    #[test]
    fn shortfall_is_not_an_error() {
        // Only the center row has bubbles
        let mut grid: Grid = Grid::empty(4, 3);
        grid.set(1, 1, Some(Bubble::normal(Color::Red)));
        let mut rng: StdRng = StdRng::seed_from_u64(2);
        assert_eq!(place_birds(&mut grid, 5, &mut rng), 1);
        assert_eq!(birds(&grid), vec![(1, 1)]);
    }

    #[test]
    fn specials_are_not_overwritten() {
        let mut grid: Grid = Grid::empty(6, 4);
        for r in 0..4 {
            for c in 0..grid.row_len(r) {
                grid.set(r, c, Some(Bubble::Stone));
            }
        }
        let mut rng: StdRng = StdRng::seed_from_u64(2);
        assert_eq!(place_birds(&mut grid, 2, &mut rng), 0);
    }
}
