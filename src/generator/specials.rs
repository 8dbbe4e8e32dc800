/*
specials.rs

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

//! Convert normal bubbles into locked bubbles, bombs, transparent bubbles, and stones.
//!
//! The number of bubbles of each kind is a fraction of the eligible bubbles, rounded down.
//! Eligible bubbles are the normal bubbles in the left half of the rows (center cells
//! included). The right half always receives the mirror of the left half.
//!
//! Locked bubbles, bombs, and transparent bubbles are taken in sequence from a single shuffled
//! list, so that a bubble never gets two kinds.
//! Stones are taken from their own shuffled list, which excludes the top rows: a stone there
//! could never be removed.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::slice::Iter;

use crate::bubble::{Bubble, Color};
use crate::config::Configuration;
use crate::grid::{self, Grid};

/// Number of top rows where stones are not allowed.
pub const STONE_FREE_ROWS: usize = 2;

/// Number of bubbles of each kind placed by [`place_specials`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Placed {
    pub locked: usize,
    pub bomb: usize,
    pub transparent: usize,
    pub stone: usize,
}

/// Return the normal bubbles in the left half of the rows.
pub fn left_half_candidates(grid: &Grid) -> Vec<(usize, usize)> {
    let mut candidates: Vec<(usize, usize)> = Vec::new();
    for r in 0..grid.height() {
        for c in 0..grid::half_length(grid.row_len(r)) {
            if grid.is_normal(r, c) {
                candidates.push((r, c));
            }
        }
    }
    candidates
}

/// Number of cells to take from `available` candidates for the given fraction.
fn quota(available: usize, fraction: f64) -> usize {
    if fraction <= 0.0 {
        return 0;
    }
    ((available as f64 * fraction).floor() as usize).min(available)
}

/// Replace the bubble at the given cell and at its mirror.
///
/// The mirror cell is only replaced if it still holds a normal bubble.
fn set_mirrored(grid: &mut Grid, row: usize, col: usize, bubble: Bubble) {
    grid.set(row, col, Some(bubble));
    if let Some(mirror) = grid.mirror_col(row, col)
        && mirror != col
        && grid.is_normal(row, mirror)
    {
        grid.set(row, mirror, Some(bubble));
    }
}

/// Convert a normal bubble into the kind produced by `make`. The color of the normal bubble is
/// passed to `make`.
///
/// Return whether the cell has been converted.
fn convert<F>(grid: &mut Grid, row: usize, col: usize, make: F) -> bool
where
    F: Fn(Color) -> Bubble,
{
    match grid.get(row, col) {
        Some(Bubble::Normal { color }) => {
            let bubble: Bubble = make(*color);
            set_mirrored(grid, row, col, bubble);
            true
        }
        _ => false,
    }
}

/// Place the special bubbles according to the distributions of the configuration.
pub fn place_specials<R: Rng + ?Sized>(
    grid: &mut Grid,
    config: &Configuration,
    rng: &mut R,
) -> Placed {
    let skip_rows: usize = STONE_FREE_ROWS.min(grid.height());
    let mut candidates: Vec<(usize, usize)> = left_half_candidates(grid);
    let mut stone_candidates: Vec<(usize, usize)> = candidates
        .iter()
        .filter(|(r, _)| *r >= skip_rows)
        .copied()
        .collect();

    let locked_quota: usize = quota(candidates.len(), config.locked_chance);
    let bomb_quota: usize = quota(candidates.len(), config.bomb_chance);
    let transparent_quota: usize = quota(candidates.len(), config.transparent_chance);
    let stone_quota: usize = quota(stone_candidates.len(), config.stone_chance);

    debug!(
        "Special bubbles: {} candidates ({} for stones), quotas locked={} bomb={} transparent={} stone={}",
        candidates.len(),
        stone_candidates.len(),
        locked_quota,
        bomb_quota,
        transparent_quota,
        stone_quota
    );

    candidates.shuffle(rng);
    stone_candidates.shuffle(rng);

    let mut placed: Placed = Placed::default();
    let mut cursor: Iter<'_, (usize, usize)> = candidates.iter();

    for _ in 0..locked_quota {
        match cursor.next() {
            Some((r, c)) if convert(grid, *r, *c, Bubble::locked) => placed.locked += 1,
            Some(_) => (),
            None => break,
        }
    }
    for _ in 0..bomb_quota {
        match cursor.next() {
            Some((r, c)) if convert(grid, *r, *c, |_| Bubble::Bomb) => placed.bomb += 1,
            Some(_) => (),
            None => break,
        }
    }
    for _ in 0..transparent_quota {
        match cursor.next() {
            Some((r, c)) if convert(grid, *r, *c, |_| Bubble::Transparent) => {
                placed.transparent += 1
            }
            Some(_) => (),
            None => break,
        }
    }

    // Cells already converted by the other kinds are skipped, not counted
    let mut stone_cursor: Iter<'_, (usize, usize)> = stone_candidates.iter();
    while placed.stone < stone_quota {
        match stone_cursor.next() {
            Some((r, c)) => {
                if convert(grid, *r, *c, |_| Bubble::Stone) {
                    placed.stone += 1;
                }
            }
            None => break,
        }
    }

    debug!("Special bubbles placed: {placed:?}");
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::{BubbleKind, Color};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn full_grid(width: usize, height: usize) -> Grid {
        let mut grid: Grid = Grid::empty(width, height);
        for r in 0..height {
            for c in 0..grid.row_len(r) {
                grid.set(r, c, Some(Bubble::normal(Color::Blue)));
            }
        }
        grid
    }

    fn left_half_count(grid: &Grid, kind: BubbleKind) -> usize {
        grid.cells()
            .filter(|(r, c, cell)| {
                *c < grid::half_length(grid.row_len(*r)) && cell.is_some_and(|b| b.kind() == kind)
            })
            .count()
    }

    #[test]
    fn quotas_round_down() {
        assert_eq!(quota(10, 0.25), 2);
        assert_eq!(quota(10, 0.0), 0);
        assert_eq!(quota(3, 1.0), 3);
        assert_eq!(quota(0, 0.5), 0);
    }

    #[test]
    fn distributions_do_not_overlap() {
        let config: Configuration = Configuration {
            locked_chance: 0.2,
            bomb_chance: 0.2,
            ..Configuration::default()
        };
        for seed in 0..10 {
            let mut grid: Grid = full_grid(12, 8);
            let n: usize = left_half_candidates(&grid).len();
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            let placed: Placed = place_specials(&mut grid, &config, &mut rng);

            let expected: usize = (n as f64 * 0.2).floor() as usize;
            assert_eq!(placed.locked, expected);
            assert_eq!(placed.bomb, expected);
            assert_eq!(left_half_count(&grid, BubbleKind::Locked), expected);
            assert_eq!(left_half_count(&grid, BubbleKind::Bomb), expected);
            assert!(grid.is_mirrored());
        }
    }

    #[test]
    fn locked_bubbles_keep_color_and_level() {
        let config: Configuration = Configuration {
            locked_chance: 0.5,
            ..Configuration::default()
        };
        let mut grid: Grid = full_grid(6, 4);
        let mut rng: StdRng = StdRng::seed_from_u64(4);
        place_specials(&mut grid, &config, &mut rng);
        let locked: Vec<Bubble> = grid
            .cells()
            .filter_map(|(_, _, c)| *c)
            .filter(|b| b.kind() == BubbleKind::Locked)
            .collect();
        assert!(!locked.is_empty());
        assert!(locked.iter().all(|b| *b == Bubble::locked(Color::Blue)));
    }

    #[test]
    fn no_stones_in_top_rows() {
        let config: Configuration = Configuration {
            stone_chance: 1.0,
            ..Configuration::default()
        };
        let mut grid: Grid = full_grid(7, 6);
        let mut rng: StdRng = StdRng::seed_from_u64(8);
        let placed: Placed = place_specials(&mut grid, &config, &mut rng);

        // Rows 2 to 5 have 4 + 3 + 4 + 3 left-half cells
        assert_eq!(placed.stone, 14);
        for (r, _, cell) in grid.cells() {
            if r < STONE_FREE_ROWS {
                assert!(cell.is_some_and(|b| b.is_normal()));
            } else {
                assert_eq!(*cell, Some(Bubble::Stone));
            }
        }
    }

    #[test]
    fn stones_skip_converted_cells() {
        let config: Configuration = Configuration {
            transparent_chance: 0.5,
            stone_chance: 0.5,
            ..Configuration::default()
        };
        for seed in 0..10 {
            let mut grid: Grid = full_grid(10, 6);
            let n: usize = left_half_candidates(&grid).len();
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            let placed: Placed = place_specials(&mut grid, &config, &mut rng);
            assert_eq!(placed.transparent, n / 2);
            assert_eq!(left_half_count(&grid, BubbleKind::Transparent), placed.transparent);
            assert_eq!(left_half_count(&grid, BubbleKind::Stone), placed.stone);
            assert!(grid.is_mirrored());
        }
    }

    #[test]
    fn stones_share_cells_with_transparent_bubbles() {
        // Bubbles only below the top rows: both lists hold the same 20 cells
        let config: Configuration = Configuration {
            transparent_chance: 0.5,
            stone_chance: 0.75,
            ..Configuration::default()
        };
        let mut grid: Grid = full_grid(10, 6);
        for r in 0..STONE_FREE_ROWS {
            for c in 0..grid.row_len(r) {
                grid.set(r, c, None);
            }
        }
        assert_eq!(left_half_candidates(&grid).len(), 20);

        let mut rng: StdRng = StdRng::seed_from_u64(12);
        let placed: Placed = place_specials(&mut grid, &config, &mut rng);

        // The stone quota is 15, but transparent bubbles took 10 of the 20 cells first
        assert_eq!(
            placed,
            Placed {
                locked: 0,
                bomb: 0,
                transparent: 10,
                stone: 10,
            }
        );
        assert_eq!(left_half_count(&grid, BubbleKind::Normal), 0);
        assert!(grid.is_mirrored());
    }

    #[test]
    fn empty_cells_are_never_candidates() {
        let mut grid: Grid = Grid::empty(5, 3);
        grid.set(2, 0, Some(Bubble::normal(Color::Red)));
        grid.set(2, 4, Some(Bubble::normal(Color::Red)));
        grid.set(1, 3, Some(Bubble::Bomb));
        assert_eq!(left_half_candidates(&grid), vec![(2, 0)]);
    }
}
