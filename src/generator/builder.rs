/*
builder.rs

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

//! Build the mirrored grid of normal bubbles.

use log::debug;
use rand::Rng;

use crate::bubble::{Bubble, Color};
use crate::config::Configuration;
use crate::grid::{self, Cell, Grid};

/// Build a grid of normal bubbles and empty cells.
///
/// Only the left half of each row, center cell included, is drawn at random. The right half is a
/// copy of the left half.
pub fn build_grid<R: Rng + ?Sized>(config: &Configuration, rng: &mut R) -> Grid {
    let palette: &[Color] = config.palette();
    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(config.height);

    for r in 0..config.height {
        let len: usize = grid::row_length(config.width, r);
        let half: usize = grid::half_length(len);
        let mut left: Vec<Cell> = Vec::with_capacity(half);

        for col in 0..half {
            if rng.random::<f64>() < config.empty_space_probability {
                left.push(None);
                continue;
            }

            // Reuse the color of the previous bubble to grow runs of the same color
            let previous: Option<Color> = if col > 0 {
                left[col - 1].and_then(|b| b.color())
            } else {
                None
            };
            let color: Option<Color> = match previous {
                Some(c) if rng.random::<f64>() < config.color_cluster_bias => Some(c),
                _ => Color::random(palette.len(), rng),
            };
            left.push(color.map(Bubble::normal));
        }

        let mut row: Vec<Cell> = Vec::with_capacity(len);
        for col in 0..len {
            if col < half {
                row.push(left[col]);
            } else {
                row.push(left[len - 1 - col]);
            }
        }
        rows.push(row);
    }

    debug!(
        "Built a {}x{} grid with {} colors",
        config.width,
        config.height,
        palette.len()
    );
    Grid::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn mirrored_and_packed() {
        let config: Configuration = Configuration {
            width: 9,
            height: 7,
            ..Configuration::default()
        };
        for seed in 0..20 {
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            let g: Grid = build_grid(&config, &mut rng);
            assert_eq!(g.height(), 7);
            assert!(g.has_offset_packing(9));
            assert!(g.is_mirrored());
            assert!(g.cells().all(|(_, _, c)| c.is_none_or(|b| b.is_normal())));
        }
    }

    #[test]
    fn no_empty_cells() {
        let config: Configuration = Configuration {
            width: 6,
            height: 5,
            color_count: 3,
            empty_space_probability: 0.0,
            ..Configuration::default()
        };
        let mut rng: StdRng = StdRng::seed_from_u64(7);
        let g: Grid = build_grid(&config, &mut rng);
        assert!(g.cells().all(|(_, _, c)| c.is_some()));
        assert!(
            g.cells()
                .filter_map(|(_, _, c)| c.and_then(|b| b.color()))
                .all(|color| config.palette().contains(&color))
        );
    }

    #[test]
    fn all_empty() {
        let config: Configuration = Configuration {
            empty_space_probability: 1.0,
            ..Configuration::default()
        };
        let mut rng: StdRng = StdRng::seed_from_u64(1);
        let g: Grid = build_grid(&config, &mut rng);
        assert!(g.cells().all(|(_, _, c)| c.is_none()));
    }

    #[test]
    fn full_cluster_bias_gives_runs() {
        let config: Configuration = Configuration {
            width: 10,
            height: 4,
            color_count: 7,
            empty_space_probability: 0.0,
            color_cluster_bias: 1.0,
            ..Configuration::default()
        };
        let mut rng: StdRng = StdRng::seed_from_u64(3);
        let g: Grid = build_grid(&config, &mut rng);

        // Every row is a single color
        for row in g.rows() {
            let first: Option<Color> = row[0].and_then(|b| b.color());
            assert!(row.iter().all(|c| c.and_then(|b| b.color()) == first));
        }
    }

    #[test]
    fn same_seed_same_grid() {
        let config: Configuration = Configuration::default();
        let a: Grid = build_grid(&config, &mut StdRng::seed_from_u64(99));
        let b: Grid = build_grid(&config, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
