/*
sanitizer.rs

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

//! Remove the stones from the top rows.
//!
//! The top rows are the last ones the player clears. A stone there cannot be removed and the
//! level could not be won.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::specials::STONE_FREE_ROWS;
use crate::bubble::{Bubble, Color};
use crate::grid::Grid;

/// Replace the stones of the top rows with normal bubbles of a random color.
///
/// A stone and its mirror get the same color. Return the number of replaced stones.
pub fn sanitize_top_rows<R: Rng + ?Sized>(grid: &mut Grid, palette: &[Color], rng: &mut R) -> usize {
    let mut replaced: usize = 0;

    for r in 0..STONE_FREE_ROWS.min(grid.height()) {
        for c in 0..grid.row_len(r) {
            if grid.get(r, c) != Some(&Bubble::Stone) {
                continue;
            }
            let Some(color) = palette.choose(rng).copied() else {
                return replaced;
            };
            grid.set(r, c, Some(Bubble::normal(color)));
            replaced += 1;

            if let Some(mirror) = grid.mirror_col(r, c)
                && mirror != c
                && grid.get(r, mirror) == Some(&Bubble::Stone)
            {
                grid.set(r, mirror, Some(Bubble::normal(color)));
                replaced += 1;
            }
        }
    }

    if replaced > 0 {
        debug!("Replaced {replaced} stones in the top rows");
    }
    replaced
}
