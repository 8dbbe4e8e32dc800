/*
metadata.rs

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

//! Summary of a level.
//!
//! The [`Metadata`] object can be recomputed at any time from the grid and the configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bubble::{BubbleKind, Color};
use crate::config::Configuration;
use crate::grid::Grid;

/// Number of bubbles that a single shot clears, on average.
const BUBBLES_PER_MOVE: usize = 3;

/// Level summary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Number of non-empty cells.
    pub total_bubbles: usize,

    /// Number of empty cells.
    pub empty_spaces: usize,

    /// Number of bubbles for each color of the palette, unused colors included.
    pub color_distribution: BTreeMap<Color, usize>,

    /// Number of bubbles for each kind.
    pub type_distribution: BTreeMap<BubbleKind, usize>,

    /// Rough number of shots needed to clear the board.
    pub estimated_moves: usize,

    /// Number of birds in the grid.
    pub target_birds: usize,

    /// Number of moves from the configuration, if the level designer set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_moves: Option<usize>,
}

impl Metadata {
    /// Compute the metadata of the given grid.
    pub fn summarize(grid: &Grid, config: &Configuration) -> Self {
        let mut color_distribution: BTreeMap<Color, usize> =
            Color::PALETTE.iter().map(|c| (*c, 0)).collect();
        let mut type_distribution: BTreeMap<BubbleKind, usize> =
            BubbleKind::ALL.iter().map(|k| (*k, 0)).collect();
        let mut total_bubbles: usize = 0;
        let mut empty_spaces: usize = 0;

        for (_, _, cell) in grid.cells() {
            match cell {
                Some(bubble) => {
                    total_bubbles += 1;
                    if let Some(color) = bubble.color() {
                        *color_distribution.entry(color).or_insert(0) += 1;
                    }
                    *type_distribution.entry(bubble.kind()).or_insert(0) += 1;
                }
                None => empty_spaces += 1,
            }
        }

        let target_birds: usize = type_distribution
            .get(&BubbleKind::Bird)
            .copied()
            .unwrap_or(0);

        Self {
            total_bubbles,
            empty_spaces,
            color_distribution,
            type_distribution,
            estimated_moves: total_bubbles / BUBBLES_PER_MOVE,
            target_birds,
            target_moves: config.target_moves,
        }
    }

    /// Return the number of bubbles of the given kind.
    pub fn kind_count(&self, kind: BubbleKind) -> usize {
        self.type_distribution.get(&kind).copied().unwrap_or(0)
    }

    /// Return the number of bubbles of the given color.
    pub fn color_count(&self, color: Color) -> usize {
        self.color_distribution.get(&color).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::Bubble;

    #[test]
    fn counts() {
        let mut grid: Grid = Grid::empty(4, 2);
        grid.set(0, 0, Some(Bubble::normal(Color::Red)));
        grid.set(0, 1, Some(Bubble::bird(Color::Blue)));
        grid.set(0, 2, Some(Bubble::bird(Color::Blue)));
        grid.set(0, 3, Some(Bubble::normal(Color::Red)));
        grid.set(1, 1, Some(Bubble::Bomb));
        let config: Configuration = Configuration {
            target_moves: Some(12),
            ..Configuration::default()
        };

        let m: Metadata = Metadata::summarize(&grid, &config);
        assert_eq!(m.total_bubbles, 5);
        assert_eq!(m.empty_spaces, 2);
        assert_eq!(m.estimated_moves, 1);
        assert_eq!(m.target_birds, 2);
        assert_eq!(m.target_moves, Some(12));
        assert_eq!(m.color_count(Color::Red), 2);
        assert_eq!(m.color_count(Color::Blue), 2);
        assert_eq!(m.color_count(Color::Pink), 0);
        assert_eq!(m.kind_count(BubbleKind::Bomb), 1);
        assert_eq!(m.kind_count(BubbleKind::Stone), 0);
        assert_eq!(m.color_distribution.len(), Color::COUNT);
        assert_eq!(m.type_distribution.len(), BubbleKind::ALL.len());
    }

    #[test]
    fn json_keys() {
        let m: Metadata = Metadata::summarize(&Grid::empty(2, 1), &Configuration::default());
        let v: serde_json::Value = serde_json::to_value(&m).unwrap();
        assert_eq!(v["totalBubbles"], 0);
        assert_eq!(v["emptySpaces"], 2);
        assert_eq!(v["colorDistribution"]["pink"], 0);
        assert_eq!(v["typeDistribution"]["transparent"], 0);
        assert!(v.get("targetMoves").is_none());
    }
}
