/*
config.rs

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

//! Level generation parameters.
//!
//! The [`Configuration`] object is stored with each level, using the same keys as the level
//! editor:
//!
//! ```json
//! {
//!   "width": 12,
//!   "height": 8,
//!   "colors": 4,
//!   "emptySpaces": 0.1,
//!   "colorDensity": 0.5,
//!   "birdCount": 1,
//!   "lockedChance": 0.0,
//!   "bombChance": 0.0,
//!   "transparentChance": 0.0,
//!   "stoneChance": 0.0
//! }
//! ```
//!
//! All the keys are optional. Missing keys get their default value.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::bubble::Color;

/// Tolerance when comparing the sum of the distributions to 100%.
const DISTRIBUTION_EPSILON: f64 = 1e-9;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The special bubble distributions add up to more than 100%.
    /// The value is the sum, in percent.
    DistributionOverflow(f64),

    /// The number of colors is not between 1 and the size of the palette.
    ColorCount(usize),

    /// The grid has no column.
    Width,

    /// A probability or a distribution is not between 0.0 and 1.0.
    /// The values are the configuration key and the rejected value.
    Fraction(&'static str, f64),

    /// The grid cannot hold a group of three adjacent bubbles.
    /// The values are the width and the height.
    GridTooSmall(usize, usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::DistributionOverflow(percent) => write!(
                f,
                "Total special bubble percentage cannot exceed 100% (currently {percent:.0}%)"
            ),
            ConfigError::ColorCount(count) => write!(
                f,
                "Number of colors must be between 1 and {} (got {count})",
                Color::COUNT
            ),
            ConfigError::Width => write!(f, "Grid width must be at least 1"),
            ConfigError::Fraction(key, value) => {
                write!(f, "{key} must be between 0.0 and 1.0 (got {value})")
            }
            ConfigError::GridTooSmall(width, height) => write!(
                f,
                "A {width}x{height} grid is too small for a group of 3 bubbles"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Parameters for generating a level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    /// Number of cells in the even rows. Odd rows have one cell less.
    pub width: usize,

    /// Number of rows.
    pub height: usize,

    /// Number of colors, taken from the beginning of the palette.
    #[serde(rename = "colors")]
    pub color_count: usize,

    /// Probability for a cell to be empty.
    #[serde(rename = "emptySpaces", alias = "emptySpaceProbability")]
    pub empty_space_probability: f64,

    /// Probability for a new bubble to reuse the color of its left neighbor instead of getting a
    /// random color.
    #[serde(rename = "colorDensity", alias = "colorClusterBias")]
    pub color_cluster_bias: f64,

    /// Exact number of birds to place.
    pub bird_count: usize,

    /// Fraction of the eligible bubbles that become locked bubbles.
    #[serde(alias = "lockedDistribution")]
    pub locked_chance: f64,

    /// Fraction of the eligible bubbles that become bombs.
    #[serde(alias = "bombDistribution")]
    pub bomb_chance: f64,

    /// Fraction of the eligible bubbles that become transparent bubbles.
    #[serde(alias = "transparentDistribution")]
    pub transparent_chance: f64,

    /// Fraction of the bubbles below the top rows that become stones.
    #[serde(alias = "stoneDistribution")]
    pub stone_chance: f64,

    /// Number of moves the level designer allows for the level. Only reported in the metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_moves: Option<usize>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            width: 12,
            height: 8,
            color_count: 4,
            empty_space_probability: 0.1,
            color_cluster_bias: 0.5,
            bird_count: 1,
            locked_chance: 0.0,
            bomb_chance: 0.0,
            transparent_chance: 0.0,
            stone_chance: 0.0,
            target_moves: None,
        }
    }
}

impl Configuration {
    /// Return the colors in use.
    pub fn palette(&self) -> &'static [Color] {
        Color::palette(self.color_count)
    }

    /// Sum of the special bubble distributions.
    pub fn total_distribution(&self) -> f64 {
        self.locked_chance + self.bomb_chance + self.transparent_chance + self.stone_chance
    }

    /// Verify that the configuration can be used to generate a level.
    ///
    /// # Errors
    ///
    /// The method returns an error if a probability is not between 0.0 and 1.0, if the special
    /// bubble distributions add up to more than 100%, if the number of colors does not fit the
    /// palette, or if the grid cannot hold a group of three bubbles.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fractions: [(&'static str, f64); 6] = [
            ("emptySpaces", self.empty_space_probability),
            ("colorDensity", self.color_cluster_bias),
            ("lockedChance", self.locked_chance),
            ("bombChance", self.bomb_chance),
            ("transparentChance", self.transparent_chance),
            ("stoneChance", self.stone_chance),
        ];
        for (key, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Fraction(key, value));
            }
        }

        let total: f64 = self.total_distribution();
        if total > 1.0 + DISTRIBUTION_EPSILON {
            return Err(ConfigError::DistributionOverflow(total * 100.0));
        }
        if self.color_count == 0 || self.color_count > Color::COUNT {
            return Err(ConfigError::ColorCount(self.color_count));
        }
        if self.width == 0 {
            return Err(ConfigError::Width);
        }

        // Three touching cells need a row of 3, or a row of 2 above a row of 1
        if self.height == 0 || self.width == 1 || (self.width == 2 && self.height < 2) {
            return Err(ConfigError::GridTooSmall(self.width, self.height));
        }
        Ok(())
    }
}
