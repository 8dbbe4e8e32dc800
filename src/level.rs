/*
level.rs

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

//! Generated level.

use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::grid::Grid;
use crate::metadata::Metadata;

/// Level: the grid, the configuration used to generate it, and its summary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Level {
    /// Bubble grid.
    pub grid: Grid,

    /// Generation parameters.
    pub config: Configuration,

    /// Summary of the grid.
    pub metadata: Metadata,
}

impl Level {
    /// Create a [`Level`] object and compute its metadata.
    pub fn new(grid: Grid, config: Configuration) -> Self {
        let metadata: Metadata = Metadata::summarize(&grid, &config);
        Self {
            grid,
            config,
            metadata,
        }
    }
}
