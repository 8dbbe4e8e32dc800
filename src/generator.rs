/*
generator.rs

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

//! Generate random levels.
//!
//! A level is generated in several stages that all work on the same [`Grid`] object:
//!
//! * [`builder::build_grid`] creates a mirrored grid of normal bubbles and empty cells.
//! * [`birds::place_birds`] converts normal bubbles into birds, the targets of the level.
//! * [`specials::place_specials`] converts normal bubbles into locked bubbles, bombs,
//!   transparent bubbles, and stones.
//! * [`sanitizer::sanitize_top_rows`] removes the stones from the top rows, which the player
//!   could not clear otherwise.
//! * [`solvability::ensure_solvable`] verifies that the player has at least one group of
//!   bubbles to pop, and creates some if needed.
//!
//! Every stage keeps the rows symmetric.
//! The [`LevelGenerator`] object runs the stages in sequence, and then computes the
//! [`crate::metadata::Metadata`] of the level.
//!
//! The random number generator is an explicit parameter of all the stages. Use
//! [`LevelGenerator::with_seed`] to get reproducible levels.

pub mod birds;
pub mod builder;
pub mod sanitizer;
pub mod solvability;
pub mod specials;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, Configuration};
use crate::grid::Grid;
use crate::level::Level;

/// Run all the stages on a new grid.
///
/// The configuration must have been validated.
pub fn create_grid<R: Rng + ?Sized>(config: &Configuration, rng: &mut R) -> Grid {
    let mut grid: Grid = builder::build_grid(config, rng);
    grid.debug("Basic grid");

    if config.bird_count > 0 {
        birds::place_birds(&mut grid, config.bird_count, rng);
    }
    specials::place_specials(&mut grid, config, rng);
    sanitizer::sanitize_top_rows(&mut grid, config.palette(), rng);
    solvability::ensure_solvable(&mut grid, config.palette(), rng);

    grid.debug("Final grid");
    grid
}

/// Generate a level with the given random number generator.
///
/// # Errors
///
/// The function returns an error, before generating anything, when the configuration is not
/// valid. See [`Configuration::validate`].
pub fn generate_level_with<R: Rng + ?Sized>(
    config: &Configuration,
    rng: &mut R,
) -> Result<Level, ConfigError> {
    config.validate()?;
    let grid: Grid = create_grid(config, rng);
    let level: Level = Level::new(grid, config.clone());

    if level.metadata.target_birds < config.bird_count {
        debug!(
            "Requested {} birds, placed {}",
            config.bird_count, level.metadata.target_birds
        );
    }
    Ok(level)
}

/// Level generator object.
pub struct LevelGenerator {
    /// Random number generator shared by all the levels of the generator.
    rng: StdRng,
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelGenerator {
    /// Create a [`LevelGenerator`] object seeded from the system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a [`LevelGenerator`] object that always produces the same levels for the same
    /// seed and configurations.
    pub fn with_seed(seed: u64) -> Self {
        debug!("Random seed = {seed}");
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a level.
    ///
    /// # Errors
    ///
    /// The method returns an error when the configuration is not valid.
    pub fn generate_level(&mut self, config: &Configuration) -> Result<Level, ConfigError> {
        generate_level_with(config, &mut self.rng)
    }

    /// Generate `count` levels with the same configuration.
    ///
    /// # Errors
    ///
    /// The method returns an error when the configuration is not valid. In that case no level
    /// is generated.
    pub fn generate_levels(
        &mut self,
        config: &Configuration,
        count: usize,
    ) -> Result<Vec<Level>, ConfigError> {
        config.validate()?;
        let mut levels: Vec<Level> = Vec::with_capacity(count);
        for i in 0..count {
            debug!("Generating level {}/{count}", i + 1);
            levels.push(generate_level_with(config, &mut self.rng)?);
        }
        info!("Generated {count} levels");
        Ok(levels)
    }
}

/// Generate a level with a random seed.
///
/// # Errors
///
/// The function returns an error when the configuration is not valid.
pub fn generate_level(config: &Configuration) -> Result<Level, ConfigError> {
    generate_level_with(config, &mut rand::rng())
}
