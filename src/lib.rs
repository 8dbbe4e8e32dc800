/*
lib.rs

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

//! Level generator for hexagonal bubble-shooter games.
//!
//! [`generate_level`] builds a random [`Level`] from a [`Configuration`].
//! [`export_level`] and [`import_level`] convert levels to and from JSON and text.
//!
//! ```no_run
//! use bubblegen::{Configuration, export_level, generate_level};
//!
//! let config = Configuration { bird_count: 2, bomb_chance: 0.1, ..Configuration::default() };
//! let level = generate_level(&config).unwrap();
//! println!("{}", export_level(&level, "string").unwrap().into_text().unwrap());
//! ```

pub mod bubble;
pub mod config;
pub mod generator;
pub mod grid;
pub mod level;
pub mod metadata;
pub mod saver;
pub mod transfer;

pub use bubble::{Bubble, BubbleKind, Color};
pub use config::{ConfigError, Configuration};
pub use generator::{LevelGenerator, generate_level};
pub use grid::Grid;
pub use level::Level;
pub use metadata::Metadata;
pub use transfer::{ExportFormat, Exported, ImportError, export_level, import_level};
