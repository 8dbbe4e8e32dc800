/*
transfer.rs

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

//! Import and export levels.
//!
//! Levels are exchanged in JSON format:
//!
//! ```json
//! {
//!   "grid": [[{"type": "normal", "color": "red"}, null, ...], ...],
//!   "config": {"width": 12, "height": 8, ...},
//!   "metadata": {"totalBubbles": 85, ...}
//! }
//! ```
//!
//! Level files can also contain a list of levels.
//! Levels can be exported as JSON, as the bare grid, or as a text drawing:
//!
//! ```text
//! R R B . . B R R
//! R B * G * B R
//! ```

use clap::ValueEnum;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::config::Configuration;
use crate::grid::Grid;
use crate::level::Level;
use crate::metadata::Metadata;

/// Type of errors.
#[derive(Debug)]
pub enum ImportError {
    /// The data is not valid JSON.
    Parse(serde_json::Error),

    /// The data is an empty list of levels.
    NoLevel,

    /// The level has no `grid` list.
    MissingGrid,

    /// The level does not follow the level format (unknown bubble type or color for example).
    InvalidLevel(serde_json::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Failed to import level: ")?;
        match self {
            ImportError::Parse(e) => write!(f, "{e}"),
            ImportError::NoLevel => write!(f, "Invalid level format: empty level list"),
            ImportError::MissingGrid => write!(f, "Invalid level format: missing grid array"),
            ImportError::InvalidLevel(e) => write!(f, "Invalid level format: {e}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ImportError::Parse(e) | ImportError::InvalidLevel(e) => Some(e),
            ImportError::NoLevel | ImportError::MissingGrid => None,
        }
    }
}

/// Level as found in level files, where the configuration and the metadata are optional.
#[derive(Deserialize)]
struct ImportedLevel {
    grid: Grid,

    #[serde(default)]
    config: Configuration,

    #[serde(default)]
    metadata: Option<Metadata>,
}

/// Build a [`Level`] object from a JSON value.
fn level_from_value(value: Value) -> Result<Level, ImportError> {
    if !value.get("grid").is_some_and(Value::is_array) {
        return Err(ImportError::MissingGrid);
    }
    let imported: ImportedLevel =
        serde_json::from_value(value).map_err(ImportError::InvalidLevel)?;

    let metadata: Metadata = match imported.metadata {
        Some(m) => m,
        None => {
            debug!("No metadata in the imported level: computing it");
            Metadata::summarize(&imported.grid, &imported.config)
        }
    };
    Ok(Level {
        grid: imported.grid,
        config: imported.config,
        metadata,
    })
}

/// Import a level from JSON data.
///
/// If the data is a list of levels, then the first level is imported.
/// The metadata is computed if the data does not provide it.
///
/// # Errors
///
/// The function returns an error if the data is not valid JSON, or if the level has no grid or
/// an invalid one.
pub fn import_level(data: &str) -> Result<Level, ImportError> {
    let value: Value = serde_json::from_str(data).map_err(ImportError::Parse)?;
    match value {
        Value::Array(list) => {
            let first: Value = list.into_iter().next().ok_or(ImportError::NoLevel)?;
            level_from_value(first)
        }
        v => level_from_value(v),
    }
}

/// Import all the levels from JSON data that contains a level or a list of levels.
///
/// # Errors
///
/// The function returns an error if any of the levels cannot be imported.
pub fn import_levels(data: &str) -> Result<Vec<Level>, ImportError> {
    let value: Value = serde_json::from_str(data).map_err(ImportError::Parse)?;
    match value {
        Value::Array(list) => {
            if list.is_empty() {
                return Err(ImportError::NoLevel);
            }
            list.into_iter().map(level_from_value).collect()
        }
        v => Ok(vec![level_from_value(v)?]),
    }
}

/// Export formats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// The complete level in JSON format.
    #[default]
    Json,

    /// Only the grid.
    Array,

    /// Text drawing of the grid.
    String,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "array" => Ok(ExportFormat::Array),
            "string" => Ok(ExportFormat::String),
            _ => Err(format!("Unknown export format {s}")),
        }
    }
}

/// Result of an export.
#[derive(Debug, Clone, PartialEq)]
pub enum Exported {
    /// Indented JSON document of the level.
    Json(String),

    /// Copy of the grid.
    Array(Grid),

    /// Text drawing of the grid, one line per row.
    Text(String),

    /// Copy of the level, for unknown formats.
    Level(Level),
}

impl Exported {
    /// Return the exported data as text. Grids and levels are converted to JSON.
    ///
    /// # Errors
    ///
    /// The method returns an error if the JSON conversion fails.
    pub fn into_text(self) -> Result<String, serde_json::Error> {
        match self {
            Exported::Json(s) | Exported::Text(s) => Ok(s),
            Exported::Array(grid) => serde_json::to_string_pretty(&grid),
            Exported::Level(level) => serde_json::to_string_pretty(&level),
        }
    }
}

/// Export a level in the given format.
///
/// # Errors
///
/// The function returns an error if the JSON conversion fails.
pub fn export_level_as(level: &Level, format: ExportFormat) -> Result<Exported, serde_json::Error> {
    match format {
        ExportFormat::Json => Ok(Exported::Json(serde_json::to_string_pretty(level)?)),
        ExportFormat::Array => Ok(Exported::Array(level.grid.clone())),
        ExportFormat::String => Ok(Exported::Text(level.grid.render())),
    }
}

/// Export a level in the format with the given name (`json`, `array`, or `string`).
///
/// An unknown format name returns the level unchanged.
///
/// # Errors
///
/// The function returns an error if the JSON conversion fails.
pub fn export_level(level: &Level, format: &str) -> Result<Exported, serde_json::Error> {
    match format.parse::<ExportFormat>() {
        Ok(f) => export_level_as(level, f),
        Err(msg) => {
            debug!("{msg}: returning the level");
            Ok(Exported::Level(level.clone()))
        }
    }
}

/// Export several levels as a single text document.
///
/// JSON and grid exports produce a JSON list. Text drawings are separated by empty lines.
///
/// # Errors
///
/// The function returns an error if the JSON conversion fails.
pub fn export_levels(levels: &[Level], format: ExportFormat) -> Result<String, serde_json::Error> {
    match format {
        ExportFormat::Json => serde_json::to_string_pretty(levels),
        ExportFormat::Array => {
            let grids: Vec<&Grid> = levels.iter().map(|l| &l.grid).collect();
            serde_json::to_string_pretty(&grids)
        }
        ExportFormat::String => Ok(levels
            .iter()
            .map(|l| l.grid.render())
            .collect::<Vec<String>>()
            .join("\n\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::{Bubble, BubbleKind, Color};

    fn small_level() -> Level {
        let mut grid: Grid = Grid::empty(4, 2);
        grid.set(0, 0, Some(Bubble::normal(Color::Red)));
        grid.set(0, 1, Some(Bubble::bird(Color::Blue)));
        grid.set(0, 2, Some(Bubble::bird(Color::Blue)));
        grid.set(0, 3, Some(Bubble::normal(Color::Red)));
        grid.set(1, 0, Some(Bubble::locked(Color::Green)));
        grid.set(1, 1, Some(Bubble::Bomb));
        grid.set(1, 2, Some(Bubble::locked(Color::Green)));
        Level::new(grid, Configuration::default())
    }

    #[test]
    fn json_round_trip() {
        let level: Level = small_level();
        let json: String = export_level(&level, "json").unwrap().into_text().unwrap();
        let imported: Level = import_level(&json).unwrap();
        assert_eq!(imported, level);
    }

    #[test]
    fn string_export() {
        let text: Exported = export_level(&small_level(), "string").unwrap();
        assert_eq!(text, Exported::Text("R B B R\nL * L".to_string()));
    }

    #[test]
    fn array_export() {
        let level: Level = small_level();
        assert_eq!(
            export_level(&level, "array").unwrap(),
            Exported::Array(level.grid.clone())
        );
    }

    #[test]
    fn unknown_format_returns_level() {
        let level: Level = small_level();
        assert_eq!(
            export_level(&level, "xml").unwrap(),
            Exported::Level(level.clone())
        );
    }

    #[test]
    fn metadata_is_computed() {
        let data: &str = r#"{"grid": [[{"type": "normal", "color": "red"}, null,
                                       {"type": "normal", "color": "red"}],
                                      [{"type": "stone", "color": null}, {"type": "stone"}]]}"#;
        let level: Level = import_level(data).unwrap();
        assert_eq!(level.config, Configuration::default());
        assert_eq!(level.metadata.total_bubbles, 4);
        assert_eq!(level.metadata.empty_spaces, 1);
        assert_eq!(level.metadata.kind_count(BubbleKind::Stone), 2);
        assert_eq!(level.metadata.color_count(Color::Red), 2);
    }

    #[test]
    fn first_level_of_list() {
        let data: &str = r#"[{"grid": [[null]]}, {"grid": []}]"#;
        let level: Level = import_level(data).unwrap();
        assert_eq!(level.grid.height(), 1);
        assert_eq!(import_levels(data).unwrap().len(), 2);
    }

    #[test]
    fn import_errors() {
        assert!(matches!(import_level("{grid"), Err(ImportError::Parse(_))));
        assert!(matches!(import_level("[]"), Err(ImportError::NoLevel)));
        assert!(matches!(
            import_level(r#"{"config": {}}"#),
            Err(ImportError::MissingGrid)
        ));
        assert!(matches!(
            import_level(r#"{"grid": "R R"}"#),
            Err(ImportError::MissingGrid)
        ));
        assert!(matches!(
            import_level(r#"{"grid": [[{"type": "rainbow"}]]}"#),
            Err(ImportError::InvalidLevel(_))
        ));
        let err: ImportError = import_level(r#"{"config": {}}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to import level: Invalid level format: missing grid array"
        );
    }

    #[test]
    fn several_levels() {
        let levels: Vec<Level> = vec![small_level(), small_level()];
        let text: String = export_levels(&levels, ExportFormat::String).unwrap();
        assert_eq!(text, "R B B R\nL * L\n\nR B B R\nL * L");
        let json: String = export_levels(&levels, ExportFormat::Json).unwrap();
        assert_eq!(import_levels(&json).unwrap(), levels);
    }
}
