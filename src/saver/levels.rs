/*
levels.rs

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

//! Read and write level files.
//!
//! Level files contain a level or a list of levels in JSON format (see [`crate::transfer`]), or
//! any exported text.

use chrono::Local;
use log::debug;
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::Configuration;
use crate::level::Level;
use crate::transfer;

/// Return a file name based on the current date and time, such as
/// `levels-20250612-142501.json`.
pub fn timestamped_file_name(extension: &str) -> String {
    format!("levels-{}.{extension}", Local::now().format("%Y%m%d-%H%M%S"))
}

/// Object to read and write a level file.
pub struct SaverLevels {
    /// Path to the file.
    file: PathBuf,
}

impl SaverLevels {
    /// Create a [`SaverLevels`] object for the given file.
    pub fn new(file: PathBuf) -> Self {
        debug!("Level file: {file:?}");
        Self { file }
    }

    /// Create a [`SaverLevels`] object for a new timestamped file in the given directory.
    pub fn in_directory(mut dir: PathBuf, extension: &str) -> Self {
        dir.push(timestamped_file_name(extension));
        Self::new(dir)
    }

    /// Return the path to the file.
    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Retrieve the first level from the file.
    pub fn get_level(&self) -> Result<Level, Box<dyn Error>> {
        let data: String = fs::read_to_string(&self.file)?;
        Ok(transfer::import_level(&data)?)
    }

    /// Retrieve all the levels from the file.
    pub fn get_levels(&self) -> Result<Vec<Level>, Box<dyn Error>> {
        let data: String = fs::read_to_string(&self.file)?;
        Ok(transfer::import_levels(&data)?)
    }

    /// Retrieve a generation configuration from the file.
    pub fn get_configuration(&self) -> Result<Configuration, Box<dyn Error>> {
        let data: String = fs::read_to_string(&self.file)?;
        let config: Configuration = serde_json::from_str(&data)?;
        Ok(config)
    }

    /// Save the provided text, such as the output of [`transfer::export_levels`].
    pub fn save_text(&self, text: &str) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        writer.write_all(text.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Save the provided levels in JSON format.
    pub fn save_levels(&self, levels: &[Level]) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, levels)?;
        writer.flush()?;
        Ok(())
    }
}
