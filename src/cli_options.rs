/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! Preview a small level:
//!
//! ```
//! $ bubblegen --width 8 --height 5 --birds 2 --bomb 0.1 -f string
//! R R G B B G R R
//!  B B * Y * B B
//! ...
//! ```
//!
//! Generate five levels from a configuration file and save them:
//!
//! ```
//! $ bubblegen --config easy.json -n 5 --output-dir levels/ --summary
//! ```
//!
//! Convert a level file into its text drawing:
//!
//! ```
//! $ bubblegen --import levels/levels-20250612-142501.json -f string
//! ```

use clap::Parser;
use log::debug;
use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

use bubblegen::bubble::BubbleKind;
use bubblegen::config::Configuration;
use bubblegen::generator::LevelGenerator;
use bubblegen::level::Level;
use bubblegen::metadata::Metadata;
use bubblegen::saver::levels::SaverLevels;
use bubblegen::transfer::{self, ExportFormat};

/// Generate levels for hexagonal bubble-shooter games.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// JSON file with the generation parameters. Other options override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of bubbles in the even rows
    #[arg(long)]
    width: Option<usize>,

    /// Number of rows
    #[arg(long)]
    height: Option<usize>,

    /// Number of bubble colors (1 to 7)
    #[arg(short, long)]
    colors: Option<usize>,

    /// Probability for a cell to be empty (0.0 to 1.0)
    #[arg(long)]
    empty_spaces: Option<f64>,

    /// Probability for a bubble to get the color of its left neighbor (0.0 to 1.0)
    #[arg(long)]
    color_density: Option<f64>,

    /// Exact number of birds
    #[arg(short, long)]
    birds: Option<usize>,

    /// Fraction of the bubbles that become locked bubbles
    #[arg(long)]
    locked: Option<f64>,

    /// Fraction of the bubbles that become bombs
    #[arg(long)]
    bomb: Option<f64>,

    /// Fraction of the bubbles that become transparent bubbles
    #[arg(long)]
    transparent: Option<f64>,

    /// Fraction of the bubbles, below the top two rows, that become stones
    #[arg(long)]
    stone: Option<f64>,

    /// Number of moves allowed for the level, reported in the metadata
    #[arg(long)]
    target_moves: Option<usize>,

    /// Number of levels to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Seed for the random number generator, to reproduce levels
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format
    #[arg(value_enum, short, long, default_value_t = ExportFormat::Json)]
    format: ExportFormat,

    /// Level file to export in the requested format, instead of generating levels
    #[arg(short, long, value_name = "FILE", conflicts_with = "count")]
    import: Option<PathBuf>,

    /// File where to write the output, instead of the standard output
    #[arg(short, long, value_name = "FILE", group = "out")]
    output: Option<PathBuf>,

    /// Directory where to write the output in a new timestamped file
    #[arg(long, value_name = "DIR", group = "out")]
    output_dir: Option<PathBuf>,

    /// Print some statistics about the levels
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    /// Build the generation configuration from the configuration file and the options.
    fn configuration(&self) -> Result<Configuration, Box<dyn Error>> {
        let mut config: Configuration = match &self.config {
            Some(path) => SaverLevels::new(path.clone()).get_configuration()?,
            None => Configuration::default(),
        };

        if let Some(v) = self.width {
            config.width = v;
        }
        if let Some(v) = self.height {
            config.height = v;
        }
        if let Some(v) = self.colors {
            config.color_count = v;
        }
        if let Some(v) = self.empty_spaces {
            config.empty_space_probability = v;
        }
        if let Some(v) = self.color_density {
            config.color_cluster_bias = v;
        }
        if let Some(v) = self.birds {
            config.bird_count = v;
        }
        if let Some(v) = self.locked {
            config.locked_chance = v;
        }
        if let Some(v) = self.bomb {
            config.bomb_chance = v;
        }
        if let Some(v) = self.transparent {
            config.transparent_chance = v;
        }
        if let Some(v) = self.stone {
            config.stone_chance = v;
        }
        if self.target_moves.is_some() {
            config.target_moves = self.target_moves;
        }
        debug!("Configuration: {config:?}");
        Ok(config)
    }

    /// Write the output to the requested file, or to the standard output.
    fn write(&self, text: &str) -> Result<(), Box<dyn Error>> {
        let extension: &str = match self.format {
            ExportFormat::String => "txt",
            _ => "json",
        };
        let saver: Option<SaverLevels> = match (&self.output, &self.output_dir) {
            (Some(file), _) => Some(SaverLevels::new(file.clone())),
            (None, Some(dir)) => Some(SaverLevels::in_directory(dir.clone(), extension)),
            (None, None) => None,
        };

        match saver {
            Some(s) => {
                s.save_text(text)?;
                eprintln!("Saved to {}", s.path().display());
            }
            None => println!("{text}"),
        }
        Ok(())
    }

    /// Export the levels in the requested format and write them.
    ///
    /// A single level is exported alone, several levels are exported as a list.
    fn output_levels(&self, levels: &[Level]) -> Result<(), Box<dyn Error>> {
        let text: String = match levels {
            [level] => transfer::export_level_as(level, self.format)?.into_text()?,
            _ => transfer::export_levels(levels, self.format)?,
        };
        self.write(&text)?;
        if self.summary {
            print_summary(levels);
        }
        Ok(())
    }
}

/// Print the statistics that the level editor displays.
fn print_summary(levels: &[Level]) {
    for (i, level) in levels.iter().enumerate() {
        let m: &Metadata = &level.metadata;
        eprintln!(
            "
Level {}
     total bubbles = {}
      empty spaces = {}
   estimated moves = {}
      target birds = {}
            locked = {}
             bombs = {}
       transparent = {}
            stones = {}",
            i + 1,
            m.total_bubbles,
            m.empty_spaces,
            m.estimated_moves,
            m.target_birds,
            m.kind_count(BubbleKind::Locked),
            m.kind_count(BubbleKind::Bomb),
            m.kind_count(BubbleKind::Transparent),
            m.kind_count(BubbleKind::Stone),
        );
        if let Some(moves) = m.target_moves {
            eprintln!("      target moves = {moves}");
        }
    }
}

/// Import the level file and export its levels in the requested format.
fn run_import(args: &Args, path: &Path) -> Result<(), Box<dyn Error>> {
    let levels: Vec<Level> = SaverLevels::new(path.to_path_buf()).get_levels()?;
    debug!("Imported {} levels from {path:?}", levels.len());

    args.output_levels(&levels)
}

/// Generate the levels and export them in the requested format.
fn run_generate(args: &Args) -> Result<(), Box<dyn Error>> {
    let config: Configuration = args.configuration()?;
    let mut generator: LevelGenerator = match args.seed {
        Some(seed) => LevelGenerator::with_seed(seed),
        None => LevelGenerator::new(),
    };

    let start: Instant = Instant::now();
    let levels: Vec<Level> = generator.generate_levels(&config, args.count)?;
    debug!(
        "Generated {} levels in {}s",
        levels.len(),
        start.elapsed().as_secs_f32()
    );

    args.output_levels(&levels)
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let ret: Result<(), Box<dyn Error>> = match &args.import {
        Some(path) => run_import(&args, path),
        None => run_generate(&args),
    };
    match ret {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}
