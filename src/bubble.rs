/*
bubble.rs

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

//! Bubbles that fill the cells of the grid.
//!
//! A [`Bubble`] is one of six kinds.
//! Normal bubbles, birds, and locked bubbles have a [`Color`] and take part in color matching.
//! Bombs, transparent bubbles, and stones are colorless.
//!
//! In the level files, a bubble is stored as a JSON object such as
//! `{"type": "locked", "color": "red", "lockLevel": 2}`.
//! The [`BubbleRecord`] object is that serialized form.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use strum_macros::FromRepr;

/// Lock level given to the locked bubbles that the generator places.
pub const DEFAULT_LOCK_LEVEL: u32 = 2;

/// Bubble colors.
///
/// The order of the variants is the order of the palette. A configuration that uses `n` colors
/// uses the first `n` variants.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    FromRepr,
)]
#[serde(rename_all = "lowercase")]
#[repr(usize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Pink,
}

impl Color {
    /// Number of colors in the palette.
    pub const COUNT: usize = 7;

    /// Full palette, in order.
    pub const PALETTE: [Color; Color::COUNT] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
        Color::Pink,
    ];

    /// Return the first `count` colors of the palette.
    ///
    /// `count` is capped to the size of the palette.
    pub fn palette(count: usize) -> &'static [Color] {
        &Self::PALETTE[..count.min(Self::COUNT)]
    }

    /// Return a random color among the first `count` colors of the palette.
    ///
    /// Return None if `count` is 0.
    pub fn random<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Option<Color> {
        let count: usize = count.min(Self::COUNT);
        if count == 0 {
            return None;
        }
        Color::from_repr(rng.random_range(0..count))
    }

    /// Name of the color, as stored in the level files.
    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Orange => "orange",
            Color::Pink => "pink",
        }
    }

    /// Uppercase initial used in the text rendering of the grid.
    pub fn initial(&self) -> char {
        self.name()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('.')
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Kind of bubble, without the kind-specific attributes.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum BubbleKind {
    Normal,
    Bird,
    Locked,
    Bomb,
    Transparent,
    Stone,
}

impl BubbleKind {
    /// All the kinds, in the order used by the level metadata.
    pub const ALL: [BubbleKind; 6] = [
        BubbleKind::Normal,
        BubbleKind::Bird,
        BubbleKind::Locked,
        BubbleKind::Bomb,
        BubbleKind::Transparent,
        BubbleKind::Stone,
    ];

    /// Name of the kind, as stored in the level files.
    pub fn name(&self) -> &'static str {
        match self {
            BubbleKind::Normal => "normal",
            BubbleKind::Bird => "bird",
            BubbleKind::Locked => "locked",
            BubbleKind::Bomb => "bomb",
            BubbleKind::Transparent => "transparent",
            BubbleKind::Stone => "stone",
        }
    }
}

impl fmt::Display for BubbleKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Content of a non-empty cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(into = "BubbleRecord", try_from = "BubbleRecord")]
pub enum Bubble {
    /// Plain colored bubble.
    Normal { color: Color },

    /// Bird to free. Birds are the targets of the level.
    Bird { color: Color, is_target: bool },

    /// Bubble that must be hit `lock_level` times before it can be matched.
    Locked { color: Color, lock_level: u32 },

    /// Colorless bubble that explodes.
    Bomb,

    /// Colorless see-through bubble.
    Transparent,

    /// Unbreakable colorless bubble.
    Stone,
}

impl Bubble {
    /// Create a normal bubble.
    pub fn normal(color: Color) -> Self {
        Bubble::Normal { color }
    }

    /// Create a target bird.
    pub fn bird(color: Color) -> Self {
        Bubble::Bird {
            color,
            is_target: true,
        }
    }

    /// Create a locked bubble with the default lock level.
    pub fn locked(color: Color) -> Self {
        Bubble::Locked {
            color,
            lock_level: DEFAULT_LOCK_LEVEL,
        }
    }

    /// Return the kind of the bubble.
    pub fn kind(&self) -> BubbleKind {
        match self {
            Bubble::Normal { .. } => BubbleKind::Normal,
            Bubble::Bird { .. } => BubbleKind::Bird,
            Bubble::Locked { .. } => BubbleKind::Locked,
            Bubble::Bomb => BubbleKind::Bomb,
            Bubble::Transparent => BubbleKind::Transparent,
            Bubble::Stone => BubbleKind::Stone,
        }
    }

    /// Return the color of the bubble, or None for the colorless kinds.
    pub fn color(&self) -> Option<Color> {
        match self {
            Bubble::Normal { color }
            | Bubble::Bird { color, .. }
            | Bubble::Locked { color, .. } => Some(*color),
            Bubble::Bomb | Bubble::Transparent | Bubble::Stone => None,
        }
    }

    /// Whether the bubble is a plain colored bubble.
    pub fn is_normal(&self) -> bool {
        matches!(self, Bubble::Normal { .. })
    }

    /// Single character used in the text rendering of the grid.
    pub fn glyph(&self) -> char {
        match self {
            Bubble::Bird { .. } => 'B',
            Bubble::Locked { .. } => 'L',
            Bubble::Bomb => '*',
            Bubble::Transparent => 'T',
            Bubble::Stone => 'S',
            Bubble::Normal { color } => color.initial(),
        }
    }
}

/// Errors when converting a [`BubbleRecord`] into a [`Bubble`].
#[derive(Debug, PartialEq)]
pub enum BubbleError {
    /// A normal, bird, or locked bubble without a color.
    MissingColor(BubbleKind),

    /// A locked bubble with a lock level of zero.
    InvalidLockLevel,
}

impl fmt::Display for BubbleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BubbleError::MissingColor(kind) => write!(f, "{kind} bubble without a color"),
            BubbleError::InvalidLockLevel => write!(f, "lock level must be at least 1"),
        }
    }
}

impl Error for BubbleError {}

/// Serialized form of a [`Bubble`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BubbleRecord {
    /// Kind of the bubble.
    #[serde(rename = "type")]
    pub kind: BubbleKind,

    /// Color, `null` for colorless bubbles.
    #[serde(default)]
    pub color: Option<Color>,

    /// Only for birds.
    #[serde(rename = "isTarget", default, skip_serializing_if = "Option::is_none")]
    pub is_target: Option<bool>,

    /// Only for locked bubbles.
    #[serde(rename = "lockLevel", default, skip_serializing_if = "Option::is_none")]
    pub lock_level: Option<u32>,
}

impl From<Bubble> for BubbleRecord {
    fn from(bubble: Bubble) -> Self {
        let (is_target, lock_level): (Option<bool>, Option<u32>) = match bubble {
            Bubble::Bird { is_target, .. } => (Some(is_target), None),
            Bubble::Locked { lock_level, .. } => (None, Some(lock_level)),
            _ => (None, None),
        };
        Self {
            kind: bubble.kind(),
            color: bubble.color(),
            is_target,
            lock_level,
        }
    }
}

impl TryFrom<BubbleRecord> for Bubble {
    type Error = BubbleError;

    fn try_from(record: BubbleRecord) -> Result<Self, Self::Error> {
        let colored = |kind: BubbleKind| record.color.ok_or(BubbleError::MissingColor(kind));

        // Colors stored on colorless bubbles are ignored
        match record.kind {
            BubbleKind::Normal => Ok(Bubble::Normal {
                color: colored(BubbleKind::Normal)?,
            }),
            BubbleKind::Bird => Ok(Bubble::Bird {
                color: colored(BubbleKind::Bird)?,
                is_target: record.is_target.unwrap_or(true),
            }),
            BubbleKind::Locked => {
                let lock_level: u32 = record.lock_level.unwrap_or(DEFAULT_LOCK_LEVEL);
                if lock_level == 0 {
                    return Err(BubbleError::InvalidLockLevel);
                }
                Ok(Bubble::Locked {
                    color: colored(BubbleKind::Locked)?,
                    lock_level,
                })
            }
            BubbleKind::Bomb => Ok(Bubble::Bomb),
            BubbleKind::Transparent => Ok(Bubble::Transparent),
            BubbleKind::Stone => Ok(Bubble::Stone),
        }
    }
}
