//! Level description format
//!
//! Text layout: the width on the first line, the height on the second, then
//! one tile code per line, column by column (all of x = 0 top to bottom,
//! then x = 1, and so on). The same description can be stored as JSON.
//!
//! A tile code's first character picks the category. Following characters
//! select a variant, channel or size, and a trailing `U`/`D`/`L`/`R` sets
//! the facing of anything that has one.

use serde::{Deserialize, Serialize};

use super::LevelError;
use crate::consts::MAX_LEVEL_TILES;
use crate::sim::collision::Axis;
use crate::sim::gravity::Direction;
use crate::sim::switch::Channel;

/// Raw grid of tile codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDescription {
    pub width: usize,
    pub height: usize,
    /// Row-major: `y * width + x`
    pub tiles: Vec<String>,
}

impl LevelDescription {
    /// Parse the text format
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut lines = text.lines().map(|line| line.trim_end_matches('\r'));
        let width = parse_dimension(lines.next(), "width")?;
        let height = parse_dimension(lines.next(), "height")?;

        let mut desc = Self {
            width,
            height,
            tiles: vec![String::new(); tile_count(width, height)?],
        };
        for x in 0..width {
            for y in 0..height {
                let code = lines.next().ok_or(LevelError::MissingTile { x, y })?;
                desc.tiles[y * width + x] = code.trim().to_string();
            }
        }
        Ok(desc)
    }

    /// Write the text format
    pub fn to_text(&self) -> String {
        let mut text = format!("{}\n{}\n", self.width, self.height);
        for x in 0..self.width {
            for y in 0..self.height {
                text.push_str(self.tile(x, y));
                text.push('\n');
            }
        }
        text
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let desc: Self = serde_json::from_str(json)?;
        desc.validate()?;
        Ok(desc)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Dimensions must be in range and the tile count must match them
    pub fn validate(&self) -> Result<(), LevelError> {
        let expected = tile_count(self.width, self.height)?;
        if self.tiles.len() != expected {
            return Err(LevelError::TileCount {
                expected,
                found: self.tiles.len(),
            });
        }
        Ok(())
    }

    /// Code at a tile, empty outside the grid
    pub fn tile(&self, x: usize, y: usize) -> &str {
        if x >= self.width || y >= self.height {
            return "";
        }
        self.tiles.get(y * self.width + x).map_or("", String::as_str)
    }

    pub fn set_tile(&mut self, x: usize, y: usize, code: impl Into<String>) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = code.into();
        }
    }
}

/// Number of cells in a grid, rejecting grids too big to build
fn tile_count(width: usize, height: usize) -> Result<usize, LevelError> {
    width
        .checked_mul(height)
        .filter(|&count| count <= MAX_LEVEL_TILES)
        .ok_or(LevelError::TooLarge { width, height })
}

fn parse_dimension(line: Option<&str>, name: &'static str) -> Result<usize, LevelError> {
    let line = line.ok_or(LevelError::MissingDimension(name))?;
    line.trim().parse().map_err(|_| LevelError::InvalidDimension {
        name,
        value: line.to_string(),
    })
}

/// Cosmetic shape of a static tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileVariant {
    #[default]
    Box,
    Cap,
    Sides,
    Corner,
    Single,
}

impl TileVariant {
    fn from_code(code: char) -> Option<Self> {
        match code {
            'b' => Some(Self::Box),
            'e' => Some(Self::Cap),
            's' => Some(Self::Sides),
            'c' => Some(Self::Corner),
            'o' => Some(Self::Single),
            _ => None,
        }
    }

    pub fn texture(self) -> &'static str {
        match self {
            Self::Box => "PlatformBox",
            Self::Cap => "PlatformCap",
            Self::Sides => "PlatformSides",
            Self::Corner => "PlatformCorner",
            Self::Single => "PlatformSingle",
        }
    }
}

/// What a tile code builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    /// Spikes; `half` ones fill only the lower half of the tile
    Hazard { half: bool },
    Tile(TileVariant),
    Goal,
    Spawn,
    /// Dangerous mover that can't be killed
    Snail,
    Laser { channel: Channel, initially_off: bool },
    Switch { channel: Channel },
    /// `length` tiles wide, travels up to `range` tiles along `axis`
    Platform { axis: Axis, length: u32, range: u32 },
    Crate,
}

/// A decoded tile code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCode {
    pub kind: TileKind,
    pub facing: Option<Direction>,
}

impl TileCode {
    pub const EMPTY: Self = Self {
        kind: TileKind::Empty,
        facing: None,
    };

    pub fn parse(code: &str) -> Result<Self, LevelError> {
        let chars: Vec<char> = code.chars().collect();
        let Some(&category) = chars.first() else {
            return Ok(Self::EMPTY);
        };

        let kind = match category {
            '0' => TileKind::Hazard {
                half: chars.get(1) == Some(&'s'),
            },
            '1' => TileKind::Tile(chars.get(1).copied().and_then(TileVariant::from_code).unwrap_or_default()),
            '2' => TileKind::Goal,
            '3' => TileKind::Spawn,
            '4' => TileKind::Snail,
            '5' => parse_puzzle(code, &chars)?,
            '6' if chars.len() > 2 => parse_platform(code, &chars)?,
            '6' => TileKind::Crate,
            _ => TileKind::Empty,
        };
        if kind == TileKind::Empty {
            return Ok(Self::EMPTY);
        }

        let facing = chars.last().copied().and_then(Direction::from_code);
        Ok(Self { kind, facing })
    }
}

/// `5<channel><l|b>[i]`
fn parse_puzzle(code: &str, chars: &[char]) -> Result<TileKind, LevelError> {
    let channel = chars
        .get(1)
        .copied()
        .and_then(Channel::from_code)
        .ok_or_else(|| LevelError::UnknownChannel { code: code.to_string() })?;

    match chars.get(2) {
        Some('l') => Ok(TileKind::Laser {
            channel,
            initially_off: chars.get(3) == Some(&'i'),
        }),
        Some('b') => Ok(TileKind::Switch { channel }),
        _ => Err(LevelError::UnknownVariant { code: code.to_string() }),
    }
}

/// `6<X|Y><length><range>`
fn parse_platform(code: &str, chars: &[char]) -> Result<TileKind, LevelError> {
    let invalid = || LevelError::InvalidPlatform { code: code.to_string() };
    let axis = match chars.get(1) {
        Some('X') => Axis::Horizontal,
        Some('Y') => Axis::Vertical,
        _ => return Err(invalid()),
    };
    let digit = |i: usize| chars.get(i).and_then(|c| c.to_digit(10));
    let length = digit(2).filter(|&n| n > 0).ok_or_else(invalid)?;
    let range = digit(3).ok_or_else(invalid)?;
    Ok(TileKind::Platform { axis, length, range })
}
