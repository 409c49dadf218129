//! This module handles the colours of the scene.

use crate::RGBArray;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// The error returned when parsing a [`HexColour`] fails.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ParseColourError {
    #[error("Expected 6 hex digits but found {0}")]
    WrongLength(usize),

    #[error("Invalid hex digits in colour `{0}`")]
    InvalidDigit(String),
}

/// An RGB colour written as `#RRGGBB` in config files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColour(pub RGBArray);

impl HexColour {
    /// Parse a colour from a hex string, with or without the leading `#`.
    pub fn parse(text: &str) -> Result<Self, ParseColourError> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(ParseColourError::WrongLength(digits.len()));
        }

        // `from_str_radix` accepts a leading sign, so check the digits ourselves
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColourError::InvalidDigit(text.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| ParseColourError::InvalidDigit(text.to_string()))
        };

        Ok(Self([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }

    /// The raw RGB channels.
    pub const fn rgb(&self) -> RGBArray {
        self.0
    }

    /// The channels as floats in `[0, 1]`, in sRGB space.
    pub fn rgb_f32(&self) -> [f32; 3] {
        let [r, g, b] = self.0;
        [r as f32 / 255., g as f32 / 255., b as f32 / 255.]
    }

    /// The channels scaled by `strength`, for an emissive surface bright enough to bloom.
    pub fn emissive(&self, strength: f32) -> [f32; 3] {
        self.rgb_f32().map(|c| c * strength)
    }
}

impl fmt::Display for HexColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for HexColour {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColour {
    type Error = ParseColourError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColour> for String {
    fn from(value: HexColour) -> Self {
        value.to_string()
    }
}

/// Every colour used in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// The foliage particles.
    pub emerald: HexColour,

    /// The ball ornaments, sparkles, title, and the light of the top star.
    pub gold: HexColour,

    /// The surface of the top star.
    pub bright_gold: HexColour,

    /// The gift box ornaments.
    pub red: HexColour,

    /// The clear colour behind everything.
    pub background: HexColour,

    /// The border and text of the toggle button.
    pub button_accent: HexColour,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            emerald: HexColour([0x00, 0x29, 0x15]),
            gold: HexColour([0xff, 0xd7, 0x00]),
            bright_gold: HexColour([0xff, 0xfa, 0xcd]),
            red: HexColour([0xb2, 0x22, 0x22]),
            background: HexColour([0x00, 0x1a, 0x0a]),
            button_accent: HexColour([0xd4, 0xaf, 0x37]),
        }
    }
}
