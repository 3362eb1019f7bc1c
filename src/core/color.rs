//! RGB color values used for menu and overlay highlights.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{IndicatorError, Result};

lazy_static! {
    // Optional '#', optional alpha byte, then rrggbb.
    static ref HEX_COLOR: Regex =
        Regex::new(r"^#?(?:[0-9a-fA-F]{2})?([0-9a-fA-F]{6})$").expect("Invalid color regex");
}

/// Opaque RGB color. Alpha from host-formatted `#aarrggbb` strings is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xff);
    pub const CYAN: Color = Color::rgb(0x00, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `rrggbb`, `#rrggbb` or `#aarrggbb`.
    pub fn from_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = HEX_COLOR
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| IndicatorError::ColorParse(input.to_string()))?
            .as_str();

        let packed = u32::from_str_radix(digits, 16)
            .map_err(|_| IndicatorError::ColorParse(input.to_string()))?;
        let [_, r, g, b] = packed.to_be_bytes();
        Ok(Self::rgb(r, g, b))
    }

    /// Lower-case `rrggbb` without a leading '#'.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::CYAN
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = IndicatorError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
