//! Color tokens and the class palette.

use std::{fmt, str::FromStr};

use anyhow::{Context, Result, anyhow, ensure};
use serde::{Deserialize, Serialize};

/// Simple RGB color, parsed from and printed as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #RRGGBB
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    /// Accepts `#RRGGBB` and the short `#RGB` form.
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().strip_prefix('#')
            .ok_or_else(|| anyhow!("[classify::color] Color {s:?} must start with '#'"))?;
        ensure!(hex.chars().all(|c| c.is_ascii_hexdigit()), "[classify::color] Color {s:?} is not hex");

        let channel = |digits: &str| -> Result<u8> {
            let value = u8::from_str_radix(digits, 16)
                .with_context(|| format!("[classify::color] Invalid hex digits {digits:?} in {s:?}"))?;
            Ok(if digits.len() == 1 { value * 17 } else { value })
        };

        match hex.len() {
            6 => Ok(Rgb::new(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => Ok(Rgb::new(channel(&hex[0..1])?, channel(&hex[1..2])?, channel(&hex[2..3])?)),
            _ => Err(anyhow!("[classify::color] Color {s:?} must have 3 or 6 hex digits")),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> { value.parse() }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self { color.to_string() }
}

/// Ordered class colors (least to most intense) plus the missing-data color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPalette")]
pub struct Palette {
    classes: Vec<Rgb>,
    missing: Rgb,
}

#[derive(Deserialize)]
struct RawPalette {
    classes: Vec<Rgb>,
    #[serde(default = "missing_color")]
    missing: Rgb,
}

fn missing_color() -> Rgb { Palette::MISSING }

impl TryFrom<RawPalette> for Palette {
    type Error = anyhow::Error;

    fn try_from(raw: RawPalette) -> Result<Self> { Palette::new(raw.classes, raw.missing) }
}

impl Palette {
    pub const MISSING: Rgb = Rgb::new(0xCC, 0xCC, 0xCC);

    /// Build a palette; at least one class color is required and the missing color must
    /// differ from every class color.
    pub fn new(classes: Vec<Rgb>, missing: Rgb) -> Result<Self> {
        ensure!(!classes.is_empty(), "[classify::color] Palette needs at least one class color");
        ensure!(!classes.contains(&missing),
            "[classify::color] Missing-data color {missing} is also a class color");
        Ok(Self { classes, missing })
    }

    #[inline]
    pub fn len(&self) -> usize { self.classes.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.classes.is_empty() }

    pub fn classes(&self) -> &[Rgb] { &self.classes }

    pub fn missing(&self) -> Rgb { self.missing }

    /// Color of class `class`, clamped to the last class.
    pub fn class_color(&self, class: usize) -> Rgb {
        self.classes[class.min(self.classes.len() - 1)]
    }
}

impl Default for Palette {
    /// Five-class purple-red ramp.
    fn default() -> Self {
        Self {
            classes: vec![
                Rgb::new(0xD4, 0xB9, 0xDA),
                Rgb::new(0xC9, 0x94, 0xC7),
                Rgb::new(0xDF, 0x65, 0xB0),
                Rgb::new(0xDD, 0x1C, 0x77),
                Rgb::new(0x98, 0x00, 0x43),
            ],
            missing: Self::MISSING,
        }
    }
}
