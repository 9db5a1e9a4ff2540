//! Colors as they appear in configuration: hex strings in, RGB out
//!
//! Every color option in [`crate::RenderConfig`] is a `#RRGGBB` string. This
//! module turns those strings into [`Color`] values and back, and samples the
//! linear gradients used for gradient backgrounds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the short `#RGB` form.
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || ConfigError::InvalidColor(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
                Ok(Self::rgb(
                    channel(0).map_err(|_| invalid())?,
                    channel(2).map_err(|_| invalid())?,
                    channel(4).map_err(|_| invalid())?,
                ))
            },
            3 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
                Ok(Self::rgb(
                    channel(0).map_err(|_| invalid())?,
                    channel(1).map_err(|_| invalid())?,
                    channel(2).map_err(|_| invalid())?,
                ))
            },
            _ => Err(invalid()),
        }
    }

    /// Lowercase `#rrggbb`; alpha is not encoded.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The color as an `[r, g, b]` triple
    pub fn to_rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Channel-wise interpolation, truncating toward `self` like the
    /// gradient code it serves.
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Axis along which a gradient runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    /// Top (start color) to bottom (end color)
    #[default]
    Vertical,
    /// Left (start color) to right (end color)
    Horizontal,
}

/// Two-stop linear gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Color,
    pub end: Color,
    pub direction: GradientDirection,
}

impl LinearGradient {
    pub fn new(start: Color, end: Color, direction: GradientDirection) -> Self {
        Self {
            start,
            end,
            direction,
        }
    }

    /// Color at `position` along an axis of `length` pixels.
    ///
    /// Position 0 is exactly the start color; the end color is approached but
    /// only reached at `position == length`.
    pub fn sample(&self, position: u32, length: u32) -> Color {
        if length == 0 {
            return self.start;
        }
        self.start
            .lerp(&self.end, position as f32 / length as f32)
    }

    /// Color of the pixel at `(x, y)` on a `width`×`height` canvas
    pub fn sample_at(&self, x: u32, y: u32, width: u32, height: u32) -> Color {
        match self.direction {
            GradientDirection::Vertical => self.sample(y, height),
            GradientDirection::Horizontal => self.sample(x, width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::from_hex("#1a472a").unwrap(), Color::rgb(0x1a, 0x47, 0x2a));
        assert_eq!(Color::from_hex("FFD700").unwrap(), Color::rgb(255, 215, 0));
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::white());
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#+12345").is_err());
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::rgb(204, 204, 204)).unwrap();
        assert_eq!(json, "\"#cccccc\"");
        let back: Color = serde_json::from_str("\"#CCCCCC\"").unwrap();
        assert_eq!(back, Color::rgb(204, 204, 204));
    }

    #[test]
    fn gradient_starts_at_start_color() {
        let gradient = LinearGradient::new(Color::black(), Color::white(), GradientDirection::Vertical);
        assert_eq!(gradient.sample(0, 100), Color::black());
        assert_eq!(gradient.sample(50, 100), Color::rgb(127, 127, 127));
        assert_eq!(gradient.sample(100, 100), Color::white());
    }

    #[test]
    fn gradient_direction_picks_axis() {
        let gradient =
            LinearGradient::new(Color::black(), Color::white(), GradientDirection::Horizontal);
        assert_eq!(gradient.sample_at(0, 99, 10, 100), Color::black());
        assert_ne!(gradient.sample_at(9, 0, 10, 100), Color::black());
    }

    proptest! {
        #[test]
        fn prop_hex_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let color = Color::rgb(r, g, b);
            prop_assert_eq!(Color::from_hex(&color.to_hex()).unwrap(), color);
        }
    }
}
