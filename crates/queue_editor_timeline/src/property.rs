// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animatable property values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The animatable properties of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Bounding rectangle (position and size)
    Position,
    /// Uniform scale factor
    Scale,
    /// Opacity
    Opacity,
    /// Rotation angle in degrees
    Rotation,
    /// Fill color
    Fill,
    /// Stroke color and width
    Stroke,
    /// Text content
    Text,
    /// Visibility flag
    Visibility,
}

impl PropertyKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Scale => "scale",
            Self::Opacity => "opacity",
            Self::Rotation => "rotation",
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::Text => "text",
            Self::Visibility => "visibility",
        }
    }

    /// Get all property kinds
    pub fn all() -> &'static [PropertyKind] {
        &[
            PropertyKind::Position,
            PropertyKind::Scale,
            PropertyKind::Opacity,
            PropertyKind::Rotation,
            PropertyKind::Fill,
            PropertyKind::Stroke,
            PropertyKind::Text,
            PropertyKind::Visibility,
        ]
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bounding rectangle, carried by `move` effects
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Uniform scale factor, carried by `scale` effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Scale multiplier (1.0 = authored size)
    pub scale: f32,
}

impl Scale {
    /// Create a scale value
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Opacity, carried by `fade` effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opacity {
    /// Opacity in `[0, 1]`
    pub opacity: f32,
}

impl Opacity {
    /// Create an opacity value
    pub fn new(opacity: f32) -> Self {
        Self { opacity }
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self { opacity: 1.0 }
    }
}

/// Rotation, carried by `rotate` effects
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    /// Angle in degrees, not normalized
    pub degree: f32,
}

impl Rotation {
    /// Create a rotation value
    pub fn new(degree: f32) -> Self {
        Self { degree }
    }
}

/// RGBA color with channels in `[0, 1]`
///
/// Deserializes from either the channel struct or a hex string
/// (`#rgb`, `#rrggbb`, `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque white
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create a color from channels
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError(hex.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(hex.to_string()));
        }

        let channel = |s: &str| -> Result<f32, ColorParseError> {
            u8::from_str_radix(s, 16)
                .map(|v| f32::from(v) / 255.0)
                .map_err(|_| ColorParseError(hex.to_string()))
        };

        match digits.len() {
            3 => {
                let expand = |i: usize| digits[i..=i].repeat(2);
                Ok(Self::rgba(
                    channel(&expand(0))?,
                    channel(&expand(1))?,
                    channel(&expand(2))?,
                    1.0,
                ))
            }
            6 | 8 => Ok(Self::rgba(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                if digits.len() == 8 { channel(&digits[6..8])? } else { 1.0 },
            )),
            _ => Err(ColorParseError(hex.to_string())),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Invalid hex color string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid hex color: {0:?}")]
pub struct ColorParseError(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Channels {
        r: f32,
        g: f32,
        b: f32,
        #[serde(default = "opaque")]
        a: f32,
    },
}

fn opaque() -> f32 {
    1.0
}

impl TryFrom<ColorRepr> for Color {
    type Error = ColorParseError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(hex) => Color::from_hex(&hex),
            ColorRepr::Channels { r, g, b, a } => Ok(Color::rgba(r, g, b, a)),
        }
    }
}

/// Fill, carried by `fill` effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// Fill color
    pub color: Color,
}

impl Fill {
    /// Create a fill value
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self { color: Color::WHITE }
    }
}

/// Stroke, carried by `stroke` effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl Stroke {
    /// Create a stroke value
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 0.0,
        }
    }
}

/// Text content, carried by `text` effects
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Text {
    /// Text content
    pub text: String,
}

impl Text {
    /// Create a text value
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors() {
        assert_eq!(Color::from_hex("#ffffff").unwrap(), Color::WHITE);
        assert_eq!(Color::from_hex("#000").unwrap(), Color::BLACK);
        assert_eq!(Color::from_hex("#00000000").unwrap(), Color::TRANSPARENT);

        let red = Color::from_hex("#ff0000").unwrap();
        assert_eq!(red, Color::rgba(1.0, 0.0, 0.0, 1.0));

        assert!(Color::from_hex("ffffff").is_err());
        assert!(Color::from_hex("#ffff").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#+f+f+f").is_err());
        assert!(Color::from_hex("#+ff").is_err());
    }

    #[test]
    fn test_color_deserialization() {
        let hex: Color = serde_json::from_str("\"#ff0000\"").unwrap();
        assert_eq!(hex, Color::rgba(1.0, 0.0, 0.0, 1.0));

        let channels: Color = serde_json::from_str(r#"{"r":0.5,"g":0.25,"b":0.0}"#).unwrap();
        assert_eq!(channels, Color::rgba(0.5, 0.25, 0.0, 1.0));

        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Scale::default().scale, 1.0);
        assert_eq!(Opacity::default().opacity, 1.0);
        assert_eq!(Rotation::default().degree, 0.0);
        assert_eq!(PropertyKind::all().len(), 8);
    }
}
