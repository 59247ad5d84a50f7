//! # Chroma Color
//!
//! Conversion between hex, RGB(A) and HSL(A) color representations,
//! hex validation, and parsing of the CSS color subset the editor emits.
//!
//! Everything here is pure. [`parse_color`] is the only fallible entry
//! point for arbitrary text; it returns `None` for anything that is not
//! a color.

pub mod convert;
pub mod hex;
pub mod parse;

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

pub use convert::{hex_to_rgba, hsl_to_rgb, hsla_to_rgba, rgb_to_hsl, rgba_to_hex, rgba_to_hsla};
pub use hex::{normalize_hex, validate_hex, HexError, HexValidation};
pub use parse::{format_hsla, format_rgba, parse_color, to_hex, to_hsla_string, to_rgba_string};

/// RGB color, channels 0-255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }
}

/// RGB color with alpha in 0-1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 1.0 };

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

/// HSL color: hue in [0, 360), saturation and lightness in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn with_alpha(self, a: f64) -> Hsla {
        Hsla::new(self.h, self.s, self.l, a)
    }
}

/// HSL color with alpha in 0-1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    pub fn hsl(&self) -> Hsl {
        Hsl::new(self.h, self.s, self.l)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_rgba(&Rgba::opaque(self.r, self.g, self.b)))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_rgba(self))
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_hsla(&self.with_alpha(1.0)))
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_hsla(self))
    }
}

/// Returned when text is not a recognized color
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Not a color: {0}")]
pub struct ColorParseError(pub String);

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).ok_or_else(|| ColorParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "rgb(1, 2, 3)");
        assert_eq!(Rgba::new(1, 2, 3, 0.5).to_string(), "rgba(1, 2, 3, 0.50)");
        assert_eq!(Hsl::new(120.0, 50.0, 25.0).to_string(), "hsl(120, 50%, 25%)");
    }

    #[test]
    fn test_from_str() {
        let color: Rgba = "#ff0000".parse().unwrap();
        assert_eq!(color, Rgba::opaque(255, 0, 0));

        let err = "nope".parse::<Rgba>().unwrap_err();
        assert_eq!(err.to_string(), "Not a color: nope");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Rgba::new(255, 0, 0, 1.0)).unwrap();
        assert_eq!(json, r#"{"r":255,"g":0,"b":0,"a":1.0}"#);
    }
}
