//! Colour parsing and CSS serialisation for colour tokens.

use std::fmt;
use std::str::FromStr;

use crate::error::{DtkError, Result};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        let nibble = |i: usize| parse_hex_digit(&hex[i..i + 1]).map(|d| d << 4 | d);
        let byte = |i: usize| parse_hex_byte(&hex[i * 2..i * 2 + 2]);

        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Ok(Self::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(1)?, byte(2)?)),
            8 => Ok(Self::new(byte(0)?, byte(1)?, byte(2)?, byte(3)?)),
            _ => Err(invalid_hex(s)),
        }
    }

    /// Parse a CSS colour: hex with a leading `#`, or `rgb()`/`rgba()` in
    /// comma or space syntax (`rgb(255 0 0 / 50%)`). Named colours are not
    /// recognised.
    pub fn parse_css(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }

        let lower = s.to_ascii_lowercase();
        let args = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| invalid_colour(s))?;

        let (channels, alpha) = match args.split_once('/') {
            Some((channels, alpha)) => (channels, Some(alpha.trim())),
            None => (args, None),
        };
        let mut parts: Vec<&str> = channels
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        let alpha = match (alpha, parts.len()) {
            (Some(alpha), 3) => alpha,
            (None, 4) => parts.pop().unwrap_or_default(),
            (None, 3) => "1",
            _ => return Err(invalid_colour(s)),
        };

        let channel = |p: &str| parse_component(p, 255.0).ok_or_else(|| invalid_colour(s));
        Ok(Self::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            parse_component(alpha, 1.0).ok_or_else(|| invalid_colour(s))?,
        ))
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Alpha as a fraction in `0..=1`, rounded to two decimals.
    pub fn alpha(self) -> f64 {
        (f64::from(self.a) / 255.0 * 100.0).round() / 100.0
    }

    /// Lowercase `#rrggbb`, dropping alpha.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Lowercase `#rrggbbaa`.
    pub fn to_hex8(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// `rgb(r, g, b)` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_rgb_string(self) -> String {
        if self.is_opaque() {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha())
        }
    }

    /// Hex when opaque, `rgba(...)` otherwise.
    pub fn to_css(self) -> String {
        if self.is_opaque() {
            self.to_hex()
        } else {
            self.to_rgb_string()
        }
    }
}

impl FromStr for Colour {
    type Err = DtkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_css(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

fn invalid_hex(s: &str) -> DtkError {
    DtkError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

fn invalid_colour(s: &str) -> DtkError {
    DtkError::Parse {
        message: format!("Invalid colour: {}", s),
        help: Some("Use a hex colour (#RRGGBB) or rgb()/rgba()".to_string()),
    }
}

/// A channel as a byte. `scale` is the value of a full channel when written
/// as a plain number (255 for colours, 1 for alpha); percentages are scaled.
fn parse_component(p: &str, scale: f64) -> Option<u8> {
    let fraction = match p.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().ok()? / 100.0,
        None => p.trim().parse::<f64>().ok()? / scale,
    };
    if !fraction.is_finite() {
        return None;
    }
    Some((fraction.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn parse_hex_digit(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| DtkError::Parse {
        message: format!("Invalid hex digit: {}", s),
        help: None,
    })
}

fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| DtkError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_formats() {
        assert_eq!(Colour::from_hex("#FF0000").unwrap(), Colour::rgb(255, 0, 0));
        assert_eq!(Colour::from_hex("#abc").unwrap(), Colour::rgb(0xaa, 0xbb, 0xcc));
        assert_eq!(Colour::from_hex("#FF000080").unwrap(), Colour::new(255, 0, 0, 128));
        assert_eq!(Colour::from_hex("#F008").unwrap(), Colour::new(255, 0, 0, 0x88));
        assert_eq!(Colour::from_hex("ff0000").unwrap(), Colour::rgb(255, 0, 0));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("transparent").is_err());
        assert!(Colour::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_parse_css_functional() {
        assert_eq!(Colour::parse_css("rgb(255, 0, 0)").unwrap(), Colour::rgb(255, 0, 0));
        assert_eq!(
            Colour::parse_css("rgba(128, 128, 128, 0.5)").unwrap(),
            Colour::new(128, 128, 128, 128)
        );
        assert_eq!(
            Colour::parse_css("RGB(0 0 255 / 50%)").unwrap(),
            Colour::new(0, 0, 255, 128)
        );
        assert_eq!(Colour::parse_css("rgb(100%, 0%, 0%)").unwrap(), Colour::rgb(255, 0, 0));
        assert_eq!(Colour::parse_css(" #F00 ").unwrap(), Colour::rgb(255, 0, 0));
    }

    #[test]
    fn test_parse_css_rejects_other_syntax() {
        assert!(Colour::parse_css("red").is_err());
        assert!(Colour::parse_css("ff0000").is_err());
        assert!(Colour::parse_css("rgb(1, 2)").is_err());
        assert!(Colour::parse_css("rgb(1, 2, x)").is_err());
        assert!(Colour::parse_css("hsl(0, 100%, 50%)").is_err());
    }

    #[test]
    fn test_css_output() {
        let red = Colour::rgb(255, 0, 0);
        assert_eq!(red.to_hex(), "#ff0000");
        assert_eq!(red.to_hex8(), "#ff0000ff");
        assert_eq!(red.to_rgb_string(), "rgb(255, 0, 0)");
        assert_eq!(red.to_css(), "#ff0000");

        let translucent = Colour::new(255, 0, 0, 128);
        assert_eq!(translucent.alpha(), 0.5);
        assert_eq!(translucent.to_css(), "rgba(255, 0, 0, 0.5)");
        assert_eq!(translucent.to_hex(), "#ff0000");
    }
}
