//! Hex colour parsing for style and waveform palettes.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// An RGB colour with a `[0.0, 1.0]` alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn parse(hex: &str) -> Option<Rgb> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }
        match digits.len() {
            3 => {
                let mut channels = digits.chars().map(|c| c.to_digit(16).map(|v| (v * 17) as u8));
                Some(Rgb {
                    r: channels.next()??,
                    g: channels.next()??,
                    b: channels.next()??,
                })
            }
            6 => Some(Rgb {
                r: u8::from_str_radix(&digits[0..2], 16).ok()?,
                g: u8::from_str_radix(&digits[2..4], 16).ok()?,
                b: u8::from_str_radix(&digits[4..6], 16).ok()?,
            }),
            _ => None,
        }
    }

    /// Parse, falling back to `default` for malformed input.
    pub fn parse_or(hex: &str, default: Rgb) -> Rgb {
        Self::parse(hex).unwrap_or(default)
    }

    /// Attach an opacity given in percent (`[0, 100]`).
    pub fn with_opacity_pct(self, pct: f64) -> Rgba {
        let a = if pct.is_finite() {
            (pct / 100.0).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
