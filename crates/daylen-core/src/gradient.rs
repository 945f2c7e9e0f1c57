//! Color gradients for isoline rings.
//!
//! Colors are interpolated in hue/lightness/saturation space, with the
//! channel conventions of Python's `colorsys` (all channels in [0, 1], hue
//! as a fraction of a turn). A red-to-green gradient therefore passes
//! through yellow instead of muddy brown.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DaylenError;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Rgb {
    type Err = DaylenError;

    /// Parse `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(DaylenError::InvalidColor(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| DaylenError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = DaylenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hue, lightness, saturation; every channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    pub h: f64,
    pub l: f64,
    pub s: f64,
}

impl Hls {
    fn channels(&self) -> [f64; 3] {
        [self.h, self.l, self.s]
    }

    fn from_channels([h, l, s]: [f64; 3]) -> Self {
        Self { h, l, s }
    }
}

impl From<Rgb> for Hls {
    fn from(color: Rgb) -> Self {
        let r = color.r as f64 / 255.0;
        let g = color.g as f64 / 255.0;
        let b = color.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        if max == min {
            return Self { h: 0.0, l, s: 0.0 };
        }

        let range = max - min;
        let s = if l <= 0.5 {
            range / (max + min)
        } else {
            range / (2.0 - max - min)
        };

        let rc = (max - r) / range;
        let gc = (max - g) / range;
        let bc = (max - b) / range;
        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Self {
            h: (h / 6.0).rem_euclid(1.0),
            l,
            s,
        }
    }
}

impl From<Hls> for Rgb {
    fn from(hls: Hls) -> Self {
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;

        if hls.s == 0.0 {
            let v = to_byte(hls.l);
            return Rgb::new(v, v, v);
        }

        let m2 = if hls.l <= 0.5 {
            hls.l * (1.0 + hls.s)
        } else {
            hls.l + hls.s - hls.l * hls.s
        };
        let m1 = 2.0 * hls.l - m2;

        Rgb::new(
            to_byte(hue_to_channel(m1, m2, hls.h + 1.0 / 3.0)),
            to_byte(hue_to_channel(m1, m2, hls.h)),
            to_byte(hue_to_channel(m1, m2, hls.h - 1.0 / 3.0)),
        )
    }
}

fn hue_to_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

/// Color for `value` on an HLS gradient from `start` (at `min_value`) to
/// `end` (at `max_value`).
///
/// `value` is clamped into the domain first. A degenerate domain
/// (`max_value <= min_value`) yields `start`.
pub fn color_for(value: f64, min_value: f64, max_value: f64, start: Rgb, end: Rgb) -> Rgb {
    let span = max_value - min_value;
    if span.is_nan() || span <= 0.0 {
        return start;
    }

    let fraction = (value.clamp(min_value, max_value) - min_value) / span;
    let a = Hls::from(start).channels();
    let b = Hls::from(end).channels();

    let mut mixed = [0.0; 3];
    for (i, channel) in mixed.iter_mut().enumerate() {
        *channel = a[i] + (b[i] - a[i]) * fraction;
    }

    Rgb::from(Hls::from_channels(mixed))
}

/// Gradient endpoints plus the value domain they span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub min_value: f64,
    pub max_value: f64,
    pub start: Rgb,
    pub end: Rgb,
}

impl Gradient {
    pub fn new(min_value: f64, max_value: f64, start: Rgb, end: Rgb) -> Self {
        Self {
            min_value,
            max_value,
            start,
            end,
        }
    }

    pub fn color_for(&self, value: f64) -> Rgb {
        color_for(value, self.min_value, self.max_value, self.start, self.end)
    }
}
