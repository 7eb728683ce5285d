//! Palette color values.
//!
//! The grid produces two kinds of colors: a white level for the top row and
//! hue/saturation/brightness triples for every other row. Both are opaque.

use std::fmt;

use serde::{Deserialize, Serialize};

/// White level used for grid lines.
pub const GRID_LINE_WHITE: f32 = 0.5;

/// Opaque color produced by the palette grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaletteColor {
    /// Grayscale value, `0.0` is black and `1.0` is white.
    White { level: f32 },
    /// Hue, saturation and brightness, each in `0.0..=1.0`.
    Hsb {
        hue: f32,
        saturation: f32,
        brightness: f32,
    },
}

impl PaletteColor {
    pub fn white(level: f32) -> Self {
        Self::White { level }
    }

    pub fn hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self::Hsb {
            hue,
            saturation,
            brightness,
        }
    }

    /// Gray used to outline cells when grid lines are enabled.
    pub fn grid_line() -> Self {
        Self::white(GRID_LINE_WHITE)
    }

    /// Palette colors are always fully opaque.
    #[inline]
    pub fn alpha(&self) -> f32 {
        1.0
    }

    /// Convert to normalized RGB channels in `0.0..=1.0`.
    pub fn to_rgb_f32(self) -> [f32; 3] {
        match self {
            Self::White { level } => {
                let level = level.clamp(0.0, 1.0);
                [level, level, level]
            },
            Self::Hsb {
                hue,
                saturation,
                brightness,
            } => hsb_to_rgb(hue, saturation, brightness),
        }
    }

    /// Convert to 8 bit RGB channels.
    pub fn to_rgb8(self) -> Rgb {
        let [r, g, b] = self.to_rgb_f32();
        Rgb {
            r: channel_to_u8(r),
            g: channel_to_u8(g),
            b: channel_to_u8(b),
        }
    }

    /// `#rrggbb` representation of the color.
    pub fn to_hex(self) -> String {
        self.to_rgb8().to_string()
    }
}

/// 8 bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// HSB to RGB with every component in `0.0..=1.0`.
///
/// Hue wraps, so `1.0` is the same red as `0.0`.
fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> [f32; 3] {
    let s = saturation.clamp(0.0, 1.0);
    let v = brightness.clamp(0.0, 1.0);
    let h = (hue * 6.0).rem_euclid(6.0);

    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [r + m, g + m, b + m]
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
