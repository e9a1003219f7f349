//! 8-bit HSV conversion and range masks
//!
//! Hue is stored halved (`0..180`) so it fits a byte; saturation and value
//! span `0..=255`. Rounding follows the fixed-point convention of common
//! vision libraries: round half up, then wrap negative hues.

use image::Rgb;

/// Pixel in 8-bit HSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    /// Hue in `0..180`
    pub h: u8,
    /// Saturation in `0..=255`
    pub s: u8,
    /// Value in `0..=255`
    pub v: u8,
}

impl Hsv {
    /// Convert an RGB pixel
    pub fn from_rgb(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
        let v = r.max(g).max(b);
        let diff = v - r.min(g).min(b);

        let s = if v == 0 {
            0
        } else {
            round_half_up(255.0 * f64::from(diff) / f64::from(v))
        };

        let h = if diff == 0 {
            0
        } else {
            let diff = f64::from(diff);
            let sector = if v == r {
                30.0 * f64::from(g - b) / diff
            } else if v == g {
                30.0 * f64::from(b - r) / diff + 60.0
            } else {
                30.0 * f64::from(r - g) / diff + 120.0
            };
            let h = round_half_up(sector);
            if h < 0 { h + 180 } else { h }
        };

        Self {
            h: h.clamp(0, 179) as u8,
            s: s.clamp(0, 255) as u8,
            v: v as u8,
        }
    }

    /// Inclusive per-channel range check
    pub fn in_range(&self, lower: [u8; 3], upper: [u8; 3]) -> bool {
        let channels = [self.h, self.s, self.v];
        channels
            .iter()
            .zip(lower.iter().zip(upper.iter()))
            .all(|(value, (low, high))| (low..=high).contains(&value))
    }
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
