//! HSL ↔ hex conversion for the accent color picker.

use serde::Serialize;

use crate::style::color::Rgb;

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    /// Wraps the hue and clamps saturation and lightness into range.
    pub fn normalized(h: f32, s: f32, l: f32) -> Self {
        let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            h: finite(h).rem_euclid(360.0),
            s: finite(s).clamp(0.0, 100.0),
            l: finite(l).clamp(0.0, 100.0),
        }
    }

    pub fn to_rgb(self) -> Rgb {
        let Hsl { h, s, l } = Self::normalized(self.h, self.s, self.l);
        let (s, l) = (s / 100.0, l / 100.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
        }
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        let (r, g, b) = rgb.unit_channels();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;
        if d == 0.0 {
            return Self {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
            };
        }

        let s = d / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / d + 2.0)
        } else {
            60.0 * ((r - g) / d + 4.0)
        };
        Self {
            h: h.rem_euclid(360.0),
            s: s * 100.0,
            l: l * 100.0,
        }
    }
}

pub fn hsl_to_hex(h: f32, s: f32, l: f32) -> String {
    Hsl { h, s, l }.to_rgb().to_hex()
}

pub fn hex_to_hsl(hex: &str) -> Hsl {
    Hsl::from_rgb(Rgb::parse_lossy(hex))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(hsl_to_hex(0.0, 100.0, 50.0), "#FF0000");
        assert_eq!(hsl_to_hex(120.0, 100.0, 50.0), "#00FF00");
        assert_eq!(hsl_to_hex(240.0, 100.0, 50.0), "#0000FF");
        assert_eq!(hsl_to_hex(0.0, 0.0, 100.0), "#FFFFFF");
        assert_eq!(hsl_to_hex(0.0, 0.0, 0.0), "#000000");
    }

    #[test]
    fn test_out_of_range_inputs_are_normalized() {
        assert_eq!(hsl_to_hex(480.0, 100.0, 50.0), hsl_to_hex(120.0, 100.0, 50.0));
        assert_eq!(hsl_to_hex(-120.0, 150.0, 50.0), "#0000FF");
        assert_eq!(hsl_to_hex(f32::NAN, 0.0, 200.0), "#FFFFFF");
    }

    #[test]
    fn test_hex_to_hsl_recovers_default_accent() {
        let hsl = hex_to_hsl("#3B82F6");
        assert!((hsl.h - 217.2).abs() < 0.5);
        assert!((hsl.s - 91.2).abs() < 0.5);
        assert!((hsl.l - 59.8).abs() < 0.5);
        assert_eq!(hsl_to_hex(hsl.h, hsl.s, hsl.l), "#3B82F6");
    }

    #[test]
    fn test_gray_has_no_hue() {
        let hsl = hex_to_hsl("#808080");
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
    }
}
