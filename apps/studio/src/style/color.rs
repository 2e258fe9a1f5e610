//! Accent color parsing and WCAG contrast helpers.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Best-effort parse of `#RGB` / `#RRGGBB` (leading `#` optional).
    ///
    /// Never fails: invalid hex digits count as 0 and missing digits are treated
    /// as absent channels, so garbage input yields a garbage but usable color.
    pub fn parse_lossy(s: &str) -> Rgb {
        let hex = s.trim().trim_start_matches('#');
        let digits: Vec<u8> = hex.chars().map(hex_digit).collect();

        if digits.len() == 3 {
            return Rgb {
                r: digits[0] * 17,
                g: digits[1] * 17,
                b: digits[2] * 17,
            };
        }

        let channel = |i: usize| -> u8 {
            let hi = digits.get(i).copied().unwrap_or(0);
            let lo = digits.get(i + 1).copied().unwrap_or(0);
            hi * 16 + lo
        };
        Rgb {
            r: channel(0),
            g: channel(2),
            b: channel(4),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// WCAG 2.1 relative luminance, 0.0 (black) to 1.0 (white).
    pub fn relative_luminance(&self) -> f32 {
        fn channel(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// Fill for PDF operators, each channel in 0.0..=1.0.
    pub fn unit_channels(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

fn hex_digit(c: char) -> u8 {
    c.to_digit(16).map(|d| d as u8).unwrap_or(0)
}

/// Contrast ratio between two luminances, 1.0 to 21.0.
pub fn contrast_ratio(l1: f32, l2: f32) -> f32 {
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + 0.05) / (darker + 0.05)
}

/// Foreground text color to place on top of `background`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    pub fn css(&self) -> &'static str {
        match self {
            TextColor::Black => "#000000",
            TextColor::White => "#FFFFFF",
        }
    }

    pub fn rgb(&self) -> Rgb {
        match self {
            TextColor::Black => Rgb::BLACK,
            TextColor::White => Rgb::WHITE,
        }
    }
}

/// Picks black or white text, whichever contrasts more with `background`.
///
/// Pure white and pure black are answered directly; everything else goes
/// through the luminance formula.
pub fn text_color_for(background: &str) -> TextColor {
    let normalized = background.trim().to_ascii_uppercase();
    match normalized.as_str() {
        "#FFFFFF" | "#FFF" => return TextColor::Black,
        "#000000" | "#000" => return TextColor::White,
        _ => {}
    }

    let luminance = Rgb::parse_lossy(&normalized).relative_luminance();
    let with_black = contrast_ratio(luminance, 0.0);
    let with_white = contrast_ratio(luminance, 1.0);
    if with_black >= with_white {
        TextColor::Black
    } else {
        TextColor::White
    }
}
