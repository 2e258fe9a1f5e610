use serde::{Deserialize, Serialize};

/// Paper sizes offered in the builder. Dimensions are on-screen pixels at 96 dpi.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    /// US letter, 8.5" × 11".
    #[default]
    #[serde(rename = "short", alias = "letter")]
    Short,
    #[serde(rename = "A4", alias = "a4")]
    A4,
    /// 8.5" × 14".
    #[serde(rename = "legal")]
    Legal,
}

impl PaperSize {
    /// `(width, height)` in px.
    pub fn dimensions_px(&self) -> (f32, f32) {
        match self {
            PaperSize::Short => (816.0, 1056.0),
            PaperSize::A4 => (794.0, 1123.0),
            PaperSize::Legal => (816.0, 1344.0),
        }
    }

    pub fn width_px(&self) -> f32 {
        self.dimensions_px().0
    }

    pub fn height_px(&self) -> f32 {
        self.dimensions_px().1
    }

    /// `(width, height)` in PDF points (1px = 0.75pt).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        let (w, h) = self.dimensions_px();
        (px_to_pt(w), px_to_pt(h))
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaperSize::Short => "Short (Letter)",
            PaperSize::A4 => "A4",
            PaperSize::Legal => "Legal",
        }
    }
}

pub fn px_to_pt(px: f32) -> f32 {
    px * 0.75
}

pub fn pt_to_px(pt: f32) -> f32 {
    pt / 0.75
}
