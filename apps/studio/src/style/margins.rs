use serde::{Deserialize, Serialize};

/// Page margins in on-screen pixels (96 dpi).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for PageMargins {
    fn default() -> Self {
        MarginPreset::Normal.margins()
    }
}

impl PageMargins {
    pub const fn uniform(px: f32) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }

    /// The preset these margins correspond to, or `Custom`.
    pub fn preset(&self) -> MarginPreset {
        MarginPreset::PRESETS
            .into_iter()
            .find(|p| p.margins() == *self)
            .unwrap_or(MarginPreset::Custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginPreset {
    Normal,
    Narrow,
    Moderate,
    Wide,
    Custom,
}

impl MarginPreset {
    /// Presets with fixed values. `Custom` is not one of them.
    pub const PRESETS: [MarginPreset; 4] = [
        MarginPreset::Normal,
        MarginPreset::Narrow,
        MarginPreset::Moderate,
        MarginPreset::Wide,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MarginPreset::Normal => "Normal",
            MarginPreset::Narrow => "Narrow",
            MarginPreset::Moderate => "Moderate",
            MarginPreset::Wide => "Wide",
            MarginPreset::Custom => "Custom",
        }
    }

    /// Concrete margins for the preset. `Custom` has no values of its own and
    /// resolves to the normal margins.
    pub fn margins(&self) -> PageMargins {
        match self {
            MarginPreset::Normal | MarginPreset::Custom => PageMargins::uniform(96.0),
            MarginPreset::Narrow => PageMargins::uniform(48.0),
            MarginPreset::Moderate => PageMargins {
                top: 96.0,
                right: 72.0,
                bottom: 96.0,
                left: 72.0,
            },
            MarginPreset::Wide => PageMargins {
                top: 96.0,
                right: 192.0,
                bottom: 96.0,
                left: 192.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_roundtrip_is_idempotent() {
        for preset in MarginPreset::PRESETS {
            let applied = preset.margins();
            assert_eq!(applied.preset(), preset);
            assert_eq!(applied.preset().margins().preset(), preset);
        }
    }

    #[test]
    fn test_presets_are_distinct() {
        for (i, a) in MarginPreset::PRESETS.iter().enumerate() {
            for b in &MarginPreset::PRESETS[i + 1..] {
                assert_ne!(a.margins(), b.margins());
            }
        }
    }

    #[test]
    fn test_off_preset_values_are_custom() {
        let m = PageMargins {
            top: 96.0,
            right: 70.0,
            bottom: 96.0,
            left: 72.0,
        };
        assert_eq!(m.preset(), MarginPreset::Custom);
    }

    #[test]
    fn test_negative_margins_invalid() {
        assert!(!PageMargins::uniform(-1.0).is_valid());
        assert!(PageMargins::default().is_valid());
    }
}
