//! Section font-size tokens and their concrete pixel sizes.
//!
//! Every UI area (section key) has its own scale, so "medium" for the name line is
//! larger than "medium" for body text. Keys the user never touched fall back to the
//! key's default token; keys the renderer does not know use the body scale.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeToken {
    ExtraSmall,
    Small,
    Medium,
    Large,
}

impl SizeToken {
    fn index(self) -> usize {
        match self {
            SizeToken::ExtraSmall => 0,
            SizeToken::Small => 1,
            SizeToken::Medium => 2,
            SizeToken::Large => 3,
        }
    }
}

/// Areas of the rendered resume whose font size can be tuned independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Name,
    Profession,
    Contact,
    SectionTitle,
    Summary,
    Experience,
    Education,
    Projects,
    Skills,
    Languages,
    Additional,
}

impl SectionKey {
    pub const ALL: [SectionKey; 11] = [
        SectionKey::Name,
        SectionKey::Profession,
        SectionKey::Contact,
        SectionKey::SectionTitle,
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Projects,
        SectionKey::Skills,
        SectionKey::Languages,
        SectionKey::Additional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Name => "name",
            SectionKey::Profession => "profession",
            SectionKey::Contact => "contact",
            SectionKey::SectionTitle => "section_title",
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Projects => "projects",
            SectionKey::Skills => "skills",
            SectionKey::Languages => "languages",
            SectionKey::Additional => "additional",
        }
    }

    /// Token used when the resume has no entry for this key.
    pub fn default_token(&self) -> SizeToken {
        match self {
            SectionKey::Name => SizeToken::Large,
            SectionKey::Profession | SectionKey::SectionTitle => SizeToken::Medium,
            SectionKey::Contact => SizeToken::ExtraSmall,
            _ => SizeToken::Small,
        }
    }

    /// Pixel sizes indexed by token, extra_small → large.
    fn scale(&self) -> &'static [u16; 4] {
        match self {
            SectionKey::Name => &NAME_SCALE,
            SectionKey::Profession => &PROFESSION_SCALE,
            SectionKey::SectionTitle => &TITLE_SCALE,
            _ => &BODY_SCALE,
        }
    }
}

const NAME_SCALE: [u16; 4] = [24, 28, 32, 36];
const PROFESSION_SCALE: [u16; 4] = [13, 15, 17, 19];
const TITLE_SCALE: [u16; 4] = [13, 14, 16, 18];
const BODY_SCALE: [u16; 4] = [11, 12, 14, 16];

/// Body size used for keys the renderer does not recognise.
pub const FALLBACK_BODY_PX: u16 = 12;

/// Resolves the pixel size for a known section key.
pub fn resolve_px(sizes: &HashMap<String, SizeToken>, key: SectionKey) -> u16 {
    let token = sizes
        .get(key.as_str())
        .copied()
        .unwrap_or_else(|| key.default_token());
    key.scale()[token.index()]
}

/// Resolves by raw key string. Unknown keys use the body scale with its default.
pub fn resolve_px_by_name(sizes: &HashMap<String, SizeToken>, key: &str) -> u16 {
    match SectionKey::ALL.into_iter().find(|k| k.as_str() == key) {
        Some(k) => resolve_px(sizes, k),
        None => sizes
            .get(key)
            .map(|t| BODY_SCALE[t.index()])
            .unwrap_or(FALLBACK_BODY_PX),
    }
}

/// CSS value for a section key, e.g. `"14px"`.
pub fn resolve_css(sizes: &HashMap<String, SizeToken>, key: SectionKey) -> String {
    format!("{}px", resolve_px(sizes, key))
}
