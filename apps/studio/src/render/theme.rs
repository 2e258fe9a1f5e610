//! Per-template style tables. The four templates differ only in the values
//! below; the layout walk in `templates.rs` is shared.

use serde::Serialize;

use crate::layout::PdfFont;
use crate::models::resume::TemplateKind;
use crate::render::document::SectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderStyle {
    /// Name and contacts on the page background.
    Plain,
    /// Accent rule under the header block.
    Underlined,
    /// Header sits on an accent-colored band with contrasting text.
    Band,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingStyle {
    /// Title with an accent bottom border.
    Rule,
    /// Title with an accent bar on the left.
    Bar,
    /// Small letter-spaced uppercase title in the accent color.
    Caps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStyle {
    /// Comma-separated run of text.
    Inline,
    /// Rounded accent chips.
    Chips,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Theme {
    pub kind: TemplateKind,
    pub name: &'static str,
    pub description: &'static str,
    pub default_font: &'static str,
    pub header_centered: bool,
    pub header_style: HeaderStyle,
    pub heading_style: HeadingStyle,
    pub tag_style: TagStyle,
    /// Sections moved to a left sidebar; empty for single-column layouts.
    pub sidebar: &'static [SectionId],
    pub sidebar_width_pct: u8,
    pub show_photo: bool,
    pub line_height: f32,
    pub section_gap_px: u16,
    pub body_color: &'static str,
    pub muted_color: &'static str,
}

impl Theme {
    pub fn has_sidebar(&self) -> bool {
        !self.sidebar.is_empty()
    }

    pub fn in_sidebar(&self, id: SectionId) -> bool {
        self.sidebar.contains(&id)
    }
}

static CLASSIC: Theme = Theme {
    kind: TemplateKind::Classic,
    name: "Classic",
    description: "Centered serif header with ruled section titles. Safe for applicant tracking systems.",
    default_font: "georgia",
    header_centered: true,
    header_style: HeaderStyle::Underlined,
    heading_style: HeadingStyle::Rule,
    tag_style: TagStyle::Inline,
    sidebar: &[],
    sidebar_width_pct: 0,
    show_photo: false,
    line_height: 1.45,
    section_gap_px: 18,
    body_color: "#1F2937",
    muted_color: "#4B5563",
};

static MODERN: Theme = Theme {
    kind: TemplateKind::Modern,
    name: "Modern",
    description: "Accent header band and a sidebar for skills, languages and certifications.",
    default_font: "inter",
    header_centered: false,
    header_style: HeaderStyle::Band,
    heading_style: HeadingStyle::Bar,
    tag_style: TagStyle::Chips,
    sidebar: &[
        SectionId::Skills,
        SectionId::Languages,
        SectionId::Certifications,
    ],
    sidebar_width_pct: 32,
    show_photo: false,
    line_height: 1.5,
    section_gap_px: 20,
    body_color: "#111827",
    muted_color: "#6B7280",
};

static MINIMAL: Theme = Theme {
    kind: TemplateKind::Minimal,
    name: "Minimal",
    description: "Quiet single column with small-caps section titles and generous whitespace.",
    default_font: "inter",
    header_centered: false,
    header_style: HeaderStyle::Plain,
    heading_style: HeadingStyle::Caps,
    tag_style: TagStyle::Inline,
    sidebar: &[],
    sidebar_width_pct: 0,
    show_photo: false,
    line_height: 1.6,
    section_gap_px: 24,
    body_color: "#111827",
    muted_color: "#6B7280",
};

static SPOTLIGHT: Theme = Theme {
    kind: TemplateKind::Spotlight,
    name: "Spotlight",
    description: "The minimal layout with a round profile photo next to the name.",
    default_font: "montserrat",
    header_centered: false,
    header_style: HeaderStyle::Plain,
    heading_style: HeadingStyle::Caps,
    tag_style: TagStyle::Chips,
    sidebar: &[],
    sidebar_width_pct: 0,
    show_photo: true,
    line_height: 1.55,
    section_gap_px: 22,
    body_color: "#111827",
    muted_color: "#6B7280",
};

pub fn theme_for(kind: TemplateKind) -> &'static Theme {
    match kind {
        TemplateKind::Classic => &CLASSIC,
        TemplateKind::Modern => &MODERN,
        TemplateKind::Minimal => &MINIMAL,
        TemplateKind::Spotlight => &SPOTLIGHT,
    }
}

/// PDF font used for a theme when the resume names no font of its own.
pub fn default_pdf_font(theme: &Theme) -> PdfFont {
    crate::style::fonts::resolve_font(theme.default_font).pdf_font
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::fonts::resolve_font;

    #[test]
    fn test_every_template_has_a_theme() {
        for kind in TemplateKind::ALL {
            assert_eq!(theme_for(kind).kind, kind);
        }
    }

    #[test]
    fn test_default_fonts_exist_in_catalog() {
        for kind in TemplateKind::ALL {
            let theme = theme_for(kind);
            assert_eq!(resolve_font(theme.default_font).id, theme.default_font);
        }
    }

    #[test]
    fn test_only_spotlight_shows_photo() {
        let with_photo: Vec<_> = TemplateKind::ALL
            .into_iter()
            .filter(|k| theme_for(*k).show_photo)
            .collect();
        assert_eq!(with_photo, vec![TemplateKind::Spotlight]);
    }

    #[test]
    fn test_classic_is_serif_in_pdf() {
        assert_eq!(default_pdf_font(theme_for(TemplateKind::Classic)), PdfFont::Times);
    }
}
