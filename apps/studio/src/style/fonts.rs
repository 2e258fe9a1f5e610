use serde::Serialize;

use crate::layout::PdfFont;

/// One entry of the font dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontChoice {
    pub id: &'static str,
    pub label: &'static str,
    pub css_stack: &'static str,
    /// Standard PDF font used when the resume is exported.
    pub pdf_font: PdfFont,
}

pub const DEFAULT_FONT_ID: &str = "inter";

pub static FONT_CATALOG: &[FontChoice] = &[
    FontChoice {
        id: "inter",
        label: "Inter",
        css_stack: "'Inter', 'Helvetica Neue', Arial, sans-serif",
        pdf_font: PdfFont::Helvetica,
    },
    FontChoice {
        id: "roboto",
        label: "Roboto",
        css_stack: "'Roboto', Arial, sans-serif",
        pdf_font: PdfFont::Helvetica,
    },
    FontChoice {
        id: "open_sans",
        label: "Open Sans",
        css_stack: "'Open Sans', Arial, sans-serif",
        pdf_font: PdfFont::Helvetica,
    },
    FontChoice {
        id: "lato",
        label: "Lato",
        css_stack: "'Lato', Arial, sans-serif",
        pdf_font: PdfFont::Helvetica,
    },
    FontChoice {
        id: "montserrat",
        label: "Montserrat",
        css_stack: "'Montserrat', Arial, sans-serif",
        pdf_font: PdfFont::Helvetica,
    },
    FontChoice {
        id: "georgia",
        label: "Georgia",
        css_stack: "Georgia, 'Times New Roman', serif",
        pdf_font: PdfFont::Times,
    },
    FontChoice {
        id: "merriweather",
        label: "Merriweather",
        css_stack: "'Merriweather', Georgia, serif",
        pdf_font: PdfFont::Times,
    },
    FontChoice {
        id: "playfair",
        label: "Playfair Display",
        css_stack: "'Playfair Display', Georgia, serif",
        pdf_font: PdfFont::Times,
    },
    FontChoice {
        id: "times",
        label: "Times New Roman",
        css_stack: "'Times New Roman', Times, serif",
        pdf_font: PdfFont::Times,
    },
    FontChoice {
        id: "jetbrains_mono",
        label: "JetBrains Mono",
        css_stack: "'JetBrains Mono', 'Courier New', monospace",
        pdf_font: PdfFont::Courier,
    },
];

/// Looks up a font by id, falling back to the default font for unknown ids.
pub fn resolve_font(id: &str) -> &'static FontChoice {
    FONT_CATALOG
        .iter()
        .find(|f| f.id.eq_ignore_ascii_case(id.trim()))
        .unwrap_or(&FONT_CATALOG[0])
}
