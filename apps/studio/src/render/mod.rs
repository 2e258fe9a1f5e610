// Template rendering: resume record + style options → inline-styled HTML.
// Deterministic and I/O free; every template shares one layout walk and
// differs only by its theme table.

pub mod document;
pub mod format;
pub mod handlers;
pub mod html;
pub mod sample;
pub mod templates;
pub mod theme;

use std::collections::HashMap;

use serde::Serialize;

use crate::models::resume::{Resume, TemplateKind};
use crate::style::color::{text_color_for, Rgb, TextColor};
use crate::style::font_size::SizeToken;
use crate::style::fonts::{resolve_font, FontChoice};
use crate::style::margins::PageMargins;
use crate::style::paper::PaperSize;

pub use document::{build_document, ResumeDocument, SectionVisibility};
pub use theme::{theme_for, Theme};

/// Style inputs for a render. Usually taken from the resume itself; the
/// visibility flags come from the caller.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    /// Canonical `#RRGGBB`; the only form of the accent that reaches markup.
    pub accent_color: String,
    /// Foreground for accent surfaces, chosen from the accent as entered.
    pub on_accent: TextColor,
    pub section_font_sizes: &'a HashMap<String, SizeToken>,
    pub paper_size: PaperSize,
    pub margins: PageMargins,
    pub font: &'static FontChoice,
    pub visibility: SectionVisibility,
}

impl<'a> RenderOptions<'a> {
    pub fn from_resume(resume: &'a Resume, visibility: SectionVisibility) -> Self {
        let theme = theme_for(resume.template);
        let font_id = resume
            .font_family
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(theme.default_font);
        Self {
            accent_color: Rgb::parse_lossy(resume.accent()).to_hex(),
            on_accent: text_color_for(resume.accent()),
            section_font_sizes: &resume.section_font_sizes,
            paper_size: resume.paper_size,
            margins: resume.page_margins,
            font: resolve_font(font_id),
            visibility,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedResume {
    pub template: TemplateKind,
    pub html: String,
    /// Text color used on accent-colored surfaces.
    pub text_color: TextColor,
    pub width_px: f32,
    pub height_px: f32,
}

/// Renders `resume` with its own template and styling.
pub fn render_resume(resume: &Resume, visibility: SectionVisibility) -> RenderedResume {
    let opts = RenderOptions::from_resume(resume, visibility);
    render_with(resume, &opts)
}

/// Renders `resume` with explicit options.
pub fn render_with(resume: &Resume, opts: &RenderOptions<'_>) -> RenderedResume {
    let theme = theme_for(resume.template);
    let doc = build_document(resume, &opts.visibility);
    let text_color = opts.on_accent;
    let html = templates::render_document(&doc, theme, opts, text_color);
    let (width_px, height_px) = opts.paper_size.dimensions_px();

    tracing::debug!(
        template = theme.kind.slug(),
        sections = doc.sections.len(),
        bytes = html.len(),
        "rendered resume"
    );

    RenderedResume {
        template: resume.template,
        html,
        text_color,
        width_px,
        height_px,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ExperienceEntry};
    use crate::style::font_size::SizeToken;

    fn engineer() -> Resume {
        let mut r = Resume::default();
        r.personal_info.name = "Jane Doe".into();
        r.personal_info.profession = "Backend Engineer".into();
        r.personal_info.email = "jane@example.com".into();
        r.personal_info.linkedin = "https://www.linkedin.com/in/jane?utm=1".into();
        r.experience.push(ExperienceEntry {
            position: "Engineer".into(),
            company: "Acme".into(),
            start_date: "2022-01".into(),
            end_date: String::new(),
            is_current: true,
            description: String::new(),
            ..Default::default()
        });
        r.skills = vec!["Rust".into(), "PostgreSQL".into()];
        r
    }

    #[test]
    fn test_classic_renders_present_range() {
        let out = render_resume(&engineer(), SectionVisibility::default());
        assert_eq!(out.template, TemplateKind::Classic);
        assert!(out.html.contains("Jan 2022 - Present"), "{}", out.html);
        assert!(out.html.contains("data-template=\"classic\""));
    }

    #[test]
    fn test_current_entry_never_shows_end_date() {
        let mut r = engineer();
        r.experience[0].end_date = "2023-06".into();
        for template in TemplateKind::ALL {
            r.template = template;
            let out = render_resume(&r, SectionVisibility::default());
            assert!(out.html.contains("Present"), "{template:?}");
            assert!(!out.html.contains("Jun 2023"), "{template:?}");
        }
    }

    #[test]
    fn test_social_link_condensed_in_header() {
        let out = render_resume(&engineer(), SectionVisibility::default());
        assert!(out.html.contains(">linkedin.com/in/jane?utm=1</a>"), "{}", out.html);
    }

    #[test]
    fn test_all_templates_share_contract_on_empty_resume() {
        let mut r = Resume::default();
        for template in TemplateKind::ALL {
            r.template = template;
            let out = render_resume(&r, SectionVisibility::default());
            assert!(out.html.starts_with("<div class=\"resume resume-"));
            assert!(!out.html.contains("<section"));
        }
    }

    #[test]
    fn test_visibility_flags_hide_sections() {
        let mut r = engineer();
        r.education.push(EducationEntry {
            degree: "BSc".into(),
            institution: "TU Berlin".into(),
            start_date: "2015-10".into(),
            ..Default::default()
        });
        let vis = SectionVisibility {
            header: false,
            experience: false,
            ..Default::default()
        };
        let out = render_resume(&r, vis);
        assert!(!out.html.contains("Jane Doe"));
        assert!(!out.html.contains("Acme"));
        assert!(out.html.contains("TU Berlin"));
    }

    #[test]
    fn test_modern_band_uses_contrasting_text() {
        let mut r = engineer();
        r.template = TemplateKind::Modern;
        r.accent_color = "#000000".into();
        let out = render_resume(&r, SectionVisibility::default());
        assert_eq!(out.text_color, TextColor::White);
        assert!(out.html.contains("background:#000000;color:#FFFFFF;"), "{}", out.html);
        assert!(out.html.contains("resume-sidebar"));
    }

    #[test]
    fn test_accent_reaches_markup_only_as_hex() {
        let mut r = engineer();
        r.template = TemplateKind::Modern;
        r.accent_color = "red;background-image:url(https://evil.example/x)".into();
        let out = render_resume(&r, SectionVisibility::default());
        assert!(!out.html.contains("background-image"));
        assert!(!out.html.contains("evil.example"));

        r.accent_color = "#1e40af".into();
        let opts = RenderOptions::from_resume(&r, SectionVisibility::default());
        assert_eq!(opts.accent_color, "#1E40AF");
        assert!(render_with(&r, &opts).html.contains("#1E40AF"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut r = engineer();
        r.personal_info.name = "<script>alert(1)</script>".into();
        let out = render_resume(&r, SectionVisibility::default());
        assert!(!out.html.contains("<script>"));
        assert!(out.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_spotlight_shows_photo_only_there() {
        let mut r = engineer();
        r.personal_info.image = Some("data:image/png;base64,AAAA".into());
        r.template = TemplateKind::Spotlight;
        assert!(render_resume(&r, SectionVisibility::default()).html.contains("<img"));
        r.template = TemplateKind::Minimal;
        assert!(!render_resume(&r, SectionVisibility::default()).html.contains("<img"));
    }

    #[test]
    fn test_font_sizes_and_margins_applied() {
        let mut r = engineer();
        r.section_font_sizes
            .insert("name".to_string(), SizeToken::ExtraSmall);
        r.page_margins = PageMargins::uniform(48.0);
        let out = render_resume(&r, SectionVisibility::default());
        assert!(out.html.contains("font-size:24px"));
        assert!(out.html.contains("padding:48px 48px 48px 48px"));
    }

    #[test]
    fn test_font_override_and_fallback() {
        let mut r = engineer();
        r.font_family = Some("jetbrains_mono".into());
        let opts = RenderOptions::from_resume(&r, SectionVisibility::default());
        assert_eq!(opts.font.id, "jetbrains_mono");
        r.font_family = None;
        let opts = RenderOptions::from_resume(&r, SectionVisibility::default());
        assert_eq!(opts.font.id, "georgia");
    }
}
