//! The shared layout walk: turns a `ResumeDocument` into inline-styled HTML
//! using the selected template's theme table.

use crate::render::document::{Entry, Header, ResumeDocument, Section, SectionBody};
use crate::render::html::Html;
use crate::render::theme::{HeaderStyle, HeadingStyle, TagStyle, Theme};
use crate::render::RenderOptions;
use crate::style::color::TextColor;
use crate::style::font_size::{resolve_px, SectionKey};

struct Ctx<'a> {
    theme: &'a Theme,
    opts: &'a RenderOptions<'a>,
    on_accent: TextColor,
}

impl Ctx<'_> {
    fn px(&self, key: SectionKey) -> u16 {
        resolve_px(self.opts.section_font_sizes, key)
    }

    fn accent(&self) -> &str {
        &self.opts.accent_color
    }
}

pub(crate) fn render_document(
    doc: &ResumeDocument,
    theme: &Theme,
    opts: &RenderOptions<'_>,
    on_accent: TextColor,
) -> String {
    let ctx = Ctx {
        theme,
        opts,
        on_accent,
    };
    let (width, height) = opts.paper_size.dimensions_px();
    let m = opts.margins;
    let root_style = format!(
        "box-sizing:border-box;width:{width}px;min-height:{height}px;\
         padding:{}px {}px {}px {}px;background:#FFFFFF;color:{};\
         font-family:{};line-height:{};",
        m.top, m.right, m.bottom, m.left, theme.body_color, opts.font.css_stack, theme.line_height
    );

    let mut h = Html::new();
    h.open_with(
        "div",
        &format!("resume resume-{}", theme.kind.slug()),
        &root_style,
        &[("data-template", theme.kind.slug())],
    );

    if let Some(header) = &doc.header {
        render_header(&mut h, header, &ctx);
    }

    if theme.has_sidebar() {
        let (side, main): (Vec<&Section>, Vec<&Section>) =
            doc.sections.iter().partition(|s| theme.in_sidebar(s.id));
        h.open("div", "resume-columns", "display:flex;gap:24px;align-items:flex-start;");
        if !side.is_empty() {
            h.open(
                "aside",
                "resume-sidebar",
                &format!("flex:0 0 {}%;", theme.sidebar_width_pct),
            );
            for section in side {
                render_section(&mut h, section, &ctx);
            }
            h.close("aside");
        }
        h.open("main", "resume-main", "flex:1 1 auto;min-width:0;");
        for section in main {
            render_section(&mut h, section, &ctx);
        }
        h.close("main");
        h.close("div");
    } else {
        for section in &doc.sections {
            render_section(&mut h, section, &ctx);
        }
    }

    h.close("div");
    h.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

fn render_header(h: &mut Html, header: &Header, ctx: &Ctx<'_>) {
    let theme = ctx.theme;
    let align = if theme.header_centered { "center" } else { "left" };
    let (fg, muted) = match theme.header_style {
        HeaderStyle::Band => (ctx.on_accent.css(), ctx.on_accent.css()),
        _ => (theme.body_color, theme.muted_color),
    };
    let box_style = match theme.header_style {
        HeaderStyle::Plain => format!("text-align:{align};margin-bottom:{}px;", theme.section_gap_px),
        HeaderStyle::Underlined => format!(
            "text-align:{align};margin-bottom:{}px;padding-bottom:12px;border-bottom:2px solid {};",
            theme.section_gap_px,
            ctx.accent()
        ),
        HeaderStyle::Band => format!(
            "text-align:{align};margin-bottom:{}px;padding:20px 24px;border-radius:4px;\
             background:{};color:{fg};",
            theme.section_gap_px,
            ctx.accent()
        ),
    };

    h.open("header", "resume-header", &box_style);

    let photo = header.image.as_deref().filter(|_| theme.show_photo);
    if let Some(src) = photo {
        h.open("div", "", "display:flex;align-items:center;gap:20px;");
        h.void(
            "img",
            "resume-photo",
            "width:96px;height:96px;border-radius:50%;object-fit:cover;flex:0 0 auto;",
            &[("src", src), ("alt", "Profile photo")],
        );
        h.open("div", "", "");
    }

    h.element(
        "h1",
        "resume-name",
        &format!(
            "margin:0;font-size:{}px;font-weight:700;color:{fg};",
            ctx.px(SectionKey::Name)
        ),
        &header.name,
    );
    let profession_color = match theme.header_style {
        HeaderStyle::Band => fg,
        _ => ctx.accent(),
    };
    h.element(
        "p",
        "resume-profession",
        &format!(
            "margin:4px 0 0 0;font-size:{}px;color:{profession_color};",
            ctx.px(SectionKey::Profession)
        ),
        &header.profession,
    );

    if !header.contacts.is_empty() || !header.links.is_empty() {
        h.open(
            "p",
            "resume-contact",
            &format!(
                "margin:8px 0 0 0;font-size:{}px;color:{muted};",
                ctx.px(SectionKey::Contact)
            ),
        );
        let mut first = true;
        for contact in &header.contacts {
            if !first {
                h.text(" | ");
            }
            h.text(contact);
            first = false;
        }
        for link in &header.links {
            if !first {
                h.text(" | ");
            }
            match &link.href {
                Some(href) => {
                    h.open_with(
                        "a",
                        "",
                        &format!("color:{muted};text-decoration:none;"),
                        &[("href", href.as_str()), ("data-platform", link.platform)],
                    )
                    .text(&link.display)
                    .close("a");
                }
                None => {
                    h.text(&link.display);
                }
            }
            first = false;
        }
        h.close("p");
    }

    if photo.is_some() {
        h.close("div");
        h.close("div");
    }
    h.close("header");
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn render_section(h: &mut Html, section: &Section, ctx: &Ctx<'_>) {
    let theme = ctx.theme;
    let title_px = ctx.px(SectionKey::SectionTitle);
    let body_px = ctx.px(section.id.size_key());

    h.open_with(
        "section",
        "resume-section",
        &format!("margin-bottom:{}px;", theme.section_gap_px),
        &[("data-section", section_slug(section))],
    );

    let heading_style = match theme.heading_style {
        HeadingStyle::Rule => format!(
            "margin:0 0 8px 0;padding-bottom:4px;font-size:{title_px}px;font-weight:700;\
             color:{};border-bottom:1px solid {};",
            ctx.accent(),
            ctx.accent()
        ),
        HeadingStyle::Bar => format!(
            "margin:0 0 8px 0;padding-left:8px;font-size:{title_px}px;font-weight:700;\
             color:{};border-left:4px solid {};",
            theme.body_color,
            ctx.accent()
        ),
        HeadingStyle::Caps => format!(
            "margin:0 0 8px 0;font-size:{title_px}px;font-weight:600;letter-spacing:0.12em;\
             text-transform:uppercase;color:{};",
            ctx.accent()
        ),
    };
    h.element("h2", "resume-section-title", &heading_style, section.title);

    match &section.body {
        SectionBody::Text { text } => {
            h.open("p", "", &format!("margin:0;font-size:{body_px}px;"))
                .multiline(text)
                .close("p");
        }
        SectionBody::Entries { entries } => {
            for entry in entries {
                render_entry(h, entry, body_px, ctx);
            }
        }
        SectionBody::Tags { groups } => {
            for group in groups {
                h.open("div", "resume-tags", &format!("font-size:{body_px}px;margin-bottom:4px;"));
                if let Some(label) = group.label {
                    h.element("strong", "", "", &format!("{label}: "));
                }
                match theme.tag_style {
                    TagStyle::Inline => {
                        h.text(&group.tags.join(", "));
                    }
                    TagStyle::Chips => {
                        let chip = format!(
                            "display:inline-block;margin:0 6px 6px 0;padding:2px 10px;\
                             border-radius:999px;background:{};color:{};",
                            ctx.accent(),
                            ctx.on_accent.css()
                        );
                        for tag in &group.tags {
                            h.element("span", "resume-chip", &chip, tag);
                        }
                    }
                }
                h.close("div");
            }
        }
        SectionBody::Languages { items } => {
            h.open("ul", "", &format!("margin:0;padding:0;list-style:none;font-size:{body_px}px;"));
            for (language, level) in items {
                h.open("li", "", "");
                h.element("strong", "", "", language);
                h.text(&format!(": {level}"));
                h.close("li");
            }
            h.close("ul");
        }
    }

    h.close("section");
}

fn render_entry(h: &mut Html, entry: &Entry, body_px: u16, ctx: &Ctx<'_>) {
    let muted = ctx.theme.muted_color;
    h.open("div", "resume-entry", &format!("margin-bottom:10px;font-size:{body_px}px;"));

    h.open(
        "div",
        "",
        "display:flex;justify-content:space-between;align-items:baseline;gap:12px;",
    );
    h.open("div", "", "");
    h.element("strong", "resume-entry-heading", "", &entry.heading);
    if !entry.subheading.is_empty() {
        if !entry.heading.is_empty() {
            h.text(", ");
        }
        h.element("span", "resume-entry-org", &format!("color:{muted};"), &entry.subheading);
    }
    h.close("div");
    h.element(
        "span",
        "resume-entry-dates",
        &format!("color:{muted};white-space:nowrap;"),
        &entry.dates,
    );
    h.close("div");

    h.element(
        "div",
        "resume-entry-location",
        &format!("color:{muted};"),
        &entry.location,
    );

    if let Some(link) = &entry.link {
        match &link.href {
            Some(href) => {
                h.open_with(
                    "a",
                    "resume-entry-link",
                    &format!("color:{};", ctx.accent()),
                    &[("href", href.as_str())],
                )
                .text(&link.display)
                .close("a");
            }
            None => {
                h.element("span", "resume-entry-link", "", &link.display);
            }
        }
    }

    if !entry.body.is_empty() {
        h.open("p", "resume-entry-body", "margin:4px 0 0 0;")
            .multiline(&entry.body)
            .close("p");
    }
    h.close("div");
}

fn section_slug(section: &Section) -> &'static str {
    use crate::render::document::SectionId::*;
    match section.id {
        Summary => "summary",
        Experience => "experience",
        Education => "education",
        Projects => "projects",
        Skills => "skills",
        Languages => "languages",
        Certifications => "certifications",
        Achievements => "achievements",
        VolunteerWork => "volunteer_work",
    }
}
