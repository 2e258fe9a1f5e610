//! PDF export.
//!
//! `AppState` carries an `Arc<dyn PdfExporter>`; the default `LopdfExporter`
//! flows the resume text with the standard PDF base fonts (no embedding) and
//! paginates it to the paper size and margins.

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;

use crate::errors::AppError;
use crate::layout::flow::{PlacedLine, LINE_HEIGHT};
use crate::layout::{document_runs, get_metrics, lay_out, paginate};
use crate::models::resume::Resume;
use crate::render::{build_document, theme_for, RenderOptions, SectionVisibility};
use crate::style::color::Rgb;
use crate::style::paper::px_to_pt;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("page margins leave no room for content")]
    NoPrintableArea,

    #[error("pdf encoding failed: {0}")]
    Encode(#[from] lopdf::Error),

    #[error("pdf write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PdfError> for AppError {
    fn from(e: PdfError) -> Self {
        AppError::Export(e.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait PdfExporter: Send + Sync {
    async fn export(
        &self,
        resume: &Resume,
        visibility: SectionVisibility,
    ) -> Result<Vec<u8>, AppError>;
}

/// Default exporter backed by `lopdf`.
pub struct LopdfExporter;

#[async_trait]
impl PdfExporter for LopdfExporter {
    async fn export(
        &self,
        resume: &Resume,
        visibility: SectionVisibility,
    ) -> Result<Vec<u8>, AppError> {
        let resume = resume.clone();
        // Layout and serialization are CPU-bound.
        let bytes = tokio::task::spawn_blocking(move || render_pdf(&resume, visibility))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in pdf export: {e}")))??;
        Ok(bytes)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document assembly
// ────────────────────────────────────────────────────────────────────────────

const BODY_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

pub fn render_pdf(resume: &Resume, visibility: SectionVisibility) -> Result<Vec<u8>, PdfError> {
    let mut doc = build_pdf(resume, visibility)?;
    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    tracing::debug!(bytes = out.len(), "pdf exported");
    Ok(out)
}

fn build_pdf(resume: &Resume, visibility: SectionVisibility) -> Result<Document, PdfError> {
    let opts = RenderOptions::from_resume(resume, visibility);
    let theme = theme_for(resume.template);
    let pdf_font = opts.font.pdf_font;

    let (page_w, page_h) = opts.paper_size.dimensions_pt();
    let m = opts.margins;
    let (top, right, bottom, left) = (
        px_to_pt(m.top),
        px_to_pt(m.right),
        px_to_pt(m.bottom),
        px_to_pt(m.left),
    );
    let content_w = page_w - left - right;
    let usable_h = page_h - top - bottom;
    if !m.is_valid() || content_w <= 0.0 || usable_h <= 0.0 {
        return Err(PdfError::NoPrintableArea);
    }

    let source = build_document(resume, &opts.visibility);
    let runs = document_runs(&source, opts.section_font_sizes);
    let layout = lay_out(&runs, get_metrics(&pdf_font), content_w);
    let pages = paginate(&layout, usable_h);

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_entry = |bold: bool| {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => pdf_font.base_font(bold),
            "Encoding" => "WinAnsiEncoding",
        }
    };
    let body_font_id = doc.add_object(font_entry(false));
    let bold_font_id = doc.add_object(font_entry(true));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            BODY_FONT => body_font_id,
            BOLD_FONT => bold_font_id,
        },
    });

    let colors = PageColors {
        body: Rgb::parse_lossy(theme.body_color),
        accent: Rgb::parse_lossy(&opts.accent_color),
    };

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
    for placed in &pages {
        let content = page_content(placed, left, page_h - top, &colors);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_w.into(), page_h.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let title = if resume.title.trim().is_empty() {
        "Resume"
    } else {
        resume.title.trim()
    };
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(to_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::String(to_win_ansi(env!("CARGO_PKG_NAME")), StringFormat::Literal),
    });
    doc.trailer.set("Info", info_id);

    Ok(doc)
}

struct PageColors {
    body: Rgb,
    accent: Rgb,
}

/// Content stream for one page. `content_top` is the PDF y coordinate of the
/// top edge of the content box.
fn page_content(lines: &[PlacedLine<'_>], left: f32, content_top: f32, colors: &PageColors) -> Content {
    let mut ops = Vec::with_capacity(lines.len() * 6);
    for placed in lines {
        let line = placed.line;
        let font = if line.bold { BOLD_FONT } else { BODY_FONT };
        let (r, g, b) = if line.accent {
            colors.accent.unit_channels()
        } else {
            colors.body.unit_channels()
        };
        let half_leading = line.size_pt * (LINE_HEIGHT - 1.0) / 2.0;
        let baseline = content_top - placed.top_pt - half_leading - line.size_pt * 0.8;

        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![font.into(), line.size_pt.into()]));
        ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        ops.push(Operation::new("Td", vec![(left + line.indent_pt).into(), baseline.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(&line.text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
    Content { operations: ops }
}

/// Latin-1 is a subset of WinAnsi for everything the base fonts draw; other
/// characters print as `?`.
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{20AC}' => 0x80,
            c if (c as u32) <= 0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ExperienceEntry;
    use crate::style::margins::PageMargins;
    use crate::style::paper::PaperSize;

    fn jane() -> Resume {
        let mut r = Resume::default();
        r.title = "Backend CV".into();
        r.personal_info.name = "Jane Doe".into();
        r.personal_info.profession = "Engineer".into();
        r.experience.push(ExperienceEntry {
            position: "Engineer".into(),
            company: "Acme".into(),
            start_date: "2022-01".into(),
            is_current: true,
            ..Default::default()
        });
        r
    }

    fn first_page_text(doc: &Document) -> String {
        let pages = doc.get_pages();
        let (_, page_id) = pages.iter().next().unwrap();
        String::from_utf8_lossy(&doc.get_page_content(*page_id).unwrap()).into_owned()
    }

    #[test]
    fn test_short_resume_is_one_page() {
        let doc = build_pdf(&jane(), SectionVisibility::default()).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        let text = first_page_text(&doc);
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Jan 2022 - Present"));
    }

    #[test]
    fn test_long_resume_paginates() {
        let mut r = jane();
        r.professional_summary = "Designs and operates storage engines. ".repeat(600);
        let doc = build_pdf(&r, SectionVisibility::default()).unwrap();
        assert!(doc.get_pages().len() >= 3);
    }

    #[test]
    fn test_serialized_output_is_pdf() {
        let bytes = render_pdf(&jane(), SectionVisibility::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
    }

    #[test]
    fn test_margins_without_room_fail() {
        let mut r = jane();
        r.paper_size = PaperSize::Short;
        r.page_margins = PageMargins::uniform(600.0);
        assert!(matches!(
            build_pdf(&r, SectionVisibility::default()),
            Err(PdfError::NoPrintableArea)
        ));
        let err: AppError = PdfError::NoPrintableArea.into();
        assert!(matches!(err, AppError::Export(_)));
    }

    #[test]
    fn test_win_ansi_mapping() {
        assert_eq!(to_win_ansi("café"), b"caf\xE9".to_vec());
        assert_eq!(to_win_ansi("a\u{2014}b"), vec![b'a', 0x97, b'b']);
        assert_eq!(to_win_ansi("日本"), b"??".to_vec());
    }

    #[tokio::test]
    async fn test_exporter_runs_off_thread() {
        let bytes = LopdfExporter
            .export(&jane(), SectionVisibility::default())
            .await
            .unwrap();
        assert!(!bytes.is_empty());
    }
}
