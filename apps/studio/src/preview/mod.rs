//! Live preview geometry: scale-to-fit and fixed-height page slicing.
//!
//! The preview shows the rendered resume as a stack of paper-sized pages. Each
//! page is the same markup translated up by a whole number of usable slice
//! heights and clipped to one slice. Slices are uniform; content is not
//! re-measured per page.

pub mod handlers;

use serde::Serialize;

use crate::errors::AppError;
use crate::layout::{document_runs, get_metrics, lay_out};
use crate::models::resume::Resume;
use crate::render::{build_document, render_with, RenderOptions, SectionVisibility};
use crate::style::color::TextColor;
use crate::style::margins::PageMargins;
use crate::style::paper::{pt_to_px, px_to_pt, PaperSize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSlice {
    pub index: usize,
    /// Vertical translation applied to the content for this page, in px.
    pub offset_y: f32,
    /// Height of the visible window, in px.
    pub clip_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightSource {
    /// Supplied by the client after laying the markup out.
    Measured,
    /// Computed from font metrics.
    Estimated,
}

#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub html: String,
    pub text_color: TextColor,
    pub scale: f32,
    pub page_width: f32,
    pub page_height: f32,
    pub margins: PageMargins,
    pub usable_height: f32,
    pub content_height: f32,
    pub content_height_source: HeightSource,
    pub page_count: usize,
    pub pages: Vec<PageSlice>,
}

/// Container dimensions reported by the client, in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub container_width: f32,
    pub container_height: Option<f32>,
    pub content_height: Option<f32>,
}

/// Largest scale at which a page fits the container. Only the width
/// constrains when no height is given.
pub fn compute_scale(
    container_width: f32,
    container_height: Option<f32>,
    paper: PaperSize,
) -> Result<f32, AppError> {
    let positive = |v: f32| v.is_finite() && v > 0.0;
    if !positive(container_width) {
        return Err(AppError::Validation(
            "container_width must be a positive number".to_string(),
        ));
    }
    let (page_w, page_h) = paper.dimensions_px();
    let by_width = container_width / page_w;
    match container_height {
        None => Ok(by_width),
        Some(h) if positive(h) => Ok(by_width.min(h / page_h)),
        Some(_) => Err(AppError::Validation(
            "container_height must be a positive number".to_string(),
        )),
    }
}

/// Usable slice height: page height minus the top and bottom margins.
pub fn usable_height(paper: PaperSize, margins: &PageMargins) -> Result<f32, AppError> {
    let usable = paper.height_px() - margins.top - margins.bottom;
    if !margins.is_valid() || usable <= 0.0 {
        return Err(AppError::Validation(format!(
            "Margins leave no printable height on {} paper",
            paper.label()
        )));
    }
    Ok(usable)
}

/// Upper bound on preview pages; anything taller is rejected rather than sliced.
pub const MAX_PREVIEW_PAGES: usize = 1000;

pub fn page_slices(
    content_height: f32,
    paper: PaperSize,
    margins: &PageMargins,
) -> Result<Vec<PageSlice>, AppError> {
    if !content_height.is_finite() || content_height < 0.0 {
        return Err(AppError::Validation(
            "content_height must be zero or positive".to_string(),
        ));
    }
    let usable = usable_height(paper, margins)?;
    let pages = (content_height / usable).ceil();
    if pages > MAX_PREVIEW_PAGES as f32 {
        return Err(AppError::Validation(format!(
            "content_height of {content_height}px exceeds the {MAX_PREVIEW_PAGES}-page preview limit"
        )));
    }
    let count = (pages as usize).max(1);
    Ok((0..count)
        .map(|index| PageSlice {
            index,
            offset_y: -(index as f32 * usable),
            clip_height: usable,
        })
        .collect())
}

/// Height of the resume content box in px, from font metrics.
pub fn estimate_content_height(resume: &Resume, opts: &RenderOptions<'_>) -> f32 {
    let doc = build_document(resume, &opts.visibility);
    let runs = document_runs(&doc, opts.section_font_sizes);
    let width_px = opts.paper_size.width_px() - opts.margins.left - opts.margins.right;
    let metrics = get_metrics(&opts.font.pdf_font);
    let layout = lay_out(&runs, metrics, px_to_pt(width_px.max(1.0)));
    pt_to_px(layout.total_height_pt)
}

pub fn build_preview(
    resume: &Resume,
    visibility: SectionVisibility,
    viewport: Viewport,
) -> Result<Preview, AppError> {
    let opts = RenderOptions::from_resume(resume, visibility);
    let scale = compute_scale(
        viewport.container_width,
        viewport.container_height,
        opts.paper_size,
    )?;

    let (content_height, content_height_source) = match viewport.content_height {
        Some(h) => (h, HeightSource::Measured),
        None => (
            estimate_content_height(resume, &opts),
            HeightSource::Estimated,
        ),
    };
    let pages = page_slices(content_height, opts.paper_size, &opts.margins)?;
    let usable = usable_height(opts.paper_size, &opts.margins)?;
    let rendered = render_with(resume, &opts);

    tracing::debug!(
        scale,
        content_height,
        pages = pages.len(),
        "built preview"
    );

    Ok(Preview {
        html: rendered.html,
        text_color: rendered.text_color,
        scale,
        page_width: rendered.width_px,
        page_height: rendered.height_px,
        margins: opts.margins,
        usable_height: usable,
        content_height,
        content_height_source,
        page_count: pages.len(),
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::margins::MarginPreset;

    #[test]
    fn test_scale_uses_tighter_dimension() {
        // letter is 816 x 1056
        let s = compute_scale(408.0, Some(1056.0), PaperSize::Short).unwrap();
        assert!((s - 0.5).abs() < 1e-6);
        let s = compute_scale(816.0, Some(528.0), PaperSize::Short).unwrap();
        assert!((s - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_scale_width_only() {
        let s = compute_scale(1632.0, None, PaperSize::Short).unwrap();
        assert!((s - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_non_positive_container_rejected() {
        assert!(matches!(
            compute_scale(0.0, None, PaperSize::A4),
            Err(AppError::Validation(_))
        ));
        assert!(compute_scale(500.0, Some(-3.0), PaperSize::A4).is_err());
        assert!(compute_scale(f32::NAN, None, PaperSize::A4).is_err());
    }

    #[test]
    fn test_slices_for_normal_letter() {
        // usable = 1056 - 96 - 96 = 864
        let m = MarginPreset::Normal.margins();
        let slices = page_slices(1800.0, PaperSize::Short, &m).unwrap();
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].offset_y, 0.0);
        assert_eq!(slices[1].offset_y, -864.0);
        assert_eq!(slices[2].offset_y, -1728.0);
        assert!(slices.iter().all(|s| s.clip_height == 864.0));
    }

    #[test]
    fn test_empty_content_still_one_page() {
        let m = MarginPreset::Narrow.margins();
        assert_eq!(page_slices(0.0, PaperSize::A4, &m).unwrap().len(), 1);
    }

    #[test]
    fn test_exact_fit_does_not_add_page() {
        let m = MarginPreset::Normal.margins();
        assert_eq!(page_slices(864.0, PaperSize::Short, &m).unwrap().len(), 1);
        assert_eq!(page_slices(864.5, PaperSize::Short, &m).unwrap().len(), 2);
    }

    #[test]
    fn test_oversized_content_rejected() {
        let m = MarginPreset::Normal.margins();
        assert!(matches!(
            page_slices(f32::MAX, PaperSize::Short, &m),
            Err(AppError::Validation(_))
        ));
        assert!(page_slices(1e12, PaperSize::Short, &m).is_err());
        // exactly at the limit is still sliced
        let slices = page_slices(864.0 * MAX_PREVIEW_PAGES as f32, PaperSize::Short, &m).unwrap();
        assert_eq!(slices.len(), MAX_PREVIEW_PAGES);
    }

    #[test]
    fn test_margins_consuming_page_rejected() {
        let m = PageMargins::uniform(600.0);
        assert!(matches!(
            page_slices(10.0, PaperSize::Short, &m),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_estimated_preview_for_long_resume_spans_pages() {
        let mut r = Resume::default();
        r.personal_info.name = "Jane".into();
        r.professional_summary = "Distributed systems engineer. ".repeat(400);
        let preview = build_preview(
            &r,
            SectionVisibility::default(),
            Viewport {
                container_width: 600.0,
                container_height: None,
                content_height: None,
            },
        )
        .unwrap();
        assert_eq!(preview.content_height_source, HeightSource::Estimated);
        assert!(preview.page_count >= 2);
        assert_eq!(preview.pages.len(), preview.page_count);
        assert!(preview.html.contains("Jane"));
    }

    #[test]
    fn test_measured_height_is_used_verbatim() {
        let r = Resume::default();
        let preview = build_preview(
            &r,
            SectionVisibility::default(),
            Viewport {
                container_width: 816.0,
                container_height: Some(1056.0),
                content_height: Some(2000.0),
            },
        )
        .unwrap();
        assert_eq!(preview.content_height, 2000.0);
        assert_eq!(preview.page_count, 3);
        assert!((preview.scale - 1.0).abs() < 1e-6);
    }
}
