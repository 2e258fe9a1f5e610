// Export surface: printable HTML and PDF snapshots of a resume.

pub mod handlers;
pub mod pdf;
pub mod print;

use axum::{
    http::header,
    response::{Html, IntoResponse, Response},
};
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::export::pdf::PdfExporter;
use crate::models::resume::Resume;
use crate::render::{render_resume, SectionVisibility};

/// Header-safe slug of a person's name: ASCII letters, digits and dashes,
/// with runs of anything else collapsed to `_`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            slug.push(c);
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_matches('_').to_string()
}

/// `<name>_resume.pdf`, or `resume_<unix-millis>.pdf` when the resume has no
/// usable name.
pub fn pdf_filename(resume: &Resume, now: DateTime<Utc>) -> String {
    let slug = slugify(&resume.personal_info.name);
    if slug.is_empty() {
        format!("resume_{}.pdf", now.timestamp_millis())
    } else {
        format!("{slug}_resume.pdf")
    }
}

pub async fn pdf_response(
    exporter: &dyn PdfExporter,
    resume: &Resume,
    visibility: SectionVisibility,
) -> Result<Response, AppError> {
    let bytes = exporter.export(resume, visibility).await?;
    let filename = pdf_filename(resume, Utc::now());
    tracing::info!(%filename, bytes = bytes.len(), "exported pdf");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Bytes::from(bytes),
    )
        .into_response())
}

pub fn print_response(
    resume: &Resume,
    visibility: SectionVisibility,
    auto_print: bool,
) -> Html<String> {
    let rendered = render_resume(resume, visibility);
    Html(print::print_document(
        &rendered,
        resume.paper_size,
        &resume.title,
        auto_print,
    ))
}
