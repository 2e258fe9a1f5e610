use axum::{extract::State, response::Html, response::Response};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::export::{pdf_response, print_response};
use crate::models::resume::Resume;
use crate::render::SectionVisibility;
use crate::state::AppState;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub resume: Resume,
    #[serde(default)]
    pub visibility: SectionVisibility,
    /// Print only: append the `window.print()` trigger.
    #[serde(default = "default_true")]
    pub auto_print: bool,
}

/// POST /api/v1/export/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    AppJson(mut req): AppJson<ExportRequest>,
) -> Result<Response, AppError> {
    req.resume.normalize();
    pdf_response(state.pdf.as_ref(), &req.resume, req.visibility).await
}

/// POST /api/v1/export/print
pub async fn handle_export_print(AppJson(mut req): AppJson<ExportRequest>) -> Html<String> {
    req.resume.normalize();
    print_response(&req.resume, req.visibility, req.auto_print)
}
