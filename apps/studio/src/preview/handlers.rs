use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::resume::Resume;
use crate::preview::{build_preview, Preview, Viewport};
use crate::render::SectionVisibility;

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub resume: Resume,
    #[serde(default)]
    pub visibility: SectionVisibility,
    pub container_width: f32,
    pub container_height: Option<f32>,
    /// Height of the laid-out markup when the client has measured it.
    pub content_height: Option<f32>,
}

/// POST /api/v1/preview
pub async fn handle_preview(AppJson(mut req): AppJson<PreviewRequest>) -> Result<Json<Preview>, AppError> {
    req.resume.normalize();
    let viewport = Viewport {
        container_width: req.container_width,
        container_height: req.container_height,
        content_height: req.content_height,
    };
    Ok(Json(build_preview(&req.resume, req.visibility, viewport)?))
}
