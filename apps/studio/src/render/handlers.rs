//! Axum route handlers for stateless rendering and the template gallery.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::resume::{Resume, TemplateKind};
use crate::render::sample::sample_resume;
use crate::render::{render_resume, theme_for, RenderedResume, SectionVisibility};

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub resume: Resume,
    #[serde(default)]
    pub visibility: SectionVisibility,
}

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub default_font: &'static str,
    pub shows_photo: bool,
}

#[derive(Debug, Deserialize)]
pub struct TemplatePreviewQuery {
    pub accent_color: Option<String>,
}

/// POST /api/v1/render
pub async fn handle_render(AppJson(mut req): AppJson<RenderRequest>) -> Json<RenderedResume> {
    req.resume.normalize();
    Json(render_resume(&req.resume, req.visibility))
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(
        TemplateKind::ALL
            .into_iter()
            .map(|kind| {
                let theme = theme_for(kind);
                TemplateSummary {
                    id: kind.slug(),
                    name: theme.name,
                    description: theme.description,
                    default_font: theme.default_font,
                    shows_photo: theme.show_photo,
                }
            })
            .collect(),
    )
}

/// GET /api/v1/templates/:template/preview
///
/// Renders the gallery sample in the requested template for the preview modal.
pub async fn handle_template_preview(
    AppPath(template): AppPath<String>,
    AppQuery(query): AppQuery<TemplatePreviewQuery>,
) -> Result<Json<RenderedResume>, AppError> {
    let kind = TemplateKind::from_slug(&template)
        .ok_or_else(|| AppError::NotFound(format!("Template '{template}' not found")))?;

    let mut sample = sample_resume(kind);
    if let Some(accent) = query.accent_color.filter(|c| !c.trim().is_empty()) {
        sample.accent_color = accent;
    }
    Ok(Json(render_resume(&sample, SectionVisibility::default())))
}
