use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::builder::image::to_data_url;
use crate::builder::lists::{self, ListKey};
use crate::builder::session::{update_session, BuilderSession, SessionSnapshot};
use crate::builder::title_gate::GateStatus;
use crate::builder::wizard::StepOutcome;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::export::{pdf_response, print_response};
use crate::models::resume::Resume;
use crate::preview::{build_preview, Preview, Viewport};
use crate::render::SectionVisibility;
use crate::state::AppState;
use crate::style::margins::{MarginPreset, PageMargins};

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/builder
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let mut session = BuilderSession::new(state.config.title_gate);
    let snapshot = session.snapshot();
    state.sessions.insert(session).await?;
    tracing::info!(session_id = %snapshot.id, "builder session created");
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/builder/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.sessions.get(id).await?;
    Ok(Json(session.snapshot()))
}

/// DELETE /api/v1/builder/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    tracing::info!(session_id = %id, "builder session discarded");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Content edits
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/builder/:id/resume
pub async fn handle_replace_resume(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(resume): AppJson<Resume>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = update_session(state.sessions.as_ref(), id, |s| {
        s.replace_resume(resume)?;
        Ok(s.snapshot())
    })
    .await?;
    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
pub struct TitleInput {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct TitleResponse {
    pub title: String,
    pub gate: GateStatus,
}

/// PUT /api/v1/builder/:id/title
///
/// Always accepted; this is the input that drives the title gate.
pub async fn handle_set_title(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(input): AppJson<TitleInput>,
) -> Result<Json<TitleResponse>, AppError> {
    let response = update_session(state.sessions.as_ref(), id, |s| {
        let gate = s.set_title(input.title);
        Ok(TitleResponse {
            title: s.resume.title.clone(),
            gate,
        })
    })
    .await?;
    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Wizard steps
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/builder/:id/next
pub async fn handle_next_step(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<StepOutcome>, AppError> {
    let outcome = update_session(state.sessions.as_ref(), id, |s| s.next_step()).await?;
    if !outcome.moved && !outcome.missing_fields.is_empty() {
        tracing::debug!(
            session_id = %id,
            missing = outcome.missing_fields.len(),
            "step blocked by required fields"
        );
    }
    Ok(Json(outcome))
}

/// POST /api/v1/builder/:id/previous
pub async fn handle_previous_step(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<StepOutcome>, AppError> {
    let outcome = update_session(state.sessions.as_ref(), id, |s| s.previous_step()).await?;
    Ok(Json(outcome))
}

// ────────────────────────────────────────────────────────────────────────────
// Repeatable lists
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct AddEntry {
    /// Initial content; a blank entry when absent.
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveEntry {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct MoveEntry {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Serialize)]
pub struct ListEditResponse {
    pub list: ListKey,
    pub len: usize,
}

fn list_key(segment: &str) -> Result<ListKey, AppError> {
    ListKey::from_path(segment).ok_or_else(|| AppError::NotFound(format!("List '{segment}' not found")))
}

async fn edit_list<F>(
    state: &AppState,
    id: Uuid,
    key: ListKey,
    edit: F,
) -> Result<Json<ListEditResponse>, AppError>
where
    F: FnOnce(&mut Resume) -> Result<usize, AppError> + Send,
{
    let len = update_session(state.sessions.as_ref(), id, |s| {
        s.ensure_unlocked()?;
        let len = edit(&mut s.resume)?;
        s.touch();
        Ok(len)
    })
    .await?;
    Ok(Json(ListEditResponse { list: key, len }))
}

/// POST /api/v1/builder/:id/lists/:list/add
pub async fn handle_list_add(
    State(state): State<AppState>,
    AppPath((id, list)): AppPath<(Uuid, String)>,
    AppJson(body): AppJson<AddEntry>,
) -> Result<Json<ListEditResponse>, AppError> {
    let key = list_key(&list)?;
    edit_list(&state, id, key, |r| lists::add(r, key, body.value)).await
}

/// POST /api/v1/builder/:id/lists/:list/remove
pub async fn handle_list_remove(
    State(state): State<AppState>,
    AppPath((id, list)): AppPath<(Uuid, String)>,
    AppJson(body): AppJson<RemoveEntry>,
) -> Result<Json<ListEditResponse>, AppError> {
    let key = list_key(&list)?;
    edit_list(&state, id, key, |r| lists::remove(r, key, body.index)).await
}

/// POST /api/v1/builder/:id/lists/:list/move
pub async fn handle_list_move(
    State(state): State<AppState>,
    AppPath((id, list)): AppPath<(Uuid, String)>,
    AppJson(body): AppJson<MoveEntry>,
) -> Result<Json<ListEditResponse>, AppError> {
    let key = list_key(&list)?;
    edit_list(&state, id, key, |r| lists::move_entry(r, key, body.from, body.to)).await
}

// ────────────────────────────────────────────────────────────────────────────
// Page setup and image
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MarginsInput {
    pub preset: MarginPreset,
    /// Required when `preset` is `custom`.
    pub margins: Option<PageMargins>,
}

#[derive(Debug, Serialize)]
pub struct MarginsResponse {
    pub preset: MarginPreset,
    pub margins: PageMargins,
}

/// PUT /api/v1/builder/:id/margins
pub async fn handle_set_margins(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(input): AppJson<MarginsInput>,
) -> Result<Json<MarginsResponse>, AppError> {
    let margins = match (input.preset, input.margins) {
        (MarginPreset::Custom, Some(m)) if m.is_valid() => m,
        (MarginPreset::Custom, _) => {
            return Err(AppError::Validation(
                "Custom margins need non-negative top, right, bottom and left values".to_string(),
            ))
        }
        (preset, _) => preset.margins(),
    };

    let applied = update_session(state.sessions.as_ref(), id, |s| {
        s.ensure_unlocked()?;
        s.resume.page_margins = margins;
        s.touch();
        Ok(s.resume.page_margins)
    })
    .await?;
    Ok(Json(MarginsResponse {
        preset: applied.preset(),
        margins: applied,
    }))
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub image: String,
}

/// POST /api/v1/builder/:id/image  (multipart, field `image`)
pub async fn handle_upload_image(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ImageResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
        upload = Some((data, content_type));
        break;
    }
    let (data, content_type) =
        upload.ok_or_else(|| AppError::Validation("Missing 'image' file field".to_string()))?;

    let data_url = to_data_url(&data, content_type.as_deref(), state.config.max_image_bytes)?;
    let image = update_session(state.sessions.as_ref(), id, |s| {
        s.ensure_unlocked()?;
        s.resume.personal_info.image = Some(data_url.clone());
        s.touch();
        Ok(data_url)
    })
    .await?;
    tracing::info!(session_id = %id, bytes = data.len(), "profile image stored");
    Ok(Json(ImageResponse { image }))
}

/// DELETE /api/v1/builder/:id/image
pub async fn handle_clear_image(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    update_session(state.sessions.as_ref(), id, |s| {
        s.ensure_unlocked()?;
        s.resume.personal_info.image = None;
        s.touch();
        Ok(())
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Preview and export
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ViewportQuery {
    pub container_width: f32,
    pub container_height: Option<f32>,
    pub content_height: Option<f32>,
}

/// GET /api/v1/builder/:id/preview
pub async fn handle_session_preview(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(q): AppQuery<ViewportQuery>,
) -> Result<Json<Preview>, AppError> {
    let session = state.sessions.get(id).await?;
    let viewport = Viewport {
        container_width: q.container_width,
        container_height: q.container_height,
        content_height: q.content_height,
    };
    Ok(Json(build_preview(
        &session.resume,
        SectionVisibility::default(),
        viewport,
    )?))
}

/// POST /api/v1/builder/:id/export/pdf
pub async fn handle_session_export_pdf(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, AppError> {
    let session = state.sessions.get(id).await?;
    pdf_response(state.pdf.as_ref(), &session.resume, SectionVisibility::default()).await
}

#[derive(Debug, Deserialize)]
pub struct PrintQuery {
    pub auto_print: Option<bool>,
}

/// POST /api/v1/builder/:id/export/print
pub async fn handle_session_export_print(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(q): AppQuery<PrintQuery>,
) -> Result<Html<String>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(print_response(
        &session.resume,
        SectionVisibility::default(),
        q.auto_print.unwrap_or(true),
    ))
}
