pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::builder::handlers as builder;
use crate::export::handlers as export;
use crate::pickers::handlers as pickers;
use crate::preview::handlers as preview;
use crate::render::handlers as render;
use crate::state::AppState;

/// Multipart framing overhead allowed on top of the image size limit.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_image_bytes + UPLOAD_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless rendering
        .route("/api/v1/render", post(render::handle_render))
        .route("/api/v1/preview", post(preview::handle_preview))
        .route("/api/v1/templates", get(render::handle_list_templates))
        .route(
            "/api/v1/templates/:template/preview",
            get(render::handle_template_preview),
        )
        .route("/api/v1/export/pdf", post(export::handle_export_pdf))
        .route("/api/v1/export/print", post(export::handle_export_print))
        // Pickers
        .route("/api/v1/pickers/fonts", get(pickers::handle_fonts))
        .route("/api/v1/pickers/email", get(pickers::handle_email))
        .route("/api/v1/pickers/color", get(pickers::handle_color))
        .route("/api/v1/pickers/margins", get(pickers::handle_margins))
        // Builder sessions
        .route("/api/v1/builder", post(builder::handle_create_session))
        .route(
            "/api/v1/builder/:id",
            get(builder::handle_get_session).delete(builder::handle_delete_session),
        )
        .route("/api/v1/builder/:id/resume", put(builder::handle_replace_resume))
        .route("/api/v1/builder/:id/title", put(builder::handle_set_title))
        .route("/api/v1/builder/:id/next", post(builder::handle_next_step))
        .route("/api/v1/builder/:id/previous", post(builder::handle_previous_step))
        .route(
            "/api/v1/builder/:id/lists/:list/add",
            post(builder::handle_list_add),
        )
        .route(
            "/api/v1/builder/:id/lists/:list/remove",
            post(builder::handle_list_remove),
        )
        .route(
            "/api/v1/builder/:id/lists/:list/move",
            post(builder::handle_list_move),
        )
        .route("/api/v1/builder/:id/margins", put(builder::handle_set_margins))
        .route(
            "/api/v1/builder/:id/image",
            post(builder::handle_upload_image)
                .delete(builder::handle_clear_image)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/builder/:id/preview", get(builder::handle_session_preview))
        .route(
            "/api/v1/builder/:id/export/pdf",
            post(builder::handle_session_export_pdf),
        )
        .route(
            "/api/v1/builder/:id/export/print",
            post(builder::handle_session_export_print),
        )
        .with_state(state)
}
