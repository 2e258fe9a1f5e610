//! Lookup endpoints backing the editor's dropdowns and pickers.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::AppQuery;
use crate::pickers::color::{hex_to_hsl, Hsl};
use crate::pickers::email;
use crate::style::color::{text_color_for, TextColor};
use crate::style::fonts::{FontChoice, FONT_CATALOG};
use crate::style::margins::{MarginPreset, PageMargins};

/// GET /api/v1/pickers/fonts
pub async fn handle_fonts() -> Json<&'static [FontChoice]> {
    Json(FONT_CATALOG)
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct EmailSuggestions {
    pub suggestions: Vec<String>,
}

/// GET /api/v1/pickers/email?input=
pub async fn handle_email(AppQuery(q): AppQuery<EmailQuery>) -> Json<EmailSuggestions> {
    Json(EmailSuggestions {
        suggestions: email::suggest(&q.input),
    })
}

#[derive(Debug, Deserialize)]
pub struct ColorQuery {
    pub h: Option<f32>,
    pub s: Option<f32>,
    pub l: Option<f32>,
    /// Reverse lookup: a hex color to decompose.
    pub hex: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ColorResponse {
    pub hex: String,
    pub hsl: Hsl,
    pub text_color: TextColor,
}

/// GET /api/v1/pickers/color?h=&s=&l=  (or ?hex=)
pub async fn handle_color(AppQuery(q): AppQuery<ColorQuery>) -> Result<Json<ColorResponse>, AppError> {
    let hsl = match (q.hex.as_deref(), q.h, q.s, q.l) {
        (Some(hex), _, _, _) => hex_to_hsl(hex),
        (None, Some(h), Some(s), Some(l)) => Hsl::normalized(h, s, l),
        _ => {
            return Err(AppError::Validation(
                "Provide either hex or all of h, s and l".to_string(),
            ))
        }
    };
    let hex = hsl.to_rgb().to_hex();
    Ok(Json(ColorResponse {
        text_color: text_color_for(&hex),
        hex,
        hsl,
    }))
}

#[derive(Debug, Serialize)]
pub struct MarginOption {
    pub id: MarginPreset,
    pub label: &'static str,
    pub margins: PageMargins,
}

/// GET /api/v1/pickers/margins
pub async fn handle_margins() -> Json<Vec<MarginOption>> {
    Json(
        MarginPreset::PRESETS
            .into_iter()
            .map(|preset| MarginOption {
                id: preset,
                label: preset.label(),
                margins: preset.margins(),
            })
            .collect(),
    )
}
