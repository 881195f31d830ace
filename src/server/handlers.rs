use std::io::Write;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use log::{error, info};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::AppState;
use crate::error::PipelineError;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct DetectResponse {
    pub ingredients: String,
}

#[derive(Deserialize)]
pub struct RecipeRequest {
    #[serde(default)]
    pub ingredients: String,
}

#[derive(Serialize)]
pub struct RecipeResponse {
    pub recipe: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a pipeline failure onto the wire: client faults keep their message,
/// model/internal faults are logged in full and surfaced generically
fn map_pipeline_error(err: PipelineError) -> HandlerError {
    if err.is_client_error() {
        bad_request(err.to_string())
    } else {
        error!("{}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Internal Server Error".to_string(),
            }),
        )
    }
}

/// GET / - the interactive upload form
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /detect - detect ingredients in an uploaded photo.
///
/// Expects a multipart form with an `image` field. The upload is spooled
/// through a named temporary file whose drop removes it on every exit path,
/// success and failure alike.
pub async fn detect(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DetectResponse>, HandlerError> {
    let mut upload: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Malformed upload: {}", e)))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| bad_request(format!("Malformed upload: {}", e)))?;
            upload = Some(bytes.to_vec());
            break;
        }
    }
    let upload = upload.ok_or_else(|| bad_request("Missing image upload"))?;

    let tmp = spool_upload(&upload).map_err(map_pipeline_error)?;
    let image = tokio::fs::read(tmp.path())
        .await
        .map_err(|e| map_pipeline_error(PipelineError::Io(e)))?;

    let ingredients = state
        .pipeline
        .detect_ingredients(&image)
        .await
        .map_err(map_pipeline_error)?;

    info!("Detected ingredients: {}", ingredients);
    Ok(Json(DetectResponse {
        ingredients: ingredients.to_string(),
    }))
}

/// POST /recipe - generate a formatted recipe from an ingredient string
pub async fn recipe(
    State(state): State<AppState>,
    Json(request): Json<RecipeRequest>,
) -> Result<Json<RecipeResponse>, HandlerError> {
    if request.ingredients.trim().is_empty() {
        return Err(bad_request("No ingredients provided"));
    }

    let recipe = state
        .pipeline
        .create_recipe(&request.ingredients)
        .await
        .map_err(map_pipeline_error)?;

    Ok(Json(RecipeResponse {
        recipe: recipe.to_string(),
    }))
}

fn spool_upload(bytes: &[u8]) -> Result<NamedTempFile, PipelineError> {
    let mut tmp = NamedTempFile::new()?;
    tmp.write_all(bytes)?;
    Ok(tmp)
}
