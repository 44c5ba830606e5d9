use axum::{Json, extract::{Path, State}, http::StatusCode, response::{Html, IntoResponse, Response}};
use std::{collections::HashMap, sync::Arc};
use base64::Engine;
use chrono::{DateTime, Utc};
use include_dir::{include_dir, Dir};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{
    hf::{GenerateError, ImageBackend, MODEL_NAME},
    history::HistoryStore,
    models::{ErrorBody, GenerateRequest, Generation, SessionResponse, StatusResponse},
    prompt::compose,
};

static STATIC_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/static");

#[derive(Clone)]
pub struct AppState {
    /// One HistoryStore per session id. Sessions are never shared: each
    /// browser tab holds its own id and sees only its own history.
    pub sessions: Arc<RwLock<HashMap<Uuid, HistoryStore>>>,
    pub backend: Arc<dyn ImageBackend>,
    pub token_configured: bool,
}

#[derive(Debug)]
pub struct ApiError(pub GenerateError);

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GenerateError::EmptyPrompt => StatusCode::UNPROCESSABLE_ENTITY,
            GenerateError::TokenMissing => StatusCode::SERVICE_UNAVAILABLE,
            GenerateError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            GenerateError::Unauthorized => StatusCode::UNAUTHORIZED,
            GenerateError::ModelNotFound => StatusCode::NOT_FOUND,
            GenerateError::Unknown(_) => StatusCode::BAD_GATEWAY,
        };
        let body = ErrorBody {
            kind: self.0.kind().to_string(),
            message: self.0.to_string(),
            hint: self.0.hint(),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn index() -> Html<&'static str> {
    Html(
        STATIC_DIR
            .get_file("index.html")
            .and_then(|f| f.contents_utf8())
            .unwrap_or(""),
    )
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        token_configured: state.token_configured,
        model: MODEL_NAME.to_string(),
    })
}

pub async fn create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session_id = Uuid::new_v4();
    state.sessions.write().insert(session_id, HistoryStore::default());
    tracing::info!("🆕 Created session {}", session_id);
    Json(SessionResponse { session_id })
}

/// The full request lifecycle: validate, compose, call the backend, then
/// record into the session's history. A whitespace-only prompt and a missing
/// token both short-circuit before any network I/O; nothing is recorded on
/// failure.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<Generation>, ApiError> {
    if body.prompt.trim().is_empty() {
        tracing::warn!("⚠️ Rejected empty prompt for session {}", body.session_id);
        return Err(GenerateError::EmptyPrompt.into());
    }
    if !state.token_configured {
        return Err(GenerateError::TokenMissing.into());
    }

    let enhanced_prompt = compose(&body.prompt, body.style);
    let (width, height) = body.size.dimensions();
    tracing::info!(
        "🎨 Generating {}x{} image for session {} with prompt: {}",
        width,
        height,
        body.session_id,
        enhanced_prompt.chars().take(100).collect::<String>()
    );

    let raw_bytes = state.backend.generate(&enhanced_prompt, width, height).await?;
    let png_bytes = encode_png(&raw_bytes)?;

    let generation = Generation {
        id: Uuid::new_v4(),
        original_prompt: body.prompt.clone(),
        enhanced_prompt,
        style: body.style,
        size_label: body.size.dimension_label(),
        width,
        height,
        image_base64: base64::engine::general_purpose::STANDARD.encode(&png_bytes),
        created_at: Utc::now(),
    };

    tracing::info!(
        "✅ Image generated for session {}: {} PNG bytes, entry {}",
        body.session_id,
        png_bytes.len(),
        generation.id
    );

    let mut sessions = state.sessions.write();
    sessions
        .entry(body.session_id)
        .or_default()
        .record(generation.clone());

    Ok(Json(generation))
}

pub async fn list_history(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Json<Vec<Generation>> {
    let sessions = state.sessions.read();
    Json(sessions.get(&session_id).map(|s| s.list()).unwrap_or_default())
}

pub async fn clear_history(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> StatusCode {
    if let Some(store) = state.sessions.write().get_mut(&session_id) {
        store.clear();
        tracing::info!("🧹 Cleared history for session {}", session_id);
    }
    StatusCode::NO_CONTENT
}

pub async fn download_generation(
    Path((session_id, generation_id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> Response {
    let sessions = state.sessions.read();
    if let Some(generation) = sessions.get(&session_id).and_then(|s| s.get(generation_id)) {
        let bytes = match base64::engine::general_purpose::STANDARD.decode(&generation.image_base64) {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("❌ Stored image for {} is not valid base64: {}", generation_id, e);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(axum::http::header::CONTENT_TYPE, "image/png".parse().unwrap());
        headers.insert(
            axum::http::header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download_filename(&generation.created_at))
                .parse()
                .unwrap(),
        );
        return (StatusCode::OK, headers, bytes).into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}

fn download_filename(created_at: &DateTime<Utc>) -> String {
    format!("ai_generated_{}.png", created_at.format("%Y%m%d_%H%M%S"))
}

/// The backend hands back whatever encoding the model produced (often JPEG);
/// downloads are always PNG, so re-encode here.
fn encode_png(raw: &[u8]) -> Result<Vec<u8>, GenerateError> {
    let decoded = image::load_from_memory(raw)
        .map_err(|e| GenerateError::Unknown(format!("could not decode image: {}", e)))?;
    let mut buf = std::io::Cursor::new(Vec::new());
    decoded
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| GenerateError::Unknown(format!("could not encode PNG: {}", e)))?;
    Ok(buf.into_inner())
}
