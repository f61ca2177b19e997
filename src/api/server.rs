use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::engine::Engine;

#[derive(Embed)]
#[folder = "src/assets/"]
struct Assets;

#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }
}

#[derive(Deserialize)]
struct DetectionPayload {
    camera_id: Option<String>,
    detection: Option<String>,
}

#[derive(Serialize)]
struct IngestResponse {
    status: &'static str,
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), std::io::Error> {
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/assets/{*path}", get(static_handler))
        .route("/api/event", post(event_handler))
        .route("/api/get_state", get(state_handler))
        .with_state(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    match Assets::get("index.html") {
        Some(content) => Html(content.data.to_vec()).into_response(),
        None => (StatusCode::NOT_FOUND, "index.html not found").into_response(),
    }
}

async fn static_handler(Path(path): Path<String>) -> impl IntoResponse {
    match Assets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

/// Best-effort ingestion: a payload missing its camera or label is
/// dropped by the engine without an error, and the response does not
/// distinguish processed from ignored.
async fn event_handler(
    State(state): State<AppState>,
    Json(payload): Json<DetectionPayload>,
) -> Response {
    if let (Some(camera_id), Some(detection)) = (&payload.camera_id, &payload.detection) {
        state.engine.process(camera_id, detection);
    } else {
        tracing::debug!("dropping detection payload with missing fields");
    }
    Json(IngestResponse { status: "success" }).into_response()
}

async fn state_handler(State(state): State<AppState>) -> Response {
    Json(state.engine.snapshot()).into_response()
}
