use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::commands::analyze::analyze_meal;
use crate::config::Config;
use crate::error::AnalysisError;
use crate::inference::{GeminiVisionModel, VisionModel};
use crate::models::AnalyzeResponsePayload;
use crate::render::{IndexTemplate, render_page};
use crate::upload::{preview_uri, read_image_field};

/// Read-only state shared by every request.
pub struct AppState {
    pub config: Config,
    pub model: Arc<dyn VisionModel>,
}

impl AppState {
    pub fn new(config: Config, model: Arc<dyn VisionModel>) -> Self {
        Self { config, model }
    }

    pub fn with_gemini(config: Config) -> Self {
        let model = Arc::new(GeminiVisionModel::from_config(&config));
        Self::new(config, model)
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze_page))
        .route("/api/analyze", post(analyze_api))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until `shutdown` resolves.
pub async fn serve(state: AppState, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
    let address = state.config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    tracing::info!(
        address = %listener.local_addr()?,
        model = state.model.name(),
        "Calorie Compass listening"
    );

    axum::serve(listener, build_router(Arc::new(state)))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")
}

async fn index() -> Response {
    render_page(StatusCode::OK, &IndexTemplate::new())
}

async fn analyze_page(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let page = IndexTemplate::new();

    let upload = match read_image_field(&mut multipart).await {
        Ok(upload) => upload,
        Err(err) => {
            err.log();
            return render_page(err.status_code(), &page.with_error(&err));
        }
    };
    let preview = upload.as_ref().and_then(preview_uri);

    match analyze_meal(state.model.as_ref(), upload).await {
        Ok((_, report)) => render_page(StatusCode::OK, &page.with_preview(preview).with_report(&report)),
        Err(err) => {
            err.log();
            render_page(err.status_code(), &page.with_preview(preview).with_error(&err))
        }
    }
}

async fn analyze_api(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponsePayload>, AnalysisError> {
    let upload = read_image_field(&mut multipart).await?;
    let (image, report) = analyze_meal(state.model.as_ref(), upload).await?;
    Ok(Json(AnalyzeResponsePayload::new(report, &image)))
}

async fn health() -> impl IntoResponse {
    "ok"
}
