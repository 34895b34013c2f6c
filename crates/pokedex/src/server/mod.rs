//! # HTTP Server
//!
//! Exposes the listing and creation contracts over HTTP:
//!
//! | Route | Success | Failure |
//! |-------|---------|---------|
//! | `GET /api/records?page&pageSize&query` | `200 {"data", "total"}` | `400` bad parameter |
//! | `POST /api/records` | `201` record | `400` violation array, `500 {"error"}` |
//! | `GET /health` | `200 {"status": "ok"}` | |
//!
//! Handlers only translate between HTTP and [`PokedexApi`]. Store calls are
//! synchronous (the file store writes on every insert), so they run on the
//! blocking pool.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use pokedexapp::api::PokedexApi;
use pokedexapp::error::PokedexError;
use pokedexapp::model::{NewRecord, PageResponse, Record, Violation};
use pokedexapp::store::RecordStore;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub type SharedApi = Arc<PokedexApi<Box<dyn RecordStore>>>;

#[derive(Clone)]
pub struct AppState {
    pub api: SharedApi,
}

impl AppState {
    pub fn new(api: PokedexApi<Box<dyn RecordStore>>) -> Self {
        Self { api: Arc::new(api) }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    page: Option<i64>,
    page_size: Option<i64>,
    query: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    Invalid(Vec<Violation>),
    Internal(String),
}

impl From<PokedexError> for ApiError {
    fn from(e: PokedexError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("request task failed: {}", e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(violations) => (StatusCode::BAD_REQUEST, Json(violations)).into_response(),
            ApiError::Internal(message) => {
                error!(%message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/records", get(list_records).post(create_record))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageResponse>, ApiError> {
    let api = Arc::clone(&state.api);
    let page = tokio::task::spawn_blocking(move || {
        api.list_page(params.page, params.page_size, params.query.as_deref())
    })
    .await??;
    Ok(Json(page))
}

async fn create_record(
    State(state): State<AppState>,
    Json(candidate): Json<NewRecord>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let api = Arc::clone(&state.api);
    let result = tokio::task::spawn_blocking(move || api.create_record(candidate)).await??;
    match result {
        Ok(record) => Ok((StatusCode::CREATED, Json(record))),
        Err(failure) => Err(ApiError::Invalid(failure.violations)),
    }
}

/// Serves on `listener` until ctrl-c.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
