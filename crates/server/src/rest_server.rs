//! REST API server implementation using Axum
//!
//! This module provides the REST API routes over the scheduling engine,
//! along with the OpenAPI document for the exposed endpoints.

use crate::api::{IngestRequest, IngestResponse, StatusResponse};
use axum::{
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use ingestq_core::config::ServerConfig;
use ingestq_core::error::Error;
use ingestq_scheduler::Scheduler;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;
use uuid::Uuid;

/// Shared application state
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) scheduler: Arc<Scheduler>,
}

/// Build the Axum router with all endpoints
pub fn build_router(scheduler: Arc<Scheduler>, server_config: &ServerConfig) -> Router {
    let state = AppState { scheduler };

    let router = Router::new()
        // Ingestion endpoints
        .route("/api/v1/ingest", post(ingest_handler))
        .route("/api/v1/status/{ingestion_id}", get(status_handler))
        // Health check
        .route("/health", get(health_handler));

    // OpenAPI documentation
    #[cfg(feature = "openapi")]
    let router = router.route("/api-docs/openapi.json", get(openapi_handler));

    // Configure CORS based on allowed_origins
    let cors_layer = if server_config.allowed_origins.is_empty() {
        // CORS disabled
        CorsLayer::new()
    } else if server_config.allowed_origins.contains(&"*".to_string()) {
        // Allow all origins
        CorsLayer::permissive()
    } else {
        // Allow specific origins
        let origins: Vec<HeaderValue> = server_config
            .allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([axum::http::header::CONTENT_TYPE])
            .allow_origin(AllowOrigin::list(origins))
    };

    router
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /api/v1/ingest
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/ingest",
    request_body = IngestRequest,
    responses(
        (status = 200, description = "Submission accepted and queued", body = IngestResponse),
        (status = 400, description = "Empty work-item list or unrecognized priority class"),
        (status = 500, description = "Internal server error")
    ),
    tag = "ingestion"
))]
async fn ingest_handler(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let priority = request.parse_priority()?;

    tracing::info!(
        "Ingest request: {} items, priority={priority}",
        request.ids.len()
    );

    let ingestion_id = state.scheduler.submit(request.ids, priority).await?;
    Ok(Json(IngestResponse { ingestion_id }))
}

/// GET /api/v1/status/{ingestion_id}
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/status/{ingestion_id}",
    params(
        ("ingestion_id" = Uuid, Path, description = "Identifier returned by the ingest endpoint")
    ),
    responses(
        (status = 200, description = "Current ingestion status with per-batch detail", body = StatusResponse),
        (status = 400, description = "Malformed ingestion identifier"),
        (status = 404, description = "Unknown ingestion identifier"),
        (status = 500, description = "Internal server error")
    ),
    tag = "ingestion"
))]
async fn status_handler(
    State(state): State<AppState>,
    Path(ingestion_id): Path<Uuid>,
) -> Result<Json<StatusResponse>, ApiError> {
    tracing::debug!(%ingestion_id, "Status lookup");

    let ingestion = state.scheduler.status(ingestion_id)?;
    Ok(Json(StatusResponse::from(ingestion)))
}

/// GET /health
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    ),
    tag = "health"
))]
async fn health_handler() -> impl IntoResponse {
    use serde_json::json;

    let health_status = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    });

    (StatusCode::OK, Json(health_status))
}

/// GET /api-docs/openapi.json
#[cfg(feature = "openapi")]
async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Error handling for API endpoints
#[derive(Debug)]
pub enum ApiError {
    InvalidRequest(String),
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(err) => {
                // Log the full error details for debugging
                tracing::error!("Internal server error: {err:?}");
                // Return a generic message to the client to avoid information disclosure
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidSubmission(_) => ApiError::InvalidRequest(err.to_string()),
            Error::NotFound(_) => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.into()),
        }
    }
}

/// OpenAPI documentation
#[cfg(feature = "openapi")]
#[derive(OpenApi)]
#[openapi(
    paths(ingest_handler, status_handler, health_handler),
    components(schemas(
        IngestRequest,
        IngestResponse,
        StatusResponse,
        ingestq_core::types::Batch,
        ingestq_core::types::BatchStatus,
        ingestq_core::types::IngestionStatus,
        ingestq_core::types::WorkItemId,
    )),
    tags(
        (name = "ingestion", description = "Submission and status endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
struct ApiDoc;
