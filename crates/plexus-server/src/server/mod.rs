// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use plexus_db::{Plexus, PlexusError, ServerConfig, Ticket};

use crate::actions::{ComputeRequest, CreateGraphRequest, ErrorResponse, status_for};

/// Shared application state passed to handlers.
struct AppState {
    db: Plexus,
    metrics_handle: Option<PrometheusHandle>,
}

/// Starts the HTTP server with the given service handle and configuration.
///
/// # Security
///
/// See [`ServerConfig`] for CORS options. Production deployments should
/// configure explicit `allowed_origins` and sit behind a trusted gateway.
///
/// # Errors
///
/// Returns an error if the TCP listener fails to bind or the server
/// encounters a fatal error.
pub async fn start_server(db: Plexus, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    if let Some(warning) = config.security_warning() {
        warn!("SECURITY: {}", warning);
    }

    // Install the Prometheus recorder; a failure means one is already
    // installed and we serve without a handle.
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .ok();

    let cors = build_cors_layer(&config);

    let app_state = Arc::new(AppState { db, metrics_handle });

    let app = Router::new()
        .route("/api/v1/graphs", post(create_graph_handler))
        .route("/api/v1/graphs", get(list_graphs_handler))
        .route("/api/v1/graphs/:name", delete(remove_graph_handler))
        .route("/api/v1/compute", post(compute_handler))
        .route("/api/v1/retrieve/:ticket", get(retrieve_handler))
        .route("/api/v1/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the CORS layer based on server configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allowed_origins.is_empty() {
        // No origins allowed - most restrictive
        cors
    } else if config.allowed_origins.len() == 1 && config.allowed_origins[0] == "*" {
        // Allow any origin (development mode)
        cors.allow_origin(AllowOrigin::any())
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

fn error_response(err: PlexusError) -> Response {
    let status = status_for(&err);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Health check endpoint for load balancers and monitoring.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn create_graph_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateGraphRequest>,
) -> Response {
    let (name, source) = payload.into_parts();
    match state.db.create_graph(&name, source).await {
        Ok(summary) => (StatusCode::CREATED, Json(summary)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_graphs_handler(State(state): State<Arc<AppState>>) -> Response {
    Json(state.db.list_graphs()).into_response()
}

async fn remove_graph_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    match state.db.remove_graph(&name) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// Runs an algorithm and returns the result ticket.
///
/// The cancellation token is cancelled when this handler future is
/// dropped, so a client that disconnects mid-run aborts the iteration
/// loop instead of leaving it pinned to the graph.
async fn compute_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ComputeRequest>,
) -> Response {
    let cancel = CancellationToken::new();
    let _abort_on_disconnect = cancel.clone().drop_guard();

    match state
        .db
        .compute(
            &payload.graph_name,
            payload.algorithm,
            &payload.property_key,
            cancel,
        )
        .await
    {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Streams a property dataset as newline-delimited JSON record batches.
async fn retrieve_handler(
    State(state): State<Arc<AppState>>,
    Path(ticket): Path<Ticket>,
) -> Response {
    let batches = match state.db.retrieve(&ticket) {
        Ok(batches) => batches,
        Err(e) => return error_response(e),
    };

    let stream = futures::stream::iter(batches.map(|batch| {
        serde_json::to_string(&batch).map(|mut line| {
            line.push('\n');
            line
        })
    }));

    (
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        Body::from_stream(stream),
    )
        .into_response()
}

async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if let Some(handle) = &state.metrics_handle {
        handle.render()
    } else {
        "Metrics not initialized (recorder install failed)".to_string()
    }
}
