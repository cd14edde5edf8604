//! Local HTTP surface for the message boundary.
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /v1/enhance - Refine a prompt (extension message in, extension response out)

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::{FileSettingsStore, SettingsStore};
use crate::error::ApiError;
use crate::message::{InboundMessage, MessageHandler, OutboundResponse};
use crate::refine::Refiner;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: MessageHandler,
}

impl AppState {
    pub fn new(store: Arc<dyn SettingsStore>, refiner: Refiner) -> Self {
        Self {
            handler: MessageHandler::new(store, refiner),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(FileSettingsStore::default()), Refiner::default())
    }
}

/// Create the API router with custom state.
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/enhance", post(enhance))
        .with_state(Arc::new(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// Refinement failures are in-band (200 + {"error"}), matching the extension
// message channel; only an unreadable body gets a non-2xx status.
async fn enhance(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InboundMessage>, JsonRejection>,
) -> Result<Json<OutboundResponse>, ApiError> {
    let Json(message) = payload?;
    Ok(Json(state.handler.handle(message).await))
}
