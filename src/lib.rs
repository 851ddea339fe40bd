//! Core operacional de la plataforma de fretes
//!
//! Tres entry points independientes sobre el mismo PostgreSQL: ingesta
//! de localizaciones GPS, aceptación atómica de cargas y el sweep
//! periódico de monitoreo de viajes. El router se construye acá para
//! que los tests de integración lo puedan manejar sin levantar el
//! binario.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use middleware::cors::cors_middleware;
use state::AppState;

/// Armar el router completo de la aplicación.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/tracking", routes::tracking_routes::create_tracking_router())
        .nest("/api/cargas", routes::carga_routes::create_carga_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(state)
}

/// Liveness check, sin auth
async fn health() -> Json<Value> {
    Json(json!({
        "service": "freight-tracking",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
