//! Rutas de tracking
//!
//! `POST /localizacao` — ingesta de una muestra GPS.
//! `POST /eventos` — sweep de monitoreo, lo pega un scheduler externo
//! cada 30 segundos, sin body.

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};

use crate::controllers::localizacao_controller::LocalizacaoController;
use crate::controllers::monitor_controller::MonitorController;
use crate::dto::localizacao_dto::{LocationPayload, LocationResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::AppJson;

pub fn create_tracking_router() -> Router<AppState> {
    Router::new()
        .route("/localizacao", post(ingest_localizacao))
        .route("/eventos", post(sweep_eventos))
}

async fn ingest_localizacao(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LocationPayload>,
) -> Result<Json<LocationResponse>, AppError> {
    let input = payload.into_input()?;
    let controller = LocalizacaoController::new(state.pool.clone());
    let response = controller.ingest(&state.rate_limiter, input).await?;
    Ok(Json(response))
}

async fn sweep_eventos(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let controller = MonitorController::new(state.pool.clone());
    let summary = controller.sweep().await?;

    // Forma corta del contrato original cuando no hay nada que evaluar
    if summary.sessions_checked == 0 {
        return Ok(Json(json!({ "message": "No active sessions" })));
    }

    Ok(Json(serde_json::to_value(summary).map_err(|e| {
        AppError::Internal(format!("Error serializando el resumen del sweep: {}", e))
    })?))
}
