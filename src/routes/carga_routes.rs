//! Rutas de cargas
//!
//! `POST /aceitar` — aceptación de carga por el motorista autenticado.

use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};

use crate::controllers::carga_controller::CargaController;
use crate::dto::carga_dto::{AceitarCargaRequest, AceitarCargaResponse};
use crate::middleware::auth::authenticate;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::AppJson;

pub fn create_carga_router() -> Router<AppState> {
    Router::new().route("/aceitar", post(aceitar_carga))
}

async fn aceitar_carga(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(request): AppJson<AceitarCargaRequest>,
) -> Result<Json<AceitarCargaResponse>, AppError> {
    let claims = authenticate(&headers, &state.config)?;
    let user_id = claims.user_id()?;

    let controller = CargaController::new(state.pool.clone());
    let response = controller.aceitar(user_id, request).await?;
    Ok(Json(response))
}
