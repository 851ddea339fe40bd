//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas. Los códigos de error
//! (`carga_not_available`, `veiculo_not_owned`, ...) son parte del
//! contrato con las apps móviles y no deben renombrarse.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    // --- Pipeline de localización ---
    #[error("Missing required fields")]
    MissingFields,

    #[error("Location accuracy too low: {0}m")]
    LowAccuracy(f64),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // --- Identidad ---
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // --- Aceptación de carga ---
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Motorista not found for authenticated user")]
    MotoristaNotFound,

    #[error("Only autonomo drivers can accept cargas")]
    OnlyAutonomoCanAccept,

    #[error("Veiculo not found")]
    VeiculoNotFound,

    #[error("Veiculo does not belong to motorista")]
    VeiculoNotOwned,

    #[error("Carroceria id is required for this veiculo")]
    CarroceriaObrigatoria,

    #[error("Carroceria not found")]
    CarroceriaNotFound,

    #[error("Carroceria does not belong to motorista")]
    CarroceriaNotOwned,

    #[error("Carroceria has no capacidade_kg configured")]
    CarroceriaSemCapacidade,

    #[error("Peso exceeds carroceria capacity of {capacidade_kg}kg")]
    PesoExcedeCarroceria { capacidade_kg: f64 },

    #[error("Carga not found")]
    CargaNotFound,

    #[error("Carga is not available (status: {status})")]
    CargaIndisponivel { status: String },

    #[error("Carga does not allow fractional acceptance, required {peso_requerido_kg}kg")]
    CargaNaoFracionada { peso_requerido_kg: f64 },

    #[error("Peso exceeds available weight of {peso_disponivel_kg}kg")]
    PesoExcedeDisponivel { peso_disponivel_kg: f64 },

    // --- Infraestructura ---
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingFields => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "missing_required_fields", "message": "Missing required fields" }),
            ),
            AppError::LowAccuracy(accuracy) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "low_accuracy", "message": "Location accuracy too low", "accuracy": accuracy }),
            ),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": "rate_limit_exceeded", "message": "Rate limit exceeded. Please slow down." }),
            ),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "validation_error", "details": errors }),
            ),
            AppError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "unauthorized", "message": message }),
            ),
            AppError::InvalidPayload(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid_payload", "message": message }),
            ),
            AppError::MotoristaNotFound => (
                StatusCode::FORBIDDEN,
                json!({ "error": "motorista_not_found" }),
            ),
            AppError::OnlyAutonomoCanAccept => (
                StatusCode::FORBIDDEN,
                json!({ "error": "only_autonomo_can_accept" }),
            ),
            AppError::VeiculoNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "veiculo_not_found" }),
            ),
            AppError::VeiculoNotOwned => (
                StatusCode::FORBIDDEN,
                json!({ "error": "veiculo_not_owned" }),
            ),
            AppError::CarroceriaObrigatoria => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "carroceria_obrigatoria" }),
            ),
            AppError::CarroceriaNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "carroceria_not_found" }),
            ),
            AppError::CarroceriaNotOwned => (
                StatusCode::FORBIDDEN,
                json!({ "error": "carroceria_not_owned" }),
            ),
            AppError::CarroceriaSemCapacidade => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "carroceria_missing_capacidade_kg" }),
            ),
            AppError::PesoExcedeCarroceria { capacidade_kg } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "peso_exceeds_carroceria_capacity", "available_kg": capacidade_kg }),
            ),
            AppError::CargaNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "carga_not_found" }),
            ),
            AppError::CargaIndisponivel { status } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "carga_not_available", "status": status }),
            ),
            AppError::CargaNaoFracionada { peso_requerido_kg } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "carga_not_fracionada", "required_kg": peso_requerido_kg }),
            ),
            AppError::PesoExcedeDisponivel { peso_disponivel_kg } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "peso_exceeds_carga_available", "available_kg": peso_disponivel_kg }),
            ),
            AppError::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "database_error", "details": e.to_string() }),
            ),
            AppError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "unexpected_error", "details": message }),
            ),
        };

        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::warn!("⚠️ {}", self);
        }

        (status, Json(body)).into_response()
    }
}

/// Un body que axum no puede deserializar es un error del cliente con
/// el código del contrato, no el 422 genérico.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::InvalidPayload(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: AppError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_client_errors_map_to_400() {
        assert_eq!(status_of(AppError::MissingFields), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::LowAccuracy(72.0)), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::CargaNaoFracionada { peso_requerido_kg: 1000.0 }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::PesoExcedeDisponivel { peso_disponivel_kg: 120.0 }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_ownership_errors_map_to_403() {
        assert_eq!(status_of(AppError::MotoristaNotFound), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AppError::OnlyAutonomoCanAccept), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AppError::VeiculoNotOwned), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AppError::CarroceriaNotOwned), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_missing_entities_map_to_404() {
        assert_eq!(status_of(AppError::VeiculoNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::CarroceriaNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::CargaNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rate_limit_maps_to_429() {
        assert_eq!(status_of(AppError::RateLimited), StatusCode::TOO_MANY_REQUESTS);
    }
}
