//! Modelo de Carroceria
//!
//! Mapea a la tabla `carrocerias`. `capacidade_kg` es el techo de peso
//! que limita cada aceptación individual; no es un contador de saldo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Carroceria - columnas de `carrocerias` que usa este core
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Carroceria {
    pub id: Uuid,
    pub motorista_id: Option<Uuid>,
    pub tipo: String,
    pub capacidade_kg: Option<f64>,
    pub created_at: DateTime<Utc>,
}
