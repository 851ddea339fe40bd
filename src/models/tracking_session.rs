//! Modelo de TrackingSession
//!
//! Mapea a la tabla `tracking_sessions`: el contexto de tracking en vivo
//! de una entrega en curso. Este core solo la lee (el ciclo de vida de la
//! sesión lo manejan los flujos de entrega fuera de alcance).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// TrackingSession - columnas de `tracking_sessions` que usa este core
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrackingSession {
    pub id: Uuid,
    pub entrega_id: Uuid,
    pub motorista_id: Uuid,
    /// `active` mientras la entrega está en curso, `ended` al cerrar
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub total_distance_km: f64,
    pub average_speed_kmh: Option<f64>,
    pub last_location_at: Option<DateTime<Utc>>,
}
