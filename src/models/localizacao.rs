//! Modelo de muestra de localización
//!
//! Mapea a la tabla `locations` (append-only). La muestra más reciente de
//! una entrega, ordenada por `created_at`, es la "posición actual"; tanto
//! la ingesta como el sweep de monitoreo dependen de ese orden.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Muestra de localización persistida
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Localizacao {
    pub id: Uuid,
    pub entrega_id: Uuid,
    pub motorista_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    /// Velocidad en km/h, siempre la enriquecida (no la reportada cruda)
    pub speed: f64,
    pub heading: Option<f64>,
    pub altitude: Option<f64>,
    pub battery_level: Option<f64>,
    pub is_moving: bool,
    pub created_at: DateTime<Utc>,
}

/// Muestra ya enriquecida, lista para insertar
#[derive(Debug, Clone)]
pub struct NovaLocalizacao {
    pub entrega_id: Uuid,
    pub motorista_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub speed: f64,
    pub heading: Option<f64>,
    pub altitude: Option<f64>,
    pub battery_level: Option<f64>,
    pub is_moving: bool,
    pub created_at: DateTime<Utc>,
}
