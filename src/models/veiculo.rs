//! Modelo de Veiculo
//!
//! Mapea a la tabla `veiculos`. Un veículo con `carroceria_integrada`
//! lleva su carroceria emparejada en `carroceria_id`; uno con carroceria
//! desmontable recibe la carroceria en cada aceptación. El campo legacy
//! `capacidade_kg` a nivel de veículo ya no participa en la validación de
//! capacidad: la capacidad vive en la carroceria.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Veiculo - columnas de `veiculos` que usa este core
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Veiculo {
    pub id: Uuid,
    pub motorista_id: Option<Uuid>,
    pub placa: String,
    pub carroceria_integrada: bool,
    /// Carroceria emparejada cuando `carroceria_integrada` es true
    pub carroceria_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
