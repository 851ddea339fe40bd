//! Modelo de Entrega
//!
//! Mapea a la tabla `entregas`. Una entrega es la porción aceptada de una
//! carga, ligada a un motorista, un veículo y la carroceria efectiva.
//! Se crea exactamente una vez por aceptación, dentro de la transacción
//! atómica que debita `peso_disponivel_kg` de la carga.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la entrega - mapea al ENUM status_entrega
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "status_entrega", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusEntrega {
    Aguardando,
    SaiuParaColeta,
    SaiuParaEntrega,
    Entregue,
    Problema,
    Cancelada,
}

/// Entrega - columnas de `entregas` que usa este core
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entrega {
    pub id: Uuid,
    pub carga_id: Uuid,
    pub motorista_id: Uuid,
    pub veiculo_id: Uuid,
    /// Carroceria efectiva: la integrada del veículo o la enviada por el caller
    pub carroceria_id: Uuid,
    pub peso_alocado_kg: f64,
    pub status: StatusEntrega,
    pub created_at: DateTime<Utc>,
}
