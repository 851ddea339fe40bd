//! Modelo de Motorista
//!
//! Mapea a la tabla `motoristas`. El `user_id` vincula al usuario de auth;
//! solo los motoristas `autonomo` pueden aceptar cargas por sí mismos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de cadastro - mapea al ENUM tipo_cadastro_motorista
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "tipo_cadastro_motorista", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoCadastroMotorista {
    Autonomo,
    Frota,
}

/// Motorista - columnas de `motoristas` que usa este core
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Motorista {
    pub id: Uuid,
    pub user_id: Uuid,
    pub nome: String,
    pub tipo_cadastro: TipoCadastroMotorista,
    pub created_at: DateTime<Utc>,
}
