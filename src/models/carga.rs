//! Modelo de Carga
//!
//! Mapea a la tabla `cargas`. El `status` es derivado por completo de
//! `peso_disponivel_kg`; ambos se actualizan dentro de la misma
//! transacción de aceptación para que nunca diverjan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Estado de la carga - mapea al ENUM status_carga
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "status_carga", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusCarga {
    Publicada,
    ParcialmenteAlocada,
    TotalmenteAlocada,
}

impl StatusCarga {
    /// Derivar el estado a partir del peso total y el disponible.
    ///
    /// Regla de tres vías: disponible == total => publicada;
    /// 0 < disponible < total => parcialmente_alocada;
    /// disponible == 0 => totalmente_alocada.
    pub fn derivar(peso_total_kg: f64, peso_disponivel_kg: f64) -> Self {
        if peso_disponivel_kg <= 0.0 {
            StatusCarga::TotalmenteAlocada
        } else if peso_disponivel_kg < peso_total_kg {
            StatusCarga::ParcialmenteAlocada
        } else {
            StatusCarga::Publicada
        }
    }

    /// ¿La carga sigue aceptando allocaciones?
    pub fn aceita_alocacao(&self) -> bool {
        matches!(self, StatusCarga::Publicada | StatusCarga::ParcialmenteAlocada)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCarga::Publicada => "publicada",
            StatusCarga::ParcialmenteAlocada => "parcialmente_alocada",
            StatusCarga::TotalmenteAlocada => "totalmente_alocada",
        }
    }
}

/// Carga - columnas de `cargas` que usa este core
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Carga {
    pub id: Uuid,
    pub codigo: String,
    pub descricao: String,
    pub peso_kg: f64,
    /// None hasta la primera aceptación (equivale al peso total)
    pub peso_disponivel_kg: Option<f64>,
    pub permite_fracionado: bool,
    pub status: StatusCarga,
    pub endereco_destino_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Carga {
    /// Peso todavía disponible para alocar
    pub fn peso_disponivel(&self) -> f64 {
        self.peso_disponivel_kg.unwrap_or(self.peso_kg)
    }

    /// Validar que esta carga puede aceptar `peso_kg`.
    ///
    /// Se ejecuta dos veces por aceptación: como pre-chequeo advisory
    /// sobre la fila leída sin lock, y de nuevo dentro de la transacción
    /// sobre la fila bloqueada con `FOR UPDATE`.
    pub fn validar_aceite(&self, peso_kg: f64) -> Result<(), AppError> {
        if !self.status.aceita_alocacao() {
            return Err(AppError::CargaIndisponivel {
                status: self.status.as_str().to_string(),
            });
        }

        if !self.permite_fracionado && peso_kg != self.peso_kg {
            return Err(AppError::CargaNaoFracionada {
                peso_requerido_kg: self.peso_kg,
            });
        }

        let disponivel = self.peso_disponivel();
        if peso_kg > disponivel {
            return Err(AppError::PesoExcedeDisponivel {
                peso_disponivel_kg: disponivel,
            });
        }

        Ok(())
    }
}
