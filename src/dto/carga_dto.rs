//! DTOs de la aceptación de carga

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::entrega::Entrega;
use crate::utils::errors::AppError;

/// Request de aceptación: `POST /api/cargas/aceitar`
#[derive(Debug, Clone, Deserialize)]
pub struct AceitarCargaRequest {
    pub carga_id: Uuid,
    pub veiculo_id: Uuid,
    /// Requerida solo para veículos sin carroceria integrada
    pub carroceria_id: Option<Uuid>,
    pub peso_kg: f64,
}

impl AceitarCargaRequest {
    /// El peso debe ser un número finito mayor que cero.
    pub fn validar_peso(&self) -> Result<(), AppError> {
        if !self.peso_kg.is_finite() || self.peso_kg <= 0.0 {
            return Err(AppError::InvalidPayload(
                "peso_kg debe ser un número mayor que cero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Respuesta 200 de la aceptación
#[derive(Debug, Serialize)]
pub struct AceitarCargaResponse {
    pub entrega: Entrega,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(peso_kg: f64) -> AceitarCargaRequest {
        AceitarCargaRequest {
            carga_id: Uuid::new_v4(),
            veiculo_id: Uuid::new_v4(),
            carroceria_id: None,
            peso_kg,
        }
    }

    #[test]
    fn test_peso_positivo_es_valido() {
        assert!(request(500.0).validar_peso().is_ok());
    }

    #[test]
    fn test_peso_cero_o_negativo_es_invalido() {
        assert!(request(0.0).validar_peso().is_err());
        assert!(request(-10.0).validar_peso().is_err());
    }

    #[test]
    fn test_peso_no_finito_es_invalido() {
        assert!(request(f64::NAN).validar_peso().is_err());
        assert!(request(f64::INFINITY).validar_peso().is_err());
    }
}
