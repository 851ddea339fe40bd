//! DTOs del pipeline de localización
//!
//! El body llega envuelto como `{"location": {...}}` (contrato con las
//! apps móviles). Los campos requeridos se verifican a mano para poder
//! responder `missing_required_fields` en vez del rechazo genérico de
//! deserialización.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::localizacao::Localizacao;
use crate::utils::errors::AppError;

/// Request de ingesta: `{"location": {...}}`
#[derive(Debug, Deserialize)]
pub struct LocationPayload {
    /// Ausente cuando el body no trae el wrapper; cuenta como campos
    /// requeridos faltantes, no como payload ilegible
    pub location: Option<LocationInput>,
}

impl LocationPayload {
    pub fn into_input(self) -> Result<LocationInput, AppError> {
        self.location.ok_or(AppError::MissingFields)
    }
}

/// Una muestra cruda reportada por el dispositivo del motorista
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationInput {
    pub entrega_id: Option<Uuid>,
    pub motorista_id: Option<Uuid>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0))]
    pub accuracy: Option<f64>,
    pub speed: Option<f64>,
    #[validate(range(min = 0.0, max = 360.0))]
    pub heading: Option<f64>,
    pub altitude: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub battery_level: Option<f64>,
    pub is_moving: Option<bool>,
}

impl LocationInput {
    /// Verificar presencia de los campos obligatorios.
    pub fn required_fields(&self) -> Result<(Uuid, Uuid, f64, f64), AppError> {
        match (self.entrega_id, self.motorista_id, self.latitude, self.longitude) {
            (Some(entrega_id), Some(motorista_id), Some(latitude), Some(longitude)) => {
                Ok((entrega_id, motorista_id, latitude, longitude))
            }
            _ => Err(AppError::MissingFields),
        }
    }
}

/// Evento derivado de la muestra; solo viaja en la respuesta, nunca se persiste
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LocationEvent {
    LowBattery { level: f64 },
    NearDestination { distance_km: f64 },
}

/// Métricas cinemáticas derivadas de la muestra anterior
#[derive(Debug, Serialize)]
pub struct KinematicMetrics {
    /// Distancia a la muestra anterior, formateada a 3 decimales
    pub distance_km: String,
    /// Velocidad derivada en km/h, formateada a 1 decimal
    pub speed_kmh: String,
}

impl KinematicMetrics {
    pub fn new(distance_km: f64, speed_kmh: f64) -> Self {
        Self {
            distance_km: format!("{:.3}", distance_km),
            speed_kmh: format!("{:.1}", speed_kmh),
        }
    }
}

/// Respuesta 200 de la ingesta
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub success: bool,
    pub location: Localizacao,
    pub events: Vec<LocationEvent>,
    pub metrics: KinematicMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_fields_completos() {
        let input: LocationPayload = serde_json::from_value(json!({
            "location": {
                "entrega_id": Uuid::new_v4(),
                "motorista_id": Uuid::new_v4(),
                "latitude": -23.5505,
                "longitude": -46.6333
            }
        }))
        .unwrap();

        assert!(input.into_input().unwrap().required_fields().is_ok());
    }

    #[test]
    fn test_required_fields_faltantes() {
        let input: LocationPayload = serde_json::from_value(json!({
            "location": { "latitude": -23.5505, "longitude": -46.6333 }
        }))
        .unwrap();

        assert!(matches!(
            input.into_input().unwrap().required_fields(),
            Err(AppError::MissingFields)
        ));
    }

    #[test]
    fn test_body_sin_wrapper_location() {
        let input: LocationPayload = serde_json::from_value(json!({})).unwrap();

        assert!(matches!(input.into_input(), Err(AppError::MissingFields)));
    }

    #[test]
    fn test_metricas_mantienen_el_formato_del_contrato() {
        let metrics = KinematicMetrics::new(0.48234, 37.14);
        assert_eq!(metrics.distance_km, "0.482");
        assert_eq!(metrics.speed_kmh, "37.1");
    }

    #[test]
    fn test_eventos_serializan_con_tag() {
        let event = LocationEvent::LowBattery { level: 12.0 };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "low_battery");
        assert_eq!(value["level"], 12.0);
    }
}
