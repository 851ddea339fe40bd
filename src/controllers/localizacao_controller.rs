//! Pipeline de ingesta de localizaciones
//!
//! Orden contractual: validación de campos → rate limiter → filtro de
//! accuracy → enriquecimiento cinemático → insert. Un rechazo en
//! cualquier paso corta el pipeline sin escribir nada.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::localizacao_dto::{KinematicMetrics, LocationEvent, LocationInput, LocationResponse};
use crate::middleware::rate_limit::RateLimiterState;
use crate::models::localizacao::{Localizacao, NovaLocalizacao};
use crate::repositories::localizacao_repository::LocalizacaoRepository;
use crate::utils::errors::AppError;
use crate::utils::geo::haversine_distance_km;

/// Muestras con accuracy peor que esto no entran al historial; protegen
/// la matemática de distancia/velocidad del ruido de GPS.
const MAX_ACCURACY_M: f64 = 50.0;

/// Umbral de batería baja, en porcentaje
const LOW_BATTERY_PCT: f64 = 20.0;

/// Por debajo de este radio la muestra cuenta como "cerca del destino"
const NEAR_DESTINATION_KM: f64 = 0.5;

/// Velocidad derivada sobre la cual se asume movimiento
const MOVING_SPEED_KMH: f64 = 5.0;

/// Métricas cinemáticas derivadas de la muestra anterior
#[derive(Debug, Clone, Copy, PartialEq)]
struct Kinematics {
    distance_km: f64,
    speed_kmh: f64,
    is_moving: bool,
}

pub struct LocalizacaoController {
    localizacoes: LocalizacaoRepository,
}

impl LocalizacaoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            localizacoes: LocalizacaoRepository::new(pool),
        }
    }

    pub async fn ingest(
        &self,
        rate_limiter: &RateLimiterState,
        input: LocationInput,
    ) -> Result<LocationResponse, AppError> {
        // 1. Campos requeridos y rangos
        let (entrega_id, motorista_id, latitude, longitude) = input.required_fields()?;
        input.validate()?;

        // 2. Admisión por motorista
        rate_limiter.check(motorista_id).await?;

        // 3. Filtro de accuracy
        if let Some(accuracy) = input.accuracy {
            if accuracy > MAX_ACCURACY_M {
                return Err(AppError::LowAccuracy(accuracy));
            }
        }

        // 4. Enriquecimiento a partir de la muestra anterior
        let anterior = self.localizacoes.ultima_da_entrega(entrega_id).await?;
        let agora = Utc::now();
        let kinematics = enrich(&input, anterior.as_ref(), latitude, longitude, agora);

        // 5. Persistir la muestra enriquecida
        let location = self
            .localizacoes
            .inserir(NovaLocalizacao {
                entrega_id,
                motorista_id,
                latitude,
                longitude,
                accuracy: input.accuracy,
                speed: kinematics.speed_kmh,
                heading: input.heading,
                altitude: input.altitude,
                battery_level: input.battery_level,
                is_moving: kinematics.is_moving,
                created_at: agora,
            })
            .await?;

        let events = derive_events(input.battery_level, kinematics.distance_km);

        info!(
            "📍 Localización registrada: entrega={} distancia={:.3}km velocidad={:.1}km/h",
            entrega_id, kinematics.distance_km, kinematics.speed_kmh
        );

        Ok(LocationResponse {
            success: true,
            location,
            events,
            metrics: KinematicMetrics::new(kinematics.distance_km, kinematics.speed_kmh),
        })
    }
}

/// Derivar distancia y velocidad contra la muestra anterior.
///
/// Sin muestra anterior: distancia 0 y la velocidad que reportó el
/// dispositivo. Con gap de tiempo cero o negativo (timestamps duplicados
/// o fuera de orden) no se divide: se cae a la velocidad reportada.
fn enrich(
    input: &LocationInput,
    anterior: Option<&Localizacao>,
    latitude: f64,
    longitude: f64,
    agora: DateTime<Utc>,
) -> Kinematics {
    let (distance_km, speed_kmh) = match anterior {
        None => (0.0, input.speed.unwrap_or(0.0)),
        Some(prev) => {
            let distance_km =
                haversine_distance_km(prev.latitude, prev.longitude, latitude, longitude);
            let elapsed_hours =
                (agora - prev.created_at).num_milliseconds() as f64 / 3_600_000.0;

            let speed_kmh = if elapsed_hours > 0.0 {
                distance_km / elapsed_hours
            } else {
                input.speed.unwrap_or(0.0)
            };

            (distance_km, speed_kmh)
        }
    };

    Kinematics {
        distance_km,
        speed_kmh,
        is_moving: input.is_moving.unwrap_or(speed_kmh > MOVING_SPEED_KMH),
    }
}

/// Eventos derivados que solo viajan en la respuesta.
fn derive_events(battery_level: Option<f64>, distance_km: f64) -> Vec<LocationEvent> {
    let mut events = Vec::new();

    if let Some(level) = battery_level {
        if level < LOW_BATTERY_PCT {
            events.push(LocationEvent::LowBattery { level });
        }
    }

    if distance_km > 0.0 && distance_km < NEAR_DESTINATION_KM {
        events.push(LocationEvent::NearDestination { distance_km });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn input(speed: Option<f64>, is_moving: Option<bool>) -> LocationInput {
        LocationInput {
            entrega_id: Some(Uuid::new_v4()),
            motorista_id: Some(Uuid::new_v4()),
            latitude: Some(-23.5505),
            longitude: Some(-46.6333),
            accuracy: None,
            speed,
            heading: None,
            altitude: None,
            battery_level: None,
            is_moving,
        }
    }

    fn muestra_anterior(latitude: f64, longitude: f64, created_at: DateTime<Utc>) -> Localizacao {
        Localizacao {
            id: Uuid::new_v4(),
            entrega_id: Uuid::new_v4(),
            motorista_id: Uuid::new_v4(),
            latitude,
            longitude,
            accuracy: None,
            speed: 0.0,
            heading: None,
            altitude: None,
            battery_level: None,
            is_moving: true,
            created_at,
        }
    }

    #[test]
    fn test_sin_muestra_anterior_usa_velocidad_reportada() {
        let agora = Utc::now();
        let kin = enrich(&input(Some(42.0), None), None, -23.5505, -46.6333, agora);

        assert_eq!(kin.distance_km, 0.0);
        assert_eq!(kin.speed_kmh, 42.0);
        assert!(kin.is_moving);
    }

    #[test]
    fn test_sin_muestra_anterior_ni_velocidad_queda_en_cero() {
        let agora = Utc::now();
        let kin = enrich(&input(None, None), None, -23.5505, -46.6333, agora);

        assert_eq!(kin.speed_kmh, 0.0);
        assert!(!kin.is_moving);
    }

    #[test]
    fn test_velocidad_derivada_del_gap_de_tiempo() {
        let agora = Utc::now();
        // ~0.5 km al norte, 60 segundos antes => ~30 km/h
        let anterior = muestra_anterior(-23.5505, -46.6333, agora - Duration::seconds(60));
        let kin = enrich(&input(Some(99.0), None), Some(&anterior), -23.5460, -46.6333, agora);

        assert!(kin.distance_km > 0.4 && kin.distance_km < 0.6);
        assert!(kin.speed_kmh > 24.0 && kin.speed_kmh < 36.0, "velocidad: {}", kin.speed_kmh);
        assert!(kin.is_moving);
    }

    #[test]
    fn test_gap_cero_no_divide_y_cae_a_la_velocidad_reportada() {
        let agora = Utc::now();
        let anterior = muestra_anterior(-23.5505, -46.6333, agora);
        let kin = enrich(&input(Some(37.5), None), Some(&anterior), -23.5460, -46.6333, agora);

        assert_eq!(kin.speed_kmh, 37.5);
    }

    #[test]
    fn test_gap_negativo_cae_a_la_velocidad_reportada() {
        let agora = Utc::now();
        // Timestamp fuera de orden: la "anterior" es más nueva que agora
        let anterior = muestra_anterior(-23.5505, -46.6333, agora + Duration::seconds(30));
        let kin = enrich(&input(None, None), Some(&anterior), -23.5460, -46.6333, agora);

        assert_eq!(kin.speed_kmh, 0.0);
    }

    #[test]
    fn test_is_moving_del_caller_tiene_prioridad() {
        let agora = Utc::now();
        let kin = enrich(&input(Some(80.0), Some(false)), None, -23.5505, -46.6333, agora);
        assert!(!kin.is_moving);
    }

    #[test]
    fn test_evento_de_bateria_baja() {
        let events = derive_events(Some(19.9), 0.0);
        assert_eq!(events, vec![LocationEvent::LowBattery { level: 19.9 }]);

        assert!(derive_events(Some(20.0), 0.0).is_empty());
        assert!(derive_events(None, 0.0).is_empty());
    }

    #[test]
    fn test_evento_cerca_del_destino_excluye_los_bordes() {
        assert_eq!(
            derive_events(None, 0.3),
            vec![LocationEvent::NearDestination { distance_km: 0.3 }]
        );
        // Distancia cero (primera muestra) y el borde de 0.5 no califican
        assert!(derive_events(None, 0.0).is_empty());
        assert!(derive_events(None, 0.5).is_empty());
    }
}
