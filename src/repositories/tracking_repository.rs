//! Acceso a datos de sesiones de tracking
//!
//! El sweep las lee con las coordenadas de destino ya joineadas a través
//! de entrega → carga → endereço de destino.

use sqlx::{FromRow, PgPool};

use crate::models::tracking_session::TrackingSession;
use crate::utils::errors::AppError;

/// Sesión activa junto con el destino de su carga (si tiene coordenadas)
#[derive(Debug, Clone, FromRow)]
pub struct SessaoAtiva {
    #[sqlx(flatten)]
    pub session: TrackingSession,
    pub destino_latitude: Option<f64>,
    pub destino_longitude: Option<f64>,
}

pub struct TrackingRepository {
    pool: PgPool,
}

impl TrackingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todas las sesiones con status `active`, con destino joineado.
    pub async fn sessoes_ativas(&self) -> Result<Vec<SessaoAtiva>, AppError> {
        let sessoes = sqlx::query_as::<_, SessaoAtiva>(
            r#"
            SELECT ts.id, ts.entrega_id, ts.motorista_id, ts.status, ts.started_at,
                   ts.total_distance_km, ts.average_speed_kmh, ts.last_location_at,
                   ed.latitude AS destino_latitude,
                   ed.longitude AS destino_longitude
            FROM tracking_sessions ts
            JOIN entregas en ON en.id = ts.entrega_id
            JOIN cargas c ON c.id = en.carga_id
            LEFT JOIN enderecos_carga ed ON ed.id = c.endereco_destino_id
            WHERE ts.status = 'active'
            ORDER BY ts.started_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sessoes)
    }
}
