//! Acceso a datos de muestras de localización
//!
//! Las filas de `locations` son append-only; el orden por `created_at`
//! descendente define la "posición actual" de una entrega.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::localizacao::{Localizacao, NovaLocalizacao};
use crate::utils::errors::AppError;

pub struct LocalizacaoRepository {
    pool: PgPool,
}

impl LocalizacaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Muestra más reciente de una entrega.
    pub async fn ultima_da_entrega(&self, entrega_id: Uuid) -> Result<Option<Localizacao>, AppError> {
        let localizacao = sqlx::query_as::<_, Localizacao>(
            r#"
            SELECT id, entrega_id, motorista_id, latitude, longitude, accuracy,
                   speed, heading, altitude, battery_level, is_moving, created_at
            FROM locations
            WHERE entrega_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(entrega_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(localizacao)
    }

    /// Insertar una muestra ya enriquecida.
    pub async fn inserir(&self, nova: NovaLocalizacao) -> Result<Localizacao, AppError> {
        let localizacao = sqlx::query_as::<_, Localizacao>(
            r#"
            INSERT INTO locations (id, entrega_id, motorista_id, latitude, longitude,
                                   accuracy, speed, heading, altitude, battery_level,
                                   is_moving, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, entrega_id, motorista_id, latitude, longitude, accuracy,
                      speed, heading, altitude, battery_level, is_moving, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nova.entrega_id)
        .bind(nova.motorista_id)
        .bind(nova.latitude)
        .bind(nova.longitude)
        .bind(nova.accuracy)
        .bind(nova.speed)
        .bind(nova.heading)
        .bind(nova.altitude)
        .bind(nova.battery_level)
        .bind(nova.is_moving)
        .bind(nova.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(localizacao)
    }
}
