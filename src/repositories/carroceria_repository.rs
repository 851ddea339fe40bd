//! Acceso a datos de carrocerias

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::carroceria::Carroceria;
use crate::utils::errors::AppError;

pub struct CarroceriaRepository {
    pool: PgPool,
}

impl CarroceriaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Carroceria>, AppError> {
        let carroceria = sqlx::query_as::<_, Carroceria>(
            "SELECT id, motorista_id, tipo, capacidade_kg, created_at FROM carrocerias WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(carroceria)
    }
}
