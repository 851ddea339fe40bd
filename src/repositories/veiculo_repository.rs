//! Acceso a datos de veículos

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::veiculo::Veiculo;
use crate::utils::errors::AppError;

pub struct VeiculoRepository {
    pool: PgPool,
}

impl VeiculoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Veiculo>, AppError> {
        let veiculo = sqlx::query_as::<_, Veiculo>(
            r#"
            SELECT id, motorista_id, placa, carroceria_integrada, carroceria_id, created_at
            FROM veiculos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(veiculo)
    }
}
