//! Acceso a datos de cargas

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::carga::Carga;
use crate::utils::errors::AppError;

pub struct CargaRepository {
    pool: PgPool,
}

impl CargaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Carga>, AppError> {
        let carga = sqlx::query_as::<_, Carga>(
            r#"
            SELECT id, codigo, descricao, peso_kg, peso_disponivel_kg,
                   permite_fracionado, status, endereco_destino_id, created_at
            FROM cargas
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(carga)
    }
}
