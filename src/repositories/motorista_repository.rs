//! Acceso a datos de motoristas

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::motorista::Motorista;
use crate::utils::errors::AppError;

pub struct MotoristaRepository {
    pool: PgPool,
}

impl MotoristaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolver el motorista a partir del user_id de auth (el `sub` del JWT).
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Motorista>, AppError> {
        let motorista = sqlx::query_as::<_, Motorista>(
            "SELECT id, user_id, nome, tipo_cadastro, created_at FROM motoristas WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(motorista)
    }
}
