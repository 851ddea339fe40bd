//! Acceso a datos de entregas
//!
//! Aquí vive el commit atómico de la aceptación: crear la entrega y
//! debitar `peso_disponivel_kg` de la carga en una sola transacción.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::carga::{Carga, StatusCarga};
use crate::models::entrega::{Entrega, StatusEntrega};
use crate::utils::errors::AppError;

pub struct EntregaRepository {
    pool: PgPool,
}

impl EntregaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear la entrega y debitar la carga, todo o nada.
    ///
    /// La fila de la carga se bloquea con `FOR UPDATE` y las reglas de
    /// negocio se reevalúan bajo el lock: los pre-chequeos del controller
    /// son advisory y dos aceptaciones concurrentes contra la misma carga
    /// serializan aquí. El perdedor cuyo recheck falla hace rollback con
    /// el mismo error de negocio que habría recibido por adelantado.
    pub async fn aceitar(
        &self,
        carga_id: Uuid,
        motorista_id: Uuid,
        veiculo_id: Uuid,
        carroceria_id: Uuid,
        peso_kg: f64,
    ) -> Result<Entrega, AppError> {
        let mut tx = self.pool.begin().await?;

        let carga = sqlx::query_as::<_, Carga>(
            r#"
            SELECT id, codigo, descricao, peso_kg, peso_disponivel_kg,
                   permite_fracionado, status, endereco_destino_id, created_at
            FROM cargas
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(carga_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::CargaNotFound)?;

        // Recheck bajo el lock; un Err suelta la transacción sin commit
        carga.validar_aceite(peso_kg)?;

        let novo_disponivel = carga.peso_disponivel() - peso_kg;
        let novo_status = StatusCarga::derivar(carga.peso_kg, novo_disponivel);

        let entrega = sqlx::query_as::<_, Entrega>(
            r#"
            INSERT INTO entregas (id, carga_id, motorista_id, veiculo_id,
                                  carroceria_id, peso_alocado_kg, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING id, carga_id, motorista_id, veiculo_id, carroceria_id,
                      peso_alocado_kg, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(carga_id)
        .bind(motorista_id)
        .bind(veiculo_id)
        .bind(carroceria_id)
        .bind(peso_kg)
        .bind(StatusEntrega::Aguardando)
        .fetch_one(&mut *tx)
        .await?;

        // El WHERE repite la guarda de disponibilidad como CAS; bajo el
        // lock nunca debería fallar, pero si falla no se debita de más.
        let updated = sqlx::query(
            r#"
            UPDATE cargas
            SET peso_disponivel_kg = $2, status = $3
            WHERE id = $1 AND COALESCE(peso_disponivel_kg, peso_kg) >= $4
            "#,
        )
        .bind(carga_id)
        .bind(novo_disponivel)
        .bind(novo_status)
        .bind(peso_kg)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::PesoExcedeDisponivel {
                peso_disponivel_kg: carga.peso_disponivel(),
            });
        }

        tx.commit().await?;

        Ok(entrega)
    }
}
