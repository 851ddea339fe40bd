//! Acceso a datos del log de notificaciones
//!
//! `notifications_log` es append-only: se inserta en batch al final del
//! sweep y solo se lee para los lookups de deduplicación.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::models::notificacao::{NovaNotificacao, TipoNotificacao};
use crate::utils::errors::AppError;

pub struct NotificacaoRepository {
    pool: PgPool,
}

impl NotificacaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Timestamp de la última notificación de un tipo para una entrega.
    pub async fn ultima_do_tipo(
        &self,
        entrega_id: Uuid,
        tipo: TipoNotificacao,
    ) -> Result<Option<DateTime<Utc>>, AppError> {
        let enviada_em = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT enviada_em
            FROM notifications_log
            WHERE entrega_id = $1 AND tipo = $2
            ORDER BY enviada_em DESC
            LIMIT 1
            "#,
        )
        .bind(entrega_id)
        .bind(tipo.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(enviada_em)
    }

    /// Insertar todas las notificaciones de un sweep en un solo write.
    pub async fn inserir_batch(&self, novas: &[NovaNotificacao]) -> Result<u64, AppError> {
        if novas.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::new(
            "INSERT INTO notifications_log (id, entrega_id, motorista_id, tipo, \
             titulo, mensagem, dados, enviada_em) ",
        );

        builder.push_values(novas, |mut row, nova| {
            row.push_bind(Uuid::new_v4())
                .push_bind(nova.entrega_id)
                .push_bind(nova.motorista_id)
                .push_bind(nova.tipo.as_str())
                .push_bind(&nova.titulo)
                .push_bind(&nova.mensagem)
                .push_bind(&nova.dados)
                .push_bind(nova.enviada_em);
        });

        let result = builder.build().execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}
