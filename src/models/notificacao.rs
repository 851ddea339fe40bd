//! Notificaciones del sweep de monitoreo
//!
//! Filas append-only de `notifications_log`. Nunca se actualizan; solo se
//! leen para deduplicar por (entrega, tipo) dentro de la ventana de
//! lookback de cada tipo.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Tipo de notificación emitida por el sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoNotificacao {
    ChegadaDestino,
    EtaUpdate,
    Offline,
}

impl TipoNotificacao {
    /// Valor de la columna `tipo` (contrato con las apps que consumen el log)
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoNotificacao::ChegadaDestino => "chegada_destino",
            TipoNotificacao::EtaUpdate => "eta_update",
            TipoNotificacao::Offline => "offline",
        }
    }

    /// Ventana de lookback: una notificación del mismo tipo dentro de la
    /// ventana suprime la nueva emisión.
    pub fn janela_dedup(&self) -> Duration {
        match self {
            TipoNotificacao::ChegadaDestino => Duration::minutes(5),
            TipoNotificacao::EtaUpdate => Duration::minutes(10),
            TipoNotificacao::Offline => Duration::minutes(15),
        }
    }

    pub fn titulo(&self) -> &'static str {
        match self {
            TipoNotificacao::ChegadaDestino => "🏁 Chegando ao Destino",
            TipoNotificacao::EtaUpdate => "⏱️ Previsão de Chegada",
            TipoNotificacao::Offline => "📶 Motorista Offline",
        }
    }
}

/// Notificación acumulada durante el sweep, pendiente del insert en batch
#[derive(Debug, Clone)]
pub struct NovaNotificacao {
    pub entrega_id: Uuid,
    pub motorista_id: Uuid,
    pub tipo: TipoNotificacao,
    pub titulo: String,
    pub mensagem: String,
    pub dados: Value,
    pub enviada_em: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tipo_as_str() {
        assert_eq!(TipoNotificacao::ChegadaDestino.as_str(), "chegada_destino");
        assert_eq!(TipoNotificacao::EtaUpdate.as_str(), "eta_update");
        assert_eq!(TipoNotificacao::Offline.as_str(), "offline");
    }

    #[test]
    fn test_janelas_de_dedup() {
        assert_eq!(TipoNotificacao::ChegadaDestino.janela_dedup(), Duration::minutes(5));
        assert_eq!(TipoNotificacao::EtaUpdate.janela_dedup(), Duration::minutes(10));
        assert_eq!(TipoNotificacao::Offline.janela_dedup(), Duration::minutes(15));
    }

}
