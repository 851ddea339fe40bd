//! Sweep de monitoreo de viajes
//!
//! Recorre todas las sesiones de tracking activas, calcula proximidad y
//! ETA contra el destino de la carga y acumula notificaciones que se
//! insertan en un solo batch al final. Un fallo por sesión la saltea sin
//! frenar el resto; un fallo del batch se loguea y se reporta como cero
//! enviadas (at-least-once, las ventanas de dedup acotan los duplicados).

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use sqlx::PgPool;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::dto::monitor_dto::SweepSummary;
use crate::models::localizacao::Localizacao;
use crate::models::notificacao::{NovaNotificacao, TipoNotificacao};
use crate::repositories::localizacao_repository::LocalizacaoRepository;
use crate::repositories::notificacao_repository::NotificacaoRepository;
use crate::repositories::tracking_repository::{SessaoAtiva, TrackingRepository};
use crate::utils::errors::AppError;
use crate::utils::geo::haversine_distance_km;

/// Radio de llegada al destino
const ARRIVAL_RADIUS_KM: f64 = 0.5;

/// Rango de ETA que dispara el aviso de aproximación, en minutos
const ETA_APPROACH_MIN: i64 = 5;
const ETA_APPROACH_MAX: i64 = 15;

/// Sin muestras hace más de esto (minutos), el motorista cuenta como offline
const OFFLINE_AFTER_MIN: i64 = 10;

pub struct MonitorController {
    tracking: TrackingRepository,
    localizacoes: LocalizacaoRepository,
    notificacoes: NotificacaoRepository,
}

impl MonitorController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            tracking: TrackingRepository::new(pool.clone()),
            localizacoes: LocalizacaoRepository::new(pool.clone()),
            notificacoes: NotificacaoRepository::new(pool),
        }
    }

    pub async fn sweep(&self) -> Result<SweepSummary, AppError> {
        let sessoes = self.tracking.sessoes_ativas().await?;
        let sessions_checked = sessoes.len();
        let agora = Utc::now();

        let mut pendentes: Vec<NovaNotificacao> = Vec::new();

        for sessao in &sessoes {
            match self.avaliar_sessao(sessao, agora).await {
                Ok(mut novas) => pendentes.append(&mut novas),
                Err(e) => {
                    // Una sesión con problemas no frena la evaluación del resto
                    warn!("⚠️ Sesión {} salteada: {}", sessao.session.id, e);
                }
            }
        }

        let notifications_sent = match self.notificacoes.inserir_batch(&pendentes).await {
            Ok(n) => n as usize,
            Err(e) => {
                error!("❌ Falló el batch de {} notificaciones: {}", pendentes.len(), e);
                0
            }
        };

        info!(
            "🔄 Sweep completado: {} sesiones, {} notificaciones",
            sessions_checked, notifications_sent
        );

        Ok(SweepSummary {
            success: true,
            sessions_checked,
            notifications_sent,
        })
    }

    /// Evaluar una sesión y devolver las notificaciones que pasaron el dedup.
    async fn avaliar_sessao(
        &self,
        sessao: &SessaoAtiva,
        agora: DateTime<Utc>,
    ) -> Result<Vec<NovaNotificacao>, AppError> {
        // Sin coordenadas de destino no hay proximidad que calcular
        let (Some(destino_lat), Some(destino_lon)) =
            (sessao.destino_latitude, sessao.destino_longitude)
        else {
            return Ok(Vec::new());
        };

        let Some(ultima) = self
            .localizacoes
            .ultima_da_entrega(sessao.session.entrega_id)
            .await?
        else {
            return Ok(Vec::new());
        };

        let distance_km =
            haversine_distance_km(ultima.latitude, ultima.longitude, destino_lat, destino_lon);
        let eta_minutes = eta_minutes(distance_km, sessao.session.average_speed_kmh);
        let tipos = classify(distance_km, eta_minutes, agora - ultima.created_at);

        let mut novas = Vec::new();
        for tipo in tipos {
            if self.dentro_da_janela_dedup(sessao.session.entrega_id, tipo, agora).await? {
                continue;
            }
            novas.push(montar_notificacao(
                sessao, &ultima, tipo, distance_km, eta_minutes, agora,
            ));
        }

        Ok(novas)
    }

    /// ¿Hay una notificación del mismo tipo dentro del lookback?
    async fn dentro_da_janela_dedup(
        &self,
        entrega_id: Uuid,
        tipo: TipoNotificacao,
        agora: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let ultima = self.notificacoes.ultima_do_tipo(entrega_id, tipo).await?;
        Ok(suprimida(ultima, tipo, agora))
    }
}

/// Una emisión previa del mismo tipo dentro de su ventana de lookback
/// suprime la nueva; sin emisión previa (o fuera de la ventana) se emite.
fn suprimida(
    ultima: Option<DateTime<Utc>>,
    tipo: TipoNotificacao,
    agora: DateTime<Utc>,
) -> bool {
    matches!(ultima, Some(enviada_em) if agora - enviada_em < tipo.janela_dedup())
}

/// ETA en minutos; indefinida sin velocidad promedio positiva.
fn eta_minutes(distance_km: f64, average_speed_kmh: Option<f64>) -> Option<i64> {
    match average_speed_kmh {
        Some(speed) if speed > 0.0 => Some((distance_km / speed * 60.0).round() as i64),
        _ => None,
    }
}

/// Clasificar una sesión en los tipos que califican este tick.
///
/// Llegada y ETA son excluyentes (la llegada gana); offline es
/// independiente de ambas: mide la antigüedad de la muestra, no la
/// cercanía.
fn classify(
    distance_km: f64,
    eta_minutes: Option<i64>,
    sample_age: Duration,
) -> Vec<TipoNotificacao> {
    let mut tipos = Vec::new();

    if distance_km < ARRIVAL_RADIUS_KM {
        tipos.push(TipoNotificacao::ChegadaDestino);
    } else if let Some(eta) = eta_minutes {
        if (ETA_APPROACH_MIN..=ETA_APPROACH_MAX).contains(&eta) {
            tipos.push(TipoNotificacao::EtaUpdate);
        }
    }

    if sample_age > Duration::minutes(OFFLINE_AFTER_MIN) {
        tipos.push(TipoNotificacao::Offline);
    }

    tipos
}

/// Armar la fila de notificación con los textos del producto.
fn montar_notificacao(
    sessao: &SessaoAtiva,
    ultima: &Localizacao,
    tipo: TipoNotificacao,
    distance_km: f64,
    eta_minutes: Option<i64>,
    agora: DateTime<Utc>,
) -> NovaNotificacao {
    let (mensagem, dados) = match tipo {
        TipoNotificacao::ChegadaDestino => {
            let distance_m = (distance_km * 1000.0).round() as i64;
            (
                format!("Você está a {}m do destino", distance_m),
                json!({ "distance_m": distance_m }),
            )
        }
        TipoNotificacao::EtaUpdate => {
            let eta = eta_minutes.unwrap_or_default();
            (
                format!("Você deve chegar em aproximadamente {} minutos", eta),
                json!({ "eta_minutes": eta, "distance_km": distance_km }),
            )
        }
        TipoNotificacao::Offline => (
            "Sem atualizações de localização há mais de 10 minutos".to_string(),
            json!({ "last_update": ultima.created_at }),
        ),
    };

    NovaNotificacao {
        entrega_id: sessao.session.entrega_id,
        motorista_id: sessao.session.motorista_id,
        tipo,
        titulo: tipo.titulo().to_string(),
        mensagem,
        dados,
        enviada_em: agora,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tracking_session::TrackingSession;

    #[test]
    fn test_dedup_de_chegada_suprime_y_emite() {
        let agora = Utc::now();

        // Dos sweeps que califican a llegada: a 2 minutos del anterior
        // la emisión se suprime; a 6 minutos queda fuera de la ventana
        // de 5 y se emite de nuevo
        let hace_2_min = Some(agora - Duration::minutes(2));
        let hace_6_min = Some(agora - Duration::minutes(6));

        assert!(suprimida(hace_2_min, TipoNotificacao::ChegadaDestino, agora));
        assert!(!suprimida(hace_6_min, TipoNotificacao::ChegadaDestino, agora));
    }

    #[test]
    fn test_dedup_sin_emision_previa_no_suprime() {
        let agora = Utc::now();

        assert!(!suprimida(None, TipoNotificacao::ChegadaDestino, agora));
        assert!(!suprimida(None, TipoNotificacao::EtaUpdate, agora));
        assert!(!suprimida(None, TipoNotificacao::Offline, agora));
    }

    #[test]
    fn test_dedup_respeta_la_ventana_de_cada_tipo() {
        let agora = Utc::now();
        let hace_9_min = Some(agora - Duration::minutes(9));
        let hace_11_min = Some(agora - Duration::minutes(11));

        // eta_update tiene lookback de 10 minutos
        assert!(suprimida(hace_9_min, TipoNotificacao::EtaUpdate, agora));
        assert!(!suprimida(hace_11_min, TipoNotificacao::EtaUpdate, agora));

        // offline tiene lookback de 15 minutos
        assert!(suprimida(hace_11_min, TipoNotificacao::Offline, agora));
        assert!(!suprimida(
            Some(agora - Duration::minutes(16)),
            TipoNotificacao::Offline,
            agora
        ));
    }

    #[test]
    fn test_eta_indefinida_sin_velocidad_promedio() {
        assert_eq!(eta_minutes(10.0, None), None);
        assert_eq!(eta_minutes(10.0, Some(0.0)), None);
        assert_eq!(eta_minutes(10.0, Some(-5.0)), None);
    }

    #[test]
    fn test_eta_redondeada() {
        // 10 km a 60 km/h => 10 minutos
        assert_eq!(eta_minutes(10.0, Some(60.0)), Some(10));
        // 7.4 km a 60 km/h => 7.4 min, redondea a 7
        assert_eq!(eta_minutes(7.4, Some(60.0)), Some(7));
    }

    #[test]
    fn test_llegada_gana_sobre_eta() {
        // A 0.4 km con ETA dentro del rango solo califica la llegada
        let tipos = classify(0.4, Some(6), Duration::minutes(1));
        assert_eq!(tipos, vec![TipoNotificacao::ChegadaDestino]);
    }

    #[test]
    fn test_eta_solo_dentro_del_rango() {
        assert_eq!(
            classify(10.0, Some(5), Duration::minutes(1)),
            vec![TipoNotificacao::EtaUpdate]
        );
        assert_eq!(
            classify(10.0, Some(15), Duration::minutes(1)),
            vec![TipoNotificacao::EtaUpdate]
        );
        assert!(classify(10.0, Some(4), Duration::minutes(1)).is_empty());
        assert!(classify(10.0, Some(16), Duration::minutes(1)).is_empty());
        assert!(classify(10.0, None, Duration::minutes(1)).is_empty());
    }

    #[test]
    fn test_offline_es_independiente_de_la_proximidad() {
        // Cerca del destino y con muestra vieja: llegada + offline juntas
        let tipos = classify(0.2, None, Duration::minutes(11));
        assert_eq!(
            tipos,
            vec![TipoNotificacao::ChegadaDestino, TipoNotificacao::Offline]
        );

        // Lejos y con muestra vieja: solo offline
        assert_eq!(
            classify(50.0, None, Duration::minutes(11)),
            vec![TipoNotificacao::Offline]
        );

        // El borde exacto de 10 minutos todavía no es offline
        assert!(classify(50.0, None, Duration::minutes(10)).is_empty());
    }

    fn sessao_de_prueba() -> SessaoAtiva {
        SessaoAtiva {
            session: TrackingSession {
                id: Uuid::new_v4(),
                entrega_id: Uuid::new_v4(),
                motorista_id: Uuid::new_v4(),
                status: "active".to_string(),
                started_at: Utc::now(),
                total_distance_km: 12.0,
                average_speed_kmh: Some(45.0),
                last_location_at: Some(Utc::now()),
            },
            destino_latitude: Some(-22.9068),
            destino_longitude: Some(-43.1729),
        }
    }

    fn ultima_muestra() -> Localizacao {
        Localizacao {
            id: Uuid::new_v4(),
            entrega_id: Uuid::new_v4(),
            motorista_id: Uuid::new_v4(),
            latitude: -22.9100,
            longitude: -43.1700,
            accuracy: Some(8.0),
            speed: 30.0,
            heading: None,
            altitude: None,
            battery_level: Some(80.0),
            is_moving: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_mensaje_de_llegada_en_metros() {
        let nota = montar_notificacao(
            &sessao_de_prueba(),
            &ultima_muestra(),
            TipoNotificacao::ChegadaDestino,
            0.42,
            None,
            Utc::now(),
        );

        assert_eq!(nota.titulo, "🏁 Chegando ao Destino");
        assert_eq!(nota.mensagem, "Você está a 420m do destino");
        assert_eq!(nota.dados["distance_m"], 420);
    }

    #[test]
    fn test_mensaje_de_eta() {
        let nota = montar_notificacao(
            &sessao_de_prueba(),
            &ultima_muestra(),
            TipoNotificacao::EtaUpdate,
            9.0,
            Some(12),
            Utc::now(),
        );

        assert_eq!(nota.titulo, "⏱️ Previsão de Chegada");
        assert_eq!(nota.mensagem, "Você deve chegar em aproximadamente 12 minutos");
        assert_eq!(nota.dados["eta_minutes"], 12);
    }

    #[test]
    fn test_mensaje_de_offline_lleva_el_ultimo_update() {
        let ultima = ultima_muestra();
        let nota = montar_notificacao(
            &sessao_de_prueba(),
            &ultima,
            TipoNotificacao::Offline,
            50.0,
            None,
            Utc::now(),
        );

        assert_eq!(nota.titulo, "📶 Motorista Offline");
        assert!(nota.dados["last_update"].is_string());
    }
}
