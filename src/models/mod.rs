//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema PostgreSQL de la plataforma de fretes.

pub mod carga;
pub mod carroceria;
pub mod entrega;
pub mod localizacao;
pub mod motorista;
pub mod notificacao;
pub mod tracking_session;
pub mod veiculo;
