//! DTOs de requests y responses
//!
//! Este módulo contiene los payloads de entrada y salida de los tres
//! endpoints del core. Los nombres de campo son contrato con las apps.

pub mod carga_dto;
pub mod localizacao_dto;
pub mod monitor_dto;
