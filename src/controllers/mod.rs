//! Controllers del core
//!
//! La lógica de negocio de las tres operaciones: ingesta de
//! localizaciones, aceptación de carga y sweep de monitoreo. Los tres
//! son entry points independientes sobre el mismo data store; ninguno
//! llama a otro.

pub mod carga_controller;
pub mod localizacao_controller;
pub mod monitor_controller;
