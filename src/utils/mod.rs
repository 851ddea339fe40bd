//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, JWT
//! y cálculo geodésico.

pub mod errors;
pub mod extract;
pub mod geo;
pub mod jwt;
