//! Routers de la API
//!
//! Handlers finos: extraen, delegan al controller y serializan.

pub mod carga_routes;
pub mod tracking_routes;
