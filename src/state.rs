//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El rate limiter es el único estado
//! mutable entre requests; todo lo demás vive en la base de datos.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimiterState;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub rate_limiter: RateLimiterState,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let rate_limiter = RateLimiterState::new(&config);
        Self {
            pool,
            config,
            rate_limiter,
        }
    }
}
