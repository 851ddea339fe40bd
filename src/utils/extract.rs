//! Extractores de request
//!
//! `AppJson` reemplaza a `axum::Json` en los handlers: un body ausente,
//! ilegible o con tipos equivocados responde el 400 `invalid_payload`
//! del contrato en vez del 422 genérico de axum.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

use crate::utils::errors::AppError;

pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}
