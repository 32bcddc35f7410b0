//! Extractor JSON de los mensajes RPC
//!
//! Igual que `axum::Json`, pero un cuerpo mal formado o con tipos
//! incorrectos se responde con `AppError::BadRequest` en vez del rechazo en
//! texto plano de axum.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use super::AppError;

pub struct WireJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for WireJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
