//! Handlers RPC genéricos
//!
//! Cada servicio CRUD expone `Create<X>`, `Get<X>`, `Update<X>` y `Delete<X>`
//! como `POST` con cuerpo JSON. Los handlers solo traducen mensajes de wire;
//! la validación y la persistencia son cosa del servicio.

use axum::{extract::State, routing::post, Json, Router};
use serde::{de::DeserializeOwned, Serialize};

use crate::dto::{id_from_wire, Empty, IdMessage};
use crate::services::{CrudService, IdRequest, Resource, UpdateRequest};
use crate::state::AppState;
use crate::utils::{AppResult, WireJson};

/// Traducción entre un recurso y su mensaje de wire
pub trait WireResource: Resource {
    type Message: DeserializeOwned + Serialize + From<Self> + Send + 'static;

    fn service(state: &AppState) -> &CrudService<Self>;

    /// Devuelve el id (0 si falta) y el cuerpo del request
    fn into_request(message: Self::Message) -> AppResult<(u64, Self::Request)>;
}

pub fn crud_router<E: WireResource>(name: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("/Create{}", name), post(create::<E>))
        .route(&format!("/Get{}", name), post(get::<E>))
        .route(&format!("/Update{}", name), post(update::<E>))
        .route(&format!("/Delete{}", name), post(delete::<E>))
}

async fn create<E: WireResource>(
    State(state): State<AppState>,
    WireJson(message): WireJson<E::Message>,
) -> AppResult<Json<E::Message>> {
    let (_, request) = E::into_request(message)?;
    let entity = E::service(&state).create(request).await?;
    Ok(Json(entity.into()))
}

async fn get<E: WireResource>(
    State(state): State<AppState>,
    WireJson(message): WireJson<IdMessage>,
) -> AppResult<Json<E::Message>> {
    let request = IdRequest {
        id: id_from_wire(message.id),
    };
    let entity = E::service(&state).get(request).await?;
    Ok(Json(entity.into()))
}

async fn update<E: WireResource>(
    State(state): State<AppState>,
    WireJson(message): WireJson<E::Message>,
) -> AppResult<Json<E::Message>> {
    let (id, body) = E::into_request(message)?;
    let entity = E::service(&state).update(UpdateRequest { id, body }).await?;
    Ok(Json(entity.into()))
}

async fn delete<E: WireResource>(
    State(state): State<AppState>,
    WireJson(message): WireJson<IdMessage>,
) -> AppResult<Json<Empty>> {
    let request = IdRequest {
        id: id_from_wire(message.id),
    };
    E::service(&state).delete(request).await?;
    Ok(Json(Empty {}))
}
