//! Servicio CRUD genérico
//!
//! Implementa una sola vez el flujo validar → persistir → responder.
//! Cada dominio aporta su configuración implementando [`Resource`].

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use crate::events::{DomainEvent, EventPublisher};
use crate::repositories::{Record, Repository};
use crate::utils::validation::ensure_valid_id;
use crate::utils::{AppError, AppResult};

/// Configuración de un dominio gestionado por `CrudService`
pub trait Resource: Record {
    /// Nombre usado en los mensajes de error ("vehicle not found")
    const NAME: &'static str;

    /// Request validado de creación y de reemplazo completo
    type Request: Validate + Send + Sync + 'static;

    fn from_request(request: Self::Request) -> Self;

    fn apply(&mut self, request: Self::Request);

    /// Evento a publicar tras una creación correcta
    fn created_event(&self) -> Option<DomainEvent> {
        None
    }
}

/// Request de solo identificador (get / delete)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRequest {
    pub id: u64,
}

/// Reemplazo completo de un registro existente
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest<R> {
    pub id: u64,
    pub body: R,
}

pub struct CrudService<E: Resource> {
    repository: Arc<dyn Repository<E>>,
    events: Option<EventPublisher>,
}

impl<E: Resource> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            events: self.events.clone(),
        }
    }
}

impl<E: Resource> CrudService<E> {
    pub fn new(repository: Arc<dyn Repository<E>>) -> Self {
        Self {
            repository,
            events: None,
        }
    }

    pub fn with_events(mut self, events: EventPublisher) -> Self {
        self.events = Some(events);
        self
    }

    pub async fn create(&self, request: E::Request) -> AppResult<E> {
        request.validate()?;

        let created = self
            .repository
            .create(E::from_request(request))
            .await
            .map_err(|e| AppError::from_store(E::NAME, e))?;

        info!("{} {} created", E::NAME, created.meta().id);

        if let (Some(events), Some(event)) = (&self.events, created.created_event()) {
            events.publish(&event);
        }
        Ok(created)
    }

    pub async fn get(&self, request: IdRequest) -> AppResult<E> {
        ensure_valid_id(request.id, E::NAME)?;

        self.repository
            .find_by_id(request.id)
            .await
            .map_err(|e| AppError::from_store(E::NAME, e))
    }

    /// El id se comprueba antes que el cuerpo
    pub async fn update(&self, request: UpdateRequest<E::Request>) -> AppResult<E> {
        ensure_valid_id(request.id, E::NAME)?;
        request.body.validate()?;

        let mut entity = self
            .repository
            .find_by_id(request.id)
            .await
            .map_err(|e| AppError::from_store(E::NAME, e))?;

        entity.apply(request.body);

        let updated = self
            .repository
            .update(&entity)
            .await
            .map_err(|e| AppError::from_store(E::NAME, e))?;

        debug!("{} {} updated", E::NAME, updated.meta().id);
        Ok(updated)
    }

    pub async fn delete(&self, request: IdRequest) -> AppResult<()> {
        ensure_valid_id(request.id, E::NAME)?;

        self.repository
            .soft_delete(request.id)
            .await
            .map_err(|e| AppError::from_store(E::NAME, e))?;

        info!("{} {} deleted", E::NAME, request.id);
        Ok(())
    }
}
