//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::events::EventPublisher;
use crate::models::{Accident, Insurance, User, Vehicle};
use crate::repositories::{MemoryRepository, PgRepository};
use crate::services::{
    AccidentService, AuthService, InsuranceService, JwtConfig, JwtService, VehicleService,
};

#[derive(Clone)]
pub struct AppState {
    pub vehicles: VehicleService,
    pub insurances: InsuranceService,
    pub accidents: AccidentService,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Estado respaldado por PostgreSQL
    pub fn new(pool: PgPool, jwt: JwtConfig, bcrypt_cost: u32, events: EventPublisher) -> Self {
        Self {
            vehicles: VehicleService::new(Arc::new(PgRepository::<Vehicle>::new(pool.clone()))),
            insurances: InsuranceService::new(Arc::new(PgRepository::<Insurance>::new(pool.clone())))
                .with_events(events.clone()),
            accidents: AccidentService::new(Arc::new(PgRepository::<Accident>::new(pool.clone())))
                .with_events(events.clone()),
            auth: Arc::new(AuthService::new(
                Arc::new(PgRepository::<User>::new(pool)),
                JwtService::new(jwt),
                bcrypt_cost,
            )
            .with_events(events)),
        }
    }

    /// Estado en memoria, sin base de datos ni eventos
    pub fn in_memory(jwt: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            vehicles: VehicleService::new(Arc::new(MemoryRepository::<Vehicle>::new())),
            insurances: InsuranceService::new(Arc::new(MemoryRepository::<Insurance>::new())),
            accidents: AccidentService::new(Arc::new(MemoryRepository::<Accident>::new())),
            auth: Arc::new(AuthService::new(
                Arc::new(MemoryRepository::<User>::new()),
                JwtService::new(jwt),
                bcrypt_cost,
            )),
        }
    }
}
