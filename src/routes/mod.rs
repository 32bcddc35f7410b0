//! Rutas HTTP
//!
//! Endpoints RPC estilo Twirp (`POST /twirp/<paquete>.<Servicio>/<Método>`)
//! y el health check.

pub mod accident_routes;
pub mod auth_routes;
pub mod crud_routes;
pub mod insurance_routes;
pub mod vehicle_routes;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub const VEHICLE_SERVICE_PREFIX: &str = "/twirp/vehicle.VehicleService";
pub const INSURANCE_SERVICE_PREFIX: &str = "/twirp/insurance.InsuranceService";
pub const ACCIDENT_SERVICE_PREFIX: &str = "/twirp/accident.AccidentService";
pub const AUTH_SERVICE_PREFIX: &str = "/twirp/auth.AuthService";

/// Router completo de la aplicación (sin CORS, que depende de la configuración)
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(VEHICLE_SERVICE_PREFIX, vehicle_routes::create_vehicle_router())
        .nest(INSURANCE_SERVICE_PREFIX, insurance_routes::create_insurance_router())
        .nest(ACCIDENT_SERVICE_PREFIX, accident_routes::create_accident_router())
        .nest(AUTH_SERVICE_PREFIX, auth_routes::auth_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
