use axum::Router;

use super::crud_routes::{crud_router, WireResource};
use crate::dto::vehicle_dto::VehicleMessage;
use crate::models::{CreateVehicleRequest, Vehicle};
use crate::services::VehicleService;
use crate::state::AppState;
use crate::utils::AppResult;

impl WireResource for Vehicle {
    type Message = VehicleMessage;

    fn service(state: &AppState) -> &VehicleService {
        &state.vehicles
    }

    fn into_request(message: VehicleMessage) -> AppResult<(u64, CreateVehicleRequest)> {
        message.into_request()
    }
}

/// Rutas de `vehicle.VehicleService`
pub fn create_vehicle_router() -> Router<AppState> {
    crud_router::<Vehicle>("Vehicle")
}
