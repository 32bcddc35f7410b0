use axum::Router;

use super::crud_routes::{crud_router, WireResource};
use crate::dto::accident_dto::AccidentMessage;
use crate::models::{Accident, CreateAccidentRequest};
use crate::services::AccidentService;
use crate::state::AppState;
use crate::utils::AppResult;

impl WireResource for Accident {
    type Message = AccidentMessage;

    fn service(state: &AppState) -> &AccidentService {
        &state.accidents
    }

    fn into_request(message: AccidentMessage) -> AppResult<(u64, CreateAccidentRequest)> {
        Ok(message.into_request())
    }
}

/// Rutas de `accident.AccidentService`
pub fn create_accident_router() -> Router<AppState> {
    crud_router::<Accident>("Accident")
}
