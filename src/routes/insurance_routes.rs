use axum::Router;

use super::crud_routes::{crud_router, WireResource};
use crate::dto::insurance_dto::InsuranceMessage;
use crate::models::{CreateInsuranceRequest, Insurance};
use crate::services::InsuranceService;
use crate::state::AppState;
use crate::utils::AppResult;

impl WireResource for Insurance {
    type Message = InsuranceMessage;

    fn service(state: &AppState) -> &InsuranceService {
        &state.insurances
    }

    fn into_request(message: InsuranceMessage) -> AppResult<(u64, CreateInsuranceRequest)> {
        Ok(message.into_request())
    }
}

/// Rutas de `insurance.InsuranceService`
pub fn create_insurance_router() -> Router<AppState> {
    crud_router::<Insurance>("Insurance")
}
