use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{id_from_wire, wire_id};
use crate::models::{CreateVehicleRequest, Vehicle};
use crate::utils::{AppError, AppResult};

/// Vehículo tal y como viaja en los mensajes Create/Get/Update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleMessage {
    pub id: i64,
    pub owner_id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub engine_power: String,
    pub seats: i32,
    pub chassis_number: String,
    pub license_plate: String,
    pub energy: String,
    pub vehicle_type: String,
    pub wilaya: i32,
    pub valeur_venale: f64,
    pub paiement_ccp: bool,
    pub moins_25_ans: bool,
    pub permis_plus_1an: bool,
    pub carte_grise_path: String,
}

impl VehicleMessage {
    /// Separa el id del cuerpo del request
    pub fn into_request(self) -> AppResult<(u64, CreateVehicleRequest)> {
        let assessed_value = Decimal::from_f64(self.valeur_venale).ok_or_else(|| {
            AppError::BadRequest(format!("valeur_venale out of range: {}", self.valeur_venale))
        })?;

        let request = CreateVehicleRequest {
            owner_id: id_from_wire(self.owner_id),
            brand: self.brand,
            model: self.model,
            year: self.year,
            engine_power: self.engine_power,
            seats: self.seats,
            chassis_number: self.chassis_number,
            license_plate: self.license_plate,
            energy: self.energy,
            vehicle_type: self.vehicle_type,
            wilaya: self.wilaya,
            assessed_value,
            ccp_payment: self.paiement_ccp,
            driver_under_25: self.moins_25_ans,
            licence_over_one_year: self.permis_plus_1an,
            registration_document_path: self.carte_grise_path,
        };
        Ok((id_from_wire(self.id), request))
    }
}

impl From<Vehicle> for VehicleMessage {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: wire_id(vehicle.meta.id),
            owner_id: wire_id(vehicle.owner_id),
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            engine_power: vehicle.engine_power,
            seats: vehicle.seats,
            chassis_number: vehicle.chassis_number,
            license_plate: vehicle.license_plate,
            energy: vehicle.energy,
            vehicle_type: vehicle.vehicle_type,
            wilaya: vehicle.wilaya,
            valeur_venale: vehicle.assessed_value.to_f64().unwrap_or_default(),
            paiement_ccp: vehicle.ccp_payment,
            moins_25_ans: vehicle.driver_under_25,
            permis_plus_1an: vehicle.licence_over_one_year,
            carte_grise_path: vehicle.registration_document_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_follow_protocol() {
        let message: VehicleMessage = serde_json::from_value(serde_json::json!({
            "owner_id": 3,
            "brand": "Peugeot",
            "valeur_venale": 2450000.5,
            "moins_25_ans": true,
            "carte_grise_path": "cartes-grises/3.pdf"
        }))
        .unwrap();

        let (id, request) = message.into_request().unwrap();
        assert_eq!(id, 0);
        assert_eq!(request.owner_id, 3);
        assert_eq!(request.assessed_value, Decimal::new(24_500_005, 1));
        assert!(request.driver_under_25);
        assert_eq!(request.registration_document_path, "cartes-grises/3.pdf");
    }

    #[test]
    fn test_out_of_range_value_is_bad_request() {
        let message = VehicleMessage {
            valeur_venale: 1e40,
            ..VehicleMessage::default()
        };
        assert!(matches!(message.into_request(), Err(AppError::BadRequest(_))));
    }
}
