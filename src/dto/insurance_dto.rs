use serde::{Deserialize, Serialize};

use super::{id_from_wire, optional_datetime, wire_id, Timestamp};
use crate::models::{CreateInsuranceRequest, Insurance};

/// Póliza tal y como viaja en los mensajes Create/Get/Update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceMessage {
    pub id: i64,
    pub vehicle_id: i64,
    pub assuree: bool,
    pub assure_nom: String,
    pub assure_prenom: String,
    pub assure_adresse: String,
    pub company: String,
    pub policy_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<Timestamp>,
    pub agency_code: String,
    pub coverage_type: String,
    pub assurance_path: String,
}

impl InsuranceMessage {
    pub fn into_request(self) -> (u64, CreateInsuranceRequest) {
        let request = CreateInsuranceRequest {
            vehicle_id: id_from_wire(self.vehicle_id),
            insured: self.assuree,
            insured_last_name: self.assure_nom,
            insured_first_name: self.assure_prenom,
            insured_address: self.assure_adresse,
            company: self.company,
            policy_number: self.policy_number,
            valid_from: optional_datetime(self.valid_from),
            valid_to: optional_datetime(self.valid_to),
            agency_code: self.agency_code,
            coverage_type: self.coverage_type,
            document_path: self.assurance_path,
        };
        (id_from_wire(self.id), request)
    }
}

impl From<Insurance> for InsuranceMessage {
    fn from(insurance: Insurance) -> Self {
        Self {
            id: wire_id(insurance.meta.id),
            vehicle_id: wire_id(insurance.vehicle_id),
            assuree: insurance.insured,
            assure_nom: insurance.insured_last_name,
            assure_prenom: insurance.insured_first_name,
            assure_adresse: insurance.insured_address,
            company: insurance.company,
            policy_number: insurance.policy_number,
            valid_from: Some(insurance.valid_from.into()),
            valid_to: Some(insurance.valid_to.into()),
            agency_code: insurance.agency_code,
            coverage_type: insurance.coverage_type,
            assurance_path: insurance.document_path,
        }
    }
}
