use serde::{Deserialize, Serialize};

use super::{id_from_wire, optional_datetime, wire_id, Timestamp};
use crate::models::{Accident, CreateAccidentRequest, Party};

/// Constat en wire: las dos partes se aplanan en campos `_a` / `_b`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccidentMessage {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<Timestamp>,
    pub location: String,
    pub circonstances: String,

    pub vehicle_a_id: i64,
    pub driver_a_id: i64,
    pub point_de_choc_a: String,
    pub degats_apparents_a: String,
    pub observations_a: String,
    pub pv_police_a: String,
    pub pv_gendarmerie_a: String,

    pub vehicle_b_id: i64,
    pub driver_b_id: i64,
    pub point_de_choc_b: String,
    pub degats_apparents_b: String,
    pub observations_b: String,
    pub pv_police_b: String,
    pub pv_gendarmerie_b: String,

    pub status: String,
}

impl AccidentMessage {
    pub fn into_request(self) -> (u64, CreateAccidentRequest) {
        let request = CreateAccidentRequest {
            occurred_at: optional_datetime(self.date_time),
            location: self.location,
            circumstances: self.circonstances,
            party_a: Party {
                vehicle_id: id_from_wire(self.vehicle_a_id),
                driver_id: id_from_wire(self.driver_a_id),
                impact_point: self.point_de_choc_a,
                visible_damage: self.degats_apparents_a,
                observations: self.observations_a,
                police_report: self.pv_police_a,
                gendarmerie_report: self.pv_gendarmerie_a,
            },
            party_b: Party {
                vehicle_id: id_from_wire(self.vehicle_b_id),
                driver_id: id_from_wire(self.driver_b_id),
                impact_point: self.point_de_choc_b,
                visible_damage: self.degats_apparents_b,
                observations: self.observations_b,
                police_report: self.pv_police_b,
                gendarmerie_report: self.pv_gendarmerie_b,
            },
            status: self.status,
        };
        (id_from_wire(self.id), request)
    }
}

impl From<Accident> for AccidentMessage {
    fn from(accident: Accident) -> Self {
        let Accident {
            meta,
            occurred_at,
            location,
            circumstances,
            party_a: a,
            party_b: b,
            status,
        } = accident;

        Self {
            id: wire_id(meta.id),
            date_time: Some(occurred_at.into()),
            location,
            circonstances: circumstances,
            vehicle_a_id: wire_id(a.vehicle_id),
            driver_a_id: wire_id(a.driver_id),
            point_de_choc_a: a.impact_point,
            degats_apparents_a: a.visible_damage,
            observations_a: a.observations,
            pv_police_a: a.police_report,
            pv_gendarmerie_a: a.gendarmerie_report,
            vehicle_b_id: wire_id(b.vehicle_id),
            driver_b_id: wire_id(b.driver_id),
            point_de_choc_b: b.impact_point,
            degats_apparents_b: b.visible_damage,
            observations_b: b.observations,
            pv_police_b: b.police_report,
            pv_gendarmerie_b: b.gendarmerie_report,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::accident::tests::valid_request;

    #[test]
    fn test_sides_are_flattened() {
        let accident = Accident::from_request(valid_request());
        let message = AccidentMessage::from(accident.clone());

        assert_eq!(message.point_de_choc_a, "arrière");
        assert_eq!(message.point_de_choc_b, "avant");
        assert_eq!(message.vehicle_b_id, 2);

        let (_, request) = message.into_request();
        assert_eq!(request.party_a, accident.party_a);
        assert_eq!(request.party_b, accident.party_b);
        assert_eq!(request.occurred_at, Some(accident.occurred_at));
    }

    #[test]
    fn test_negative_ids_fail_validation() {
        let message = AccidentMessage {
            id: -1,
            vehicle_a_id: -3,
            ..AccidentMessage::default()
        };
        let (id, request) = message.into_request();
        assert_eq!(id, 0);
        assert_eq!(request.party_a.vehicle_id, 0);
    }
}
