//! Modelo de Accident
//!
//! Un constat amiable: fecha, lugar, circunstancias y las dos partes
//! implicadas (lado A, el asegurado, y lado B). En la tabla `accidents` cada
//! parte se almacena en columnas con sufijo `_a` / `_b`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, Postgres, Row,
};
use validator::{Validate, ValidationError};

use super::{decode_id, to_db_id, RecordMeta};
use crate::repositories::Record;
use crate::utils::validation::rule_error;

/// Lado del constat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Sufijo de columna / campo de wire
    pub fn suffix(self) -> &'static str {
        match self {
            Side::A => "a",
            Side::B => "b",
        }
    }
}

/// Datos de una de las partes implicadas
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Party {
    pub vehicle_id: u64,
    pub driver_id: u64,
    pub impact_point: String,
    pub visible_damage: String,
    pub observations: String,
    pub police_report: String,
    pub gendarmerie_report: String,
}

impl Party {
    fn from_row(row: &PgRow, side: Side) -> Result<Self, sqlx::Error> {
        let column = |name: &str| format!("{}_{}", name, side.suffix());

        Ok(Self {
            vehicle_id: decode_id(row, &column("vehicle_id"))?,
            driver_id: decode_id(row, &column("driver_id"))?,
            impact_point: row.try_get(column("impact_point").as_str())?,
            visible_damage: row.try_get(column("visible_damage").as_str())?,
            observations: row.try_get(column("observations").as_str())?,
            police_report: row.try_get(column("police_report").as_str())?,
            gendarmerie_report: row.try_get(column("gendarmerie_report").as_str())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Accident {
    pub meta: RecordMeta,
    pub occurred_at: DateTime<Utc>,
    pub location: String,
    /// Descripción o croquis
    pub circumstances: String,
    pub party_a: Party,
    pub party_b: Party,
    pub status: String,
}

impl<'r> FromRow<'r, PgRow> for Accident {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            meta: RecordMeta::from_row(row)?,
            occurred_at: row.try_get("occurred_at")?,
            location: row.try_get("location")?,
            circumstances: row.try_get("circumstances")?,
            party_a: Party::from_row(row, Side::A)?,
            party_b: Party::from_row(row, Side::B)?,
            status: row.try_get("status")?,
        })
    }
}

/// Request para crear o reemplazar un constat
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CreateAccidentRequest {
    #[validate(required)]
    pub occurred_at: Option<DateTime<Utc>>,

    #[validate(length(min = 3, max = 200))]
    pub location: String,

    pub circumstances: String,

    #[validate(custom = "validate_primary_party")]
    pub party_a: Party,

    pub party_b: Party,

    pub status: String,
}

/// El lado A debe identificar vehículo y conductor; el lado B es opcional
fn validate_primary_party(party: &Party) -> Result<(), ValidationError> {
    if party.vehicle_id == 0 {
        return Err(rule_error("required", "side A vehicle is required"));
    }
    if party.driver_id == 0 {
        return Err(rule_error("required", "side A driver is required"));
    }
    Ok(())
}

impl Accident {
    pub fn from_request(request: CreateAccidentRequest) -> Self {
        let mut accident = Self {
            meta: RecordMeta::unsaved(),
            occurred_at: DateTime::<Utc>::UNIX_EPOCH,
            location: String::new(),
            circumstances: String::new(),
            party_a: Party::default(),
            party_b: Party::default(),
            status: String::new(),
        };
        accident.apply(request);
        accident
    }

    pub fn apply(&mut self, request: CreateAccidentRequest) {
        if let Some(occurred_at) = request.occurred_at {
            self.occurred_at = occurred_at;
        }
        self.location = request.location;
        self.circumstances = request.circumstances;
        self.party_a = request.party_a;
        self.party_b = request.party_b;
        self.status = request.status;
    }

    pub fn party(&self, side: Side) -> &Party {
        match side {
            Side::A => &self.party_a,
            Side::B => &self.party_b,
        }
    }
}

impl Record for Accident {
    const TABLE: &'static str = "accidents";
    const COLUMNS: &'static [&'static str] = &[
        "occurred_at",
        "location",
        "circumstances",
        "vehicle_id_a",
        "driver_id_a",
        "impact_point_a",
        "visible_damage_a",
        "observations_a",
        "police_report_a",
        "gendarmerie_report_a",
        "vehicle_id_b",
        "driver_id_b",
        "impact_point_b",
        "visible_damage_b",
        "observations_b",
        "police_report_b",
        "gendarmerie_report_b",
        "status",
    ];

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn bind_columns<'q, O>(
        &'q self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        let query = query
            .bind(self.occurred_at)
            .bind(&self.location)
            .bind(&self.circumstances);

        [Side::A, Side::B]
            .into_iter()
            .fold(query, move |query, side| {
                let party = self.party(side);
                query
                    .bind(to_db_id(party.vehicle_id))
                    .bind(to_db_id(party.driver_id))
                    .bind(&party.impact_point)
                    .bind(&party.visible_damage)
                    .bind(&party.observations)
                    .bind(&party.police_report)
                    .bind(&party.gendarmerie_report)
            })
            .bind(&self.status)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn valid_request() -> CreateAccidentRequest {
        CreateAccidentRequest {
            occurred_at: Some(Utc.with_ymd_and_hms(2024, 3, 14, 17, 45, 0).unwrap()),
            location: "RN5, sortie Bab Ezzouar".to_string(),
            circumstances: "B a heurté A à l'arrière au feu rouge".to_string(),
            party_a: Party {
                vehicle_id: 1,
                driver_id: 1,
                impact_point: "arrière".to_string(),
                visible_damage: "pare-chocs".to_string(),
                ..Party::default()
            },
            party_b: Party {
                vehicle_id: 2,
                driver_id: 2,
                impact_point: "avant".to_string(),
                ..Party::default()
            },
            status: "draft".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_side_b_is_optional() {
        let request = CreateAccidentRequest {
            party_b: Party::default(),
            ..valid_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_side_a_requires_vehicle_and_driver() {
        let mut request = valid_request();
        request.party_a.driver_id = 0;

        let errors = request.validate().unwrap_err();
        let field_errors = errors.field_errors();
        let party_errors = field_errors.get("party_a").expect("party_a error");
        assert_eq!(party_errors[0].message.as_deref(), Some("side A driver is required"));
        assert_eq!(party_errors[0].params["value"]["driver_id"], 0);
        assert_eq!(party_errors[0].params["value"]["vehicle_id"], 1);
    }

    #[test]
    fn test_missing_date_and_short_location() {
        let request = CreateAccidentRequest {
            occurred_at: None,
            location: "RN".to_string(),
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("occurred_at"));
        assert!(errors.field_errors().contains_key("location"));
    }

    #[test]
    fn test_columns_are_suffixed_per_side() {
        for side in [Side::A, Side::B] {
            let suffix = format!("_{}", side.suffix());
            let count = Accident::COLUMNS.iter().filter(|c| c.ends_with(&suffix)).count();
            assert_eq!(count, 7);
        }
        assert_eq!(Accident::COLUMNS.len(), 18);
    }
}
