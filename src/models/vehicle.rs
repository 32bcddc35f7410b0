//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle (tabla `vehicles`) y el request
//! validado que se usa tanto para crear como para actualizar.

use rust_decimal::Decimal;
use sqlx::{postgres::PgArguments, query::QueryAs, FromRow, Postgres};
use validator::{Validate, ValidationError};

use super::{to_db_id, RecordMeta};
use crate::repositories::Record;
use crate::utils::validation::rule_error;

/// `assessed_value` es NUMERIC(14, 2): como mucho 12 dígitos enteros
const MAX_ASSESSED_VALUE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Vehicle {
    #[sqlx(flatten)]
    pub meta: RecordMeta,
    #[sqlx(try_from = "i64")]
    pub owner_id: u64,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub engine_power: String,
    pub seats: i32,
    pub chassis_number: String,
    pub license_plate: String,
    pub energy: String,
    /// provisoire / permanent
    pub vehicle_type: String,
    pub wilaya: i32,
    pub assessed_value: Decimal,
    pub ccp_payment: bool,
    pub driver_under_25: bool,
    pub licence_over_one_year: bool,
    /// Carte grise escaneada
    pub registration_document_path: String,
}

/// Request para crear o reemplazar un vehículo
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CreateVehicleRequest {
    #[validate(range(min = 1, message = "owner is required"))]
    pub owner_id: u64,

    #[validate(length(min = 2, max = 50))]
    pub brand: String,

    #[validate(length(min = 1, max = 50))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(length(min = 1, message = "engine power is required"))]
    pub engine_power: String,

    #[validate(range(min = 1, max = 20))]
    pub seats: i32,

    #[validate(length(min = 3, max = 50))]
    pub chassis_number: String,

    #[validate(length(min = 3, max = 20))]
    pub license_plate: String,

    pub energy: String,
    pub vehicle_type: String,
    pub wilaya: i32,

    #[validate(custom = "validate_assessed_value")]
    pub assessed_value: Decimal,

    pub ccp_payment: bool,
    pub driver_under_25: bool,
    pub licence_over_one_year: bool,
    pub registration_document_path: String,
}

fn validate_assessed_value(value: &Decimal) -> Result<(), ValidationError> {
    if value.round_dp(2).abs() >= MAX_ASSESSED_VALUE {
        return Err(rule_error("range", "assessed value is out of range"));
    }
    Ok(())
}

impl Vehicle {
    pub fn from_request(request: CreateVehicleRequest) -> Self {
        let mut vehicle = Self {
            meta: RecordMeta::unsaved(),
            owner_id: request.owner_id,
            brand: String::new(),
            model: String::new(),
            year: 0,
            engine_power: String::new(),
            seats: 0,
            chassis_number: String::new(),
            license_plate: String::new(),
            energy: String::new(),
            vehicle_type: String::new(),
            wilaya: 0,
            assessed_value: Decimal::ZERO,
            ccp_payment: false,
            driver_under_25: false,
            licence_over_one_year: false,
            registration_document_path: String::new(),
        };
        vehicle.apply(request);
        vehicle
    }

    /// Sobrescribe todos los campos mutables; el propietario se fija al crear
    pub fn apply(&mut self, request: CreateVehicleRequest) {
        self.brand = request.brand;
        self.model = request.model;
        self.year = request.year;
        self.engine_power = request.engine_power;
        self.seats = request.seats;
        self.chassis_number = request.chassis_number;
        self.license_plate = request.license_plate;
        self.energy = request.energy;
        self.vehicle_type = request.vehicle_type;
        self.wilaya = request.wilaya;
        self.assessed_value = request.assessed_value;
        self.ccp_payment = request.ccp_payment;
        self.driver_under_25 = request.driver_under_25;
        self.licence_over_one_year = request.licence_over_one_year;
        self.registration_document_path = request.registration_document_path;
    }
}

impl Record for Vehicle {
    const TABLE: &'static str = "vehicles";
    const COLUMNS: &'static [&'static str] = &[
        "owner_id",
        "brand",
        "model",
        "year",
        "engine_power",
        "seats",
        "chassis_number",
        "license_plate",
        "energy",
        "vehicle_type",
        "wilaya",
        "assessed_value",
        "ccp_payment",
        "driver_under_25",
        "licence_over_one_year",
        "registration_document_path",
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
        query
            .bind(to_db_id(self.owner_id))
            .bind(&self.brand)
            .bind(&self.model)
            .bind(self.year)
            .bind(&self.engine_power)
            .bind(self.seats)
            .bind(&self.chassis_number)
            .bind(&self.license_plate)
            .bind(&self.energy)
            .bind(&self.vehicle_type)
            .bind(self.wilaya)
            .bind(self.assessed_value)
            .bind(self.ccp_payment)
            .bind(self.driver_under_25)
            .bind(self.licence_over_one_year)
            .bind(&self.registration_document_path)
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vehicles_chassis_number_key", self.chassis_number.clone()),
            ("vehicles_license_plate_key", self.license_plate.clone()),
        ]
    }
}
