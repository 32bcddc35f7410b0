//! Modelo de Insurance
//!
//! Póliza de seguro asociada a un vehículo (tabla `insurances`).

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgArguments, query::QueryAs, FromRow, Postgres};
use validator::Validate;

use super::{to_db_id, RecordMeta};
use crate::repositories::Record;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Insurance {
    #[sqlx(flatten)]
    pub meta: RecordMeta,
    #[sqlx(try_from = "i64")]
    pub vehicle_id: u64,
    pub insured: bool,
    pub insured_last_name: String,
    pub insured_first_name: String,
    pub insured_address: String,
    pub company: String,
    pub policy_number: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    /// Código de agencia (4 dígitos en la práctica)
    pub agency_code: String,
    /// Tout risque, tiers, etc.
    pub coverage_type: String,
    pub document_path: String,
}

/// Request para crear o reemplazar una póliza
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CreateInsuranceRequest {
    #[validate(range(min = 1, message = "vehicle is required"))]
    pub vehicle_id: u64,

    pub insured: bool,

    #[validate(length(min = 2, max = 50))]
    pub insured_last_name: String,

    #[validate(length(min = 2, max = 50))]
    pub insured_first_name: String,

    #[validate(length(min = 5, max = 200))]
    pub insured_address: String,

    #[validate(length(min = 2, max = 100))]
    pub company: String,

    #[validate(length(min = 2, max = 50))]
    pub policy_number: String,

    #[validate(required)]
    pub valid_from: Option<DateTime<Utc>>,

    #[validate(required)]
    pub valid_to: Option<DateTime<Utc>>,

    #[validate(length(min = 4, max = 10))]
    pub agency_code: String,

    pub coverage_type: String,
    pub document_path: String,
}

impl Insurance {
    pub fn from_request(request: CreateInsuranceRequest) -> Self {
        let mut insurance = Self {
            meta: RecordMeta::unsaved(),
            vehicle_id: 0,
            insured: false,
            insured_last_name: String::new(),
            insured_first_name: String::new(),
            insured_address: String::new(),
            company: String::new(),
            policy_number: String::new(),
            valid_from: DateTime::<Utc>::UNIX_EPOCH,
            valid_to: DateTime::<Utc>::UNIX_EPOCH,
            agency_code: String::new(),
            coverage_type: String::new(),
            document_path: String::new(),
        };
        insurance.apply(request);
        insurance
    }

    /// Sobrescribe todos los campos mutables, incluido el vehículo asegurado.
    /// Las fechas ausentes solo llegan aquí si el request no se validó.
    pub fn apply(&mut self, request: CreateInsuranceRequest) {
        self.vehicle_id = request.vehicle_id;
        self.insured = request.insured;
        self.insured_last_name = request.insured_last_name;
        self.insured_first_name = request.insured_first_name;
        self.insured_address = request.insured_address;
        self.company = request.company;
        self.policy_number = request.policy_number;
        if let Some(valid_from) = request.valid_from {
            self.valid_from = valid_from;
        }
        if let Some(valid_to) = request.valid_to {
            self.valid_to = valid_to;
        }
        self.agency_code = request.agency_code;
        self.coverage_type = request.coverage_type;
        self.document_path = request.document_path;
    }
}

impl Record for Insurance {
    const TABLE: &'static str = "insurances";
    const COLUMNS: &'static [&'static str] = &[
        "vehicle_id",
        "insured",
        "insured_last_name",
        "insured_first_name",
        "insured_address",
        "company",
        "policy_number",
        "valid_from",
        "valid_to",
        "agency_code",
        "coverage_type",
        "document_path",
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
            .bind(to_db_id(self.vehicle_id))
            .bind(self.insured)
            .bind(&self.insured_last_name)
            .bind(&self.insured_first_name)
            .bind(&self.insured_address)
            .bind(&self.company)
            .bind(&self.policy_number)
            .bind(self.valid_from)
            .bind(self.valid_to)
            .bind(&self.agency_code)
            .bind(&self.coverage_type)
            .bind(&self.document_path)
    }
}
