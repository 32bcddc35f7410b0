//! Mensajes de wire
//!
//! Estructuras JSON de los endpoints RPC y su conversión desde y hacia los
//! requests y entidades del dominio.

pub mod accident_dto;
pub mod auth_dto;
pub mod insurance_dto;
pub mod vehicle_dto;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Instante en el formato `{ "seconds", "nanos" }`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl Timestamp {
    /// `None` si el instante está fuera del rango representable
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        DateTime::from_timestamp(self.seconds, nanos)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            seconds: value.timestamp(),
            nanos: value.timestamp_subsec_nanos() as i32,
        }
    }
}

/// Un timestamp ausente o inválido llega al dominio como `None`
pub(crate) fn optional_datetime(timestamp: Option<Timestamp>) -> Option<DateTime<Utc>> {
    timestamp.and_then(Timestamp::to_datetime)
}

/// Los ids negativos se convierten en 0 y fallan la validación de id
pub fn id_from_wire(id: i64) -> u64 {
    u64::try_from(id).unwrap_or(0)
}

pub fn wire_id(id: u64) -> i64 {
    i64::try_from(id).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdMessage {
    pub id: i64,
}

/// Respuesta vacía (`{}`)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Empty {}
