//! Modelos del sistema
//!
//! Este módulo contiene las entidades persistidas y los requests de servicio
//! (con sus reglas de validación) de cada dominio.

pub mod accident;
pub mod auth;
pub mod insurance;
pub mod user;
pub mod vehicle;

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, FromRow, Row};

pub use accident::{Accident, CreateAccidentRequest, Party, Side};
pub use insurance::{CreateInsuranceRequest, Insurance};
pub use user::User;
pub use vehicle::{CreateVehicleRequest, Vehicle};

/// Columnas comunes a todas las tablas: identificador y marcas de tiempo
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RecordMeta {
    #[sqlx(try_from = "i64")]
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordMeta {
    /// Metadatos de un registro todavía no persistido (id = 0)
    pub fn unsaved() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for RecordMeta {
    fn default() -> Self {
        Self::unsaved()
    }
}

/// Los identificadores son `u64` en el dominio y `BIGINT` en PostgreSQL
pub fn to_db_id(id: u64) -> i64 {
    i64::try_from(id).unwrap_or(i64::MAX)
}

/// Leer una columna BIGINT como identificador del dominio
pub(crate) fn decode_id(row: &PgRow, column: &str) -> Result<u64, sqlx::Error> {
    let raw: i64 = row.try_get(column)?;
    u64::try_from(raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_db_id() {
        assert_eq!(to_db_id(42), 42);
        assert_eq!(to_db_id(u64::MAX), i64::MAX);
    }

    #[test]
    fn test_unsaved_meta() {
        let meta = RecordMeta::unsaved();
        assert_eq!(meta.id, 0);
        assert_eq!(meta.created_at, meta.updated_at);
    }
}
