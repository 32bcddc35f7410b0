//! Gateway de persistencia
//!
//! Interfaz opaca de create / fetch / update / soft-delete sobre el almacén
//! relacional. `PgRepository` la implementa sobre PostgreSQL y
//! `MemoryRepository` en memoria para las pruebas.

pub mod memory_repository;
pub mod pg_repository;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, Postgres,
};
use thiserror::Error;

use crate::models::{RecordMeta, User};

pub use memory_repository::MemoryRepository;
pub use pg_repository::PgRepository;

/// Errores del gateway, independientes del dominio
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record {id} not found")]
    NotFound { id: u64 },

    #[error("unique constraint violated: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(db_err.constraint().unwrap_or("unique").to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Configuración de persistencia de una entidad: tabla, columnas mutables y binds.
///
/// `COLUMNS` excluye `id`, `created_at`, `updated_at` y `deleted_at`, que
/// gestiona el gateway. `bind_columns` debe enlazar los valores en el mismo
/// orden que `COLUMNS`.
pub trait Record: for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    fn bind_columns<'q, O>(
        &'q self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments>;

    /// Claves únicas como (nombre del índice, valor)
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

#[async_trait]
pub trait Repository<E: Record>: Send + Sync {
    /// Inserta la entidad y devuelve la fila con id y marcas de tiempo asignadas
    async fn create(&self, entity: E) -> StoreResult<E>;

    /// Devuelve la fila viva con ese id, o `NotFound`
    async fn find_by_id(&self, id: u64) -> StoreResult<E>;

    /// Reemplaza todas las columnas mutables de una fila viva
    async fn update(&self, entity: &E) -> StoreResult<E>;

    /// Marca la fila como borrada; borrar una fila ausente no hace nada
    async fn soft_delete(&self, id: u64) -> StoreResult<()>;
}

#[async_trait]
pub trait UserRepository: Repository<User> {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;
}
