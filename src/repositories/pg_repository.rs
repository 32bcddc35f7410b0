use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{Record, Repository, StoreError, StoreResult, UserRepository};
use crate::models::{to_db_id, User};

/// Repositorio genérico sobre PostgreSQL con borrado lógico (`deleted_at`)
pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for PgRepository<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

fn insert_sql<E: Record>() -> String {
    let placeholders = (1..=E::COLUMNS.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        E::TABLE,
        E::COLUMNS.join(", "),
        placeholders
    )
}

fn select_sql<E: Record>() -> String {
    format!("SELECT * FROM {} WHERE id = $1 AND deleted_at IS NULL", E::TABLE)
}

fn update_sql<E: Record>() -> String {
    let assignments = E::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {}, updated_at = NOW() WHERE id = ${} AND deleted_at IS NULL RETURNING *",
        E::TABLE,
        assignments,
        E::COLUMNS.len() + 1
    )
}

fn soft_delete_sql<E: Record>() -> String {
    format!(
        "UPDATE {} SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        E::TABLE
    )
}

#[async_trait]
impl<E: Record> Repository<E> for PgRepository<E> {
    async fn create(&self, entity: E) -> StoreResult<E> {
        let sql = insert_sql::<E>();
        let created = entity
            .bind_columns(sqlx::query_as::<_, E>(&sql))
            .fetch_one(&self.pool)
            .await?;

        debug!(table = E::TABLE, id = created.meta().id, "row inserted");
        Ok(created)
    }

    async fn find_by_id(&self, id: u64) -> StoreResult<E> {
        let sql = select_sql::<E>();
        sqlx::query_as::<_, E>(&sql)
            .bind(to_db_id(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    async fn update(&self, entity: &E) -> StoreResult<E> {
        let id = entity.meta().id;
        let sql = update_sql::<E>();
        entity
            .bind_columns(sqlx::query_as::<_, E>(&sql))
            .bind(to_db_id(id))
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    async fn soft_delete(&self, id: u64) -> StoreResult<()> {
        let sql = soft_delete_sql::<E>();
        let result = sqlx::query(&sql)
            .bind(to_db_id(id))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!(table = E::TABLE, id, "soft delete matched no live row");
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgRepository<User> {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = $1 AND deleted_at IS NULL",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
