use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{Record, Repository, StoreError, StoreResult, UserRepository};
use crate::models::User;

struct StoredRow<E> {
    record: E,
    deleted_at: Option<DateTime<Utc>>,
}

struct Table<E> {
    rows: BTreeMap<u64, StoredRow<E>>,
    next_id: u64,
}

/// Repositorio en memoria con la misma semántica que `PgRepository`:
/// ids autoincrementales, índices únicos y borrado lógico.
pub struct MemoryRepository<E> {
    table: RwLock<Table<E>>,
}

impl<E: Record> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Número de filas almacenadas, incluidas las borradas
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Indica si la fila existe y está marcada como borrada
    pub async fn is_deleted(&self, id: u64) -> bool {
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .map_or(false, |row| row.deleted_at.is_some())
    }
}

impl<E: Record> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Record> Table<E> {
    /// Un índice UNIQUE de PostgreSQL también cubre las filas borradas lógicamente
    fn check_unique(&self, candidate: &E, skip_id: Option<u64>) -> StoreResult<()> {
        for (index, value) in candidate.unique_keys() {
            let taken = self
                .rows
                .iter()
                .filter(|(id, _)| Some(**id) != skip_id)
                .any(|(_, row)| {
                    row.record
                        .unique_keys()
                        .iter()
                        .any(|(other_index, other_value)| *other_index == index && *other_value == value)
                });

            if taken {
                return Err(StoreError::Conflict(index.to_string()));
            }
        }
        Ok(())
    }

    fn live_mut(&mut self, id: u64) -> Option<&mut StoredRow<E>> {
        self.rows.get_mut(&id).filter(|row| row.deleted_at.is_none())
    }
}

#[async_trait]
impl<E: Record> Repository<E> for MemoryRepository<E> {
    async fn create(&self, mut entity: E) -> StoreResult<E> {
        let mut table = self.table.write().await;
        table.check_unique(&entity, None)?;

        let id = table.next_id;
        table.next_id += 1;

        let now = Utc::now();
        let meta = entity.meta_mut();
        meta.id = id;
        meta.created_at = now;
        meta.updated_at = now;

        table.rows.insert(
            id,
            StoredRow {
                record: entity.clone(),
                deleted_at: None,
            },
        );
        Ok(entity)
    }

    async fn find_by_id(&self, id: u64) -> StoreResult<E> {
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .filter(|row| row.deleted_at.is_none())
            .map(|row| row.record.clone())
            .ok_or(StoreError::NotFound { id })
    }

    async fn update(&self, entity: &E) -> StoreResult<E> {
        let id = entity.meta().id;
        let mut table = self.table.write().await;
        table.check_unique(entity, Some(id))?;

        let row = table.live_mut(id).ok_or(StoreError::NotFound { id })?;
        let created_at = row.record.meta().created_at;

        let mut updated = entity.clone();
        let meta = updated.meta_mut();
        meta.created_at = created_at;
        meta.updated_at = Utc::now();

        row.record = updated.clone();
        Ok(updated)
    }

    async fn soft_delete(&self, id: u64) -> StoreResult<()> {
        let mut table = self.table.write().await;
        if let Some(row) = table.live_mut(id) {
            row.deleted_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryRepository<User> {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|row| row.deleted_at.is_none())
            .find(|row| row.record.username == username)
            .map(|row| row.record.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordMeta, Vehicle};
    use rust_decimal::Decimal;

    fn vehicle(chassis: &str, plate: &str) -> Vehicle {
        Vehicle {
            meta: RecordMeta::unsaved(),
            owner_id: 1,
            brand: "Renault".to_string(),
            model: "Clio".to_string(),
            year: 2019,
            engine_power: "5CV".to_string(),
            seats: 5,
            chassis_number: chassis.to_string(),
            license_plate: plate.to_string(),
            energy: "essence".to_string(),
            vehicle_type: "permanent".to_string(),
            wilaya: 16,
            assessed_value: Decimal::new(1_500_000, 0),
            ccp_payment: false,
            driver_under_25: false,
            licence_over_one_year: true,
            registration_document_path: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = MemoryRepository::<Vehicle>::new();
        let first = repo.create(vehicle("VF1A", "00001-119-16")).await.unwrap();
        let second = repo.create(vehicle("VF1B", "00002-119-16")).await.unwrap();

        assert_eq!(first.meta.id, 1);
        assert_eq!(second.meta.id, 2);
        assert_eq!(repo.find_by_id(1).await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_unique_keys_are_enforced_at_insert() {
        let repo = MemoryRepository::<Vehicle>::new();
        repo.create(vehicle("VF1A", "00001-119-16")).await.unwrap();

        let err = repo.create(vehicle("VF1A", "00009-119-16")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ref index) if index == "vehicles_chassis_number_key"));

        let err = repo.create(vehicle("VF1Z", "00001-119-16")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ref index) if index == "vehicles_license_plate_key"));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_keeps_own_unique_values() {
        let repo = MemoryRepository::<Vehicle>::new();
        let mut created = repo.create(vehicle("VF1A", "00001-119-16")).await.unwrap();
        created.brand = "Dacia".to_string();

        let updated = repo.update(&created).await.unwrap();
        assert_eq!(updated.brand, "Dacia");
        assert_eq!(updated.meta.created_at, created.meta.created_at);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_row_and_is_idempotent() {
        let repo = MemoryRepository::<Vehicle>::new();
        let created = repo.create(vehicle("VF1A", "00001-119-16")).await.unwrap();
        let id = created.meta.id;

        repo.soft_delete(id).await.unwrap();
        assert!(repo.is_deleted(id).await);
        assert!(matches!(repo.find_by_id(id).await, Err(StoreError::NotFound { id: 1 })));
        assert!(matches!(repo.update(&created).await, Err(StoreError::NotFound { .. })));

        repo.soft_delete(id).await.unwrap();
        repo.soft_delete(999).await.unwrap();
        assert_eq!(repo.len().await, 1);
    }
}
