use crate::models::{CreateVehicleRequest, Vehicle};
use crate::services::crud_service::{CrudService, Resource};

pub type VehicleService = CrudService<Vehicle>;

impl Resource for Vehicle {
    const NAME: &'static str = "vehicle";
    type Request = CreateVehicleRequest;

    fn from_request(request: CreateVehicleRequest) -> Self {
        Vehicle::from_request(request)
    }

    fn apply(&mut self, request: CreateVehicleRequest) {
        Vehicle::apply(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::vehicle::tests::valid_request;
    use crate::repositories::MemoryRepository;
    use crate::services::crud_service::{IdRequest, UpdateRequest};
    use crate::utils::AppError;

    fn service() -> (VehicleService, Arc<MemoryRepository<Vehicle>>) {
        let repository = Arc::new(MemoryRepository::new());
        (VehicleService::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (service, _) = service();
        let created = service.create(valid_request()).await.unwrap();
        assert_ne!(created.meta.id, 0);

        let fetched = service.get(IdRequest { id: created.meta.id }).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_invalid_request_persists_nothing() {
        let (service, repository) = service();
        let request = CreateVehicleRequest {
            seats: 0,
            ..valid_request()
        };

        let err = service.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_plate_is_conflict() {
        let (service, _) = service();
        service.create(valid_request()).await.unwrap();

        let request = CreateVehicleRequest {
            chassis_number: "VF3CCHMZ6MT000002".to_string(),
            ..valid_request()
        };
        let err = service.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref msg) if msg.contains("vehicles_license_plate_key")));
    }

    #[tokio::test]
    async fn test_zero_id_is_rejected_before_lookup() {
        let (service, _) = service();
        let err = service.get(IdRequest { id: 0 }).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("invalid vehicle ID"));
    }

    #[tokio::test]
    async fn test_update_with_zero_id_reports_id_first() {
        let (service, _) = service();
        let request = UpdateRequest {
            id: 0,
            body: CreateVehicleRequest {
                brand: String::new(),
                ..valid_request()
            },
        };

        let err = service.update(request).await.unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let fields = errors.field_errors();
        assert!(fields.contains_key("id"));
        assert!(!fields.contains_key("brand"));
    }

    #[tokio::test]
    async fn test_update_missing_vehicle_is_not_found() {
        let (service, _) = service();
        let err = service
            .update(UpdateRequest {
                id: 42,
                body: valid_request(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "vehicle not found"));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (service, repository) = service();
        let created = service.create(valid_request()).await.unwrap();
        let id = created.meta.id;

        service.delete(IdRequest { id }).await.unwrap();
        let err = service.get(IdRequest { id }).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "vehicle not found"));

        service.delete(IdRequest { id }).await.unwrap();
        assert!(repository.is_deleted(id).await);
        assert_eq!(repository.len().await, 1);
    }
}
