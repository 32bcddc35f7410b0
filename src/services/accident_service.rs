use crate::events::DomainEvent;
use crate::models::{Accident, CreateAccidentRequest};
use crate::services::crud_service::{CrudService, Resource};

pub type AccidentService = CrudService<Accident>;

impl Resource for Accident {
    const NAME: &'static str = "accident";
    type Request = CreateAccidentRequest;

    fn from_request(request: CreateAccidentRequest) -> Self {
        Accident::from_request(request)
    }

    fn apply(&mut self, request: CreateAccidentRequest) {
        Accident::apply(self, request)
    }

    fn created_event(&self) -> Option<DomainEvent> {
        Some(DomainEvent::AccidentCreated {
            accident_id: self.meta.id,
            vehicle_a_id: self.party_a.vehicle_id,
            vehicle_b_id: self.party_b.vehicle_id,
            location: self.location.clone(),
            status: self.status.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::events::{EventBus, Queue};
    use crate::models::accident::tests::valid_request;
    use crate::repositories::MemoryRepository;
    use crate::services::crud_service::{IdRequest, UpdateRequest};
    use crate::utils::AppError;

    #[tokio::test]
    async fn test_create_get_round_trip_keeps_both_sides() {
        let service = AccidentService::new(Arc::new(MemoryRepository::<Accident>::new()));
        let created = service.create(valid_request()).await.unwrap();

        let fetched = service.get(IdRequest { id: created.meta.id }).await.unwrap();
        assert_eq!(fetched.party_a.impact_point, "arrière");
        assert_eq!(fetched.party_b.impact_point, "avant");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_missing_driver_a_persists_nothing() {
        let repository = Arc::new(MemoryRepository::<Accident>::new());
        let service = AccidentService::new(repository.clone());

        let mut request = valid_request();
        request.party_a.driver_id = 0;

        assert!(matches!(service.create(request).await, Err(AppError::Validation(_))));
        assert!(repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_replaces_status() {
        let service = AccidentService::new(Arc::new(MemoryRepository::<Accident>::new()));
        let created = service.create(valid_request()).await.unwrap();

        let updated = service
            .update(UpdateRequest {
                id: created.meta.id,
                body: CreateAccidentRequest {
                    status: "submitted".to_string(),
                    ..valid_request()
                },
            })
            .await
            .unwrap();
        assert_eq!(updated.status, "submitted");
        assert_eq!(updated.meta.id, created.meta.id);
    }

    #[tokio::test]
    async fn test_create_publishes_event() {
        let mut bus = EventBus::new();
        let mut receiver = bus.take_receiver(Queue::Accidents).unwrap();
        let service = AccidentService::new(Arc::new(MemoryRepository::<Accident>::new()))
            .with_events(bus.publisher());

        service.create(valid_request()).await.unwrap();

        let body = receiver.recv().await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["type"], "accident_created");
        assert_eq!(payload["vehicle_b_id"], 2);
    }
}
