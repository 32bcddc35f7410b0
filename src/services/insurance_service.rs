use crate::events::DomainEvent;
use crate::models::{CreateInsuranceRequest, Insurance};
use crate::services::crud_service::{CrudService, Resource};

pub type InsuranceService = CrudService<Insurance>;

impl Resource for Insurance {
    const NAME: &'static str = "insurance";
    type Request = CreateInsuranceRequest;

    fn from_request(request: CreateInsuranceRequest) -> Self {
        Insurance::from_request(request)
    }

    fn apply(&mut self, request: CreateInsuranceRequest) {
        Insurance::apply(self, request)
    }

    fn created_event(&self) -> Option<DomainEvent> {
        Some(DomainEvent::InsuranceCreated {
            insurance_id: self.meta.id,
            vehicle_id: self.vehicle_id,
            company: self.company.clone(),
            policy_number: self.policy_number.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::events::{EventBus, Queue};
    use crate::models::insurance::tests::valid_request;
    use crate::repositories::MemoryRepository;
    use crate::services::crud_service::{IdRequest, UpdateRequest};
    use crate::utils::AppError;

    fn service() -> InsuranceService {
        InsuranceService::new(Arc::new(MemoryRepository::<Insurance>::new()))
    }

    #[tokio::test]
    async fn test_update_coverage_keeps_policy_number() {
        let service = service();
        let created = service.create(valid_request()).await.unwrap();

        let updated = service
            .update(UpdateRequest {
                id: created.meta.id,
                body: CreateInsuranceRequest {
                    coverage_type: "tous risques".to_string(),
                    ..valid_request()
                },
            })
            .await
            .unwrap();
        assert_eq!(updated.coverage_type, "tous risques");

        let fetched = service.get(IdRequest { id: created.meta.id }).await.unwrap();
        assert_eq!(fetched.coverage_type, "tous risques");
        assert_eq!(fetched.policy_number, created.policy_number);
        assert_eq!(fetched.meta.created_at, created.meta.created_at);
    }

    #[tokio::test]
    async fn test_missing_validity_window_is_rejected() {
        let service = service();
        let request = CreateInsuranceRequest {
            valid_to: None,
            ..valid_request()
        };
        let err = service.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_publishes_event() {
        let mut bus = EventBus::new();
        let mut receiver = bus.take_receiver(Queue::Insurance).unwrap();
        let service = service().with_events(bus.publisher());

        let created = service.create(valid_request()).await.unwrap();

        let body = receiver.recv().await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["type"], "insurance_created");
        assert_eq!(payload["insurance_id"], created.meta.id);
        assert_eq!(payload["company"], "SAA");
    }
}
