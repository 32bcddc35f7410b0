//! Eventos de dominio
//!
//! Bus en proceso con tres colas (`accidents`, `insurance`, `notifications`).
//! Los servicios publican sin esperar respuesta; los consumidores viven fuera
//! del núcleo y nunca propagan sus errores.

pub mod consumer;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};
use tracing::{debug, warn};

pub use consumer::{log_payload, spawn_consumer};

const QUEUE_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Queue {
    Accidents,
    Insurance,
    Notifications,
}

impl Queue {
    pub const ALL: [Queue; 3] = [Queue::Accidents, Queue::Insurance, Queue::Notifications];

    pub fn name(self) -> &'static str {
        match self {
            Queue::Accidents => "accidents",
            Queue::Insurance => "insurance",
            Queue::Notifications => "notifications",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    AccidentCreated {
        accident_id: u64,
        vehicle_a_id: u64,
        vehicle_b_id: u64,
        location: String,
        status: String,
    },
    InsuranceCreated {
        insurance_id: u64,
        vehicle_id: u64,
        company: String,
        policy_number: String,
    },
    Notification {
        user_id: u64,
        kind: String,
        message: String,
    },
}

impl DomainEvent {
    pub fn queue(&self) -> Queue {
        match self {
            DomainEvent::AccidentCreated { .. } => Queue::Accidents,
            DomainEvent::InsuranceCreated { .. } => Queue::Insurance,
            DomainEvent::Notification { .. } => Queue::Notifications,
        }
    }
}

/// Lado emisor del bus, barato de clonar
#[derive(Clone)]
pub struct EventPublisher {
    senders: Arc<HashMap<Queue, Sender<Vec<u8>>>>,
}

impl EventPublisher {
    /// Publica un evento como JSON. Un fallo solo se registra en el log
    pub fn publish(&self, event: &DomainEvent) {
        let queue = event.queue();
        let body = match serde_json::to_vec(event) {
            Ok(body) => body,
            Err(e) => {
                warn!(queue = queue.name(), "failed to serialize event: {}", e);
                return;
            }
        };

        let Some(sender) = self.senders.get(&queue) else {
            warn!(queue = queue.name(), "no sender registered for queue");
            return;
        };

        match sender.try_send(body) {
            Ok(()) => debug!(queue = queue.name(), "event published"),
            Err(TrySendError::Full(_)) => warn!(queue = queue.name(), "queue full, event dropped"),
            Err(TrySendError::Closed(_)) => {
                warn!(queue = queue.name(), "queue closed, event dropped")
            }
        }
    }
}

pub struct EventBus {
    publisher: EventPublisher,
    receivers: HashMap<Queue, Receiver<Vec<u8>>>,
}

impl EventBus {
    pub fn new() -> Self {
        let mut senders = HashMap::new();
        let mut receivers = HashMap::new();
        for queue in Queue::ALL {
            let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
            senders.insert(queue, tx);
            receivers.insert(queue, rx);
        }

        Self {
            publisher: EventPublisher {
                senders: Arc::new(senders),
            },
            receivers,
        }
    }

    pub fn publisher(&self) -> EventPublisher {
        self.publisher.clone()
    }

    /// Entrega el receptor de una cola; solo puede haber un consumidor por cola
    pub fn take_receiver(&mut self, queue: Queue) -> Option<Receiver<Vec<u8>>> {
        self.receivers.remove(&queue)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
