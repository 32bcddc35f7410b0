use std::panic::{self, AssertUnwindSafe};

use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::Queue;

/// Lanza el bucle de consumo de una cola.
///
/// Cada mensaje se registra y se pasa al handler; los errores y los panics
/// del handler se registran y el bucle continúa. La tarea termina cuando se
/// cierran todos los emisores y devuelve el número de mensajes procesados.
pub fn spawn_consumer<H>(queue: Queue, mut receiver: Receiver<Vec<u8>>, handler: H) -> JoinHandle<usize>
where
    H: Fn(&[u8]) -> anyhow::Result<()> + Send + 'static,
{
    tokio::spawn(async move {
        info!("Started consuming messages from queue {}", queue.name());
        let mut processed = 0;

        while let Some(body) = receiver.recv().await {
            info!(
                "Received message from queue {}: {}",
                queue.name(),
                String::from_utf8_lossy(&body)
            );

            match panic::catch_unwind(AssertUnwindSafe(|| handler(&body))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Error handling message from queue {}: {:#}", queue.name(), e),
                Err(_) => error!("Handler for queue {} panicked", queue.name()),
            }
            processed += 1;
        }

        info!("Queue {} closed after {} messages", queue.name(), processed);
        processed
    })
}

/// Handler por defecto: comprueba que el payload sea JSON y lo registra
pub fn log_payload(queue: Queue) -> impl Fn(&[u8]) -> anyhow::Result<()> + Send + 'static {
    move |body| {
        let event: serde_json::Value = serde_json::from_slice(body)?;
        info!("Processing {} event: {}", queue.name(), event);
        Ok(())
    }
}
