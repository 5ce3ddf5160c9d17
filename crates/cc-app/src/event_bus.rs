//! In-process application event bus.
//!
//! Fan-out publish/subscribe over `tokio::sync::mpsc`. Every subscriber gets
//! its own unbounded channel so a slow consumer never blocks a publisher.

use std::sync::Arc;

use cc_core::AppEvent;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

#[derive(Clone, Default)]
pub struct AppEventBus {
    senders: Arc<Mutex<Vec<mpsc::UnboundedSender<AppEvent>>>>,
}

impl AppEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<AppEvent> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        self.senders.lock().await.push(event_tx);
        event_rx
    }

    /// Deliver `event` to every live subscriber. Closed subscribers are pruned.
    pub async fn publish(&self, event: AppEvent) {
        let mut senders = self.senders.lock().await;
        debug!(kind = event.kind(), subscribers = senders.len(), "publishing app event");
        senders.retain(|sender| {
            if sender.send(event.clone()).is_err() {
                debug!("app event receiver dropped");
                return false;
            }
            true
        });
    }

    pub async fn subscriber_count(&self) -> usize {
        self.senders.lock().await.len()
    }
}
