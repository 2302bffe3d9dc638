use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use super::PushEvent;

/// Fan-out point between the push transport and feed instances.
///
/// Each listing session (dropdown, full page) subscribes independently;
/// dropping the returned `PushSubscription` unregisters it, so a session
/// that ends without explicit cleanup cannot leak a handler.
#[derive(Clone, Default)]
pub struct PushHub {
    inner: Arc<Mutex<HubInner>>,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    senders: HashMap<u64, mpsc::UnboundedSender<PushEvent>>,
}

impl PushHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a consumer. Events published after this call are delivered
    /// in publish order.
    pub fn subscribe(&self) -> PushSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.senders.insert(id, tx);
            id
        };
        PushSubscription {
            id,
            hub: Arc::clone(&self.inner),
            rx,
        }
    }

    /// Deliver an event to every live subscriber.
    pub fn publish(&self, event: PushEvent) {
        let mut inner = self.inner.lock();
        inner
            .senders
            .retain(|id, tx| match tx.send(event.clone()) {
                Ok(()) => true,
                Err(_) => {
                    debug!(subscriber = *id, "removing closed push subscriber");
                    false
                }
            });
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().senders.len()
    }
}

/// A registered push consumer; unregisters itself on drop.
pub struct PushSubscription {
    id: u64,
    hub: Arc<Mutex<HubInner>>,
    rx: mpsc::UnboundedReceiver<PushEvent>,
}

impl PushSubscription {
    /// Next event in arrival order. `None` once the subscription has been
    /// closed from the hub side.
    pub async fn recv(&mut self) -> Option<PushEvent> {
        self.rx.recv().await
    }
}

impl Drop for PushSubscription {
    fn drop(&mut self) {
        self.hub.lock().senders.remove(&self.id);
    }
}
