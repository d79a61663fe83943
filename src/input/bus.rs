//! Pointer event fan-out
//!
//! The host publishes every pointer event once; each live subscriber gets
//! its own unbounded queue. A `Subscription` unsubscribes itself when
//! dropped, so listeners are released on every exit path.

use crate::input::types::PointerEvent;
use parking_lot::Mutex as ParkingMutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

type Subscribers = ParkingMutex<HashMap<Uuid, UnboundedSender<PointerEvent>>>;

/// Host-side event source
#[derive(Debug, Clone, Default)]
pub struct PointerEventBus {
    subscribers: Arc<Subscribers>,
}

impl PointerEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.subscribers.lock().insert(id, tx);

        tracing::debug!("Pointer listener {} subscribed", id);
        Subscription {
            id,
            receiver: rx,
            bus: Arc::downgrade(&self.subscribers),
        }
    }

    /// Deliver `event` to every subscriber, returning how many received it
    pub fn publish(&self, event: PointerEvent) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|id, tx| {
            let delivered = tx.send(event.clone()).is_ok();
            if !delivered {
                tracing::debug!("Dropping closed pointer listener {}", id);
            }
            delivered
        });
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

/// Scoped listener registration
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    receiver: UnboundedReceiver<PointerEvent>,
    bus: Weak<Subscribers>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the next event; `None` once the bus is gone
    pub async fn recv(&mut self) -> Option<PointerEvent> {
        self.receiver.recv().await
    }

    /// Next queued event without waiting
    pub fn try_recv(&mut self) -> Option<PointerEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Explicitly release the listener (same as dropping it)
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.bus.upgrade() {
            subscribers.lock().remove(&self.id);
            tracing::debug!("Pointer listener {} unsubscribed", self.id);
        }
    }
}
