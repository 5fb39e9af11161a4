//! Shared session state with change notifications.

use std::sync::Arc;

use carousel_core::CarouselSession;
use tokio::sync::{broadcast, RwLock};

use crate::event::StudioEvent;

/// Buffered events per subscriber; slow subscribers drop the oldest.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Shared handle to one studio session.
///
/// All mutation happens inside closures holding the write lock, so
/// completion handlers apply atomically and in completion order; the
/// broadcast channel tells renderers what changed.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session: Arc<RwLock<CarouselSession>>,
    events: broadcast::Sender<StudioEvent>,
}

impl SessionHandle {
    /// Create a handle around a fresh idle session.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session: Arc::new(RwLock::new(CarouselSession::new())),
            events,
        }
    }

    /// Subscribe to change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StudioEvent> {
        self.events.subscribe()
    }

    /// Clone the current session state.
    pub async fn snapshot(&self) -> CarouselSession {
        self.session.read().await.clone()
    }

    /// Run a closure against the session read-locked.
    pub async fn read<R>(&self, f: impl FnOnce(&CarouselSession) -> R) -> R {
        f(&*self.session.read().await)
    }

    /// Run a closure against the session write-locked.
    pub async fn update<R>(&self, f: impl FnOnce(&mut CarouselSession) -> R) -> R {
        f(&mut *self.session.write().await)
    }

    /// Broadcast an event. No receivers is fine.
    pub fn emit(&self, event: StudioEvent) {
        let _ = self.events.send(event);
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_is_visible_to_read() {
        let handle = SessionHandle::new();
        handle
            .update(|s| s.begin_submission("a topic").map(|_| ()))
            .await
            .expect("topic");
        let topic = handle.read(|s| s.topic().to_string()).await;
        assert_eq!(topic, "a topic");
    }

    #[tokio::test]
    async fn test_events_reach_subscribers() {
        let handle = SessionHandle::new();
        let mut rx = handle.subscribe();
        handle.emit(StudioEvent::PlanReady);
        assert_eq!(rx.recv().await.expect("event"), StudioEvent::PlanReady);
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_is_fine() {
        let handle = SessionHandle::new();
        handle.emit(StudioEvent::PlanReady);
    }
}
