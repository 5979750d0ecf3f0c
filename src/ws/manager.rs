// Per-user WebSocket connection registry

use crate::metrics;
use std::collections::HashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

/// Handle to one live connection.
///
/// The transport task owns the socket and its lifecycle; the registry only
/// holds the sender side of the outbound channel for push delivery.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub id: Uuid,
    sender: UnboundedSender<String>,
}

impl ConnectionHandle {
    /// Create a handle plus the receiver the transport task drains into the
    /// socket.
    pub fn new() -> (Self, UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                id: Uuid::new_v4(),
                sender,
            },
            receiver,
        )
    }

    fn send(&self, message: &str) -> bool {
        self.sender.send(message.to_string()).is_ok()
    }
}

/// Maps user ids to their live connections for push delivery.
///
/// Invariant: a user key exists iff it has at least one live connection;
/// removing the last connection removes the key. Delivery failures are
/// isolated per connection and never abort delivery to the rest.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<i64, Vec<ConnectionHandle>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a connection under `user_id`, creating the entry if absent.
    pub async fn register(&self, user_id: i64, handle: ConnectionHandle) {
        debug!("Registering connection {} for user {}", handle.id, user_id);
        self.connections
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push(handle);
        metrics::record_ws_connection("opened");
    }

    /// Remove a connection. Idempotent: unknown users or connection ids are a
    /// no-op. The user key is dropped with its last connection.
    pub async fn unregister(&self, user_id: i64, connection_id: Uuid) {
        let mut connections = self.connections.write().await;
        if let Some(handles) = connections.get_mut(&user_id) {
            let before = handles.len();
            handles.retain(|h| h.id != connection_id);
            if handles.len() < before {
                debug!("Unregistered connection {} for user {}", connection_id, user_id);
                metrics::record_ws_connection("closed");
            }
            if handles.is_empty() {
                connections.remove(&user_id);
            }
        }
    }

    /// Deliver `message` to every connection of `user_id`, in registration
    /// order. A user with no entry is silently skipped — they may be offline.
    pub async fn send_to_user(&self, user_id: i64, message: &str) {
        let connections = self.connections.read().await;
        if let Some(handles) = connections.get(&user_id) {
            for handle in handles {
                let delivered = handle.send(message);
                metrics::record_ws_delivery(delivered);
                if !delivered {
                    warn!(
                        "Delivery to connection {} of user {} failed (peer gone)",
                        handle.id, user_id
                    );
                }
            }
        }
    }

    /// Deliver `message` to every connection of every user.
    pub async fn broadcast(&self, message: &str) {
        let connections = self.connections.read().await;
        for (user_id, handles) in connections.iter() {
            for handle in handles {
                let delivered = handle.send(message);
                metrics::record_ws_delivery(delivered);
                if !delivered {
                    warn!(
                        "Broadcast to connection {} of user {} failed (peer gone)",
                        handle.id, user_id
                    );
                }
            }
        }
    }

    /// Number of live connections registered for `user_id`.
    pub async fn connection_count(&self, user_id: i64) -> usize {
        self.connections
            .read()
            .await
            .get(&user_id)
            .map(|h| h.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_unregister() {
        let registry = ConnectionRegistry::new();
        let (first, _rx1) = ConnectionHandle::new();
        let (second, _rx2) = ConnectionHandle::new();
        let first_id = first.id;
        let second_id = second.id;

        registry.register(5, first).await;
        registry.register(5, second).await;
        assert_eq!(registry.connection_count(5).await, 2);

        registry.unregister(5, first_id).await;
        assert_eq!(registry.connection_count(5).await, 1);

        // Removing the last connection removes the user entry entirely
        registry.unregister(5, second_id).await;
        assert_eq!(registry.connection_count(5).await, 0);
        assert!(!registry.connections.read().await.contains_key(&5));
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        let registry = ConnectionRegistry::new();
        let (handle, _rx) = ConnectionHandle::new();
        let id = handle.id;

        registry.register(1, handle).await;
        registry.unregister(1, id).await;
        // Neither repeat nor unknown user panics or errors
        registry.unregister(1, id).await;
        registry.unregister(99, Uuid::new_v4()).await;
    }

    #[tokio::test]
    async fn test_send_to_offline_user_is_noop() {
        let registry = ConnectionRegistry::new();
        registry.send_to_user(5, "hello").await;
    }

    #[tokio::test]
    async fn test_send_to_user_in_registration_order() {
        let registry = ConnectionRegistry::new();
        let (first, mut rx1) = ConnectionHandle::new();
        let (second, mut rx2) = ConnectionHandle::new();

        registry.register(7, first).await;
        registry.register(7, second).await;
        registry.send_to_user(7, "ping").await;

        assert_eq!(rx1.recv().await.unwrap(), "ping");
        assert_eq!(rx2.recv().await.unwrap(), "ping");
    }

    #[tokio::test]
    async fn test_delivery_failure_is_isolated() {
        let registry = ConnectionRegistry::new();
        let (dead, rx_dead) = ConnectionHandle::new();
        let (live, mut rx_live) = ConnectionHandle::new();

        registry.register(3, dead).await;
        registry.register(3, live).await;
        drop(rx_dead); // peer disconnected mid-send

        registry.send_to_user(3, "still delivered").await;
        assert_eq!(rx_live.recv().await.unwrap(), "still delivered");
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_users() {
        let registry = ConnectionRegistry::new();
        let (a, mut rx_a) = ConnectionHandle::new();
        let (b, mut rx_b) = ConnectionHandle::new();

        registry.register(1, a).await;
        registry.register(2, b).await;
        registry.broadcast("notice").await;

        assert_eq!(rx_a.recv().await.unwrap(), "notice");
        assert_eq!(rx_b.recv().await.unwrap(), "notice");
    }
}
