//! Presence/notification channel
//!
//! Maps each user to at most one active delivery endpoint (the write
//! half of their WebSocket, behind an unbounded channel). Delivery is
//! best-effort real-time notify: if the user has no endpoint the event
//! is dropped, never queued. Joins, leaves, and deliveries race with
//! swipe traffic, so the map is a concurrent DashMap.

use crate::models::ServerEvent;
use dashmap::DashMap;
use tokio::sync::mpsc;
use types::ids::{SessionId, UserId};

struct Endpoint {
    session_id: SessionId,
    tx: mpsc::UnboundedSender<ServerEvent>,
}

pub struct PresenceChannel {
    endpoints: DashMap<UserId, Endpoint>,
}

impl PresenceChannel {
    pub fn new() -> Self {
        Self {
            endpoints: DashMap::new(),
        }
    }

    /// Register `user`'s delivery endpoint, replacing any previous one.
    pub fn register(
        &self,
        user: UserId,
        session_id: SessionId,
        tx: mpsc::UnboundedSender<ServerEvent>,
    ) {
        self.endpoints.insert(user, Endpoint { session_id, tx });
    }

    /// Remove `user`'s endpoint only if it is still `tx`. A connection
    /// closing after the user re-joined from a new socket must not tear
    /// down the fresh endpoint.
    pub fn unregister_endpoint(
        &self,
        user: &UserId,
        tx: &mpsc::UnboundedSender<ServerEvent>,
    ) -> Option<SessionId> {
        self.endpoints
            .remove_if(user, |_, ep| ep.tx.same_channel(tx))
            .map(|(_, ep)| ep.session_id)
    }

    /// Deliver an event to `user` if reachable. Returns false when the
    /// user has no endpoint or the endpoint is dead (which also evicts it).
    pub fn deliver(&self, user: &UserId, event: ServerEvent) -> bool {
        let sent = match self.endpoints.get(user) {
            Some(ep) => ep.tx.send(event).is_ok(),
            None => return false,
        };
        if !sent {
            // Writer task is gone; drop the stale endpoint.
            self.endpoints.remove(user);
            tracing::debug!(%user, "evicted dead delivery endpoint");
        }
        sent
    }

    /// Best-effort fan-out; returns how many users were reached.
    pub fn fan_out<'a>(
        &self,
        users: impl IntoIterator<Item = &'a UserId>,
        event: &ServerEvent,
    ) -> usize {
        users
            .into_iter()
            .filter(|user| {
                let delivered = self.deliver(user, event.clone());
                if !delivered {
                    tracing::debug!(user = %user, "participant unreachable, event dropped");
                }
                delivered
            })
            .count()
    }

    pub fn is_online(&self, user: &UserId) -> bool {
        self.endpoints.contains_key(user)
    }
}

impl Default for PresenceChannel {
    fn default() -> Self {
        Self::new()
    }
}
