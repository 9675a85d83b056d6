//! Swipe facts: one user's yes/no decision on one item
//!
//! Swipe events are immutable once recorded. The ledger applies
//! last-write-wins per (session, user, item): a later swipe supersedes
//! an earlier one for matching purposes, it never mutates it.

use crate::errors::StoreError;
use crate::ids::{ItemId, SessionId, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Current wall clock in Unix milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// An immutable swipe fact scoped to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeEvent {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub item_id: ItemId,
    pub liked: bool,
    /// Unix millis; ties break toward the later arrival.
    pub swiped_at: i64,
}

impl SwipeEvent {
    /// Create a swipe fact timestamped now.
    pub fn new(session_id: SessionId, user_id: UserId, item_id: ItemId, liked: bool) -> Self {
        Self {
            session_id,
            user_id,
            item_id,
            liked,
            swiped_at: now_ms(),
        }
    }

    /// Reject structurally empty identifiers before they reach the ledger.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.session_id.is_empty() {
            return Err(StoreError::validation("session_id must not be empty"));
        }
        if self.user_id.is_empty() {
            return Err(StoreError::validation("user_id must not be empty"));
        }
        if self.item_id.is_empty() {
            return Err(StoreError::validation("item_id must not be empty"));
        }
        Ok(())
    }
}
