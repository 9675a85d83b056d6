//! Match: the derived fact that quorum liked the same item
//!
//! A match is created exactly once per (session, item), the moment the
//! second distinct participant's like lands. Its participant set records
//! who had liked the item at creation time.

use crate::ids::{ItemId, MatchId, SessionId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub session_id: SessionId,
    pub item_id: ItemId,
    /// The session participants whose likes formed the quorum.
    pub participants: BTreeSet<UserId>,
    /// Unix millis
    pub created_at: i64,
}

impl Match {
    pub fn new(
        session_id: SessionId,
        item_id: ItemId,
        participants: BTreeSet<UserId>,
        created_at: i64,
    ) -> Self {
        Self {
            id: MatchId::new(),
            session_id,
            item_id,
            participants,
            created_at,
        }
    }

    pub fn includes(&self, user: &UserId) -> bool {
        self.participants.contains(user)
    }
}
