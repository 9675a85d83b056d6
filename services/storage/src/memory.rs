//! In-memory store over DashMap keyspaces
//!
//! Every cross-key invariant is enforced under a single DashMap entry
//! guard: last-write-wins under the (session, item) swipe entry, pair
//! uniqueness under the pair-index entry, match exactly-once under the
//! (session, item) match entry. No invariant relies on a read followed
//! by a separate write.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::{BTreeSet, HashMap};

use match_engine::store::{MatchOutcome, Store};
use types::errors::StoreError;
use types::ids::{ItemId, SessionId, UserId};
use types::item::FoodItem;
use types::matches::Match;
use types::session::{Category, PairKey, Session};
use types::swipe::SwipeEvent;

use crate::catalog;

/// A user's effective decision on one (session, item).
#[derive(Debug, Clone, Copy)]
struct SwipeFact {
    liked: bool,
    swiped_at: i64,
}

/// Concurrent in-memory storage adapter.
pub struct MemStore {
    /// (session, item) → user → latest swipe fact
    swipes: DashMap<(SessionId, ItemId), HashMap<UserId, SwipeFact>>,
    sessions: DashMap<SessionId, Session>,
    /// Active-session uniqueness index. May hold a completed session's id
    /// until the next lookup for that pair replaces it.
    pair_index: DashMap<(PairKey, Category), SessionId>,
    matches: DashMap<(SessionId, ItemId), Match>,
    items: DashMap<ItemId, FoodItem>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            swipes: DashMap::new(),
            sessions: DashMap::new(),
            pair_index: DashMap::new(),
            matches: DashMap::new(),
            items: DashMap::new(),
        }
    }

    /// New store pre-loaded with the sample food catalog.
    pub fn with_catalog() -> Self {
        let store = Self::new();
        for item in catalog::seed_items() {
            store.items.insert(item.id.clone(), item);
        }
        store
    }

    pub fn insert_item(&self, item: FoodItem) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn item(&self, item_id: &ItemId) -> Result<FoodItem, StoreError> {
        self.items
            .get(item_id)
            .map(|i| i.value().clone())
            .ok_or_else(|| StoreError::item_not_found(item_id))
    }

    /// Candidate items for a session: category match plus tag filters.
    /// Sorted by id for a stable listing order.
    pub fn items_by_category(
        &self,
        category: Category,
        filters: &BTreeSet<String>,
    ) -> Vec<FoodItem> {
        let mut items: Vec<FoodItem> = self
            .items
            .iter()
            .filter(|entry| entry.category == category && entry.matches_filters(filters))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn record_swipe(&self, swipe: &SwipeEvent) -> Result<(), StoreError> {
        swipe.validate()?;

        let key = (swipe.session_id.clone(), swipe.item_id.clone());
        let mut facts = self.swipes.entry(key).or_default();
        let fact = facts
            .entry(swipe.user_id.clone())
            .or_insert(SwipeFact {
                liked: false,
                swiped_at: i64::MIN,
            });
        // Last-write-wins; ties go to the later arrival.
        if swipe.swiped_at >= fact.swiped_at {
            *fact = SwipeFact {
                liked: swipe.liked,
                swiped_at: swipe.swiped_at,
            };
        } else {
            tracing::debug!(
                session_id = %swipe.session_id,
                user_id = %swipe.user_id,
                item_id = %swipe.item_id,
                "stale swipe superseded by a later fact, ignored"
            );
        }
        Ok(())
    }

    async fn likes_for(
        &self,
        session_id: &SessionId,
        item_id: &ItemId,
    ) -> Result<BTreeSet<UserId>, StoreError> {
        Ok(self
            .swipes
            .get(&(session_id.clone(), item_id.clone()))
            .map(|facts| {
                facts
                    .iter()
                    .filter(|(_, fact)| fact.liked)
                    .map(|(user, _)| user.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn swipes_for_session(
        &self,
        session_id: &SessionId,
        user_id: Option<&UserId>,
    ) -> Result<Vec<SwipeEvent>, StoreError> {
        let mut swipes: Vec<SwipeEvent> = self
            .swipes
            .iter()
            .filter(|entry| &entry.key().0 == session_id)
            .flat_map(|entry| {
                let item_id = entry.key().1.clone();
                entry
                    .value()
                    .iter()
                    .filter(|(user, _)| user_id.map_or(true, |u| u == *user))
                    .map(|(user, fact)| SwipeEvent {
                        session_id: session_id.clone(),
                        user_id: user.clone(),
                        item_id: item_id.clone(),
                        liked: fact.liked,
                        swiped_at: fact.swiped_at,
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        swipes.sort_by_key(|s| s.swiped_at);
        Ok(swipes)
    }

    async fn get_or_create_session(
        &self,
        a: &UserId,
        b: &UserId,
        category: Category,
        filters: BTreeSet<String>,
    ) -> Result<Session, StoreError> {
        if a.is_empty() || b.is_empty() {
            return Err(StoreError::validation("participant ids must not be empty"));
        }
        if a == b {
            return Err(StoreError::validation("participants must be distinct"));
        }

        let key = (PairKey::new(a.clone(), b.clone()), category);
        // The index entry guard serializes concurrent lookups for the same
        // pair, so two simultaneous joins resolve to one session.
        match self.pair_index.entry(key) {
            Entry::Occupied(mut indexed) => {
                let active = self
                    .sessions
                    .get(indexed.get())
                    .filter(|s| !s.value().completed)
                    .map(|s| s.value().clone());
                if let Some(session) = active {
                    return Ok(session);
                }
                // Indexed session was completed: start a fresh one.
                let session = Session::new(
                    a.clone(),
                    b.clone(),
                    category,
                    filters,
                    types::swipe::now_ms(),
                );
                self.sessions.insert(session.id.clone(), session.clone());
                indexed.insert(session.id.clone());
                Ok(session)
            }
            Entry::Vacant(slot) => {
                let session = Session::new(
                    a.clone(),
                    b.clone(),
                    category,
                    filters,
                    types::swipe::now_ms(),
                );
                self.sessions.insert(session.id.clone(), session.clone());
                slot.insert(session.id.clone());
                tracing::debug!(session_id = %session.id, %category, "session created");
                Ok(session)
            }
        }
    }

    async fn session(&self, session_id: &SessionId) -> Result<Session, StoreError> {
        self.sessions
            .get(session_id)
            .map(|s| s.value().clone())
            .ok_or_else(|| StoreError::session_not_found(session_id))
    }

    async fn participants_of(
        &self,
        session_id: &SessionId,
    ) -> Result<BTreeSet<UserId>, StoreError> {
        Ok(self.session(session_id).await?.participants)
    }

    async fn complete_session(&self, session_id: &SessionId) -> Result<(), StoreError> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| StoreError::session_not_found(session_id))?;
        session.completed = true;
        Ok(())
    }

    async fn create_match_if_absent(
        &self,
        session_id: &SessionId,
        item_id: &ItemId,
        participants: BTreeSet<UserId>,
        created_at: i64,
    ) -> Result<MatchOutcome, StoreError> {
        let key = (session_id.clone(), item_id.clone());
        // Entry-level lock: the losing caller observes the winner's match.
        match self.matches.entry(key) {
            Entry::Occupied(existing) => Ok(MatchOutcome::Existing(existing.get().clone())),
            Entry::Vacant(slot) => {
                let m = Match::new(
                    session_id.clone(),
                    item_id.clone(),
                    participants,
                    created_at,
                );
                slot.insert(m.clone());
                Ok(MatchOutcome::Created(m))
            }
        }
    }

    async fn matches_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Match>, StoreError> {
        let mut matches: Vec<Match> = self
            .matches
            .iter()
            .filter(|entry| &entry.key().0 == session_id)
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|m| m.created_at);
        Ok(matches)
    }
}
