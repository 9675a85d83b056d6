//! Match engine core
//!
//! Main coordinator for the swipe → quorum → match pipeline.
//!
//! Exactly-once creation is delegated to the store's atomic
//! check-and-create; the engine itself is stateless and safe to call
//! concurrently from any number of boundary tasks.

use std::collections::BTreeSet;
use std::sync::Arc;

use types::errors::StoreError;
use types::ids::{ItemId, SessionId, UserId};
use types::matches::Match;
use types::swipe::{now_ms, SwipeEvent};

use crate::store::{MatchOutcome, Store};

/// Minimum count of distinct session participants whose like counts
/// toward a match.
pub const QUORUM: usize = 2;

/// Stateless coordinator over a storage adapter.
pub struct MatchEngine<S> {
    store: Arc<S>,
}

impl<S> Clone for MatchEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store> MatchEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Run the full swipe pipeline: validate, record, and on a like,
    /// evaluate quorum for the (session, item).
    ///
    /// Returns `Some(Match)` only for the call that first reaches quorum.
    /// The session is resolved before the ledger write so that a swipe
    /// against an unknown session records nothing at all.
    pub async fn submit_swipe(&self, swipe: &SwipeEvent) -> Result<Option<Match>, StoreError> {
        swipe.validate()?;
        let participants = self.store.participants_of(&swipe.session_id).await?;

        self.store.record_swipe(swipe).await?;
        tracing::debug!(
            session_id = %swipe.session_id,
            user_id = %swipe.user_id,
            item_id = %swipe.item_id,
            liked = swipe.liked,
            "swipe recorded"
        );

        if !swipe.liked {
            return Ok(None);
        }
        self.evaluate(&swipe.session_id, &swipe.item_id, &participants)
            .await
    }

    /// Evaluate quorum for (session, item) after `liking_user`'s like has
    /// already been recorded in the ledger.
    pub async fn on_like(
        &self,
        session_id: &SessionId,
        item_id: &ItemId,
        liking_user: &UserId,
    ) -> Result<Option<Match>, StoreError> {
        let participants = self.store.participants_of(session_id).await?;
        // A like from outside the session can never form a quorum.
        if !participants.contains(liking_user) {
            return Ok(None);
        }
        self.evaluate(session_id, item_id, &participants).await
    }

    async fn evaluate(
        &self,
        session_id: &SessionId,
        item_id: &ItemId,
        participants: &BTreeSet<UserId>,
    ) -> Result<Option<Match>, StoreError> {
        let likes = self.store.likes_for(session_id, item_id).await?;
        let liking_participants: BTreeSet<UserId> =
            likes.intersection(participants).cloned().collect();

        if liking_participants.len() < QUORUM {
            return Ok(None);
        }

        match self
            .store
            .create_match_if_absent(session_id, item_id, liking_participants, now_ms())
            .await?
        {
            MatchOutcome::Created(m) => {
                tracing::info!(
                    match_id = %m.id,
                    session_id = %m.session_id,
                    item_id = %m.item_id,
                    "match created"
                );
                Ok(Some(m))
            }
            // Lost the race or duplicate like: the match already exists.
            MatchOutcome::Existing(_) => Ok(None),
        }
    }
}
