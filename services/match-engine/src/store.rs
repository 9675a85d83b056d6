//! Storage interface for the matching core
//!
//! One seam covers the three keyspaces the engine needs: the swipe
//! ledger, the session registry, and the match store. The engine depends
//! only on this trait; a concrete adapter is chosen at deployment time.
//!
//! Implementations must uphold:
//! - `record_swipe` applies last-write-wins per (session, user, item) by
//!   `swiped_at`, never failing except on malformed input
//! - `get_or_create_session` is symmetric in the user pair and keeps at
//!   most one active session per unordered pair + category
//! - `create_match_if_absent` is an atomic check-and-create — a
//!   read-then-write race that could mint two matches for the same
//!   (session, item) is a broken implementation

use async_trait::async_trait;
use std::collections::BTreeSet;
use types::errors::StoreError;
use types::ids::{ItemId, SessionId, UserId};
use types::matches::Match;
use types::session::{Category, Session};
use types::swipe::SwipeEvent;

/// Outcome of an atomic match check-and-create.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// This call won the race and created the match.
    Created(Match),
    /// A match for the (session, item) already existed; conflict resolved
    /// internally, the existing record is returned.
    Existing(Match),
}

impl MatchOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, MatchOutcome::Created(_))
    }

    pub fn into_match(self) -> Match {
        match self {
            MatchOutcome::Created(m) | MatchOutcome::Existing(m) => m,
        }
    }
}

/// Ledger + registry + match store capability set.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    // --- Swipe ledger ---

    /// Append a swipe fact. Last-write-wins per (session, user, item).
    async fn record_swipe(&self, swipe: &SwipeEvent) -> Result<(), StoreError>;

    /// Users whose most recent swipe on (session, item) is a like.
    async fn likes_for(
        &self,
        session_id: &SessionId,
        item_id: &ItemId,
    ) -> Result<BTreeSet<UserId>, StoreError>;

    /// Effective swipes in a session, optionally narrowed to one user.
    async fn swipes_for_session(
        &self,
        session_id: &SessionId,
        user_id: Option<&UserId>,
    ) -> Result<Vec<SwipeEvent>, StoreError>;

    // --- Session registry ---

    /// Return the active session for the unordered pair + category,
    /// creating one if none exists. `(a, b)` and `(b, a)` resolve to the
    /// same session.
    async fn get_or_create_session(
        &self,
        a: &UserId,
        b: &UserId,
        category: Category,
        filters: BTreeSet<String>,
    ) -> Result<Session, StoreError>;

    async fn session(&self, session_id: &SessionId) -> Result<Session, StoreError>;

    async fn participants_of(
        &self,
        session_id: &SessionId,
    ) -> Result<BTreeSet<UserId>, StoreError>;

    /// Mark a session terminal. Idempotent: completing twice is a no-op.
    async fn complete_session(&self, session_id: &SessionId) -> Result<(), StoreError>;

    // --- Match store ---

    /// Atomically create the match for (session, item) unless one exists.
    async fn create_match_if_absent(
        &self,
        session_id: &SessionId,
        item_id: &ItemId,
        participants: BTreeSet<UserId>,
        created_at: i64,
    ) -> Result<MatchOutcome, StoreError>;

    async fn matches_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Match>, StoreError>;

    /// Matches in a session whose participant set includes `user_id`.
    async fn matches_for_user(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<Vec<Match>, StoreError> {
        let matches = self.matches_for_session(session_id).await?;
        Ok(matches.into_iter().filter(|m| m.includes(user_id)).collect())
    }
}
