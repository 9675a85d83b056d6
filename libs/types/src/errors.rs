//! Error taxonomy for the matching core
//!
//! Four classes of failure cross the storage seam: malformed input,
//! unknown entities, invariant conflicts, and transient backend
//! unavailability. Conflicts on match creation are resolved inside the
//! store (return the existing match) and must never reach a caller.

use crate::ids::{ItemId, SessionId};
use thiserror::Error;

/// Errors surfaced by the ledger/registry/match store interface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Malformed input, rejected before anything is recorded.
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    /// Unknown session.
    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: SessionId },

    /// Unknown catalog item.
    #[error("Item not found: {item_id}")]
    ItemNotFound { item_id: ItemId },

    /// An at-most-one invariant would be violated. Implementations
    /// resolve this internally for match creation; it only surfaces
    /// where a caller explicitly asked for a create, never a get-or-create.
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Backend temporarily unavailable. Swipe submissions are safe to
    /// retry: ledger writes are idempotent per (session, user, item, timestamp).
    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl StoreError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn session_not_found(session_id: &SessionId) -> Self {
        Self::SessionNotFound {
            session_id: session_id.clone(),
        }
    }

    pub fn item_not_found(item_id: &ItemId) -> Self {
        Self::ItemNotFound {
            item_id: item_id.clone(),
        }
    }
}
