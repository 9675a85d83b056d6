//! Match Engine Service
//!
//! Decides when a quorum of session participants have independently
//! liked the same food item, and mints the Match fact exactly once.
//!
//! **Key Invariants:**
//! - Exactly one Match per (session, item), under any interleaving of
//!   concurrent or duplicated like submissions
//! - Quorum counts distinct *participants* of the session; likes from
//!   anyone else never contribute
//! - Last-write-wins per (session, user, item): the ledger's view of a
//!   user's current decision is the most recent swipe
//! - The engine reads sessions and the ledger; it writes only matches

pub mod engine;
pub mod store;

pub use engine::{MatchEngine, QUORUM};
pub use store::{MatchOutcome, Store};
