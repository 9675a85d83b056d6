//! Types library for the meal matching service
//!
//! This library provides all core type definitions used across the
//! service crates: the swipe ledger, the session registry, the match
//! engine, and the gateway boundary all speak these types.
//!
//! # Modules
//! - `ids`: Unique identifiers (UserId, ItemId, SessionId, MatchId)
//! - `swipe`: Swipe event facts and timestamping
//! - `session`: Session pairing types (Category, PairKey, Session)
//! - `matches`: Derived match facts
//! - `item`: Food catalog entries
//! - `errors`: Error taxonomy

// Public modules
pub mod errors;
pub mod ids;
pub mod item;
pub mod matches;
pub mod session;
pub mod swipe;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::item::*;
    pub use crate::matches::*;
    pub use crate::session::*;
    pub use crate::swipe::*;
}
