//! Storage adapter for the meal matching service
//!
//! Implements the match-engine `Store` interface over in-process
//! concurrent maps. Four keyspaces:
//!
//! - swipes keyed by (session, item) → per-user latest fact
//! - sessions keyed by id, with a secondary index
//!   (participant pair, category) → session id
//! - matches keyed by (session, item)
//! - food catalog keyed by item id
//!
//! The (session, item) keying makes the quorum check an indexed lookup,
//! and the match keyspace's entry-level locking gives the atomic
//! check-and-create the engine relies on.

pub mod catalog;
pub mod memory;

pub use memory::MemStore;
