use crate::presence::PresenceChannel;
use match_engine::MatchEngine;
use std::sync::Arc;
use storage::MemStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemStore>,
    pub engine: MatchEngine<MemStore>,
    pub presence: Arc<PresenceChannel>,
}

impl AppState {
    pub fn new() -> Self {
        let store = Arc::new(MemStore::with_catalog());
        Self {
            engine: MatchEngine::new(Arc::clone(&store)),
            store,
            presence: Arc::new(PresenceChannel::new()),
        }
    }
}
