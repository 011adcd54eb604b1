use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use log::info;
use tokio::sync::Mutex as AsyncMutex;
use crate::models::draft_session::DraftSession;

/// A live conversation. Whoever holds its lock owns the current turn.
pub type SessionHandle = Arc<AsyncMutex<DraftSession>>;

struct SessionEntry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// Owns every live `DraftSession`, keyed by session id. The map lock only
/// covers lookups; a turn keeps its own session locked across awaits, so turns
/// on one session run one after another.
#[derive(Clone, Default)]
pub struct GlobalSessionManager {
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
}

impl GlobalSessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts or replaces a session
    pub fn insert(&self, session_id: String, session: DraftSession) {
        let entry = SessionEntry {
            handle: Arc::new(AsyncMutex::new(session)),
            last_seen: Instant::now(),
        };
        self.lock().insert(session_id, entry);
    }

    /// Looks a session up and marks it as used.
    pub fn handle(&self, session_id: &str) -> Option<SessionHandle> {
        let mut sessions = self.lock();
        let entry = sessions.get_mut(session_id)?;
        entry.last_seen = Instant::now();
        Some(Arc::clone(&entry.handle))
    }

    /// Copy of a session once any running turn on it has finished.
    pub async fn get(&self, session_id: &str) -> Option<DraftSession> {
        let handle = self.handle(session_id)?;
        let session = handle.lock().await.clone();
        Some(session)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.lock().contains_key(session_id)
    }

    /// Ends an interaction context. A turn still running on it finishes
    /// against its own handle and is not written back.
    pub fn remove(&self, session_id: &str) -> Option<SessionHandle> {
        self.lock().remove(session_id).map(|entry| entry.handle)
    }

    /// Drops sessions unused for at least `ttl`. Returns how many were dropped.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < ttl);
        before - sessions.len()
    }

    /// Sweeps idle sessions every `every` until the runtime shuts down.
    pub async fn run_eviction(self, ttl: Duration, every: Duration) {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let evicted = self.evict_idle(ttl);
            if evicted > 0 {
                info!("Evicted {} idle session(s); {} live", evicted, self.len());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
