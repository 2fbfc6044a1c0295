// src/sessions.rs

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
    time::{Duration, Instant},
};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::quiz::session::Session;

/// Handle to one session. Holding the lock serializes transitions.
pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Debug)]
struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// Live sessions keyed by id, one per client.
///
/// The outer lock only guards the map; each session has its own async
/// mutex so a transition that awaits the store blocks nobody else.
/// Sessions untouched for longer than `ttl` are evicted: lazily on lookup,
/// and in a sweep on every `create`.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    ttl: Duration,
}

impl SessionRegistry {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

    pub fn new() -> Self {
        Self::with_ttl(Self::DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Registers a fresh `NotStarted` session and returns its id.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= self.ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} idle sessions", evicted);
        }

        sessions.insert(
            id,
            Entry {
                handle: Arc::new(Mutex::new(Session::new())),
                last_seen: now,
            },
        );
        tracing::debug!("Session {} created ({} live)", id, sessions.len());
        id
    }

    /// Looks up a live session and marks it as used.
    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        let now = Instant::now();
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let expired = now.duration_since(sessions.get(id)?.last_seen) > self.ttl;
        if expired {
            sessions.remove(id);
            tracing::debug!("Session {} expired", id);
            return None;
        }

        let entry = sessions.get_mut(id)?;
        entry.last_seen = now;
        Some(entry.handle.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
