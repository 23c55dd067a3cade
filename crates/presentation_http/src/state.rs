//! Application state shared across handlers

use std::{sync::Arc, time::Duration};

use application::{BusFinderService, BusSession};
use domain::SessionId;
use moka::future::Cache;
use parking_lot::Mutex;

/// A session shared between concurrent requests of the same user
pub type SharedSession = Arc<Mutex<BusSession>>;

/// Live sessions keyed by id
///
/// Entries are dropped after the configured idle time.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Cache<SessionId, SharedSession>,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.sessions.entry_count())
            .finish()
    }
}

impl SessionRegistry {
    /// Create a registry whose sessions expire after `idle` without use
    pub fn new(idle: Duration) -> Self {
        Self {
            sessions: Cache::builder().time_to_idle(idle).build(),
        }
    }

    /// Start a fresh session
    pub async fn create(&self) -> SessionId {
        let id = SessionId::new();
        self.sessions
            .insert(id, Arc::new(Mutex::new(BusSession::new())))
            .await;
        id
    }

    pub async fn get(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.get(id).await
    }

    /// End a session, returning whether it existed
    pub async fn remove(&self, id: &SessionId) -> bool {
        self.sessions.remove(id).await.is_some()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The bus finder use case
    pub bus_finder: Arc<BusFinderService>,
    /// Per-user sessions
    pub sessions: SessionRegistry,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("bus_finder", &self.bus_finder)
            .field("sessions", &self.sessions)
            .finish()
    }
}

impl AppState {
    pub fn new(bus_finder: BusFinderService, session_idle: Duration) -> Self {
        Self {
            bus_finder: Arc::new(bus_finder),
            sessions: SessionRegistry::new(session_idle),
        }
    }
}
