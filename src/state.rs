use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::services::{RosterService, RosterSession};
use crate::store::DocumentStore;

pub type SharedSession = Arc<Mutex<RosterSession>>;

struct SessionEntry {
    session: SharedSession,
    last_access: Instant,
}

/// Live roster sessions keyed by id. Each session is locked for the whole of
/// one operation, so its selection is never observed half-updated.
///
/// A session untouched for longer than the idle timeout is dropped: lazily on
/// `insert`/`get`, and periodically by [`SessionRegistry::spawn_reaper`].
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(idle_timeout: Duration) -> Self {
        SessionRegistry {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    pub async fn insert(&self, session: RosterSession) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let shared = Arc::new(Mutex::new(session));
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        Self::evict(&mut sessions, now, self.idle_timeout);
        sessions.insert(
            id,
            SessionEntry {
                session: shared.clone(),
                last_access: now,
            },
        );
        (id, shared)
    }

    /// Looks up a live session and marks it as used.
    pub async fn get(&self, id: Uuid) -> Result<SharedSession> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let entry = sessions.get_mut(&id).ok_or(AppError::SessionNotFound)?;
        if now.duration_since(entry.last_access) <= self.idle_timeout {
            entry.last_access = now;
            return Ok(entry.session.clone());
        }

        sessions.remove(&id);
        tracing::info!("Session {} expired", id);
        Err(AppError::SessionNotFound)
    }

    pub async fn remove(&self, id: Uuid) -> Result<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::SessionNotFound)
    }

    /// Drops every idle session and returns how many were dropped.
    pub async fn purge_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::evict(&mut sessions, Instant::now(), self.idle_timeout)
    }

    /// Runs [`SessionRegistry::purge_idle`] on a fixed interval.
    pub fn spawn_reaper(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let purged = registry.purge_idle().await;
                if purged > 0 {
                    tracing::info!("Purged {} idle sessions", purged);
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn evict(
        sessions: &mut HashMap<Uuid, SessionEntry>,
        now: Instant,
        idle_timeout: Duration,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_access) <= idle_timeout);
        before - sessions.len()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub roster: RosterService,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        let sessions = SessionRegistry::new(config.session_idle_timeout);
        AppState {
            config: Arc::new(config),
            roster: RosterService::new(store.clone()),
            store,
            sessions,
        }
    }

    pub fn new_session(&self) -> RosterSession {
        RosterSession::new(self.roster.clone())
    }
}
