pub mod advisory;
pub mod cycle;
pub mod history;
pub mod session;
pub mod thresholds;

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use uuid::Uuid;

use crate::auth::{authenticated_user::AuthenticatedUser, claim::TOKEN_LEEWAY_SECONDS};
use crate::config::IrrigationConfig;
use crate::repository::Repo;

pub use session::{CropSoil, CycleStatus, IrrigationError, IrrigationSession, StopPolicy};

pub type SessionHandle = Arc<Mutex<IrrigationSession>>;

/// A cycle that was accepted and is now ticking in the background.
#[derive(Debug)]
pub struct Started {
    pub status: CycleStatus,
    pub task: JoinHandle<()>,
}

struct LiveSession {
    expires_at: i64,
    handle: SessionHandle,
}

#[derive(Default)]
struct Sessions {
    live: HashMap<Uuid, LiveSession>,
    /// Logged-out session ids, kept until their tokens would have expired anyway.
    ended: HashMap<Uuid, i64>,
}

impl Sessions {
    /// Drops every session whose token can no longer authenticate. The evicted handles
    /// are returned so their cycles can be cancelled outside the map lock.
    fn prune(&mut self, now: i64) -> Vec<SessionHandle> {
        self.ended
            .retain(|_, expires_at| !is_expired(*expires_at, now));

        let expired: Vec<Uuid> = self
            .live
            .iter()
            .filter(|(_, live)| is_expired(live.expires_at, now))
            .map(|(id, _)| *id)
            .collect();

        expired
            .iter()
            .filter_map(|id| self.live.remove(id))
            .map(|live| live.handle)
            .collect()
    }
}

fn is_expired(expires_at: i64, now: i64) -> bool {
    expires_at + TOKEN_LEEWAY_SECONDS < now
}

/// Owns the irrigation state of every login session and spawns their cycles.
///
/// Sessions are keyed by the session id carried in the bearer token, so one user logged in
/// twice gets two independent completed-sets. A session lives until logout or until its
/// token expires.
#[derive(Clone)]
pub struct Irrigator {
    config: IrrigationConfig,
    repo: Repo,
    sessions: Arc<Mutex<Sessions>>,
}

impl Irrigator {
    pub fn new(repo: Repo, config: IrrigationConfig) -> Self {
        Self {
            config,
            repo,
            sessions: Arc::new(Mutex::new(Sessions::default())),
        }
    }

    /// Returns the caller's session, creating an empty one on first use.
    pub async fn session(&self, user: &AuthenticatedUser) -> SessionHandle {
        let (handle, evicted) = {
            let mut sessions = self.sessions.lock().await;
            let evicted = sessions.prune(Utc::now().timestamp());
            let handle = sessions
                .live
                .entry(user.session_id)
                .or_insert_with(|| LiveSession {
                    expires_at: user.expires_at,
                    handle: Arc::new(Mutex::new(IrrigationSession::new(
                        user.session_id,
                        user.username.clone(),
                    ))),
                })
                .handle
                .clone();
            (handle, evicted)
        };

        cancel_all(evicted).await;
        handle
    }

    /// True once the session has logged out.
    pub async fn is_ended(&self, session_id: Uuid) -> bool {
        self.sessions.lock().await.ended.contains_key(&session_id)
    }

    #[tracing::instrument(skip(self, user), fields(session = %user.session_id))]
    pub async fn start(
        &self,
        user: &AuthenticatedUser,
        key: CropSoil,
        moisture_level: i32,
    ) -> Result<Started, IrrigationError> {
        let handle = self.session(user).await;

        let (run, status) = {
            let mut session = handle.lock().await;
            let run = session.begin(&key, moisture_level)?;
            (run, session.status(&key))
        };

        let tick = Duration::from_millis(self.config.tick_interval_ms);
        let task = tokio::spawn(cycle::run_cycle(handle, key, run, tick, self.repo));

        Ok(Started { status, task })
    }

    #[tracing::instrument(skip(self, user), fields(session = %user.session_id))]
    pub async fn stop(&self, user: &AuthenticatedUser, key: &CropSoil) -> CycleStatus {
        let handle = self.session(user).await;
        let mut session = handle.lock().await;
        session.stop(key, self.config.stop_policy);

        session.status(key)
    }

    #[tracing::instrument(skip(self, user), fields(session = %user.session_id))]
    pub async fn reset(&self, user: &AuthenticatedUser, key: &CropSoil) -> CycleStatus {
        let handle = self.session(user).await;
        let mut session = handle.lock().await;
        session.reset(key);

        session.status(key)
    }

    pub async fn status(&self, user: &AuthenticatedUser, key: &CropSoil) -> CycleStatus {
        let handle = self.session(user).await;
        let session = handle.lock().await;

        session.status(key)
    }

    /// Every key the session has touched.
    pub async fn statuses(&self, session_id: Uuid) -> Vec<CycleStatus> {
        let (handle, evicted) = {
            let mut sessions = self.sessions.lock().await;
            let evicted = sessions.prune(Utc::now().timestamp());
            let handle = sessions.live.get(&session_id).map(|live| live.handle.clone());
            (handle, evicted)
        };
        cancel_all(evicted).await;

        match handle {
            Some(handle) => handle.lock().await.statuses(),
            None => Vec::new(),
        }
    }

    /// Drops the session, cancels its running cycle, and refuses its token from now on.
    #[tracing::instrument(skip(self, user), fields(session = %user.session_id))]
    pub async fn end_session(&self, user: &AuthenticatedUser) {
        let live = {
            let mut sessions = self.sessions.lock().await;
            sessions.ended.insert(user.session_id, user.expires_at);
            sessions.live.remove(&user.session_id)
        };

        if let Some(live) = live {
            live.handle.lock().await.stop_all();
        }
    }
}

async fn cancel_all(handles: Vec<SessionHandle>) {
    for handle in handles {
        let mut session = handle.lock().await;
        tracing::debug!(
            target = module_path!(),
            session = %session.id,
            "Evicting expired irrigation session"
        );
        session.stop_all();
    }
}
