//! Session identity store using actor pattern.
//!
//! Replaces ambient global storage for "who is signed in". It tracks:
//! - The signed-in identity (user id, role, display name)
//! - Change notifications for every component that shows identity or role
//!
//! # Architecture
//!
//! - Commands are sent via an mpsc channel and acknowledged once applied
//! - A dedicated task processes commands sequentially
//! - Reads use Arc<RwLock<T>> for concurrent access
//! - Changes are announced on a broadcast channel ([`SessionEvent`])
//!
//! Persistence is optional: when a directory is given, the identity is
//! written to `session.json` on sign-in and removed on sign-out/expiry.

pub mod persist;

use crate::error::session::SessionError;

use common::ErrorLocation;
use models::SessionIdentity;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info, warn};
use tokio::sync::{Mutex, RwLock, broadcast, mpsc, oneshot};

const COMMAND_CHANNEL_CAPACITY: usize = 32;
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Commands that mutate session state.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Login succeeded.
    SignIn(SessionIdentity),

    /// User chose to log out.
    SignOut,

    /// The server answered 401; identity is stale.
    Expire,
}

/// Broadcast to every subscriber after a command has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(SessionIdentity),
    SignedOut,
    /// Session was invalidated by the server; the UI should route to login.
    Expired,
}

type Envelope = (SessionCommand, oneshot::Sender<()>);

/// Session store shared by the API client and every view.
///
/// This type is `Clone`; all clones share the same underlying state.
#[derive(Clone)]
pub struct SessionStore {
    command_tx: Arc<Mutex<Option<mpsc::Sender<Envelope>>>>,
    identity: Arc<RwLock<Option<SessionIdentity>>>,
    events: broadcast::Sender<SessionEvent>,
    persist_path: Option<Arc<PathBuf>>,
    actor_init: Arc<Mutex<bool>>,
}

impl SessionStore {
    /// In-memory store; nothing touches disk.
    pub fn new() -> Self {
        Self::with_state(None, None)
    }

    /// Store backed by `{dir}/session.json`, restoring a previous sign-in.
    pub fn with_persistence(dir: &Path) -> Result<Self, SessionError> {
        let path = persist::session_file(dir);
        let restored = persist::load(&path)?;

        if let Some(ref identity) = restored {
            info!(
                "Restored session for user {} ({})",
                identity.user_id, identity.role
            );
        }

        Ok(Self::with_state(restored, Some(path)))
    }

    fn with_state(identity: Option<SessionIdentity>, persist_path: Option<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            command_tx: Arc::new(Mutex::new(None)),
            identity: Arc::new(RwLock::new(identity)),
            events,
            persist_path: persist_path.map(Arc::new),
            actor_init: Arc::new(Mutex::new(false)),
        }
    }

    /// Current identity (read-only snapshot).
    pub async fn current(&self) -> Option<SessionIdentity> {
        self.identity.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.identity.read().await.is_some()
    }

    /// Receive every change applied after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn sign_in(&self, identity: SessionIdentity) -> Result<(), SessionError> {
        self.update(SessionCommand::SignIn(identity)).await
    }

    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.update(SessionCommand::SignOut).await
    }

    pub async fn expire(&self) -> Result<(), SessionError> {
        self.update(SessionCommand::Expire).await
    }

    /// Send a command and wait until the actor has applied it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Actor`] if the state actor has died.
    pub async fn update(&self, cmd: SessionCommand) -> Result<(), SessionError> {
        self.ensure_actor().await;

        let (ack_tx, ack_rx) = oneshot::channel();
        {
            let tx_guard = self.command_tx.lock().await;
            let tx = tx_guard.as_ref().ok_or_else(|| SessionError::Actor {
                message: "Session actor not initialized".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

            tx.send((cmd, ack_tx))
                .await
                .map_err(|e| SessionError::Actor {
                    message: format!("Session actor died: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        ack_rx.await.map_err(|e| SessionError::Actor {
            message: format!("Session actor dropped command: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    async fn ensure_actor(&self) {
        let mut init_guard = self.actor_init.lock().await;
        if !*init_guard {
            let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);

            let mut tx_guard = self.command_tx.lock().await;
            *tx_guard = Some(tx);
            drop(tx_guard);

            tokio::spawn(session_actor(
                rx,
                Arc::clone(&self.identity),
                self.events.clone(),
                self.persist_path.clone(),
            ));
            *init_guard = true;
            info!("Session actor spawned");
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

async fn session_actor(
    mut command_rx: mpsc::Receiver<Envelope>,
    identity: Arc<RwLock<Option<SessionIdentity>>>,
    events: broadcast::Sender<SessionEvent>,
    persist_path: Option<Arc<PathBuf>>,
) {
    info!("Session actor started");

    while let Some((cmd, ack)) = command_rx.recv().await {
        let event = match cmd {
            SessionCommand::SignIn(new_identity) => {
                {
                    let mut identity_write = identity.write().await;
                    if let Some(ref existing) = *identity_write {
                        warn!(
                            "Replacing session of user {} with user {}",
                            existing.user_id, new_identity.user_id
                        );
                    }
                    *identity_write = Some(new_identity.clone());
                }
                info!(
                    "Signed in user {} as {}",
                    new_identity.user_id, new_identity.role
                );

                if let Some(path) = persist_path.as_deref() {
                    if let Err(e) = persist::save(path, &new_identity) {
                        error!("Session updated in memory but disk write failed: {}", e);
                    }
                }

                SessionEvent::SignedIn(new_identity)
            }
            SessionCommand::SignOut => {
                clear_identity(&identity, persist_path.as_deref()).await;
                SessionEvent::SignedOut
            }
            SessionCommand::Expire => {
                clear_identity(&identity, persist_path.as_deref()).await;
                SessionEvent::Expired
            }
        };

        // No subscribers is fine.
        let _ = events.send(event);
        let _ = ack.send(());
    }

    warn!("Session actor stopped");
}

async fn clear_identity(identity: &RwLock<Option<SessionIdentity>>, persist_path: Option<&PathBuf>) {
    let previous = identity.write().await.take();
    match previous {
        Some(old) => info!("Cleared session of user {}", old.user_id),
        None => warn!("Session clear requested but nobody was signed in"),
    }

    if let Some(path) = persist_path {
        if let Err(e) = persist::clear(path) {
            error!("Session cleared in memory but file removal failed: {}", e);
        }
    }
}
