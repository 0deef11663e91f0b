//! Process-wide session state
//!
//! One writer path (`login`, `logout`, `mark_ready`), any number of readers.
//! Readers either take a snapshot or subscribe for change notifications.

use std::sync::Arc;

use tokio::sync::watch;

/// Point-in-time view of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    /// Set once the startup auth check has settled
    pub ready: bool,
}

impl SessionSnapshot {
    /// Authenticated means a token is present. Validity is not checked here.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Shared session store. Cloning yields another handle to the same state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.tx.borrow().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated()
    }

    pub fn is_ready(&self) -> bool {
        self.tx.borrow().ready
    }

    /// Store a token after sign-in or re-authentication.
    ///
    /// An empty token is a logout.
    pub fn login(&self, token: impl Into<String>) {
        let token = token.into();
        if token.trim().is_empty() {
            self.logout();
            return;
        }

        let changed = self.tx.send_if_modified(|session| {
            if session.token.as_deref() == Some(token.as_str()) {
                return false;
            }
            session.token = Some(token);
            true
        });
        if changed {
            tracing::info!("Session token stored");
        }
    }

    /// Drop the current token
    pub fn logout(&self) {
        let changed = self.tx.send_if_modified(|session| session.token.take().is_some());
        if changed {
            tracing::info!("Session token cleared");
        }
    }

    /// Latch readiness. There is no way back to not-ready.
    pub fn mark_ready(&self) {
        self.tx.send_if_modified(|session| {
            if session.ready {
                return false;
            }
            session.ready = true;
            true
        });
    }

    /// Receive a notification on every session change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
