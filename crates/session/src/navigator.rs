//! Root navigation controller
//!
//! Owns the identity cache, runs the startup auth check, and re-evaluates
//! the route guard whenever the session or the location changes.

use std::sync::{Arc, Mutex};

use lustre_auth::{is_expired, try_decode, Identity, IdentityCache};
use tokio::sync::watch;

use crate::backend::SessionBackend;
use crate::guard::{GuardContext, Location, Route, RouteGuard};
use crate::store::SessionStore;

/// Applies redirects in the host routing framework
pub trait Navigator: Send + Sync {
    fn replace(&self, route: Route);
}

/// Navigator that records redirects instead of performing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    routes: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all recorded redirects.
    pub fn recorded_routes(&self) -> Vec<Route> {
        match self.routes.lock() {
            Ok(routes) => routes.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, route: Route) {
        match self.routes.lock() {
            Ok(mut routes) => routes.push(route),
            Err(e) => tracing::error!(error = %e, "Navigator routes lock poisoned"),
        }
    }
}

pub struct RootNavigator<N: Navigator> {
    store: SessionStore,
    identities: IdentityCache,
    navigator: N,
    location: Location,
}

impl<N: Navigator> RootNavigator<N> {
    pub fn new(store: SessionStore, navigator: N, initial: Location) -> Self {
        Self {
            store,
            identities: IdentityCache::new(),
            navigator,
            location: initial,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Identity for the token currently in the store
    pub fn current_user(&mut self) -> Option<&Identity> {
        let token = self.store.token();
        self.identities.resolve(token.as_deref())
    }

    /// Run the startup auth check, latch readiness, and apply the first guard
    /// decision.
    ///
    /// A failed check is logged and treated as signed out; readiness is set
    /// regardless so the app never waits on it forever. A restored token that
    /// decodes but has expired is dropped. One that cannot be decoded is kept:
    /// the session counts as authenticated without an identity.
    pub async fn start(&mut self, backend: &dyn SessionBackend) -> Option<Route> {
        match backend.check_auth().await {
            Ok(Some(token)) => match try_decode(&token) {
                Err(e) => {
                    tracing::warn!(error = %e, "Persisted session token is unreadable; restoring without identity");
                    self.store.login(token);
                }
                Ok(_) if is_expired(&token) => {
                    tracing::info!("Persisted session has expired; starting signed out");
                    self.store.logout();
                }
                Ok(_) => {
                    tracing::info!("Persisted session restored");
                    self.store.login(token);
                }
            },
            Ok(None) => {
                tracing::debug!("No persisted session");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session check failed; continuing signed out");
            }
        }

        self.store.mark_ready();
        self.evaluate()
    }

    /// Record a navigation reported by the routing framework
    pub fn set_location(&mut self, location: Location) -> Option<Route> {
        self.location = location;
        self.evaluate()
    }

    /// Re-evaluate the guard against the current session and location
    pub fn evaluate(&mut self) -> Option<Route> {
        let session = self.store.snapshot();
        let current_user = self.identities.resolve(session.token.as_deref());

        let context = GuardContext {
            app_ready: session.ready,
            is_authenticated: session.is_authenticated(),
            current_user,
        };
        let redirect = RouteGuard::evaluate(&context, &self.location)?;

        tracing::info!(from = %self.location, to = %redirect, "Redirecting");
        self.navigator.replace(redirect);
        self.location = redirect.location();
        Some(redirect)
    }

    /// Guard routes until the location feed closes.
    pub async fn run(mut self, mut locations: watch::Receiver<Location>) {
        let mut session = self.store.subscribe();
        self.location = locations.borrow_and_update().clone();
        self.evaluate();

        loop {
            tokio::select! {
                changed = session.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let _ = session.borrow_and_update();
                }
                changed = locations.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.location = locations.borrow_and_update().clone();
                }
            }
            self.evaluate();
        }

        tracing::debug!("Location feed closed; route guard stopped");
    }
}
