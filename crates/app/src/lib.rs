//! Lustre storefront client composition root
//!
//! Wires configuration, the session backend, the session store, the root
//! navigator and the seller API client into one application value.

use lustre_api::{ApiClient, ApiConfig, Resource};
use lustre_auth::Identity;
use lustre_common::{Config, Error};
use lustre_session::{
    Location, Navigator, Route, RootNavigator, SessionBackend, SessionBackendFactory,
    SessionStore,
};

/// Default location when the routing framework reports nothing yet
pub const DEFAULT_LOCATION: &str = "/(tabs)";

pub struct App<N: Navigator> {
    config: Config,
    backend: Box<dyn SessionBackend>,
    root: RootNavigator<N>,
    api: ApiClient,
}

/// Create the application from configuration
pub fn create_app<N: Navigator>(
    config: Config,
    navigator: N,
    initial: Location,
) -> Result<App<N>, anyhow::Error> {
    let backend = SessionBackendFactory::create(&config)?;
    let api = ApiClient::new(ApiConfig::from(&config))?;
    Ok(App::with_backend(config, backend, navigator, initial, api))
}

impl<N: Navigator> App<N> {
    pub fn with_backend(
        config: Config,
        backend: Box<dyn SessionBackend>,
        navigator: N,
        initial: Location,
        api: ApiClient,
    ) -> Self {
        Self {
            config,
            backend,
            root: RootNavigator::new(SessionStore::new(), navigator, initial),
            api,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        self.root.store()
    }

    pub fn location(&self) -> &Location {
        self.root.location()
    }

    pub fn current_user(&mut self) -> Option<&Identity> {
        self.root.current_user()
    }

    /// Run the startup auth check and apply the first guard decision
    pub async fn start(&mut self) -> Option<Route> {
        self.root.start(self.backend.as_ref()).await
    }

    /// Apply a navigation reported by the routing framework
    pub fn navigate(&mut self, location: Location) -> Option<Route> {
        self.root.set_location(location)
    }

    pub fn login(&mut self, token: impl Into<String>) -> Option<Route> {
        self.root.store().login(token);
        self.root.evaluate()
    }

    pub fn logout(&mut self) -> Option<Route> {
        self.root.store().logout();
        self.root.evaluate()
    }

    /// Fetch a seller collection with the session token.
    ///
    /// Requires a signed-in seller.
    pub async fn list_seller_items(
        &mut self,
        resource: Resource,
    ) -> Result<Vec<serde_json::Value>, Error> {
        let token = self
            .root
            .store()
            .token()
            .ok_or_else(|| Error::Authentication("Please sign in to continue.".to_string()))?;

        if !self.root.current_user().is_some_and(Identity::is_seller) {
            return Err(Error::Authentication(
                "A seller account is required.".to_string(),
            ));
        }

        Ok(self.api.resource(resource).list(&token).await?)
    }
}
