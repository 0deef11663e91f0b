// Lustre - Local route guard driver
//
// Usage: local [PATH]... [--list=RESOURCE]
//
// The first path is where the app opens; every further path is a navigation.
// The startup auth check runs against the configured session backend.

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use lustre_api::Resource;
use lustre_app::{create_app, DEFAULT_LOCATION};
use lustre_common::Config;
use lustre_session::{Location, RecordingNavigator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .pretty()
        .init();

    let mut paths = Vec::new();
    let mut listing = None;
    for arg in std::env::args().skip(1) {
        match arg.strip_prefix("--list=") {
            Some(resource) => listing = Some(resource.parse::<Resource>()?),
            None => paths.push(arg),
        }
    }

    let mut paths = paths.into_iter();
    let initial = Location::parse(&paths.next().unwrap_or_else(|| DEFAULT_LOCATION.to_string()));

    info!(
        provider = %config.session_provider,
        location = %initial,
        "Starting Lustre client"
    );

    let navigator = RecordingNavigator::new();
    let mut app = create_app(config, navigator.clone(), initial).map_err(|e| {
        error!("Failed to create application: {}", e);
        e
    })?;

    app.start().await;

    let authenticated = app.session().is_authenticated();
    match app.current_user() {
        Some(user) => info!(id = user.id, role = %user.role, name = %user.name, "Signed in"),
        None if authenticated => {
            warn!("Session token present but unreadable")
        }
        None => info!("Browsing as guest"),
    }

    for path in paths {
        app.navigate(Location::parse(&path));
    }

    if let Some(resource) = listing {
        match app.list_seller_items(resource).await {
            Ok(items) => info!(resource = %resource, count = items.len(), "Fetched seller items"),
            Err(e) => warn!(code = e.error_code(), "{}", e.user_message()),
        }
    }

    info!(
        location = %app.location(),
        redirects = navigator.recorded_routes().len(),
        "Done"
    );
    Ok(())
}
