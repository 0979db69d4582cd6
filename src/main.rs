//! Seva Portal - command-line dashboard client.
//!
//! Restores the stored session (signing in with configured credentials when
//! none is stored), guards the dashboard for the session's role and prints
//! the loaded sections as JSON.

use std::sync::Arc;

use seva_portal::config::Config;
use seva_portal::logging;
use seva_portal::navigation::RedirectLog;
use seva_portal::notify::TracingNotifier;
use seva_portal::portal::{Credentials, Dashboard, Portal};
use seva_portal::session::{FileSessionStore, Session};
use seva_portal::{ApiClient, SessionGuard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    logging::init();

    tracing::info!("Starting Seva Portal client v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!(base_url = %config.api.base_url, "Configuration loaded");

    let store = Arc::new(FileSessionStore::open(&config.session.store_path).map_err(|e| {
        tracing::error!(error = %e, "Failed to open session store");
        anyhow::anyhow!("Session store error: {}", e)
    })?);
    tracing::info!(path = %store.path().display(), "Session store ready");
    let navigator = Arc::new(RedirectLog::new());

    let client = ApiClient::new(
        &config.api,
        config.navigation.login_path.clone(),
        store.clone(),
        navigator.clone(),
        Arc::new(TracingNotifier),
    )?;
    let portal = Portal::new(client);
    let guard = SessionGuard::new(
        store.clone(),
        navigator.clone(),
        config.navigation.login_path.clone(),
    );

    if !Session::load(store.as_ref()).is_authenticated() {
        if let Some(login) = &config.login {
            portal
                .login(&Credentials {
                    username: login.username.clone(),
                    password: login.password.clone(),
                })
                .await?;
        }
    }

    let session = match guard.check_auth(None) {
        Ok(session) => session,
        Err(rejection) => {
            tracing::warn!(
                %rejection,
                redirect = navigator.last().as_deref().unwrap_or_default(),
                "Sign in required"
            );
            return Ok(());
        }
    };

    let Some(role) = session.role() else {
        tracing::warn!(
            role = session.role.as_deref().unwrap_or("none"),
            "Stored role has no dashboard"
        );
        return Ok(());
    };

    match Dashboard::open(&guard, &portal, role).await {
        Ok(dashboard) => {
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
        Err(e) if e.is_redirect() => {
            tracing::warn!(
                error = %e,
                redirect = navigator.last().as_deref().unwrap_or_default(),
                "Session ended while loading dashboard"
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
