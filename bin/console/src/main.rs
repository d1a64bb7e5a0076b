use std::sync::Arc;

use learnly_console::{AppState, backend_http::HttpAuthBackend, config::ConsoleConfig, routes};
use learnly_session::{FileStore, SessionManager, SessionStore};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ConsoleConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    // Permission rules: JSON document when configured, compiled defaults
    // otherwise
    let rules = config.load_rules().expect("failed to load permission rules");

    // Session state is re-derived synchronously from durable storage before
    // anything renders
    let store: Box<dyn SessionStore> = Box::new(FileStore::new(&config.session.storage_path));
    let sessions = SessionManager::new(store);
    tracing::info!(
        authenticated = sessions.check_status().is_authenticated(),
        "Restored session state"
    );

    let backend = HttpAuthBackend::new(&config.api.base_url);
    let state = Arc::new(AppState::new(sessions, Box::new(backend), rules));

    // Spawn the periodic unread-notification poll
    let poll_state = state.clone();
    let poll_interval_secs = config.notifications.unread_interval_seconds;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(poll_interval_secs));
        loop {
            interval.tick().await;
            let Some(identity) = poll_state.sessions.check_status().identity().cloned() else {
                continue;
            };
            match poll_state
                .backend
                .unread_count(identity.token().as_str(), identity.role().tag())
                .await
            {
                Ok(count) => {
                    tracing::debug!(count, "Unread notification poll");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to poll unread notifications");
                }
            }
        }
    });

    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
