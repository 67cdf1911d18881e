pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod settings;
pub mod state;
pub mod store;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::router;
use crate::settings::Settings;
use crate::state::AppState;
use crate::store::SqliteStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_directives(
            std::env::var("RUST_LOG").ok(),
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    let store = SqliteStore::connect(&settings).await?;

    let state = AppState {
        store: Arc::new(store),
        settings: settings.clone(),
    };

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Filter directives for the subscriber. Must be read after `.env` is loaded
/// so a `RUST_LOG` set there applies.
fn log_directives(rust_log: Option<String>) -> String {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| "yoga_sync=debug,tower_http=info".to_string())
}
