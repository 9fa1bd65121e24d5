//! # HTTP Server for Check-in and Label Configuration
//!
//! Exposes the configuration service, label previews, attendee check-in and
//! the print bridge over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! gafete serve --listen 0.0.0.0:8080 --bridge-url http://127.0.0.1:8182
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET, POST, PUT, DELETE | `/api/label-config` | configuration service |
//! | POST | `/api/label/preview` | render without printing |
//! | GET, POST | `/api/attendees` | search, add |
//! | POST | `/api/attendees/bulk` | upsert by external id |
//! | PATCH, DELETE | `/api/attendees/:id` | edit, remove |
//! | POST | `/api/attendees/:id/check-in` | check in and print |
//! | POST | `/api/attendees/:id/reprint` | print again |
//! | POST | `/api/reset` | clear attendees |
//! | GET, PUT | `/api/preferences` | printer and station |
//! | GET | `/api/bridge/cert` | relay certificate |
//! | GET | `/api/bridge/printers` | relay printers |

mod handlers;
mod state;

pub use handlers::ApiError;
pub use state::{AppState, CONFIGURATIONS_FILE, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::GafeteError;

/// Build the API router over shared state.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Configuration service
        .route(
            "/api/label-config",
            get(handlers::label_config::get)
                .post(handlers::label_config::create)
                .put(handlers::label_config::update)
                .delete(handlers::label_config::delete),
        )
        .route("/api/label/preview", post(handlers::label::preview))
        // Attendees
        .route(
            "/api/attendees",
            get(handlers::attendees::search).post(handlers::attendees::create),
        )
        .route("/api/attendees/bulk", post(handlers::attendees::upsert_many))
        .route(
            "/api/attendees/:id",
            axum::routing::patch(handlers::attendees::update)
                .delete(handlers::attendees::delete),
        )
        .route(
            "/api/attendees/:id/check-in",
            post(handlers::attendees::check_in),
        )
        .route(
            "/api/attendees/:id/reprint",
            post(handlers::attendees::reprint),
        )
        .route("/api/reset", post(handlers::attendees::reset))
        // Workstation
        .route(
            "/api/preferences",
            get(handlers::preferences::get).put(handlers::preferences::set),
        )
        // Print bridge
        .route("/api/bridge/cert", get(handlers::bridge::cert))
        .route("/api/bridge/printers", get(handlers::bridge::printers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use gafete::server::{serve, ServerConfig};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), gafete::error::GafeteError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     data_dir: "/var/lib/gafete".into(),
///     bridge_url: Some("http://127.0.0.1:8182".to_string()),
///     cert_path: None,
///     checkin_cooldown: Duration::from_secs(3),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), GafeteError> {
    let state = Arc::new(AppState::new(config.clone())?);
    let app = create_router(state);

    tracing::info!(
        listen = %config.listen_addr,
        data_dir = %config.data_dir.display(),
        bridge = config.bridge_url.as_deref().unwrap_or("disabled"),
        "gafete HTTP server starting"
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            GafeteError::Transport(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| GafeteError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
