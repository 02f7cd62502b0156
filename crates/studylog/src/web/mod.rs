//! Web front end for studylog.
//!
//! Server-rendered pages for browsing and adding records:
//!
//! | Route | Methods |
//! |---|---|
//! | `/` | GET |
//! | `/projects` | GET, POST |
//! | `/subjects` | GET, POST |
//! | `/observations` | GET, POST |
//! | `/observations/{subject_number}` | GET |
//!
//! Every POST answers with a redirect to the matching GET route carrying a
//! one-shot status message (see [`flash`]).

pub mod flash;
mod handlers;
pub mod pages;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::service::Services;

pub use flash::{Flash, FlashLevel, FlashQuery, Outcome};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The record services.
    pub services: Services,
}

/// Build the application router.
#[must_use]
pub fn router(services: Services) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/subjects",
            get(handlers::list_subjects).post(handlers::create_subject),
        )
        .route(
            "/observations",
            get(handlers::list_observations).post(handlers::create_observation),
        )
        .route(
            "/observations/{subject_number}",
            get(handlers::view_subject_observations),
        )
        .with_state(AppState { services })
}

/// Run the web server until interrupted.
///
/// # Errors
///
/// Returns an error if the bind address is invalid, the data directory cannot
/// be created, or the listener fails.
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.bind_addr()?;
    let services = Services::from_config(config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(services))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            return (StatusCode::NOT_FOUND, self.to_string()).into_response();
        }
        if self.is_user_error() {
            return (StatusCode::BAD_REQUEST, self.to_string()).into_response();
        }

        error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}
