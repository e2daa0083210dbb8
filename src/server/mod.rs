//! HTTP surface of newtab.
//!
//! Routes translate form and query input into link store and favicon
//! resolver calls. Every successful mutation answers with a redirect to `/`.

pub mod assets;
pub mod handlers;
pub mod render;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::app::App;
use crate::types::errors::RouteError;

/// Builds the router with every route wired to `app`.
pub fn router(app: App) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/add", any(handlers::add_link))
        .route("/edit", any(handlers::edit_link))
        .route("/delete", any(handlers::delete_link))
        .route("/move", any(handlers::move_link))
        .route("/headers", get(handlers::echo_headers))
        .route("/static/:file", get(handlers::static_asset))
        .route("/favicon.ico", get(handlers::site_icon))
        .with_state(app)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(app: App) -> std::io::Result<()> {
    let addr = app.config.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = match &self {
            RouteError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RouteError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RouteError::NotFound(_) => StatusCode::NOT_FOUND,
            RouteError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!(%status, error = %self, "request failed");
        } else {
            debug!(%status, error = %self, "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
