//! newtab server entry point.
//!
//! Loads configuration, opens and verifies the database, then serves HTTP.
//! Any startup failure is logged and terminates the process with status 1.

use newtab::app::App;
use newtab::config::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `newtab=debug`.
const LOG_ENV: &str = "NEWTAB_LOG";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "starting newtab");

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "database startup check failed");
            std::process::exit(1);
        }
    };

    if let Err(e) = newtab::server::serve(app).await {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}
