//! App Core for newtab.
//!
//! Central state shared by every route handler: the store, the favicon
//! resolver and the configuration. Cloning is cheap; all parts are behind `Arc`.

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::config::Config;
use crate::database::connection::Database;
use crate::managers::link_manager::LinkManager;
use crate::services::favicon_resolver::FaviconResolver;
use crate::types::errors::LinkError;

/// Application state injected into handlers.
///
/// The database lock is only held while SQL runs; favicon fetches happen
/// outside it so a slow site never stalls other requests.
#[derive(Clone)]
pub struct App {
    pub db: Arc<Mutex<Database>>,
    pub resolver: Arc<FaviconResolver>,
    pub config: Arc<Config>,
}

impl App {
    /// Opens and verifies the database, then builds the resolver.
    ///
    /// Any error here is fatal for the process.
    pub fn new(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(&config.database_path)?;
        db.verify_schema()?;
        let resolver = FaviconResolver::new(config.resolver_settings())?;
        info!(database = %config.database_path.display(), "application state ready");
        Ok(Self::from_parts(db, resolver, config))
    }

    /// Assembles state from already-built parts. Used by tests with in-memory databases.
    pub fn from_parts(db: Database, resolver: FaviconResolver, config: Config) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            resolver: Arc::new(resolver),
            config: Arc::new(config),
        }
    }

    /// Runs `op` with a `LinkManager` while holding the database lock.
    pub fn with_links<T, F>(&self, op: F) -> Result<T, LinkError>
    where
        F: FnOnce(&mut LinkManager<'_>) -> Result<T, LinkError>,
    {
        let db = self
            .db
            .lock()
            .map_err(|e| LinkError::Database(format!("database lock poisoned: {}", e)))?;
        let mut manager = LinkManager::new(db.connection());
        op(&mut manager)
    }
}
