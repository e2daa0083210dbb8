use thiserror::Error;

// === DatabaseError ===

/// Errors raised while opening or verifying the database at startup.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The database file could not be read or created.
    #[error("Database I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file exists but does not carry the SQLite header.
    #[error("Invalid SQLite database file: {0}")]
    InvalidHeader(String),
    /// The database path points at something that is not a regular file.
    #[error("Database path is not a file: {0}")]
    NotAFile(String),
    /// A required table is absent after migrations ran.
    #[error("Database is not initialized or corrupted: missing table {0}")]
    MissingTable(String),
    /// SQLite reported an error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

// === LinkError ===

/// Errors related to link store operations.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Link with the given ID was not found.
    #[error("Link not found: {0}")]
    NotFound(i64),
    /// The target URL is empty.
    #[error("Link URL must not be empty")]
    InvalidHref,
    /// Database operation failed.
    #[error("Link database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for LinkError {
    fn from(e: rusqlite::Error) -> Self {
        LinkError::Database(e.to_string())
    }
}

// === ConfigError ===

/// Errors related to loading the service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for `Config`.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    /// An environment override holds an unusable value.
    #[error("Invalid value for {key}: {value}")]
    InvalidOverride { key: String, value: String },
}

// === FaviconError ===

/// Errors raised while building the favicon resolver.
///
/// Resolution itself never fails; these only occur at construction.
#[derive(Debug, Error)]
pub enum FaviconError {
    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// A matcher pattern failed to compile.
    #[error("Invalid icon matcher: {0}")]
    Pattern(#[from] regex::Error),
}

// === RouteError ===

/// Errors returned by HTTP route handlers.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Malformed or missing request input; nothing was mutated.
    #[error("{0}")]
    BadRequest(String),
    /// The route does not accept this HTTP method.
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// The addressed link does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The store rejected or failed the mutation.
    #[error("{0}")]
    Store(String),
}

impl From<LinkError> for RouteError {
    fn from(e: LinkError) -> Self {
        match e {
            LinkError::NotFound(id) => RouteError::NotFound(format!("Link not found: {}", id)),
            LinkError::InvalidHref => RouteError::BadRequest(e.to_string()),
            LinkError::Database(_) => RouteError::Store(e.to_string()),
        }
    }
}
