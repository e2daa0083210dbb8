// newtab platform paths for macOS
// Config and data: ~/Library/Application Support/newtab

use std::env;
use std::path::PathBuf;

use super::APP_DIR_NAME;

fn application_support() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
}

/// `~/Library/Application Support/newtab`
pub fn get_config_dir() -> PathBuf {
    application_support().join(APP_DIR_NAME)
}

/// `~/Library/Application Support/newtab`
pub fn get_data_dir() -> PathBuf {
    application_support().join(APP_DIR_NAME)
}
