// newtab platform abstraction
// Provides platform-specific locations for the database and config file.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Directory name used under the platform base directories.
pub const APP_DIR_NAME: &str = "newtab";

/// Returns the platform-specific configuration directory for newtab.
///
/// - **Linux**: `~/.config/newtab` (or `$XDG_CONFIG_HOME/newtab`)
/// - **macOS**: `~/Library/Application Support/newtab`
/// - **Windows**: `%APPDATA%/newtab`
/// - anything else: `./newtab`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from(APP_DIR_NAME)
    }
}

/// Returns the platform-specific data directory, where the database lives.
///
/// - **Linux**: `~/.local/share/newtab` (or `$XDG_DATA_HOME/newtab`)
/// - **macOS**: `~/Library/Application Support/newtab`
/// - **Windows**: `%APPDATA%/newtab`
/// - anything else: `./newtab`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from(APP_DIR_NAME)
    }
}
